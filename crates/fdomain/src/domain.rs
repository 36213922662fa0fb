//! End-to-end pipeline: symbol → glued graph → radius → positioned corners.

use crate::cfg::FdCfg;
use crate::coords::{compute_dist, place_coordinates, relax, trace_fd, Coords};
use crate::error::Result;
use crate::geom::Geometry;
use crate::glue::{glue, Graph};
use crate::radius::{solve_radius, RadiusSolution};
use crate::symbol::DSymbol;

/// Fully laid-out fundamental domain of a symbol.
#[derive(Clone, Debug)]
pub struct FundamentalDomain {
    pub graph: Graph,
    pub coords: Coords,
    pub radius: RadiusSolution,
    /// Whether relaxation reached a fixed point (true when skipped).
    pub converged: bool,
}

/// Compact overview of a built domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainSummary {
    pub geometry: Geometry,
    pub radius: f64,
    pub crv: f64,
    pub def: f64,
    pub chi: i64,
    pub chr: i64,
    pub orientable: bool,
    pub i_min: Option<u32>,
    pub i_max: Option<u32>,
    pub nodes: usize,
    pub edges: usize,
    pub orbits: usize,
    pub boundary: usize,
    pub converged: bool,
}

impl FundamentalDomain {
    /// Glue, trace, solve, place and relax.
    pub fn build(sym: &DSymbol, cfg: &FdCfg) -> Result<Self> {
        Self::build_with(sym, cfg, true)
    }

    /// As [`build`](Self::build), optionally skipping relaxation.
    pub fn build_with(sym: &DSymbol, cfg: &FdCfg, relaxed: bool) -> Result<Self> {
        let mut graph = glue(sym, cfg)?;
        let mut coords = trace_fd(&graph)?;
        let radius = solve_radius(&mut graph, cfg);
        place_coordinates(&graph, &mut coords, cfg);
        let converged = if relaxed {
            relax(&mut graph, &mut coords, cfg)
        } else {
            compute_dist(&mut graph, &mut coords);
            true
        };
        tracing::info!(
            geometry = graph.geometry().name(),
            radius = radius.radius,
            boundary = coords.boundary.len(),
            converged,
            "domain built"
        );
        Ok(Self {
            graph,
            coords,
            radius,
            converged,
        })
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.graph.geometry()
    }

    pub fn summary(&self) -> DomainSummary {
        let inv = &self.graph.inv;
        DomainSummary {
            geometry: inv.geometry,
            radius: self.radius.radius,
            crv: inv.crv,
            def: inv.def,
            chi: inv.chi,
            chr: inv.chr,
            orientable: inv.orientable,
            i_min: inv.i_min,
            i_max: inv.i_max,
            nodes: self.graph.nodes.len(),
            edges: self.graph.edges.len(),
            orbits: self.graph.orbits.len(),
            boundary: self.coords.boundary.len(),
            converged: self.converged,
        }
    }
}
