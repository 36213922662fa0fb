//! Gluing engine: turns a symbol into a connected incidence graph.
//!
//! Algorithm (overview)
//! - Build one node per flag, one edge per σ-pair and one orbit per corner
//!   orbit (`build`).
//! - Greedily glue orbits by (stabilizer order, −size, open boundary), cutting
//!   a loop at its weakest link when it would otherwise close inconsistently;
//!   fall back to single edges adjacent to the glued region (`engine`).
//! - Fail with [`FdError::Disconnected`](crate::error::FdError) when some node
//!   stays unreached.
//! - Propagate orientation signs and compute stabilizer orders and the global
//!   invariants (`orient`).

mod build;
mod engine;
mod orient;
pub mod types;

pub use types::{generators, Edge, EdgeId, Graph, Invariants, Node, NodeId, Orbit, OrbitId};

use crate::cfg::FdCfg;
use crate::error::Result;
use crate::symbol::DSymbol;

/// Glue `sym` into a completed incidence graph with signs, stabilizer
/// orders and invariants filled in.
pub fn glue(sym: &DSymbol, cfg: &FdCfg) -> Result<Graph> {
    let mut g = Graph::from_symbol(sym)?;
    g.run_gluing()?;
    g.propagate_orientation()?;
    g.compute_stabilizers();
    g.compute_invariants(cfg);
    tracing::debug!(
        nodes = g.nodes.len(),
        edges = g.edges.len(),
        orbits = g.orbits.len(),
        geometry = g.inv.geometry.name(),
        crv = g.inv.crv,
        "glued"
    );
    Ok(g)
}
