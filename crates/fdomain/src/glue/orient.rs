use std::collections::VecDeque;
use std::f64::consts::PI;

use super::types::*;
use crate::cfg::FdCfg;
use crate::error::{FdError, Result};
use crate::geom::Geometry;

impl Graph {
    /// Flood signs over glued edges from node 0, then derive edge and orbit
    /// signs: an edge is reversing (−1) iff its endpoint signs agree.
    pub(crate) fn propagate_orientation(&mut self) -> Result<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }
        self.nodes[0].sign = 1;
        let mut queue = VecDeque::from([NodeId(0)]);
        while let Some(n) = queue.pop_front() {
            let sign = self.nodes[n.0].sign;
            for t in 0..3 {
                let e = self.nodes[n.0].edges[t];
                let edge = &self.edges[e.0];
                if edge.glue == 0 || edge.is_mirror() {
                    continue;
                }
                let m = self.nodes[n.0].nodes[t];
                if self.nodes[m.0].sign == 0 {
                    self.nodes[m.0].sign = -sign;
                    queue.push_back(m);
                }
            }
        }
        if let Some(d) = self.nodes.iter().position(|n| n.sign == 0) {
            return Err(FdError::structural(format!("node {d} unreachable by orientation flood")));
        }

        for idx in 0..self.edges.len() {
            let (a, b) = (self.edges[idx].npa, self.edges[idx].npb);
            self.edges[idx].sign = if self.nodes[a.0].sign == self.nodes[b.0].sign { -1 } else { 1 };
        }
        for idx in 0..self.orbits.len() {
            let orbit = &self.orbits[idx];
            let reversing = orbit
                .links
                .iter()
                .chain(&orbit.mirrors)
                .any(|e| self.edges[e.0].sign < 0);
            self.orbits[idx].sign = if reversing { -1 } else { 1 };
        }
        Ok(())
    }

    /// Stabilizer order `I = V·F·S` and its angle values per orbit.
    pub(crate) fn compute_stabilizers(&mut self) {
        for orbit in self.orbits.iter_mut() {
            orbit.stab = orbit.v * orbit.f * orbit.s.max(1);
            let i = orbit.stab as f64;
            orbit.cos_half = (PI / i).cos();
            orbit.angle = 2.0 * PI / i;
        }
    }

    pub(crate) fn compute_invariants(&mut self, cfg: &FdCfg) {
        let mut crv = -(self.nodes.len() as f64);
        for node in &self.nodes {
            for o in node.orbits {
                crv += 1.0 / self.orbits[o.0].m as f64;
            }
        }
        if crv.abs() < cfg.eps {
            crv = 0.0;
        }

        let mut sum = 0.0;
        let (mut i_min, mut i_max) = (None::<u32>, None::<u32>);
        for orbit in self.orbits.iter().filter(|o| o.is_constrained()) {
            let i = orbit.stab as f64;
            sum += orbit.s as f64 * (1.0 - 2.0 / i);
            i_min = Some(i_min.map_or(orbit.stab, |m| m.min(orbit.stab)));
            i_max = Some(i_max.map_or(orbit.stab, |m| m.max(orbit.stab)));
        }
        let mut def = PI * (-2.0 + sum);
        if def.abs() < cfg.eps {
            def = 0.0;
        }

        let geometry = Geometry::from_curvature(crv);
        if crv * def > 0.0 {
            tracing::warn!(crv, def, "curvature and angle defect disagree in sign");
        }

        self.inv = Invariants {
            crv,
            chi: self.orbits.len() as i64 - self.edges.len() as i64 + self.nodes.len() as i64,
            chr: self.nodes.iter().map(|n| n.sign as i64).sum(),
            def,
            orientable: self.edges.iter().all(|e| e.sign > 0),
            i_min,
            i_max,
            geometry,
        };
    }
}
