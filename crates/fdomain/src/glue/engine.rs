//! Greedy gluing loop.
//!
//! Each round re-scans the orbits (the eligibility predicate changes with
//! every glue) and either glues the best orbit or, failing that, the best
//! edge hanging off the glued region. Ids come from one monotone counter.

use super::types::*;
use crate::error::{FdError, Result};

/// Ordered priority of an orbit: lower is glued first.
type Priority = (u32, i64, u32);

impl Graph {
    fn next_seq(&mut self) -> u32 {
        self.seq += 1;
        self.seq
    }

    fn glue_node(&mut self, n: NodeId) {
        if self.nodes[n.0].glue == 0 {
            let id = self.next_seq();
            self.nodes[n.0].glue = id;
        }
    }

    /// Glue an edge and its endpoint nodes; a mirror edge glues its single node.
    pub(crate) fn glue_edge(&mut self, e: EdgeId) {
        let (a, b) = (self.edges[e.0].npa, self.edges[e.0].npb);
        if a == b {
            self.glue_node(a);
            return;
        }
        if self.edges[e.0].glue == 0 {
            let id = self.next_seq();
            self.edges[e.0].glue = id;
        }
        self.glue_node(a);
        self.glue_node(b);
    }

    /// Number of disjoint glued arcs of the orbit.
    pub(crate) fn split_count(&self, o: OrbitId) -> u32 {
        let orbit = &self.orbits[o.0];
        let flags = orbit
            .flags
            .iter()
            .filter(|f| self.nodes[f.0].glue != 0)
            .count();
        let links = orbit
            .links
            .iter()
            .filter(|e| self.edges[e.0].glue != 0)
            .count();
        flags.saturating_sub(links) as u32
    }

    fn live_boundary(&self, o: OrbitId) -> u32 {
        self.orbits[o.0]
            .links
            .iter()
            .filter(|e| {
                let edge = &self.edges[e.0];
                edge.glue == 0 && !edge.cut
            })
            .count() as u32
    }

    fn live_stab(&self, o: OrbitId) -> u32 {
        let orbit = &self.orbits[o.0];
        orbit.v * orbit.f * self.split_count(o).max(1)
    }

    fn priority(&self, o: OrbitId) -> Priority {
        (
            self.live_stab(o),
            -(self.orbits[o.0].m as i64),
            self.live_boundary(o),
        )
    }

    fn select_orbit(&self) -> Option<OrbitId> {
        let started = self.nodes.iter().any(|n| n.glue != 0);
        let mut best: Option<(OrbitId, Priority)> = None;
        for (idx, orbit) in self.orbits.iter().enumerate() {
            let o = OrbitId(idx);
            if orbit.glue != 0 {
                continue;
            }
            let s = self.split_count(o);
            if (started && s == 0) || s > 1 {
                continue;
            }
            if orbit.cut > 0 && self.live_boundary(o) == 0 {
                continue;
            }
            let key = self.priority(o);
            if best.map_or(true, |(_, k)| key < k) {
                best = Some((o, key));
            }
        }
        best.map(|(o, _)| o)
    }

    /// Link of `o` whose far orbit is the best place to break the cycle.
    fn weakest_edge(&self, o: OrbitId) -> Option<EdgeId> {
        let mut best: Option<(EdgeId, (i64, i64, i64))> = None;
        for &e in &self.orbits[o.0].links {
            let edge = &self.edges[e.0];
            if edge.glue != 0 || edge.cut || edge.is_mirror() {
                continue;
            }
            let far = edge.other_orbit(o);
            if self.orbits[far.0].cut > 0 || self.split_count(far) > 1 {
                return Some(e);
            }
            let key = (
                -(self.live_stab(far) as i64),
                self.orbits[far.0].m as i64,
                -(self.live_boundary(far) as i64),
            );
            if best.map_or(true, |(_, k)| key < k) {
                best = Some((e, key));
            }
        }
        best.map(|(e, _)| e)
    }

    fn cut_edge(&mut self, o: OrbitId, e: EdgeId) {
        let edge = &self.edges[e.0];
        if edge.npa == edge.npb {
            return;
        }
        let far = edge.other_orbit(o);
        self.edges[e.0].cut = true;
        self.orbits[far.0].cut += 1;
        tracing::debug!(orbit = o.0, edge = e.0, far = far.0, "cut");
    }

    /// Try to glue `link` towards `target`; returns whether the walk goes on.
    fn extend_along(&mut self, o: OrbitId, link: EdgeId, target: NodeId) -> bool {
        let edge = &self.edges[link.0];
        if edge.cut {
            return false;
        }
        if edge.glue != 0 {
            return true;
        }
        if self.nodes[target.0].glue == 0 {
            self.glue_edge(link);
            return true;
        }
        let orbit = &self.orbits[o.0];
        let closes = orbit.is_loop()
            && orbit.flags.iter().all(|f| self.nodes[f.0].glue != 0)
            && self.live_boundary(o) == 1;
        if closes {
            self.glue_edge(link);
        }
        false
    }

    fn glue_orbit(&mut self, o: OrbitId) {
        let n = self.orbits[o.0].flags.len();
        let is_loop = self.orbits[o.0].is_loop();
        let start = self.orbits[o.0]
            .flags
            .iter()
            .position(|f| self.nodes[f.0].glue != 0)
            .unwrap_or(0);
        self.glue_node(self.orbits[o.0].flags[start]);

        let mut p = start;
        for _ in 0..n {
            if !is_loop && p + 1 >= n {
                break;
            }
            let q = (p + 1) % n;
            let (link, target) = (self.orbits[o.0].links[p], self.orbits[o.0].flags[q]);
            if !self.extend_along(o, link, target) {
                break;
            }
            p = q;
            if p == start {
                break;
            }
        }

        let mut p = start;
        for _ in 0..n {
            if !is_loop && p == 0 {
                break;
            }
            let q = (p + n - 1) % n;
            let (link, target) = (self.orbits[o.0].links[q], self.orbits[o.0].flags[q]);
            if !self.extend_along(o, link, target) {
                break;
            }
            p = q;
            if p == start {
                break;
            }
        }

        let id = self.next_seq();
        self.orbits[o.0].glue = id;
        tracing::debug!(orbit = o.0, kind = self.orbits[o.0].kind, id, "glued orbit");
    }

    fn select_edge(&self) -> Option<EdgeId> {
        let mut best: Option<(EdgeId, Priority)> = None;
        for (idx, edge) in self.edges.iter().enumerate() {
            if edge.glue != 0 || edge.cut || edge.is_mirror() {
                continue;
            }
            let ga = self.nodes[edge.npa.0].glue != 0;
            let gb = self.nodes[edge.npb.0].glue != 0;
            if ga == gb {
                continue;
            }
            let key = self.priority(edge.opx).min(self.priority(edge.opy));
            if best.map_or(true, |(_, k)| key < k) {
                best = Some((EdgeId(idx), key));
            }
        }
        best.map(|(e, _)| e)
    }

    /// Run the gluing loop to completion and finalize split/boundary counts.
    pub(crate) fn run_gluing(&mut self) -> Result<()> {
        loop {
            if let Some(o) = self.select_orbit() {
                let orbit = &self.orbits[o.0];
                if orbit.is_loop() && (orbit.cut > 0 || self.split_count(o) > 1 || orbit.v > 1) {
                    if let Some(e) = self.weakest_edge(o) {
                        self.cut_edge(o, e);
                    }
                }
                self.glue_orbit(o);
                continue;
            }
            if let Some(e) = self.select_edge() {
                tracing::debug!(edge = e.0, "glued edge");
                self.glue_edge(e);
                continue;
            }
            break;
        }

        let glued = self.glued_nodes();
        let total = self.nodes.len();
        if glued != total {
            return Err(FdError::Disconnected { glued, total });
        }

        for idx in 0..self.orbits.len() {
            let s = self.split_count(OrbitId(idx)).max(1);
            let b = self.orbits[idx]
                .links
                .iter()
                .filter(|e| self.edges[e.0].glue == 0)
                .count() as u32;
            let orbit = &mut self.orbits[idx];
            orbit.s = s;
            orbit.b = b;
        }
        Ok(())
    }
}
