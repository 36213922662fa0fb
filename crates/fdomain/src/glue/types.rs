//! Incidence-graph records (arena + index).
//!
//! Corner types: 0 = vertex, 1 = edge midpoint, 2 = tile center. The orbit of
//! corner type `k` is generated by the two involutions other than σk; the
//! graph edge of type `i` is the triangle side opposite corner `i`, shared by
//! the nodes `D` and `σi(D)`.

use crate::geom::Geometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrbitId(pub usize);

/// The two involutions generating the orbit of corner type `k`.
#[inline]
pub fn generators(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Orbit of flags around one corner type (vertex, edge or tile generator).
#[derive(Clone, Debug)]
pub struct Orbit {
    /// Corner type this orbit realizes.
    pub kind: usize,
    /// Flags in cycle order; chains start at a mirror end.
    pub flags: Vec<NodeId>,
    /// `links[p]` joins `flags[p]` and `flags[p + 1]` (wrapping on loops).
    pub links: Vec<EdgeId>,
    /// σ-fixed sides at the ends of a chain.
    pub mirrors: Vec<EdgeId>,
    /// Rotation number R.
    pub r: u32,
    /// Branching number M = V·R.
    pub m: u32,
    pub v: u32,
    /// 1 = loop, 2 = chain.
    pub f: u32,
    /// Split count: disjoint glued arcs of this orbit.
    pub s: u32,
    /// Boundary count: unglued links.
    pub b: u32,
    pub glue: u32,
    pub cut: u32,
    pub sign: i8,
    /// Stabilizer order I = V·F·S (meaningful after gluing).
    pub stab: u32,
    /// cos(π/I), cosine of the corner half-angle.
    pub cos_half: f64,
    /// Corner angle 2π/I of each boundary appearance.
    pub angle: f64,
    /// Central half-angle subtended at the solved radius.
    pub gamma: f64,
    pub cos_center: f64,
    /// Canonical distance of the corner from the domain center.
    pub dist: f64,
}

impl Orbit {
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.f == 1
    }
    /// Corners with I > 2 constrain the domain's angles.
    #[inline]
    pub fn is_constrained(&self) -> bool {
        self.stab > 2
    }
}

/// Graph edge: a triangle side between nodes `npa` and `npb = σ_kind(npa)`.
#[derive(Clone, Debug)]
pub struct Edge {
    pub kind: usize,
    pub npa: NodeId,
    pub npb: NodeId,
    /// Orbit at the lower-typed end of the side.
    pub opx: OrbitId,
    /// Orbit at the higher-typed end of the side.
    pub opy: OrbitId,
    pub glue: u32,
    pub cut: bool,
    /// +1 orientation preserving, −1 reversing, 0 before propagation.
    pub sign: i8,
}

impl Edge {
    /// Side lying on a mirror (σ fixes the flag).
    #[inline]
    pub fn is_mirror(&self) -> bool {
        self.npa == self.npb
    }
    #[inline]
    pub fn other_orbit(&self, o: OrbitId) -> OrbitId {
        if self.opx == o {
            self.opy
        } else {
            self.opx
        }
    }
    /// Corner types at the two ends of the side, ascending.
    #[inline]
    pub fn end_kinds(&self) -> (usize, usize) {
        match self.kind {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }
}

/// Realized triangle (one per flag).
#[derive(Clone, Debug)]
pub struct Node {
    /// Orbit at each corner type.
    pub orbits: [OrbitId; 3],
    /// Side opposite each corner type.
    pub edges: [EdgeId; 3],
    /// Neighbor across each side.
    pub nodes: [NodeId; 3],
    pub glue: u32,
    pub sign: i8,
}

/// Global invariants of a glued symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Invariants {
    /// −|nodes| + Σ 1/M; clamped to 0 within eps.
    pub crv: f64,
    /// Euler characteristic of the underlying quotient surface.
    pub chi: i64,
    /// Signed chamber balance Σ node signs.
    pub chr: i64,
    /// π·(−2 + Σ_{I>2} S·(1 − 2/I)); clamped to 0 within eps.
    pub def: f64,
    pub orientable: bool,
    pub i_min: Option<u32>,
    pub i_max: Option<u32>,
    pub geometry: Geometry,
}

impl Default for Invariants {
    fn default() -> Self {
        Self {
            crv: 0.0,
            chi: 0,
            chr: 0,
            def: 0.0,
            orientable: true,
            i_min: None,
            i_max: None,
            geometry: Geometry::Euclidean,
        }
    }
}

/// Completed incidence graph.
#[derive(Clone, Debug)]
pub struct Graph {
    pub orbits: Vec<Orbit>,
    pub edges: Vec<Edge>,
    pub nodes: Vec<Node>,
    pub inv: Invariants,
    /// Last glue id handed out.
    pub(crate) seq: u32,
}

impl Graph {
    #[inline]
    pub fn orbit(&self, id: OrbitId) -> &Orbit {
        &self.orbits[id.0]
    }
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
    pub fn glued_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.glue != 0).count()
    }
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.inv.geometry
    }
}
