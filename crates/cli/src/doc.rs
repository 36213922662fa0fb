//! JSON documents emitted by the CLI.

use fdomain::api::{FundamentalDomain, Graph, Point};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InvariantsDoc {
    pub geometry: &'static str,
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
}

impl InvariantsDoc {
    pub fn from_graph(g: &Graph) -> Self {
        let inv = &g.inv;
        Self {
            geometry: inv.geometry.name(),
            crv: inv.crv,
            def: inv.def,
            chi: inv.chi,
            chr: inv.chr,
            orientable: inv.orientable,
            i_min: inv.i_min,
            i_max: inv.i_max,
            nodes: g.nodes.len(),
            edges: g.edges.len(),
            orbits: g.orbits.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PointDoc {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
    pub angle: f64,
}

impl From<&Point> for PointDoc {
    fn from(p: &Point) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            dist: p.polar.dist,
            angle: p.polar.angle,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrbitCornerDoc {
    pub orbit: usize,
    pub kind: usize,
    pub stab: u32,
    pub boundary: bool,
    #[serde(flatten)]
    pub at: PointDoc,
}

#[derive(Debug, Serialize)]
pub struct EdgeCornerDoc {
    pub edge: usize,
    pub free: bool,
    #[serde(flatten)]
    pub at: PointDoc,
}

#[derive(Debug, Serialize)]
pub struct NodeCornerDoc {
    pub node: usize,
    pub sign: i8,
    #[serde(flatten)]
    pub at: PointDoc,
}

#[derive(Debug, Serialize)]
pub struct LayoutDoc {
    pub symbol: String,
    pub invariants: InvariantsDoc,
    pub radius: f64,
    pub root_iterations: usize,
    pub converged: bool,
    /// Indices into `orbit_corners`, counter-clockwise.
    pub boundary: Vec<usize>,
    pub orbit_corners: Vec<OrbitCornerDoc>,
    pub edge_corners: Vec<EdgeCornerDoc>,
    pub node_corners: Vec<NodeCornerDoc>,
}

impl LayoutDoc {
    pub fn new(symbol: String, fd: &FundamentalDomain) -> Self {
        let g = &fd.graph;
        let c = &fd.coords;
        Self {
            symbol,
            invariants: InvariantsDoc::from_graph(g),
            radius: fd.radius.radius,
            root_iterations: fd.radius.iterations,
            converged: fd.converged,
            boundary: c.boundary.iter().map(|s| s.corner.0).collect(),
            orbit_corners: c
                .ocr
                .iter()
                .map(|o| {
                    let orbit = g.orbit(o.orbit);
                    OrbitCornerDoc {
                        orbit: o.orbit.0,
                        kind: orbit.kind,
                        stab: orbit.stab,
                        boundary: o.boundary,
                        at: (&o.at).into(),
                    }
                })
                .collect(),
            edge_corners: c
                .ecr
                .iter()
                .map(|e| EdgeCornerDoc {
                    edge: e.edge.0,
                    free: e.free,
                    at: (&e.at).into(),
                })
                .collect(),
            node_corners: c
                .ncr
                .iter()
                .map(|n| NodeCornerDoc {
                    node: n.node.0,
                    sign: g.node(n.node).sign,
                    at: (&n.at).into(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fdomain::api::{DSymbol, FdCfg};

    #[test]
    fn layout_doc_lists_every_corner() {
        let sym = DSymbol::reflection_polygon(4, 4);
        let fd = FundamentalDomain::build(&sym, &FdCfg::default()).unwrap();
        let doc = LayoutDoc::new(sym.to_string(), &fd);
        assert_eq!(doc.node_corners.len(), 8);
        assert_eq!(doc.boundary.len(), 8);
        assert_eq!(doc.invariants.geometry, "euclidean");
        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v["radius"], 0.5);
        assert!(v["orbit_corners"][0]["x"].is_f64());
        assert_eq!(v["invariants"]["i_min"], 4);
    }
}
