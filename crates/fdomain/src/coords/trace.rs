//! Boundary tracing: builds the coordinate records and the boundary cycle.

use super::types::*;
use crate::error::{FdError, Result};
use crate::glue::{EdgeId, Graph, NodeId, OrbitId};

/// Corner types at the start and end of side `i` of a node with `sign`.
#[inline]
fn side_direction(sign: i8, i: usize) -> (usize, usize) {
    let (a, b) = ((i + 1) % 3, (i + 2) % 3);
    if sign >= 0 {
        (a, b)
    } else {
        (b, a)
    }
}

struct Tracer<'g> {
    graph: &'g Graph,
    coords: Coords,
    side_ecr: Vec<[Option<EcrId>; 3]>,
    corner_ocr: Vec<[Option<OcrId>; 3]>,
}

impl<'g> Tracer<'g> {
    fn new(graph: &'g Graph) -> Self {
        let n = graph.nodes.len();
        let mut coords = Coords::default();
        let mut side_ecr = vec![[None; 3]; n];
        for (idx, edge) in graph.edges.iter().enumerate() {
            let (a, b) = (edge.npa.0, edge.npb.0);
            if edge.glue != 0 {
                let id = EcrId(coords.ecr.len());
                coords.ecr.push(EdgeCorner {
                    edge: EdgeId(idx),
                    free: false,
                    ends: [OcrId(0); 2],
                    nodes: [NcrId(a), NcrId(b)],
                    at: Point::default(),
                });
                side_ecr[a][edge.kind] = Some(id);
                side_ecr[b][edge.kind] = Some(id);
            } else {
                let sides = if a == b { vec![a] } else { vec![a, b] };
                for d in sides {
                    let id = EcrId(coords.ecr.len());
                    coords.ecr.push(EdgeCorner {
                        edge: EdgeId(idx),
                        free: true,
                        ends: [OcrId(0); 2],
                        nodes: [NcrId(d), NcrId(d)],
                        at: Point::default(),
                    });
                    side_ecr[d][edge.kind] = Some(id);
                }
            }
        }
        Self {
            graph,
            coords,
            side_ecr,
            corner_ocr: vec![[None; 3]; n],
        }
    }

    #[inline]
    fn is_open(&self, d: usize, i: usize) -> bool {
        self.graph.edge(self.graph.nodes[d].edges[i]).glue == 0
    }

    fn ecr_of(&self, d: usize, i: usize) -> Result<EcrId> {
        self.side_ecr[d][i]
            .ok_or_else(|| FdError::structural(format!("side {i} of node {d} has no edge corner")))
    }

    fn new_ocr(&mut self, orbit: OrbitId, boundary: bool, nodes: &[usize], edges: Vec<EcrId>) -> Result<OcrId> {
        let id = OcrId(self.coords.ocr.len());
        let kind = self.graph.orbit(orbit).kind;
        for &d in nodes {
            match self.corner_ocr[d][kind] {
                Some(prev) if prev != id => {
                    return Err(FdError::structural(format!(
                        "corner {kind} of node {d} assigned twice"
                    )))
                }
                _ => self.corner_ocr[d][kind] = Some(id),
            }
        }
        let mut ncr: Vec<NcrId> = nodes.iter().map(|&d| NcrId(d)).collect();
        ncr.dedup();
        self.coords.ocr.push(OrbitCorner {
            orbit,
            boundary,
            nodes: ncr,
            edges,
            at: Point::default(),
        });
        Ok(id)
    }

    /// Walk the boundary cycle starting at the first open side.
    fn trace_boundary(&mut self) -> Result<()> {
        let n = self.graph.nodes.len();
        let open: Vec<(usize, usize)> = (0..n)
            .flat_map(|d| (0..3).map(move |i| (d, i)))
            .filter(|&(d, i)| self.is_open(d, i))
            .collect();
        let Some(&start) = open.first() else {
            return Err(FdError::structural(
                "glued graph closes into a surface without boundary; no fundamental polygon to trace",
            ));
        };

        let mut visited = vec![[false; 3]; n];
        let mut side = start;
        for _ in 0..open.len() {
            let (d, i) = side;
            if visited[d][i] {
                return Err(FdError::structural(format!("boundary revisits side {i} of node {d}")));
            }
            visited[d][i] = true;
            let (_, b) = side_direction(self.graph.nodes[d].sign, i);

            let side_id = self.ecr_of(d, i)?;
            let mut fan = vec![d];
            let mut edges = vec![side_id];
            let (mut cur, mut came) = (d, i);
            let next = loop {
                let t = 3 - came - b;
                if self.is_open(cur, t) {
                    break (cur, t);
                }
                edges.push(self.ecr_of(cur, t)?);
                cur = self.graph.nodes[cur].nodes[t].0;
                came = t;
                fan.push(cur);
                if fan.len() > 2 * n {
                    return Err(FdError::structural(format!("corner {b} fan at node {d} does not end")));
                }
            };
            edges.push(self.ecr_of(next.0, next.1)?);
            edges.dedup();

            let orbit = self.graph.nodes[d].orbits[b];
            let corner = self.new_ocr(orbit, true, &fan, edges)?;
            self.coords.boundary.push(BoundaryStep {
                side: side_id,
                corner,
            });
            side = next;
            if side == start {
                break;
            }
        }
        if side != start {
            return Err(FdError::structural("boundary does not close"));
        }
        if let Some(&(d, i)) = open.iter().find(|&&(d, i)| !visited[d][i]) {
            return Err(FdError::structural(format!(
                "open side {i} of node {d} is off the boundary cycle"
            )));
        }
        Ok(())
    }

    /// Interior points for free rotation centers (I ≤ 1) not on the boundary.
    fn place_interior_orbits(&mut self) -> Result<()> {
        let graph = self.graph;
        for (idx, orbit) in graph.orbits.iter().enumerate() {
            if orbit.stab > 1 {
                continue;
            }
            let flags: Vec<usize> = orbit.flags.iter().map(|f| f.0).collect();
            if flags.iter().any(|&d| self.corner_ocr[d][orbit.kind].is_some()) {
                continue;
            }
            let edges = orbit
                .links
                .iter()
                .filter(|e| graph.edge(**e).glue != 0)
                .map(|e| {
                    let edge = graph.edge(*e);
                    self.ecr_of(edge.npa.0, edge.kind)
                })
                .collect::<Result<Vec<_>>>()?;
            self.new_ocr(OrbitId(idx), false, &flags, edges)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Coords> {
        let graph = self.graph;
        for d in 0..graph.nodes.len() {
            let mut orbits = [OcrId(0); 3];
            let mut edges = [EcrId(0); 3];
            for k in 0..3 {
                orbits[k] = self.corner_ocr[d][k].ok_or_else(|| {
                    FdError::structural(format!("corner {k} of node {d} has no coordinate"))
                })?;
                edges[k] = self.ecr_of(d, k)?;
            }
            self.coords.ncr.push(NodeCorner {
                node: NodeId(d),
                edges,
                orbits,
                at: Point::default(),
            });
        }
        for ecr in self.coords.ecr.iter_mut() {
            let edge = graph.edge(ecr.edge);
            let (ja, jb) = edge.end_kinds();
            let d = ecr.nodes[0].0;
            ecr.ends = [self.coords.ncr[d].orbits[ja], self.coords.ncr[d].orbits[jb]];
        }
        Ok(self.coords)
    }
}

/// Create the coordinate records for a glued graph and trace its boundary.
pub fn trace_fd(graph: &Graph) -> Result<Coords> {
    let mut tracer = Tracer::new(graph);
    tracer.trace_boundary()?;
    tracer.place_interior_orbits()?;
    let coords = tracer.finish()?;
    tracing::debug!(
        boundary = coords.boundary.len(),
        ncr = coords.ncr.len(),
        ecr = coords.ecr.len(),
        ocr = coords.ocr.len(),
        "traced"
    );
    Ok(coords)
}
