use super::types::*;
use crate::error::{FdError, Result};
use crate::symbol::DSymbol;

const NONE: usize = usize::MAX;

/// One orbit's flags in cycle order, as produced by [`walk_cycle`].
struct Cycle {
    flags: Vec<usize>,
    links: Vec<usize>,
    mirrors: Vec<usize>,
    is_loop: bool,
}

#[inline]
fn other(g: usize, (i, j): (usize, usize)) -> usize {
    if g == i {
        j
    } else {
        i
    }
}

/// Walk the ⟨σi, σj⟩-orbit through `d`. Chains are walked from a mirror end
/// so that `flags` reads in order; loops start at `d` with σi.
fn walk_cycle(sym: &DSymbol, edge_of: &[[usize; 3]], gens: (usize, usize), d: usize) -> Result<Cycle> {
    let cap = 2 * sym.size() + 2;
    let (i, _) = gens;

    // Look for a chain end in either direction of the alternation.
    let mut end = None;
    let (mut cur, mut g) = (d, i);
    for _ in 0..cap {
        let nxt = sym.op(g, cur);
        if nxt == cur {
            end = Some((cur, g));
            break;
        }
        cur = nxt;
        g = other(g, gens);
        if cur == d && g == i {
            break;
        }
    }

    match end {
        Some((e, g0)) => {
            let mut flags = vec![e];
            let mut links = Vec::new();
            let mut mirrors = vec![edge_of[e][g0]];
            let (mut cur, mut g) = (e, other(g0, gens));
            for _ in 0..cap {
                let nxt = sym.op(g, cur);
                if nxt == cur {
                    mirrors.push(edge_of[cur][g]);
                    return Ok(Cycle {
                        flags,
                        links,
                        mirrors,
                        is_loop: false,
                    });
                }
                links.push(edge_of[cur][g]);
                flags.push(nxt);
                cur = nxt;
                g = other(g, gens);
            }
            Err(FdError::structural(format!("chain through flag {d} does not terminate")))
        }
        None => {
            let mut flags = vec![d];
            let mut links = Vec::new();
            let (mut cur, mut g) = (d, i);
            for _ in 0..cap {
                let nxt = sym.op(g, cur);
                links.push(edge_of[cur][g]);
                g = other(g, gens);
                if nxt == d && g == i {
                    return Ok(Cycle {
                        flags,
                        links,
                        mirrors: Vec::new(),
                        is_loop: true,
                    });
                }
                if nxt == d {
                    break;
                }
                flags.push(nxt);
                cur = nxt;
            }
            Err(FdError::structural(format!("loop through flag {d} does not close")))
        }
    }
}

impl Graph {
    /// Build the unglued incidence graph of `sym`: one node per flag, one
    /// edge per σ-pair, one orbit per corner-type orbit.
    pub fn from_symbol(sym: &DSymbol) -> Result<Graph> {
        let n = sym.size();
        if n == 0 {
            return Err(FdError::structural("symbol has no flags"));
        }

        let mut edges = Vec::new();
        let mut edge_of = vec![[NONE; 3]; n];
        for i in 0..3 {
            for d in 0..n {
                let e = sym.op(i, d);
                if e < d {
                    continue;
                }
                edge_of[d][i] = edges.len();
                edge_of[e][i] = edges.len();
                edges.push(Edge {
                    kind: i,
                    npa: NodeId(d),
                    npb: NodeId(e),
                    opx: OrbitId(NONE),
                    opy: OrbitId(NONE),
                    glue: 0,
                    cut: false,
                    sign: 0,
                });
            }
        }
        if edge_of.iter().flatten().any(|&e| e == NONE) {
            return Err(FdError::structural("flag side without an edge"));
        }

        let mut orbits = Vec::new();
        let mut orbit_of = vec![[NONE; 3]; n];
        for k in 0..3 {
            let gens = generators(k);
            for d in 0..n {
                if orbit_of[d][k] != NONE {
                    continue;
                }
                let cyc = walk_cycle(sym, &edge_of, gens, d)?;
                let id = orbits.len();
                for &f in &cyc.flags {
                    if orbit_of[f][k] != NONE {
                        return Err(FdError::structural(format!(
                            "flag {f} lies on two orbits of corner type {k}"
                        )));
                    }
                    orbit_of[f][k] = id;
                }
                let len = cyc.flags.len() as u32;
                let (r, f) = if cyc.is_loop { (len / 2, 1) } else { (len, 2) };
                let m = sym.m(gens.0, gens.1, d);
                if m == 0 {
                    return Err(FdError::structural(format!(
                        "zero branching for corner type {k} at flag {d}"
                    )));
                }
                if r == 0 || m % r != 0 {
                    return Err(FdError::structural(format!(
                        "branching {m} not a multiple of rotation {r} at flag {d}"
                    )));
                }
                orbits.push(Orbit {
                    kind: k,
                    b: cyc.links.len() as u32,
                    flags: cyc.flags.into_iter().map(NodeId).collect(),
                    links: cyc.links.into_iter().map(EdgeId).collect(),
                    mirrors: cyc.mirrors.into_iter().map(EdgeId).collect(),
                    r,
                    m,
                    v: m / r,
                    f,
                    s: 0,
                    glue: 0,
                    cut: 0,
                    sign: 0,
                    stab: 0,
                    cos_half: 0.0,
                    angle: 0.0,
                    gamma: 0.0,
                    cos_center: 1.0,
                    dist: 0.0,
                });
            }
        }

        for e in edges.iter_mut() {
            let (ja, jb) = e.end_kinds();
            let (a, b) = (e.npa.0, e.npb.0);
            if orbit_of[a][ja] != orbit_of[b][ja] || orbit_of[a][jb] != orbit_of[b][jb] {
                return Err(FdError::structural(format!(
                    "edge between flags {a} and {b} joins different orbits"
                )));
            }
            e.opx = OrbitId(orbit_of[a][ja]);
            e.opy = OrbitId(orbit_of[a][jb]);
        }

        let nodes = (0..n)
            .map(|d| Node {
                orbits: orbit_of[d].map(OrbitId),
                edges: edge_of[d].map(EdgeId),
                nodes: [0, 1, 2].map(|i| NodeId(sym.op(i, d))),
                glue: 0,
                sign: 0,
            })
            .collect();

        Ok(Graph {
            orbits,
            edges,
            nodes,
            inv: Invariants::default(),
            seq: 0,
        })
    }
}
