use nalgebra::Vector2;

use super::types::*;
use crate::cfg::FdCfg;
use crate::glue::Graph;

fn mean(points: impl Iterator<Item = Vector2<f64>>) -> Option<Vector2<f64>> {
    let (sum, count) = points.fold((Vector2::zeros(), 0usize), |(s, c), p| (s + p, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// One Gauss–Seidel smoothing round; returns whether any point moved by
/// more than `cfg.eps`.
pub fn relax_coords(graph: &Graph, coords: &mut Coords, cfg: &FdCfg) -> bool {
    let mut changed = false;
    let mut moved = |old: Vector2<f64>, new: Vector2<f64>| {
        if (new - old).norm() > cfg.eps {
            changed = true;
        }
        new
    };

    for idx in 0..coords.ncr.len() {
        let c = &coords.ncr[idx];
        let around = c
            .edges
            .iter()
            .map(|e| coords.ecr[e.0].at.pos)
            .chain(c.orbits.iter().map(|o| coords.ocr[o.0].at.pos));
        if let Some(p) = mean(around) {
            let old = coords.ncr[idx].at.pos;
            coords.ncr[idx].at.pos = moved(old, p);
        }
    }

    for idx in 0..coords.ecr.len() {
        let c = &coords.ecr[idx];
        if c.free {
            continue;
        }
        let around = c
            .ends
            .iter()
            .map(|o| coords.ocr[o.0].at.pos)
            .chain(c.nodes.iter().map(|n| coords.ncr[n.0].at.pos));
        if let Some(p) = mean(around) {
            let old = coords.ecr[idx].at.pos;
            coords.ecr[idx].at.pos = moved(old, p);
        }
    }

    for idx in 0..coords.ocr.len() {
        let c = &coords.ocr[idx];
        if graph.orbit(c.orbit).stab > 1 {
            continue;
        }
        let around = c
            .nodes
            .iter()
            .map(|n| coords.ncr[n.0].at.pos)
            .chain(c.edges.iter().map(|e| coords.ecr[e.0].at.pos));
        if let Some(p) = mean(around) {
            let old = coords.ocr[idx].at.pos;
            coords.ocr[idx].at.pos = moved(old, p);
        }
    }

    changed
}

/// Recompute polar forms and bounds from the Cartesian positions and sync
/// the canonical distance of free rotation centers.
pub fn compute_dist(graph: &mut Graph, coords: &mut Coords) {
    let geom = graph.geometry();
    for c in coords.ncr.iter_mut() {
        c.at.polar = geom.to_polar(c.at.pos);
    }
    for c in coords.ecr.iter_mut() {
        c.at.polar = geom.to_polar(c.at.pos);
    }
    for c in coords.ocr.iter_mut() {
        c.at.polar = geom.to_polar(c.at.pos);
        let orbit = &mut graph.orbits[c.orbit.0];
        if orbit.stab <= 1 {
            orbit.dist = c.at.polar.dist;
        }
    }
    coords.update_bounds();
}

/// Smooth until a round reports no change or the round cap is reached,
/// then resync distances. Returns whether a fixed point was reached.
pub fn relax(graph: &mut Graph, coords: &mut Coords, cfg: &FdCfg) -> bool {
    let mut rounds = 0;
    let mut converged = false;
    while rounds < cfg.max_relax_rounds {
        rounds += 1;
        if !relax_coords(graph, coords, cfg) {
            converged = true;
            break;
        }
    }
    if !converged {
        tracing::warn!(rounds, "relaxation hit the round cap");
    }
    tracing::debug!(rounds, converged, "relaxed");
    compute_dist(graph, coords);
    converged
}
