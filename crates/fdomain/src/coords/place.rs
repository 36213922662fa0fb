use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::types::*;
use crate::cfg::FdCfg;
use crate::geom::{geodesic, geodesic_between, Polar};
use crate::glue::Graph;

/// Initial positions for every corner.
///
/// Constrained boundary corners (I > 2) are laid out by their central
/// half-angles at their canonical distances; the remaining boundary corners
/// are spread evenly along the geodesics between them. With fewer than two
/// constrained corners the boundary becomes a regular polygon at distance 1.
pub fn place_coordinates(graph: &Graph, coords: &mut Coords, cfg: &FdCfg) {
    let geom = graph.geometry();
    let ring: Vec<OcrId> = coords.boundary.iter().map(|s| s.corner).collect();
    let n = ring.len();
    let anchors: Vec<usize> = (0..n)
        .filter(|&p| graph.orbit(coords.ocr[ring[p].0].orbit).is_constrained())
        .collect();
    let mut placed = vec![false; coords.ocr.len()];

    if anchors.len() < 2 {
        tracing::warn!(corners = n, "too few constrained corners, using a regular polygon");
        for (m, c) in ring.iter().enumerate() {
            let angle = TAU * m as f64 / n as f64;
            coords.ocr[c.0].at.set_polar(geom, Polar::new(1.0, angle));
            placed[c.0] = true;
        }
    } else {
        let mut theta = 0.0;
        let mut prev_gamma = None;
        for &p in &anchors {
            let orbit = graph.orbit(coords.ocr[ring[p].0].orbit);
            if let Some(g) = prev_gamma {
                theta += g + orbit.gamma;
            }
            prev_gamma = Some(orbit.gamma);
            coords.ocr[ring[p].0].at.set_polar(geom, Polar::new(orbit.dist, theta));
            placed[ring[p].0] = true;
        }
        for (j, &p) in anchors.iter().enumerate() {
            let q = anchors[(j + 1) % anchors.len()];
            let steps = (q + n - p) % n;
            let (a, b) = (coords.ocr[ring[p].0].at.polar, coords.ocr[ring[q].0].at.polar);
            let geo = geodesic(geom, a, b, false, cfg);
            for s in 1..steps {
                let c = ring[(p + s) % n];
                coords.ocr[c.0].at.set(geom, geo.point_at(s as f64 / steps as f64));
                placed[c.0] = true;
            }
        }
    }

    // Interior rotation centers: mean of what their triangles already have.
    for idx in 0..coords.ocr.len() {
        if placed[idx] {
            continue;
        }
        let mut sum = Vector2::zeros();
        let mut count = 0usize;
        for nc in &coords.ocr[idx].nodes {
            for o in coords.ncr[nc.0].orbits {
                if placed[o.0] {
                    sum += coords.ocr[o.0].at.pos;
                    count += 1;
                }
            }
        }
        let pos = if count > 0 { sum / count as f64 } else { Vector2::zeros() };
        coords.ocr[idx].at.set(geom, pos);
        placed[idx] = true;
    }

    for idx in 0..coords.ecr.len() {
        let [a, b] = coords.ecr[idx].ends;
        let (p, q) = (coords.ocr[a.0].at.pos, coords.ocr[b.0].at.pos);
        let mid = geodesic_between(geom, p, q, cfg).point_at(0.5);
        coords.ecr[idx].at.set(geom, mid);
    }

    for idx in 0..coords.ncr.len() {
        let sum: Vector2<f64> = coords.ncr[idx]
            .orbits
            .iter()
            .map(|o| coords.ocr[o.0].at.pos)
            .sum();
        coords.ncr[idx].at.set(geom, sum / 3.0);
    }

    coords.update_bounds();
}
