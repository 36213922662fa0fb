//! Canonical inradius of the fundamental domain.
//!
//! The domain is laid out as a tangential polygon around its center: each
//! constrained corner (I > 2) subtends a central angle `2γ` with
//! `sin γ = cos(π/I) / metric(r)`. The radius is the root of the angle
//! defect `2π − Σ S·2γ(r)`, found by a midpoint/secant regula falsi.

use std::f64::consts::{PI, TAU};

use crate::cfg::FdCfg;
use crate::geom::{central_half_angle, Geometry};
use crate::glue::Graph;

/// Outcome of the radius search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusSolution {
    pub radius: f64,
    /// Final bracket.
    pub lo: f64,
    pub hi: f64,
    /// Doublings of the hyperbolic upper bound.
    pub expansions: u32,
    pub iterations: usize,
}

impl RadiusSolution {
    fn anchored(r: f64) -> Self {
        Self {
            radius: r,
            lo: r,
            hi: r,
            expansions: 0,
            iterations: 0,
        }
    }
}

/// Central angle subtended by a corner with half-angle cosine `cos_half`.
#[inline]
fn central_angle(geom: Geometry, cos_half: f64, r: f64) -> f64 {
    2.0 * central_half_angle(geom, cos_half, r)
}

/// Angle defect `2π − Σ_{I>2} S·2γ(r)` of the graph's boundary corners.
pub fn defect(graph: &Graph, geom: Geometry, r: f64) -> f64 {
    let covered: f64 = graph
        .orbits
        .iter()
        .filter(|o| o.is_constrained())
        .map(|o| o.s as f64 * central_angle(geom, o.cos_half, r))
        .sum();
    TAU - covered
}

/// Solve for the radius and store per-orbit `gamma`, `cos_center`, `dist`.
pub fn solve_radius(graph: &mut Graph, cfg: &FdCfg) -> RadiusSolution {
    let geom = graph.geometry();
    let sol = match (geom, graph.inv.i_min, graph.inv.i_max) {
        (Geometry::Hyperbolic, Some(_), Some(i_max)) => solve_hyperbolic(graph, i_max, cfg),
        (Geometry::Spherical, Some(i_min), Some(_)) => {
            let hi = PI / i_min as f64;
            let f = |r| defect(graph, geom, r);
            regula_falsi(f, 0.0, hi, 0, cfg)
        }
        _ => RadiusSolution::anchored(cfg.euclidean_radius),
    };
    tracing::debug!(
        geometry = geom.name(),
        radius = sol.radius,
        iterations = sol.iterations,
        expansions = sol.expansions,
        "radius"
    );
    assign_distances(graph, geom, sol.radius);
    sol
}

fn solve_hyperbolic(graph: &Graph, i_max: u32, cfg: &FdCfg) -> RadiusSolution {
    let geom = Geometry::Hyperbolic;
    let f = |r| defect(graph, geom, r);
    let mut lo = PI / i_max as f64;
    if f(lo) > 0.0 {
        lo = 0.0;
    }
    let mut hi = PI;
    let mut expansions = 0;
    while f(hi) < 0.0 && expansions < cfg.max_bracket_doublings {
        hi *= 2.0;
        expansions += 1;
    }
    if f(hi) < 0.0 {
        tracing::warn!(hi, "radius bracket did not close");
    }
    regula_falsi(f, lo, hi, expansions, cfg)
}

/// Bracketed root search: each round tries the midpoint and the secant
/// point, best |f| first, and applies every one that still lands strictly
/// inside the bracket. Applying both bounds each round by at least half the
/// bracket, so the returned midpoint converges even where plain false
/// position keeps one end fixed. Stops when a round leaves the bracket
/// bit-identical.
fn regula_falsi<F: Fn(f64) -> f64>(
    f: F,
    mut lo: f64,
    mut hi: f64,
    expansions: u32,
    cfg: &FdCfg,
) -> RadiusSolution {
    let mut flo = f(lo);
    let mut fhi = f(hi);
    let done = |r: f64, lo: f64, hi: f64, iterations: usize| RadiusSolution {
        radius: r,
        lo,
        hi,
        expansions,
        iterations,
    };
    if flo == 0.0 {
        return done(lo, lo, hi, 0);
    }
    if fhi == 0.0 {
        return done(hi, lo, hi, 0);
    }

    let mut iterations = 0;
    while iterations < cfg.max_root_iter {
        iterations += 1;
        let before = [lo.to_bits(), hi.to_bits(), flo.to_bits(), fhi.to_bits()];
        let mid = 0.5 * (lo + hi);
        let sec = if fhi != flo {
            lo - flo * (hi - lo) / (fhi - flo)
        } else {
            mid
        };
        let mut cands = [(mid, f(mid)), (sec, f(sec))];
        cands.sort_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));
        for (x, fx) in cands {
            if !(x > lo && x < hi) {
                continue;
            }
            if fx == 0.0 {
                return done(x, x, x, iterations);
            }
            if (fx < 0.0) == (flo < 0.0) {
                lo = x;
                flo = fx;
            } else {
                hi = x;
                fhi = fx;
            }
        }
        if before == [lo.to_bits(), hi.to_bits(), flo.to_bits(), fhi.to_bits()] {
            break;
        }
    }
    done(0.5 * (lo + hi), lo, hi, iterations)
}

fn assign_distances(graph: &mut Graph, geom: Geometry, r: f64) {
    for orbit in graph.orbits.iter_mut() {
        if orbit.is_constrained() {
            orbit.gamma = central_half_angle(geom, orbit.cos_half, r);
            orbit.cos_center = orbit.gamma.cos();
            orbit.dist = geom.corner_distance(r, orbit.cos_center);
        } else {
            orbit.gamma = 0.0;
            orbit.cos_center = 1.0;
            orbit.dist = r;
        }
    }
}
