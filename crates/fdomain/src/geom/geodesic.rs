//! Geodesic adapters: a geodesic between two domain points, expressed in the
//! embedding plane as a circular arc or a (degenerate) straight segment.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::kernel::{circle_circle, circle_line, circle_through, Circle, Line};
use super::metric::{Geometry, Polar};
use crate::cfg::FdCfg;

/// Geodesic realized in the embedding plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geodesic {
    /// Arc of `circle` from angle `start` sweeping by signed `span`.
    Arc { circle: Circle, start: f64, span: f64 },
    /// Straight segment (diameters, and every Euclidean geodesic).
    Segment { from: Vector2<f64>, to: Vector2<f64> },
}

impl Geodesic {
    #[inline]
    pub fn is_arc(&self) -> bool {
        matches!(self, Geodesic::Arc { .. })
    }

    /// Point at parameter `t ∈ [0, 1]`: even angular subdivision on arcs,
    /// linear interpolation on segments.
    pub fn point_at(&self, t: f64) -> Vector2<f64> {
        match *self {
            Geodesic::Arc {
                circle,
                start,
                span,
            } => circle.point_at_angle(start + span * t),
            Geodesic::Segment { from, to } => from + (to - from) * t,
        }
    }

    #[inline]
    pub fn endpoints(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.point_at(0.0), self.point_at(1.0))
    }
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub(crate) fn wrap_angle(a: f64) -> f64 {
    let x = a.rem_euclid(TAU);
    if x > PI {
        x - TAU
    } else {
        x
    }
}

/// Geodesic between two points given in polar form.
///
/// With `infinite`, curved geodesics run out to the unit circle (ideal
/// boundary / equator) and Euclidean segments are extrapolated by
/// `cfg.infinite_extent` times their length beyond each end.
pub fn geodesic(geom: Geometry, a: Polar, b: Polar, infinite: bool, cfg: &FdCfg) -> Geodesic {
    let p = geom.to_cartesian(a);
    let q = geom.to_cartesian(b);
    match geom {
        Geometry::Euclidean => straight(geom, p, q, infinite, cfg),
        _ => {
            let through_origin = a.dist.abs() < cfg.eps || b.dist.abs() < cfg.eps;
            let dth = (b.angle - a.angle).rem_euclid(PI);
            let collinear = dth < cfg.eps || PI - dth < cfg.eps;
            if through_origin || collinear {
                return straight(geom, p, q, infinite, cfg);
            }
            match arc_through(geom, p, q, cfg) {
                Some(arc) if infinite => extend_arc(arc, cfg),
                Some(arc) => arc,
                None => straight(geom, p, q, infinite, cfg),
            }
        }
    }
}

/// Geodesic between two embedding-plane points.
pub fn geodesic_between(
    geom: Geometry,
    p: Vector2<f64>,
    q: Vector2<f64>,
    cfg: &FdCfg,
) -> Geodesic {
    geodesic(geom, geom.to_polar(p), geom.to_polar(q), false, cfg)
}

fn arc_through(geom: Geometry, p: Vector2<f64>, q: Vector2<f64>, cfg: &FdCfg) -> Option<Geodesic> {
    let conj = geom.conjugate(p)?;
    let circle = circle_through(p, q, conj, cfg.eps)?;
    if !circle.radius.is_finite() || circle.radius >= 1.0 / cfg.eps {
        return None;
    }
    let start = circle.angle_of(p);
    let span = wrap_angle(circle.angle_of(q) - start);
    Some(Geodesic::Arc {
        circle,
        start,
        span,
    })
}

fn extend_arc(arc: Geodesic, cfg: &FdCfg) -> Geodesic {
    let Geodesic::Arc {
        circle,
        start,
        span,
    } = arc
    else {
        return arc;
    };
    let Some([u, v]) = circle_circle(&circle, &Circle::unit(), cfg.eps) else {
        return arc;
    };
    let au = wrap_angle(circle.angle_of(u) - start);
    let av = wrap_angle(circle.angle_of(v) - start);
    let (behind, ahead) = if span >= 0.0 {
        (au.min(av), au.max(av))
    } else {
        (au.max(av), au.min(av))
    };
    Geodesic::Arc {
        circle,
        start: start + behind,
        span: ahead - behind,
    }
}

fn straight(
    geom: Geometry,
    p: Vector2<f64>,
    q: Vector2<f64>,
    infinite: bool,
    cfg: &FdCfg,
) -> Geodesic {
    if !infinite || (q - p).norm() < cfg.eps {
        return Geodesic::Segment { from: p, to: q };
    }
    match geom {
        Geometry::Euclidean => {
            let d = (q - p) * cfg.infinite_extent;
            Geodesic::Segment {
                from: p - d,
                to: q + d,
            }
        }
        _ => match circle_line(&Circle::unit(), &Line::through(p, q), cfg.eps) {
            Some([from, to]) => Geodesic::Segment { from, to },
            None => Geodesic::Segment { from: p, to: q },
        },
    }
}
