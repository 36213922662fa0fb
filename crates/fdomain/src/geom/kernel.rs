//! Euclidean primitives in the auxiliary embedding plane.
//!
//! Geometry-agnostic: the curved adapters in `geodesic` express hyperbolic and
//! spherical geodesics as circles or lines of this plane and call in here.

use nalgebra::Vector2;

/// Circle with center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Vector2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
    #[inline]
    pub fn unit() -> Self {
        Self::new(Vector2::zeros(), 1.0)
    }
    /// Polar angle of `p` seen from the center.
    #[inline]
    pub fn angle_of(&self, p: Vector2<f64>) -> f64 {
        let d = p - self.center;
        d.y.atan2(d.x)
    }
    #[inline]
    pub fn point_at_angle(&self, a: f64) -> Vector2<f64> {
        self.center + Vector2::new(a.cos(), a.sin()) * self.radius
    }
}

/// Line `point + s·dir` (direction not normalized).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub point: Vector2<f64>,
    pub dir: Vector2<f64>,
}

impl Line {
    #[inline]
    pub fn new(point: Vector2<f64>, dir: Vector2<f64>) -> Self {
        Self { point, dir }
    }
    #[inline]
    pub fn through(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self::new(a, b - a)
    }
    /// Perpendicular bisector of segment `ab`.
    #[inline]
    pub fn bisector(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        let d = b - a;
        Self::new((a + b) * 0.5, Vector2::new(-d.y, d.x))
    }
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Intersection of two lines; `None` when (numerically) parallel.
pub fn line_line(l1: &Line, l2: &Line, eps: f64) -> Option<Vector2<f64>> {
    let den = cross(l1.dir, l2.dir);
    let scale = l1.dir.norm() * l2.dir.norm();
    if !(scale > 0.0) || den.abs() <= eps * scale {
        return None;
    }
    let s = cross(l2.point - l1.point, l2.dir) / den;
    Some(l1.point + l1.dir * s)
}

/// Intersections of a circle with a line, ordered along the line direction.
/// A tangent line yields the touching point twice.
pub fn circle_line(c: &Circle, l: &Line, eps: f64) -> Option<[Vector2<f64>; 2]> {
    let dd = l.dir.norm_squared();
    if !(dd > 0.0) {
        return None;
    }
    let f = l.point - c.center;
    let b = f.dot(&l.dir);
    let disc = b * b - dd * (f.norm_squared() - c.radius * c.radius);
    if disc < -eps * dd {
        return None;
    }
    let root = disc.max(0.0).sqrt();
    let s1 = (-b - root) / dd;
    let s2 = (-b + root) / dd;
    Some([l.point + l.dir * s1, l.point + l.dir * s2])
}

/// Intersections of two circles. The pair is ordered so that the first point
/// lies to the right of the center line `c1 → c2`.
pub fn circle_circle(c1: &Circle, c2: &Circle, eps: f64) -> Option<[Vector2<f64>; 2]> {
    let delta = c2.center - c1.center;
    let d = delta.norm();
    if d <= eps {
        return None;
    }
    if d > c1.radius + c2.radius + eps || d < (c1.radius - c2.radius).abs() - eps {
        return None;
    }
    let a = (c1.radius * c1.radius - c2.radius * c2.radius + d * d) / (2.0 * d);
    let h = (c1.radius * c1.radius - a * a).max(0.0).sqrt();
    let u = delta / d;
    let base = c1.center + u * a;
    let n = Vector2::new(u.y, -u.x);
    Some([base + n * h, base - n * h])
}

/// Circle through three points; `None` when they are (nearly) collinear.
pub fn circle_through(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, eps: f64) -> Option<Circle> {
    let center = line_line(&Line::bisector(a, b), &Line::bisector(a, c), eps)?;
    let radius = (a - center).norm();
    if radius.is_finite() {
        Some(Circle::new(center, radius))
    } else {
        None
    }
}
