//! Geometry classification and the polar ↔ embedding conversions.
//!
//! Points of the fundamental domain are stored twice: as Cartesian
//! coordinates in an auxiliary Euclidean plane and as polar form
//! (geodesic distance from the domain center, angle). The plane is the
//! Poincaré disk for hyperbolic, the stereographic plane for spherical and
//! the plane itself for Euclidean geometry.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

/// Curvature class of a symbol's orbifold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    Spherical,
    Euclidean,
    Hyperbolic,
}

impl Geometry {
    /// Classify from a curvature value that has already been clamped.
    pub fn from_curvature(crv: f64) -> Self {
        if crv > 0.0 {
            Geometry::Spherical
        } else if crv < 0.0 {
            Geometry::Hyperbolic
        } else {
            Geometry::Euclidean
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Spherical => "spherical",
            Geometry::Euclidean => "euclidean",
            Geometry::Hyperbolic => "hyperbolic",
        }
    }

    /// `cosh r`, `cos r` or 1: the factor relating a corner's half-angle to
    /// the central angle it subtends at inradius `r`.
    #[inline]
    pub fn metric(&self, r: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => r.cosh(),
            Geometry::Spherical => r.cos(),
            Geometry::Euclidean => 1.0,
        }
    }

    /// Distance from the center of a corner whose central half-angle has
    /// cosine `cos_center`, for inradius `r`.
    pub fn corner_distance(&self, r: f64, cos_center: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => {
                let t = r.tanh() / cos_center;
                if t < 1.0 {
                    t.atanh()
                } else {
                    f64::INFINITY
                }
            }
            Geometry::Spherical => r.sin().atan2(r.cos() * cos_center),
            Geometry::Euclidean => {
                if cos_center > 0.0 {
                    r / cos_center
                } else {
                    f64::INFINITY
                }
            }
        }
    }

    /// Embedding radius of a point at geodesic distance `d` from the center.
    #[inline]
    pub fn embed_radius(&self, d: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => (0.5 * d).tanh(),
            Geometry::Spherical => (0.5 * d).tan(),
            Geometry::Euclidean => d,
        }
    }

    /// Geodesic distance of a point at embedding radius `rho`.
    #[inline]
    pub fn distance_of(&self, rho: f64) -> f64 {
        match self {
            Geometry::Hyperbolic => {
                if rho < 1.0 {
                    2.0 * rho.atanh()
                } else {
                    f64::INFINITY
                }
            }
            Geometry::Spherical => 2.0 * rho.atan(),
            Geometry::Euclidean => rho,
        }
    }

    #[inline]
    pub fn to_cartesian(&self, p: Polar) -> Vector2<f64> {
        let rho = self.embed_radius(p.dist);
        Vector2::new(p.angle.cos(), p.angle.sin()) * rho
    }

    #[inline]
    pub fn to_polar(&self, v: Vector2<f64>) -> Polar {
        Polar {
            dist: self.distance_of(v.norm()),
            angle: v.y.atan2(v.x),
        }
    }

    /// Image of `p` under the involution fixing this geometry's geodesics
    /// through `p` (inversion in the unit circle, or its antipodal variant).
    /// `None` for Euclidean, whose geodesics are straight.
    pub(crate) fn conjugate(&self, p: Vector2<f64>) -> Option<Vector2<f64>> {
        let n2 = p.norm_squared();
        match self {
            Geometry::Hyperbolic => Some(p / n2),
            Geometry::Spherical => Some(-p / n2),
            Geometry::Euclidean => None,
        }
    }
}

/// Polar form: geodesic distance from the domain center and polar angle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
    pub dist: f64,
    pub angle: f64,
}

impl Polar {
    #[inline]
    pub fn new(dist: f64, angle: f64) -> Self {
        Self { dist, angle }
    }
}

/// Central half-angle `γ` of a corner with half-angle cosine `cos_half` at
/// inradius `r`: `sin γ = cos_half / metric(r)`, saturating at `π/2`.
#[inline]
pub fn central_half_angle(geom: Geometry, cos_half: f64, r: f64) -> f64 {
    let m = geom.metric(r);
    if cos_half < m {
        (cos_half / m).asin()
    } else {
        FRAC_PI_2
    }
}
