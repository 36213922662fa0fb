//! Line kernel: planar primitives, metric conversions and geodesic adapters.
//!
//! Purpose
//! - Express geodesics of the active geometry (hyperbolic, spherical,
//!   Euclidean) in one auxiliary Euclidean plane so that the coordinate
//!   builder can subdivide boundary sides uniformly.
//!
//! Conventions
//! - Hyperbolic points live in the Poincaré disk, spherical points in the
//!   stereographic plane; both use the unit circle as reference.
//! - Degenerate configurations (points at the origin, collinear with it, or
//!   circles too large to trust) fall back to straight segments, gated by
//!   `FdCfg::eps`.

pub mod geodesic;
pub mod kernel;
pub mod metric;

pub use geodesic::{geodesic, geodesic_between, Geodesic};
pub use kernel::{circle_circle, circle_line, circle_through, line_line, Circle, Line};
pub use metric::{central_half_angle, Geometry, Polar};

#[cfg(test)]
mod tests;
