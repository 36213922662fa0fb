//! Curated surface for the CLI, benches and demos (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules.

// Input
pub use crate::symbol::DSymbol;
// Gluing
pub use crate::glue::{glue, Graph, Invariants};
// Radius
pub use crate::radius::{defect, solve_radius, RadiusSolution};
// Coordinates
pub use crate::coords::{compute_dist, place_coordinates, relax, trace_fd, Coords, Point};
// Geometry
pub use crate::geom::{geodesic, geodesic_between, Geodesic, Geometry, Polar};
// Pipeline
pub use crate::domain::{DomainSummary, FundamentalDomain};
pub use crate::{FdCfg, FdError};
