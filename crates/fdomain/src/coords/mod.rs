//! Coordinate builder: positions for every node, edge and orbit corner of
//! the fundamental domain.
//!
//! Pipeline
//! - `trace_fd`: create the records and walk the boundary cycle.
//! - `place_coordinates`: boundary corners from the solved radius, then
//!   interior points, edge midpoints and triangle centers.
//! - `relax`: Laplacian smoothing of the unconstrained points, then
//!   `compute_dist` resyncs polar forms.
//!
//! All points live in the embedding plane of the graph's geometry (see
//! [`crate::geom`]).

mod place;
mod relax;
mod trace;
pub mod types;

pub use place::place_coordinates;
pub use relax::{compute_dist, relax, relax_coords};
pub use trace::trace_fd;
pub use types::{
    BoundaryStep, Bounds, Coords, EcrId, EdgeCorner, NcrId, NodeCorner, OcrId, OrbitCorner, Point,
};

#[cfg(test)]
mod tests;
