//! Fundamental-domain layout for two-dimensional Delaney–Dress symbols.
//!
//! Given a symbol, the engine glues its flags into a connected incidence
//! graph, classifies the geometry (spherical, Euclidean, hyperbolic), solves
//! for the canonical inradius and positions every corner of the domain in
//! the geometry's embedding plane.
//!
//! API Policy
//! - `api` is the curated surface for the CLI, benches and demos.
//! - Modules stay public for tests and experiments; expect breaking changes.

pub mod api;
pub mod cfg;
pub mod coords;
pub mod domain;
pub mod error;
pub mod geom;
pub mod glue;
pub mod radius;
pub mod symbol;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::FdCfg;
pub use error::{FdError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::FdCfg;
    pub use crate::domain::{DomainSummary, FundamentalDomain};
    pub use crate::error::{FdError, Result};
    pub use crate::geom::{Geometry, Polar};
    pub use crate::symbol::DSymbol;
    pub use nalgebra::Vector2 as Vec2;
}
