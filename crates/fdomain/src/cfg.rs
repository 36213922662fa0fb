//! Tolerances and fixed numeric constants.
//!
//! Policy
//! - Defaults are fixed constants; `FdCfg` only exists so tests and
//!   experiments can tighten or loosen them without touching call sites.
//! - `MAX_ROOT_ITER` and `INFINITE_EXTENT` are part of the layout contract:
//!   changing them changes reference coordinates.

/// Clamp/convergence epsilon (curvature clamp, relaxation, degenerate geodesics).
pub const EPS: f64 = 1e-9;
/// Iteration cap of the regula-falsi radius search.
pub const MAX_ROOT_ITER: usize = 100;
/// Extrapolation factor for conceptually infinite straight segments.
pub const INFINITE_EXTENT: f64 = 100.0;
/// Scale anchor used as "radius" when the geometry is Euclidean.
pub const EUCLIDEAN_RADIUS: f64 = 0.5;
/// Upper bound on relaxation rounds before giving up on a fixed point.
pub const MAX_RELAX_ROUNDS: usize = 10_000;
/// Upper bound on doublings of the hyperbolic search bracket.
pub const MAX_BRACKET_DOUBLINGS: u32 = 64;

/// Engine configuration (tolerances and iteration caps).
#[derive(Clone, Copy, Debug)]
pub struct FdCfg {
    pub eps: f64,
    pub max_root_iter: usize,
    pub infinite_extent: f64,
    pub euclidean_radius: f64,
    pub max_relax_rounds: usize,
    pub max_bracket_doublings: u32,
}

impl Default for FdCfg {
    fn default() -> Self {
        Self {
            eps: EPS,
            max_root_iter: MAX_ROOT_ITER,
            infinite_extent: INFINITE_EXTENT,
            euclidean_radius: EUCLIDEAN_RADIUS,
            max_relax_rounds: MAX_RELAX_ROUNDS,
            max_bracket_doublings: MAX_BRACKET_DOUBLINGS,
        }
    }
}
