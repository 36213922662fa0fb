//! Error types for gluing and layout.

use thiserror::Error;

/// Result type for fundamental-domain operations.
pub type Result<T> = std::result::Result<T, FdError>;

/// Errors raised while reading a symbol or building its fundamental domain.
///
/// Every variant is fatal for the symbol at hand: the input is rejected, not retried.
#[derive(Debug, Error)]
pub enum FdError {
    /// An internal cross-reference does not match (malformed symbol).
    #[error("structural inconsistency: {0}")]
    Structural(String),

    /// Gluing finished without reaching every node.
    #[error("graph not connected: {glued} of {total} nodes glued")]
    Disconnected { glued: usize, total: usize },

    /// The textual symbol could not be read.
    #[error("symbol parse error: {0}")]
    Parse(String),
}

impl FdError {
    pub(crate) fn structural(msg: impl Into<String>) -> Self {
        FdError::Structural(msg.into())
    }
}
