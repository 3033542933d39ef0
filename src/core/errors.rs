//! Error types for reticle construction and rendering
//!
//! None of these escape a running placement session: rendering failures are
//! logged or substituted, and only configuration intake reports them to callers.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReticleError {
    /// Only circular templates can be drawn by the reticle
    #[error("non-circular crosshairs are unsupported (requested {shape})")]
    UnsupportedShape { shape: String },

    /// A texture asset could not be loaded
    #[error("failed to load texture '{path}': {reason}")]
    TextureLoadFailure { path: String, reason: String },

    #[error("invalid snap interval '{0}': expected \"corner\", \"center\" or a positive integer")]
    InvalidInterval(String),

    #[error("invalid reticle size {0}: must be a positive, finite number")]
    InvalidSize(f32),

    /// The canvas owning the session was dropped before the placement resolved
    #[error("placement session was dropped before it resolved")]
    SessionDropped,
}
