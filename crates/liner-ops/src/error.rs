//! Error types for pipeline operations.

use thiserror::Error;

/// Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffers have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value (negative sigma, bad alpha range, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unusable source image (zero width/height).
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Error bubbled up from a liner-core buffer or config contract.
    #[error(transparent)]
    Core(#[from] liner_core::Error),
}

/// Result type for pipeline operations.
pub type OpsResult<T> = Result<T, OpsError>;
