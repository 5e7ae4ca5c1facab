//! Error types for liner-core operations.
//!
//! The [`Error`] enum covers configuration values outside their valid
//! domain and the buffer-contract violations (data length vs declared
//! shape) that would otherwise surface as panics. Image-level and
//! buffer-size failures during processing are reported by the ops
//! layer's own error type, which wraps this one.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing buffers or validating
/// pipeline configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration constant is outside its valid domain.
    ///
    /// Raised by [`crate::StyleConfig::validate`] before any pixel is
    /// touched; the run aborts with no output.
    #[error("invalid parameter {name}: {reason} (got {value})")]
    InvalidParameter {
        /// Parameter name as it appears in [`crate::StyleConfig`]
        name: &'static str,
        /// Offending value, formatted
        value: String,
        /// Why the value is invalid
        reason: &'static str,
    },

    /// Buffer data length does not match width * height * channels.
    #[error("buffer length {got} does not match {width}x{height}x{channels} (expected {expected})")]
    BufferLengthMismatch {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channels per pixel
        channels: u32,
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl std::fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Returns `true` if this error rejects a configuration value.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}
