//! # liner-core
//!
//! Core types for the liner sketch pipeline.
//!
//! This crate provides the foundational types used throughout liner-rs:
//!
//! - [`Rgb8Image`], [`Rgba8Image`], [`GrayMap`] - Owned pixel buffers
//! - [`StyleConfig`] - Immutable style constants and pipeline parameters
//! - [`CanvasTransform`] - Letterbox placement record
//! - [`Error`], [`Result`] - Unified error handling
//!
//! ## Design
//!
//! Every pipeline stage is a pure function: it borrows its input buffer
//! and allocates a fresh output buffer. Nothing in this crate carries
//! interior mutability, so buffers and configuration can be shared
//! freely across rayon workers.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of liner-rs and has no internal
//! dependencies. The other crates depend on `liner-core`:
//!
//! ```text
//! liner-core (this crate)
//!    ^
//!    |
//!    +-- liner-ops (numeric transforms)
//!    +-- liner-io  (PNG codec, prompt metadata)
//!    +-- liner-cli (binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use buffer::{GrayMap, Rgb8Image, Rgba8Image};
pub use config::{CanvasTransform, StyleConfig, XdogParams};
pub use error::{Error, Result};
