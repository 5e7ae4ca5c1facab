//! # liner-ops
//!
//! Numeric image transforms for the liner sketch pipeline.
//!
//! This crate holds every pixel-level operation between a decoded
//! source photo and the finished artifact buffers. No I/O happens
//! here: buffers in, buffers out.
//!
//! # Modules
//!
//! - [`kernel`] - 1-D Gaussian weight sequences
//! - [`blur`] - Separable Gaussian blur with mirror boundary handling
//! - [`median`] - 3x3 median smoothing
//! - [`gray`] - RGB to grayscale reduction
//! - [`resize`] - Resampling and letterbox canvas fitting
//! - [`xdog`] - Extended difference-of-Gaussians edge detection
//! - [`shade`] - Tonal shade-map extraction
//! - [`layers`] - Line/shade layer rendering and alpha compositing
//! - [`preview`] - 2x2 diagnostic grid
//! - [`pipeline`] - Stage sequencing
//!
//! # Example
//!
//! ```rust
//! use liner_core::{Rgb8Image, StyleConfig};
//! use liner_ops::pipeline;
//!
//! let photo = Rgb8Image::filled(320, 240, [200, 180, 160]);
//! let artifacts = pipeline::run(&photo, &StyleConfig::default()).unwrap();
//! assert_eq!(artifacts.combo.dimensions(), (2160, 3060));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod gray;
pub mod kernel;
pub mod layers;
pub mod median;
pub mod pipeline;
pub mod preview;
pub mod resize;
pub mod shade;
pub mod xdog;

pub use error::{OpsError, OpsResult};
pub use pipeline::SketchArtifacts;
pub use resize::Filter;
