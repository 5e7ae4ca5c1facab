//! # liner-io
//!
//! File I/O for the liner sketch pipeline: the PNG codec for source
//! photos and image artifacts, and the prompt metadata JSON written
//! alongside them.
//!
//! # Example
//!
//! ```rust,ignore
//! use liner_io::png;
//!
//! let photo = png::read_rgb8("photo.png")?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod png;
pub mod prompt;

pub use error::{IoError, IoResult};
pub use prompt::PromptRecord;
