//! Pixel buffer types for the sketch pipeline.
//!
//! Three concrete buffers cover everything the pipeline moves between
//! stages:
//!
//! - [`Rgb8Image`] - interleaved 8-bit RGB (source photo, canvas, combo, preview)
//! - [`Rgba8Image`] - interleaved 8-bit RGBA (line and shade layers)
//! - [`GrayMap`] - single-channel f32 in [0,1] (grayscale, edge, shade maps)
//!
//! # Memory Layout
//!
//! Pixels are stored in row-major order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! For RGBA images, alpha is interleaved: `[R G B A R G B A ...]`,
//! straight (non-premultiplied).
//!
//! Buffers are immutable once a stage hands them on; every stage
//! allocates its own output rather than mutating its input.
//!
//! # Usage
//!
//! ```rust
//! use liner_core::Rgb8Image;
//!
//! let img = Rgb8Image::filled(64, 48, [255, 255, 255]);
//! assert_eq!(img.dimensions(), (64, 48));
//! assert_eq!(img.pixel(0, 0), [255, 255, 255]);
//! ```

use crate::{Error, Result};

/// Owned interleaved 8-bit image buffer with `N` channels per pixel.
///
/// Use the [`Rgb8Image`] and [`Rgba8Image`] aliases; `N` is fixed per
/// buffer role so a line layer (RGBA) can never be passed where a
/// canvas (RGB) is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct U8Image<const N: usize> {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Interleaved 8-bit RGB buffer.
pub type Rgb8Image = U8Image<3>;

/// Interleaved 8-bit RGBA buffer with straight (non-premultiplied) alpha.
pub type Rgba8Image = U8Image<4>;

impl<const N: usize> U8Image<N> {
    /// Channels per pixel.
    pub const CHANNELS: usize = N;

    /// Creates a buffer filled with zeros (black; for RGBA also fully
    /// transparent).
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * N;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Creates a buffer filled with one pixel value.
    pub fn filled(width: u32, height: u32, pixel: [u8; N]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * N);
        for _ in 0..count {
            data.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps existing interleaved data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLengthMismatch`] if `data.len()` is not
    /// `width * height * N`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * N;
        if data.len() != expected {
            return Err(Error::BufferLengthMismatch {
                width,
                height,
                channels: N as u32,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw interleaved samples mutably.
    ///
    /// Only stage-internal code building a fresh output should use
    /// this; finished buffers are treated as immutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; N] {
        let i = (y as usize * self.width as usize + x as usize) * N;
        let mut px = [0u8; N];
        px.copy_from_slice(&self.data[i..i + N]);
        px
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; N]) {
        let i = (y as usize * self.width as usize + x as usize) * N;
        self.data[i..i + N].copy_from_slice(&px);
    }

    /// Consumes the buffer and returns the raw samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Single-channel floating-point map with samples nominally in [0,1].
///
/// Used for the grayscale, edge, and shade intermediates. An edge map
/// reads 0 = strongest edge, 1 = background; a shade map reads 0 = no
/// shading, 1 = maximum shading.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayMap {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl GrayMap {
    /// Creates a map filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// Creates a map filled with one value.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Wraps existing sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLengthMismatch`] if `data.len()` is not
    /// `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::BufferLengthMismatch {
                width,
                height,
                channels: 1,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the map width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the map height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the map has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the raw samples mutably (stage-internal use).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Returns (min, max) over all samples, or (0, 0) for an empty map.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    /// Consumes the map and returns the raw samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}
