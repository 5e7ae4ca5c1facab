//! RGB to grayscale reduction.

use liner_core::{GrayMap, Rgb8Image};

/// Rec.601 luma coefficient for the red channel.
pub const REC601_LUMA_R: f32 = 0.2989;

/// Rec.601 luma coefficient for the green channel.
pub const REC601_LUMA_G: f32 = 0.5870;

/// Rec.601 luma coefficient for the blue channel.
pub const REC601_LUMA_B: f32 = 0.1140;

/// Reduces an 8-bit RGB buffer to a luma map in [0, 1].
///
/// `luma = (0.2989 R + 0.5870 G + 0.1140 B) / 255` per pixel - the
/// Rec.601 weighting the stylization was tuned against.
///
/// # Example
///
/// ```rust
/// use liner_core::Rgb8Image;
/// use liner_ops::gray::to_gray;
///
/// let white = Rgb8Image::filled(2, 2, [255, 255, 255]);
/// let gray = to_gray(&white);
/// assert!((gray.get(0, 0) - 1.0).abs() < 1e-4);
/// ```
pub fn to_gray(src: &Rgb8Image) -> GrayMap {
    let (w, h) = src.dimensions();
    let data = src
        .data()
        .chunks_exact(3)
        .map(|px| {
            (px[0] as f32 * REC601_LUMA_R
                + px[1] as f32 * REC601_LUMA_G
                + px[2] as f32 * REC601_LUMA_B)
                / 255.0
        })
        .collect();
    GrayMap::from_data(w, h, data).expect("reduction preserves shape")
}
