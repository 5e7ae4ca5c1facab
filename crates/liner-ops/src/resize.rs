//! Resampling and letterbox canvas fitting.
//!
//! Downstream edge detection is sensitive to resampling artifacts, so
//! the canvas fit uses Lanczos-3 - sharp enough that XDoG still sees
//! the photo's real edges rather than interpolation mush.
//!
//! # Example
//!
//! ```rust
//! use liner_core::{Rgb8Image, StyleConfig};
//! use liner_ops::resize::letterbox;
//!
//! let photo = Rgb8Image::filled(400, 300, [128, 128, 128]);
//! let (canvas, t) = letterbox(&photo, &StyleConfig::default()).unwrap();
//! assert_eq!(canvas.dimensions(), (2160, 3060));
//! assert_eq!(t.offset_x, 0); // width-bound fit
//! ```

use crate::{OpsError, OpsResult};
use liner_core::buffer::U8Image;
use liner_core::{CanvasTransform, Rgb8Image, StyleConfig};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Linear interpolation (smooth, fast).
    Bilinear,
    /// Lanczos-3 (high quality, preserves edge sharpness).
    #[default]
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Bilinear => 1.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Bilinear => bilinear_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Lanczos weight function.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Resizes an interleaved 8-bit buffer to `dst_w` x `dst_h`.
///
/// Separable two-pass resampling: horizontal into an f32 intermediate,
/// then vertical with rounding quantization back to u8. Weights are
/// renormalized per output sample so edge pixels keep full brightness.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if either destination
/// dimension is zero.
pub fn resize_u8<const N: usize>(
    src: &U8Image<N>,
    dst_w: u32,
    dst_h: u32,
    filter: Filter,
) -> OpsResult<U8Image<N>> {
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "destination size must be > 0, got {dst_w}x{dst_h}"
        )));
    }
    if src.width() == 0 || src.height() == 0 {
        return Err(OpsError::InvalidDimensions(
            "source size must be > 0".into(),
        ));
    }
    tracing::trace!(
        src_w = src.width(),
        src_h = src.height(),
        dst_w,
        dst_h,
        ?filter,
        "resize_u8"
    );

    let src_f: Vec<f32> = src.data().iter().map(|&v| v as f32).collect();
    let temp = resize_axis::<N>(
        &src_f,
        src.width() as usize,
        src.height() as usize,
        dst_w as usize,
        filter,
        Axis::Horizontal,
    );
    let out_f = resize_axis::<N>(
        &temp,
        dst_w as usize,
        src.height() as usize,
        dst_h as usize,
        filter,
        Axis::Vertical,
    );

    let out = out_f
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(U8Image::from_data(dst_w, dst_h, out)?)
}

enum Axis {
    Horizontal,
    Vertical,
}

/// One resampling pass along `axis`.
///
/// `src_w`/`src_h` describe the input; the output replaces the chosen
/// axis length with `dst_len`.
fn resize_axis<const N: usize>(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    dst_len: usize,
    filter: Filter,
    axis: Axis,
) -> Vec<f32> {
    let (src_len, other_len) = match axis {
        Axis::Horizontal => (src_w, src_h),
        Axis::Vertical => (src_h, src_w),
    };
    let scale = src_len as f32 / dst_len as f32;
    let support = filter.support() * scale.max(1.0);

    let (out_w, out_h) = match axis {
        Axis::Horizontal => (dst_len, src_h),
        Axis::Vertical => (src_w, dst_len),
    };
    let mut dst = vec![0.0f32; out_w * out_h * N];

    for d in 0..dst_len {
        // Map destination coordinate to source coordinate
        let center = (d as f32 + 0.5) * scale - 0.5;
        let lo = ((center - support).floor() as isize).max(0) as usize;
        let hi = ((center + support).ceil() as usize).min(src_len - 1);

        for o in 0..other_len {
            let mut sum = [0.0f32; N];
            let mut weight_sum = 0.0f32;

            for s in lo..=hi {
                let dist = (s as f32 - center) / scale.max(1.0);
                let w = filter.weight(dist);
                weight_sum += w;

                let src_idx = match axis {
                    Axis::Horizontal => (o * src_w + s) * N,
                    Axis::Vertical => (s * src_w + o) * N,
                };
                for c in 0..N {
                    sum[c] += src[src_idx + c] * w;
                }
            }

            let dst_idx = match axis {
                Axis::Horizontal => (o * out_w + d) * N,
                Axis::Vertical => (d * out_w + o) * N,
            };
            if weight_sum > 0.0 {
                for c in 0..N {
                    dst[dst_idx + c] = sum[c] / weight_sum;
                }
            }
        }
    }

    dst
}

/// Calculates the aspect-preserving dimensions for the target canvas.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32, f64) {
    let scale_w = f64::from(max_w) / f64::from(src_w);
    let scale_h = f64::from(max_h) / f64::from(src_h);
    let scale = scale_w.min(scale_h);

    let new_w = ((f64::from(src_w) * scale).round() as u32).clamp(1, max_w);
    let new_h = ((f64::from(src_h) * scale).round() as u32).clamp(1, max_h);

    (new_w, new_h, scale)
}

/// Fits a source photo onto the fixed canvas (letterbox).
///
/// The source is uniformly scaled to touch the canvas on its binding
/// axis, resampled with Lanczos-3, and pasted centered onto a solid
/// black canvas. No cropping ever occurs, only padding.
///
/// # Errors
///
/// Returns [`OpsError::InvalidImage`] for a zero-width or zero-height
/// source.
pub fn letterbox(src: &Rgb8Image, config: &StyleConfig) -> OpsResult<(Rgb8Image, CanvasTransform)> {
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 {
        return Err(OpsError::InvalidImage(format!(
            "source has zero area ({w}x{h})"
        )));
    }
    let (tw, th) = (config.canvas_width, config.canvas_height);

    let (nw, nh, scale) = fit_dimensions(w, h, tw, th);
    tracing::debug!(w, h, nw, nh, scale, "letterbox fit");

    let resized = resize_u8(src, nw, nh, Filter::Lanczos3)?;

    let offset_x = (tw - nw) / 2;
    let offset_y = (th - nh) / 2;

    let mut canvas = Rgb8Image::new(tw, th);
    paste(&mut canvas, &resized, offset_x, offset_y);

    Ok((
        canvas,
        CanvasTransform {
            scale,
            offset_x,
            offset_y,
            source_w: w,
            source_h: h,
        },
    ))
}

/// Copies `src` into `dst` with its top-left corner at (ox, oy).
///
/// The caller guarantees the pasted region fits inside `dst`.
fn paste<const N: usize>(dst: &mut U8Image<N>, src: &U8Image<N>, ox: u32, oy: u32) {
    let dst_w = dst.width() as usize;
    let src_row = src.width() as usize * N;
    let (ox, oy) = (ox as usize, oy as usize);

    let dst_data = dst.data_mut();
    for (y, row) in src.data().chunks_exact(src_row).enumerate() {
        let start = ((oy + y) * dst_w + ox) * N;
        dst_data[start..start + src_row].copy_from_slice(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StyleConfig {
        StyleConfig::default()
    }

    #[test]
    fn filter_weights_at_center() {
        assert!((Filter::Bilinear.weight(0.0) - 1.0).abs() < 0.01);
        assert!((Filter::Bilinear.weight(0.5) - 0.5).abs() < 0.01);
        assert!((Filter::Lanczos3.weight(0.0) - 1.0).abs() < 0.01);
        assert_eq!(Filter::Lanczos3.weight(3.5), 0.0);
    }

    #[test]
    fn resize_constant_image_stays_constant() {
        let src = Rgb8Image::filled(64, 64, [200, 100, 50]);
        let out = resize_u8(&src, 16, 16, Filter::Lanczos3).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
        for px in out.data().chunks_exact(3) {
            assert_eq!(px, [200, 100, 50]);
        }
    }

    #[test]
    fn resize_rejects_zero_target() {
        let src = Rgb8Image::filled(8, 8, [1, 2, 3]);
        assert!(resize_u8(&src, 0, 8, Filter::Bilinear).is_err());
    }

    #[test]
    fn fit_dimensions_letterboxes_both_orientations() {
        // Wide photo: width binds
        let (w, h, _) = fit_dimensions(1920, 1080, 2160, 3060);
        assert_eq!((w, h), (2160, 1215));

        // Tall photo: height binds
        let (w, h, _) = fit_dimensions(1080, 1920, 2160, 3060);
        assert_eq!((w, h), (1721, 3060));

        // Exact canvas aspect
        let (w, h, scale) = fit_dimensions(1080, 1530, 2160, 3060);
        assert_eq!((w, h), (2160, 3060));
        assert_eq!(scale, 2.0);
    }

    #[test]
    fn letterbox_output_is_exactly_canvas_sized() {
        for (w, h) in [(100u32, 100u32), (4000, 50), (50, 4000), (2160, 3060), (1, 1)] {
            let src = Rgb8Image::filled(w, h, [255, 255, 255]);
            let (canvas, t) = letterbox(&src, &config()).unwrap();
            assert_eq!(canvas.dimensions(), (2160, 3060), "source {w}x{h}");
            assert_eq!((t.source_w, t.source_h), (w, h));
        }
    }

    #[test]
    fn letterbox_pads_with_black_and_centers() {
        // Wide source: bands above and below
        let src = Rgb8Image::filled(1920, 1080, [255, 255, 255]);
        let (canvas, t) = letterbox(&src, &config()).unwrap();
        assert_eq!(t.offset_x, 0);
        assert_eq!(t.offset_y, (3060 - 1215) / 2);

        assert_eq!(canvas.pixel(1080, 0), [0, 0, 0]);
        assert_eq!(canvas.pixel(1080, 3059), [0, 0, 0]);
        assert_eq!(canvas.pixel(1080, 1530), [255, 255, 255]);
    }

    #[test]
    fn letterbox_rejects_zero_area_source() {
        let src = Rgb8Image::new(0, 100);
        let err = letterbox(&src, &config()).unwrap_err();
        assert!(matches!(err, OpsError::InvalidImage(_)));
    }

    #[test]
    fn paste_places_at_offset() {
        let mut dst = Rgb8Image::new(4, 4);
        let src = Rgb8Image::filled(2, 2, [9, 9, 9]);
        paste(&mut dst, &src, 1, 2);

        assert_eq!(dst.pixel(0, 0), [0, 0, 0]);
        assert_eq!(dst.pixel(1, 2), [9, 9, 9]);
        assert_eq!(dst.pixel(2, 3), [9, 9, 9]);
        assert_eq!(dst.pixel(3, 3), [0, 0, 0]);
    }
}
