//! 3x3 median smoothing.
//!
//! The pipeline runs one light denoise pass over the letterboxed
//! canvas before grayscale reduction. A median preserves the hard
//! edges XDoG needs while killing single-pixel sensor noise, which a
//! small Gaussian would smear into the line work.

use liner_core::Rgb8Image;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies a 3x3 per-channel median filter with edge clamping.
///
/// # Example
///
/// ```rust
/// use liner_core::Rgb8Image;
/// use liner_ops::median::median3_rgb8;
///
/// let img = Rgb8Image::filled(8, 8, [100, 150, 200]);
/// let out = median3_rgb8(&img);
/// assert_eq!(out.pixel(4, 4), [100, 150, 200]);
/// ```
pub fn median3_rgb8(src: &Rgb8Image) -> Rgb8Image {
    let (w, h) = src.dimensions();
    let (w_us, h_us) = (w as usize, h as usize);
    let data = src.data();
    let row_len = w_us * 3;

    let mut out = vec![0u8; data.len()];
    let row_op = |y: usize, row_out: &mut [u8]| {
        let yi = y as isize;
        for x in 0..w_us {
            let xi = x as isize;
            for c in 0..3 {
                let mut window = [0u8; 9];
                let mut n = 0;
                for dy in -1isize..=1 {
                    let sy = (yi + dy).clamp(0, h_us as isize - 1) as usize;
                    for dx in -1isize..=1 {
                        let sx = (xi + dx).clamp(0, w_us as isize - 1) as usize;
                        window[n] = data[(sy * w_us + sx) * 3 + c];
                        n += 1;
                    }
                }
                window.sort_unstable();
                row_out[x * 3 + c] = window[4];
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));

    Rgb8Image::from_data(w, h, out).expect("filter preserves shape")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_image_is_unchanged() {
        let img = Rgb8Image::filled(6, 5, [7, 70, 200]);
        assert_eq!(median3_rgb8(&img), img);
    }

    #[test]
    fn single_outlier_is_removed() {
        let mut img = Rgb8Image::filled(5, 5, [50, 50, 50]);
        img.set_pixel(2, 2, [255, 0, 255]);

        let out = median3_rgb8(&img);
        assert_eq!(out.pixel(2, 2), [50, 50, 50]);
    }

    #[test]
    fn sharp_edge_survives() {
        // Left half dark, right half bright; the boundary must not move.
        let mut img = Rgb8Image::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let v = if x < 4 { 10 } else { 240 };
                img.set_pixel(x, y, [v; 3]);
            }
        }

        let out = median3_rgb8(&img);
        for y in 0..8 {
            assert_eq!(out.pixel(3, y), [10; 3]);
            assert_eq!(out.pixel(4, y), [240; 3]);
        }
    }

    #[test]
    fn corners_use_clamped_neighborhood() {
        let img = Rgb8Image::filled(3, 3, [123; 3]);
        let out = median3_rgb8(&img);
        assert_eq!(out.pixel(0, 0), [123; 3]);
        assert_eq!(out.pixel(2, 2), [123; 3]);
    }
}
