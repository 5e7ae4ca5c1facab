//! Separable Gaussian blur with mirror boundary handling.
//!
//! The 2-D blur factors into a horizontal and a vertical 1-D pass over
//! the same kernel. Each pass is independent per row (or column), so
//! both are parallelized across rayon workers; the vertical pass only
//! starts once the horizontal pass has produced its full intermediate
//! buffer, which is exactly the barrier the separable form requires.
//!
//! Out-of-range taps are resolved by mirror reflection of interior
//! samples (`-i -> i`, `n + i -> n - 2 - i`), so a blur never darkens
//! or brightens the buffer edges the way zero padding would.

use crate::kernel::{self, IDENTITY_SIGMA};
use crate::OpsResult;
use liner_core::GrayMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies a separable Gaussian blur to a single-channel map.
///
/// Sigma below [`IDENTITY_SIGMA`] returns a copy of the input
/// unchanged; a kernel that narrow would be a degenerate 1-tap spike.
///
/// # Errors
///
/// Returns [`crate::OpsError::InvalidParameter`] for negative or
/// non-finite sigma.
///
/// # Example
///
/// ```rust
/// use liner_core::GrayMap;
/// use liner_ops::blur::gaussian_blur;
///
/// let flat = GrayMap::filled(16, 16, 0.5);
/// let out = gaussian_blur(&flat, 2.0).unwrap();
/// assert!(out.data().iter().all(|v| (v - 0.5).abs() < 1e-5));
/// ```
pub fn gaussian_blur(src: &GrayMap, sigma: f32) -> OpsResult<GrayMap> {
    if sigma >= 0.0 && sigma < IDENTITY_SIGMA {
        return Ok(src.clone());
    }
    let k = kernel::gaussian_1d(sigma)?;
    tracing::trace!(
        sigma,
        taps = k.len(),
        width = src.width(),
        height = src.height(),
        "gaussian_blur"
    );

    let tmp = horizontal_pass(src, &k);
    Ok(vertical_pass(&tmp, &k))
}

/// Reflects `i` into `[0, n)` without repeating the edge sample
/// (numpy `reflect` / scipy `mirror` semantics).
#[inline]
fn reflect(mut i: isize, n: isize) -> usize {
    if n == 1 {
        return 0;
    }
    // Fold until in range; each fold shrinks |i - valid range|, and a
    // radius larger than the axis needs more than one fold.
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

fn horizontal_pass(src: &GrayMap, k: &[f32]) -> GrayMap {
    let (w, h) = src.dimensions();
    let (w_us, radius) = (w as usize, kernel::radius(k) as isize);
    let data = src.data();

    let mut out = vec![0.0f32; data.len()];
    let row_op = |y: usize, row_out: &mut [f32]| {
        let row = &data[y * w_us..(y + 1) * w_us];
        for (x, out_px) in row_out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = reflect(x as isize + ki as isize - radius, w_us as isize);
                acc += row[sx] * kw;
            }
            *out_px = acc;
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w_us)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(w_us)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));

    GrayMap::from_data(w, h, out).expect("pass preserves shape")
}

fn vertical_pass(src: &GrayMap, k: &[f32]) -> GrayMap {
    let (w, h) = src.dimensions();
    let (w_us, h_us, radius) = (w as usize, h as usize, kernel::radius(k) as isize);
    let data = src.data();

    // Output rows are written independently; every tap reads from the
    // finished horizontal intermediate, never from `out`.
    let mut out = vec![0.0f32; data.len()];
    let row_op = |y: usize, row_out: &mut [f32]| {
        for (ki, &kw) in k.iter().enumerate() {
            let sy = reflect(y as isize + ki as isize - radius, h_us as isize);
            let src_row = &data[sy * w_us..(sy + 1) * w_us];
            for (out_px, &src_px) in row_out.iter_mut().zip(src_row) {
                *out_px += src_px * kw;
            }
        }
    };

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w_us)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));
    #[cfg(not(feature = "parallel"))]
    out.chunks_mut(w_us)
        .enumerate()
        .for_each(|(y, row)| row_op(y, row));

    GrayMap::from_data(w, h, out).expect("pass preserves shape")
}
