//! 1-D Gaussian kernel construction.
//!
//! The blur is separable, so a single odd-length weight sequence
//! serves both the horizontal and vertical passes.

use crate::{OpsError, OpsResult};

/// Sigma below which callers must treat blur as a no-op.
///
/// A kernel this narrow degenerates to a single meaningful tap;
/// [`crate::blur::gaussian_blur`] returns its input unchanged instead
/// of building one.
pub const IDENTITY_SIGMA: f32 = 0.3;

/// Builds a normalized 1-D Gaussian weight sequence for `sigma`.
///
/// Radius is `max(1, ceil(3 * sigma))`; weights are
/// `exp(-x^2 / (2 * sigma^2))` at integer offsets `-radius..=radius`,
/// normalized to sum to 1.0.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] for negative or non-finite
/// sigma. Callers are expected not to ask for kernels below
/// [`IDENTITY_SIGMA`]; the result would be a near-degenerate spike.
///
/// # Example
///
/// ```rust
/// use liner_ops::kernel::gaussian_1d;
///
/// let k = gaussian_1d(0.5).unwrap();
/// assert_eq!(k.len(), 5); // radius ceil(1.5) = 2
/// let sum: f32 = k.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian_1d(sigma: f32) -> OpsResult<Vec<f32>> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "gaussian sigma must be finite and >= 0, got {sigma}"
        )));
    }

    let radius = ((sigma * 3.0).ceil() as i32).max(1);
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);

    let mut weights = Vec::with_capacity((2 * radius + 1) as usize);
    let mut sum = 0.0f64;
    for i in -radius..=radius {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }

    Ok(weights.iter().map(|&w| (w / sum) as f32).collect())
}

/// Returns the radius (half-length) of a kernel built by [`gaussian_1d`].
#[inline]
pub fn radius(kernel: &[f32]) -> usize {
    kernel.len() / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_odd_and_normalized() {
        for sigma in [0.3f32, 0.5, 0.8, 1.6, 3.0, 8.0] {
            let k = gaussian_1d(sigma).unwrap();
            assert_eq!(k.len() % 2, 1, "sigma {sigma}");

            // The weights are normalized in f64 and then cast, so the
            // f64-accumulated sum can drift from 1.0 only by the f32
            // rounding of each weight: at most a half-ulp (2^-24)
            // relative per weight, under 6e-8 in total.
            let sum: f64 = k.iter().map(|&w| f64::from(w)).sum();
            assert!((sum - 1.0).abs() < 1e-7, "sigma {sigma}: sum {sum}");
        }
    }

    #[test]
    fn radius_follows_three_sigma_rule() {
        // ceil(3 * 0.5) = 2 -> 5 taps
        assert_eq!(gaussian_1d(0.5).unwrap().len(), 5);
        // ceil(3 * 1.6 * 0.5) for the k-scaled blur: ceil(2.4) = 3 -> 7 taps
        assert_eq!(gaussian_1d(0.8).unwrap().len(), 7);
        // ceil(3 * 8.0) = 24 -> 49 taps
        assert_eq!(gaussian_1d(8.0).unwrap().len(), 49);
    }

    #[test]
    fn tiny_sigma_still_has_radius_one() {
        let k = gaussian_1d(0.05).unwrap();
        assert_eq!(k.len(), 3);
    }

    #[test]
    fn center_weight_dominates() {
        let k = gaussian_1d(1.0).unwrap();
        let mid = k.len() / 2;
        for (i, &w) in k.iter().enumerate() {
            if i != mid {
                assert!(k[mid] > w);
            }
        }
    }

    #[test]
    fn weights_are_symmetric() {
        let k = gaussian_1d(2.5).unwrap();
        for i in 0..k.len() / 2 {
            assert_eq!(k[i], k[k.len() - 1 - i]);
        }
    }

    #[test]
    fn negative_sigma_is_rejected() {
        assert!(gaussian_1d(-0.1).is_err());
        assert!(gaussian_1d(f32::NAN).is_err());
    }
}
