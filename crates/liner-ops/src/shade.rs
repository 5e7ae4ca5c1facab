//! Tonal shade-map extraction.
//!
//! Where XDoG picks out fine edges, the shade pass captures broad
//! tonal regions: invert the grayscale, blur it wide (sigma 8.0, an
//! order of magnitude above the XDoG scales), stretch the result to
//! full range, and zero out faint values so only clearly darker
//! regions survive.

use crate::blur::gaussian_blur;
use crate::OpsResult;
use liner_core::{GrayMap, StyleConfig};

/// Derives a normalized darkness map from a grayscale buffer.
///
/// Output values lie in [0, 1]: 0 = no shading, 1 = maximum shading.
/// The min-max normalization only runs when the blurred map spans more
/// than `config.shade_norm_floor`; a flatter map becomes all-zero
/// rather than amplifying noise. Normalized values below
/// `config.shade_threshold` are forced to exactly 0.
///
/// # Errors
///
/// Returns [`crate::OpsError::InvalidParameter`] if the configured
/// shade blur sigma is invalid.
///
/// # Example
///
/// ```rust
/// use liner_core::{GrayMap, StyleConfig};
/// use liner_ops::shade::extract_shade;
///
/// let flat = GrayMap::filled(32, 32, 0.7);
/// let shade = extract_shade(&flat, &StyleConfig::default()).unwrap();
/// assert!(shade.data().iter().all(|&v| v == 0.0));
/// ```
pub fn extract_shade(gray: &GrayMap, config: &StyleConfig) -> OpsResult<GrayMap> {
    tracing::debug!(sigma = config.shade_blur_sigma, "extract_shade");

    let (w, h) = gray.dimensions();
    let inverted =
        GrayMap::from_data(w, h, gray.data().iter().map(|&v| 1.0 - v).collect())
            .expect("inversion preserves shape");

    let mut shade = gaussian_blur(&inverted, config.shade_blur_sigma)?;

    let (smin, smax) = shade.min_max();
    if smax - smin > config.shade_norm_floor {
        let span = smax - smin;
        for v in shade.data_mut() {
            *v = (*v - smin) / span;
        }
    } else {
        // Near-flat tone: normalizing would amplify noise into
        // full-range shading.
        for v in shade.data_mut() {
            *v = 0.0;
        }
    }

    let threshold = config.shade_threshold;
    for v in shade.data_mut() {
        if *v < threshold {
            *v = 0.0;
        }
    }

    Ok(shade)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StyleConfig {
        StyleConfig::default()
    }

    #[test]
    fn flat_image_yields_all_zero_shade() {
        for tone in [0.0f32, 0.3, 0.8, 1.0] {
            let gray = GrayMap::filled(24, 24, tone);
            let shade = extract_shade(&gray, &config()).unwrap();
            assert!(
                shade.data().iter().all(|&v| v == 0.0),
                "tone {tone} produced nonzero shade"
            );
        }
    }

    #[test]
    fn dark_region_is_shaded_bright_region_is_not() {
        // Top half bright, bottom half dark.
        let (w, h) = (32u32, 64u32);
        let mut data = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for _ in 0..w {
                data.push(if y < h / 2 { 0.95 } else { 0.05 });
            }
        }
        let gray = GrayMap::from_data(w, h, data).unwrap();

        let shade = extract_shade(&gray, &config()).unwrap();
        // Darkest band normalizes to 1, brightest to 0.
        assert_eq!(shade.get(16, 60), 1.0);
        assert_eq!(shade.get(16, 3), 0.0);
    }

    #[test]
    fn values_are_either_zero_or_above_threshold() {
        let (w, h) = (48u32, 48u32);
        let data: Vec<f32> = (0..w * h)
            .map(|i| {
                let y = i / w;
                y as f32 / (h - 1) as f32
            })
            .collect();
        let gray = GrayMap::from_data(w, h, data).unwrap();

        let shade = extract_shade(&gray, &config()).unwrap();
        let threshold = config().shade_threshold;
        for &v in shade.data() {
            assert!(v == 0.0 || (threshold..=1.0).contains(&v));
        }
    }

    #[test]
    fn output_spans_unit_range_after_normalization() {
        let mut data = vec![0.5f32; 40 * 40];
        // A dark blob on a midtone field
        for y in 10..20 {
            for x in 10..20 {
                data[y * 40 + x] = 0.0;
            }
        }
        let gray = GrayMap::from_data(40, 40, data).unwrap();

        let shade = extract_shade(&gray, &config()).unwrap();
        let (min, max) = shade.min_max();
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }
}
