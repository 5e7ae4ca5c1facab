//! Extended difference-of-Gaussians (XDoG) edge detection.
//!
//! This is the core stylization algorithm: the difference of two
//! Gaussian blurs at scales `sigma` and `sigma * k` picks out fine
//! luminance transitions, and a tanh soft threshold turns that
//! response into line weight. The exact formula matters - any
//! deviation changes the rendered line thickness.

use crate::blur::gaussian_blur;
use crate::OpsResult;
use liner_core::{GrayMap, XdogParams};

/// Computes the XDoG edge map of a grayscale buffer.
///
/// Per pixel, with `dog = blur(gray, sigma) - blur(gray, sigma * k)`:
///
/// ```text
/// edge = 1.0                             if dog >= epsilon
///        1.0 + tanh(phi * (dog - epsilon))   otherwise
/// ```
///
/// clamped to [0, 1]. Output near 0 marks a strong edge, near 1 marks
/// background. Larger `phi` sharpens the edge-to-background
/// transition; `epsilon` sets the detection threshold on the DoG
/// response.
///
/// # Errors
///
/// Returns [`crate::OpsError::InvalidParameter`] if either blur sigma
/// is invalid.
///
/// # Example
///
/// ```rust
/// use liner_core::{GrayMap, XdogParams};
/// use liner_ops::xdog::xdog_edge;
///
/// let flat = GrayMap::filled(16, 16, 0.5);
/// let edges = xdog_edge(&flat, &XdogParams::default()).unwrap();
/// // No luminance transitions: dog == 0 everywhere, so every pixel
/// // sits at the background plateau 1 + tanh(-phi * epsilon).
/// assert!(edges.data().iter().all(|&v| v > 0.85));
/// ```
pub fn xdog_edge(gray: &GrayMap, params: &XdogParams) -> OpsResult<GrayMap> {
    tracing::debug!(
        sigma = params.sigma,
        k = params.k,
        epsilon = params.epsilon,
        phi = params.phi,
        "xdog_edge"
    );

    let g1 = gaussian_blur(gray, params.sigma)?;
    let g2 = gaussian_blur(gray, params.sigma * params.k)?;

    let (w, h) = gray.dimensions();
    let data = g1
        .data()
        .iter()
        .zip(g2.data())
        .map(|(&a, &b)| {
            let dog = a - b;
            let v = if dog >= params.epsilon {
                1.0
            } else {
                1.0 + (params.phi * (dog - params.epsilon)).tanh()
            };
            v.clamp(0.0, 1.0)
        })
        .collect();

    Ok(GrayMap::from_data(w, h, data).expect("maps share shape"))
}
