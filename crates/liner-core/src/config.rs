//! Style configuration and canvas placement types.
//!
//! [`StyleConfig`] bundles every constant the pipeline consumes: layer
//! colors and alpha bands, XDoG parameters, the shade-extraction
//! thresholds, and the fixed output canvas. It is built once at
//! startup, validated, and threaded by reference through every stage -
//! never read from process-wide state.

use crate::{Error, Result};

/// Fixed output canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 2160;

/// Fixed output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 3060;

/// XDoG edge-detection parameters.
///
/// The detector computes `dog = blur(gray, sigma) - blur(gray, sigma * k)`
/// and soft-thresholds it: pixels with `dog >= epsilon` are background
/// (1.0), everything else falls off as `1 + tanh(phi * (dog - epsilon))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XdogParams {
    /// Base blur scale.
    pub sigma: f32,
    /// Scale ratio between the two blurs (second sigma = `sigma * k`);
    /// must be at least 1 so the second blur is the wider one.
    pub k: f32,
    /// Detection threshold on the DoG response.
    pub epsilon: f32,
    /// Steepness of the edge-to-background transition.
    pub phi: f32,
}

impl Default for XdogParams {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            k: 1.6,
            epsilon: 0.01,
            phi: 10.0,
        }
    }
}

/// Immutable style constants and pipeline parameters.
///
/// # Example
///
/// ```rust
/// use liner_core::StyleConfig;
///
/// let config = StyleConfig::default();
/// config.validate().unwrap();
/// assert_eq!((config.canvas_width, config.canvas_height), (2160, 3060));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Line layer color (light gray `#C3C3C3`).
    pub line_color: [u8; 3],
    /// Line layer minimum alpha (255 * 0.70).
    pub line_alpha_min: u8,
    /// Line layer maximum alpha (255 * 0.85).
    pub line_alpha_max: u8,
    /// Edge strength below or at this value renders no line.
    pub line_mask_threshold: f32,

    /// Shade layer color (`#C8C8C8`).
    pub shade_color: [u8; 3],
    /// Shade layer minimum alpha (255 * 0.25).
    pub shade_alpha_min: u8,
    /// Shade layer maximum alpha (255 * 0.45).
    pub shade_alpha_max: u8,
    /// Shade values at or below this render fully transparent.
    pub shade_mask_threshold: f32,

    /// XDoG edge-detection parameters.
    pub xdog: XdogParams,

    /// Sigma of the wide tonal blur in shade extraction.
    pub shade_blur_sigma: f32,
    /// Minimum (max - min) span required before the shade map is
    /// normalized; flatter maps become all-zero.
    pub shade_norm_floor: f32,
    /// Normalized shade values below this are forced to exactly 0.
    pub shade_threshold: f32,

    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_color: [0xC3, 0xC3, 0xC3],
            line_alpha_min: 178,
            line_alpha_max: 216,
            line_mask_threshold: 0.1,
            shade_color: [0xC8, 0xC8, 0xC8],
            shade_alpha_min: 63,
            shade_alpha_max: 114,
            shade_mask_threshold: 0.05,
            xdog: XdogParams::default(),
            shade_blur_sigma: 8.0,
            shade_norm_floor: 0.01,
            shade_threshold: 0.2,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl StyleConfig {
    /// Checks every parameter against its valid domain.
    ///
    /// Called once by the pipeline before any pixel work; a failure
    /// aborts the run before anything is produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        check_sigma("xdog.sigma", self.xdog.sigma)?;
        check_sigma("shade_blur_sigma", self.shade_blur_sigma)?;

        // k < 1 would make the second blur narrower than the first and
        // invert the sign of the DoG response.
        if !self.xdog.k.is_finite() || self.xdog.k < 1.0 {
            return Err(Error::invalid_parameter(
                "xdog.k",
                self.xdog.k,
                "must be finite and >= 1",
            ));
        }
        if !self.xdog.epsilon.is_finite() || self.xdog.epsilon.abs() > 1.0 {
            return Err(Error::invalid_parameter(
                "xdog.epsilon",
                self.xdog.epsilon,
                "must be finite and within [-1, 1]",
            ));
        }
        if !self.xdog.phi.is_finite() || self.xdog.phi <= 0.0 {
            return Err(Error::invalid_parameter(
                "xdog.phi",
                self.xdog.phi,
                "must be finite and > 0",
            ));
        }

        if self.line_alpha_min > self.line_alpha_max {
            return Err(Error::invalid_parameter(
                "line_alpha_min",
                self.line_alpha_min,
                "must not exceed line_alpha_max",
            ));
        }
        if self.shade_alpha_min > self.shade_alpha_max {
            return Err(Error::invalid_parameter(
                "shade_alpha_min",
                self.shade_alpha_min,
                "must not exceed shade_alpha_max",
            ));
        }

        check_unit("line_mask_threshold", self.line_mask_threshold)?;
        check_unit("shade_mask_threshold", self.shade_mask_threshold)?;
        check_unit("shade_norm_floor", self.shade_norm_floor)?;
        check_unit("shade_threshold", self.shade_threshold)?;

        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::invalid_parameter(
                "canvas",
                format!("{}x{}", self.canvas_width, self.canvas_height),
                "canvas dimensions must be non-zero",
            ));
        }

        Ok(())
    }
}

fn check_sigma(name: &'static str, sigma: f32) -> Result<()> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(Error::invalid_parameter(
            name,
            sigma,
            "must be finite and >= 0",
        ));
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::invalid_parameter(
            name,
            value,
            "must be within [0, 1]",
        ));
    }
    Ok(())
}

/// Placement of a letterboxed source image on the fixed canvas.
///
/// Invariant: `scale = min(target_w / source_w, target_h / source_h)`
/// and the offsets center the resized image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Uniform scale applied to the source.
    pub scale: f64,
    /// Left edge of the pasted image on the canvas.
    pub offset_x: u32,
    /// Top edge of the pasted image on the canvas.
    pub offset_y: u32,
    /// Original source width.
    pub source_w: u32,
    /// Original source height.
    pub source_h: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        StyleConfig::default().validate().unwrap();
    }

    #[test]
    fn default_matches_engine_constants() {
        let c = StyleConfig::default();
        assert_eq!(c.line_color, [0xC3; 3]);
        assert_eq!((c.line_alpha_min, c.line_alpha_max), (178, 216));
        assert_eq!(c.shade_color, [0xC8; 3]);
        assert_eq!((c.shade_alpha_min, c.shade_alpha_max), (63, 114));
        assert_eq!(c.xdog.sigma, 0.5);
        assert_eq!(c.xdog.k, 1.6);
        assert_eq!(c.xdog.epsilon, 0.01);
        assert_eq!(c.xdog.phi, 10.0);
        assert_eq!(c.shade_blur_sigma, 8.0);
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let mut c = StyleConfig::default();
        c.xdog.sigma = -0.5;
        let err = c.validate().unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("xdog.sigma"));
    }

    #[test]
    fn k_below_one_is_rejected() {
        let mut c = StyleConfig::default();
        c.xdog.k = 0.5;
        let err = c.validate().unwrap_err();
        assert!(err.is_invalid_parameter());
        assert!(err.to_string().contains("xdog.k"));

        c.xdog.k = 1.0;
        c.validate().unwrap();
    }

    #[test]
    fn nan_phi_is_rejected() {
        let mut c = StyleConfig::default();
        c.xdog.phi = f32::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn inverted_alpha_range_is_rejected() {
        let mut c = StyleConfig::default();
        c.shade_alpha_min = 200;
        c.shade_alpha_max = 100;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("shade_alpha_min"));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let mut c = StyleConfig::default();
        c.canvas_width = 0;
        assert!(c.validate().is_err());
    }
}
