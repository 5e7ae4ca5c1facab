//! Layer rendering and alpha compositing.
//!
//! Turns the edge and shade maps into colored RGBA layers and
//! composites them onto a white background. The combo order is fixed:
//! shade first, line second - lines must sit visually on top of
//! shading, and [`build_combo`] owns that sequence so call sites
//! cannot invert it.

use crate::{OpsError, OpsResult};
use liner_core::{GrayMap, Rgb8Image, Rgba8Image, StyleConfig};

/// Renders the line layer from an edge map.
///
/// `strength = 1 - edge`; pixels with strength above
/// `config.line_mask_threshold` get the fixed line color with
/// `alpha = min + strength * (max - min)`, everything else is fully
/// transparent black.
///
/// # Errors
///
/// Never fails for a well-formed edge map; the signature matches the
/// other stages so the pipeline composes uniformly.
pub fn build_line_rgba(edge_map: &GrayMap, config: &StyleConfig) -> OpsResult<Rgba8Image> {
    let (w, h) = edge_map.dimensions();
    let range = f32::from(config.line_alpha_max) - f32::from(config.line_alpha_min);
    let min = f32::from(config.line_alpha_min);
    let [r, g, b] = config.line_color;

    let mut data = Vec::with_capacity(edge_map.len() * 4);
    for &edge in edge_map.data() {
        let strength = 1.0 - edge;
        if strength > config.line_mask_threshold {
            let alpha = (min + strength * range).clamp(0.0, 255.0) as u8;
            data.extend_from_slice(&[r, g, b, alpha]);
        } else {
            data.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    Ok(Rgba8Image::from_data(w, h, data)?)
}

/// Renders the shade layer from a shade map.
///
/// Pixels with shade above `config.shade_mask_threshold` get the fixed
/// shade color with `alpha = shade * (max - min) + min`; the whole
/// alpha expression is gated to 0 where the mask is false. Shade maps
/// are post-thresholded to {0} u [0.2, 1], so the minimum-alpha step
/// at the mask boundary never lands on a reachable input.
///
/// # Errors
///
/// Never fails for a well-formed shade map (see [`build_line_rgba`]).
pub fn build_shade_rgba(shade_map: &GrayMap, config: &StyleConfig) -> OpsResult<Rgba8Image> {
    let (w, h) = shade_map.dimensions();
    let range = f32::from(config.shade_alpha_max) - f32::from(config.shade_alpha_min);
    let min = f32::from(config.shade_alpha_min);
    let [r, g, b] = config.shade_color;

    let mut data = Vec::with_capacity(shade_map.len() * 4);
    for &shade in shade_map.data() {
        if shade > config.shade_mask_threshold {
            let alpha = (shade * range + min).clamp(0.0, 255.0) as u8;
            data.extend_from_slice(&[r, g, b, alpha]);
        } else {
            data.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    Ok(Rgba8Image::from_data(w, h, data)?)
}

/// Composites the shade and line layers onto an opaque white canvas.
///
/// Standard "over" operator per channel, `out = bg * (1 - a) + fg * a`
/// with `a = alpha / 255`, rounded to 8-bit. Shade is composited
/// first, then line - the order is part of the visual contract.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if the two layers differ in
/// size.
///
/// # Example
///
/// ```rust
/// use liner_core::Rgba8Image;
/// use liner_ops::layers::build_combo;
///
/// let clear = Rgba8Image::new(4, 4);
/// let combo = build_combo(&clear, &clear).unwrap();
/// assert!(combo.data().iter().all(|&v| v == 255));
/// ```
pub fn build_combo(line: &Rgba8Image, shade: &Rgba8Image) -> OpsResult<Rgb8Image> {
    if line.dimensions() != shade.dimensions() {
        return Err(OpsError::SizeMismatch(format!(
            "line {}x{} vs shade {}x{}",
            line.width(),
            line.height(),
            shade.width(),
            shade.height()
        )));
    }
    let (w, h) = line.dimensions();

    let mut out = vec![255.0f32; w as usize * h as usize * 3];
    composite_over(&mut out, shade);
    composite_over(&mut out, line);

    let data = out
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(Rgb8Image::from_data(w, h, data)?)
}

/// Composites an RGBA layer over an RGB float background in place.
fn composite_over(bg: &mut [f32], layer: &Rgba8Image) {
    for (px, fg) in bg.chunks_exact_mut(3).zip(layer.data().chunks_exact(4)) {
        let a = f32::from(fg[3]) / 255.0;
        for c in 0..3 {
            px[c] = px[c] * (1.0 - a) + f32::from(fg[c]) * a;
        }
    }
}

/// Composites an RGBA layer over a solid white canvas.
///
/// Used by the preview grid to visualize a single layer the same way
/// the combo would render it.
pub fn over_white(layer: &Rgba8Image) -> Rgb8Image {
    let (w, h) = layer.dimensions();
    let mut out = vec![255.0f32; w as usize * h as usize * 3];
    composite_over(&mut out, layer);

    let data = out
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Rgb8Image::from_data(w, h, data).expect("composite preserves shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use liner_core::GrayMap;

    fn config() -> StyleConfig {
        StyleConfig::default()
    }

    #[test]
    fn line_layer_alpha_band() {
        // Edge values: strong edge, mid edge, background
        let edges = GrayMap::from_data(3, 1, vec![0.0, 0.5, 1.0]).unwrap();
        let layer = build_line_rgba(&edges, &config()).unwrap();

        // strength 1.0 -> alpha = max
        assert_eq!(layer.pixel(0, 0), [0xC3, 0xC3, 0xC3, 216]);
        // strength 0.5 -> alpha = 178 + 0.5 * 38 = 197
        assert_eq!(layer.pixel(1, 0), [0xC3, 0xC3, 0xC3, 197]);
        // strength 0.0 -> transparent
        assert_eq!(layer.pixel(2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn faint_strength_stays_transparent() {
        let edges = GrayMap::from_data(2, 1, vec![0.95, 0.85]).unwrap();
        let layer = build_line_rgba(&edges, &config()).unwrap();
        assert_eq!(layer.pixel(0, 0)[3], 0);
        assert!(layer.pixel(1, 0)[3] >= 178);
    }

    #[test]
    fn shade_layer_alpha_band() {
        let shades = GrayMap::from_data(3, 1, vec![0.0, 0.2, 1.0]).unwrap();
        let layer = build_shade_rgba(&shades, &config()).unwrap();

        assert_eq!(layer.pixel(0, 0), [0, 0, 0, 0]);
        // 0.2 * 51 + 63 = 73 (truncating cast)
        assert_eq!(layer.pixel(1, 0), [0xC8, 0xC8, 0xC8, 73]);
        assert_eq!(layer.pixel(2, 0), [0xC8, 0xC8, 0xC8, 114]);
    }

    #[test]
    fn shade_gating_zeroes_the_whole_alpha_expression() {
        // Below the 0.05 mask: no residual minimum alpha leaks through.
        let shades = GrayMap::from_data(2, 1, vec![0.04, 0.05]).unwrap();
        let layer = build_shade_rgba(&shades, &config()).unwrap();
        assert_eq!(layer.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(layer.pixel(1, 0), [0, 0, 0, 0]); // threshold is exclusive
    }

    #[test]
    fn transparent_layers_compose_to_solid_white() {
        let clear = Rgba8Image::new(8, 8);
        let combo = build_combo(&clear, &clear).unwrap();
        assert!(combo.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn opaque_line_covers_shade() {
        let mut line = Rgba8Image::new(1, 1);
        line.set_pixel(0, 0, [10, 20, 30, 255]);
        let mut shade = Rgba8Image::new(1, 1);
        shade.set_pixel(0, 0, [200, 200, 200, 255]);

        let combo = build_combo(&line, &shade).unwrap();
        assert_eq!(combo.pixel(0, 0), [10, 20, 30]);
    }

    #[test]
    fn semi_transparent_layer_blends_against_white() {
        let mut line = Rgba8Image::new(1, 1);
        line.set_pixel(0, 0, [0, 0, 0, 128]);
        let shade = Rgba8Image::new(1, 1);

        let combo = build_combo(&line, &shade).unwrap();
        // 255 * (1 - 128/255) + 0 * a = 127.0 -> 127
        assert_eq!(combo.pixel(0, 0), [127, 127, 127]);
    }

    #[test]
    fn shade_is_under_line_in_fixed_order() {
        // A half-opaque line over a fully opaque shade must show the
        // shade through the line, not white.
        let mut line = Rgba8Image::new(1, 1);
        line.set_pixel(0, 0, [0, 0, 0, 128]);
        let mut shade = Rgba8Image::new(1, 1);
        shade.set_pixel(0, 0, [200, 100, 50, 255]);

        let combo = build_combo(&line, &shade).unwrap();
        // bg after shade = [200, 100, 50]; over with a = 128/255
        // gives bg * 0.49804 -> [100, 50, 25]
        assert_eq!(combo.pixel(0, 0), [100, 50, 25]);
    }

    #[test]
    fn combo_rejects_mismatched_layers() {
        let a = Rgba8Image::new(2, 2);
        let b = Rgba8Image::new(3, 2);
        assert!(matches!(
            build_combo(&a, &b),
            Err(OpsError::SizeMismatch(_))
        ));
    }

    #[test]
    fn over_white_matches_combo_of_single_layer() {
        let map = GrayMap::from_data(2, 1, vec![0.5, 0.0]).unwrap();
        let layer = build_shade_rgba(&map, &config()).unwrap();

        let direct = over_white(&layer);
        let via_combo = build_combo(&Rgba8Image::new(2, 1), &layer).unwrap();
        assert_eq!(direct, via_combo);
    }
}
