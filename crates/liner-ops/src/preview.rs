//! 2x2 debug preview grid.

use crate::layers::over_white;
use crate::resize::{self, Filter};
use crate::{OpsError, OpsResult};
use liner_core::{Rgb8Image, Rgba8Image};

/// Builds the 2x2 preview grid at half canvas resolution.
///
/// Panels, left to right, top to bottom: the letterboxed source, the
/// line layer on white, the shade layer on white, the final combo.
/// Each layer panel is composited at full canvas size first and then
/// downscaled with Lanczos3, so the preview shows the same blending
/// the combo does. Panel size is `floor(w / 2) x floor(h / 2)`, so an
/// odd canvas loses one row or column relative to exactly half.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if the four inputs do not share
/// the canvas dimensions, or [`OpsError::InvalidImage`] if the canvas
/// is smaller than 2x2.
pub fn build_preview(
    canvas: &Rgb8Image,
    line: &Rgba8Image,
    shade: &Rgba8Image,
    combo: &Rgb8Image,
) -> OpsResult<Rgb8Image> {
    let (w, h) = canvas.dimensions();
    if line.dimensions() != (w, h) || shade.dimensions() != (w, h) || combo.dimensions() != (w, h) {
        return Err(OpsError::SizeMismatch(format!(
            "preview inputs must all be {w}x{h}"
        )));
    }

    let panel_w = w / 2;
    let panel_h = h / 2;
    if panel_w == 0 || panel_h == 0 {
        return Err(OpsError::InvalidImage(format!(
            "canvas {w}x{h} too small for a 2x2 preview"
        )));
    }

    let panels = [
        resize::resize_u8(canvas, panel_w, panel_h, Filter::Lanczos3)?,
        resize::resize_u8(&over_white(line), panel_w, panel_h, Filter::Lanczos3)?,
        resize::resize_u8(&over_white(shade), panel_w, panel_h, Filter::Lanczos3)?,
        resize::resize_u8(combo, panel_w, panel_h, Filter::Lanczos3)?,
    ];

    let mut grid = Rgb8Image::new(panel_w * 2, panel_h * 2);
    for (i, panel) in panels.iter().enumerate() {
        let ox = (i as u32 % 2) * panel_w;
        let oy = (i as u32 / 2) * panel_h;
        blit(&mut grid, panel, ox, oy);
    }
    Ok(grid)
}

/// Copies `src` into `dst` at the given offset, row by row.
fn blit(dst: &mut Rgb8Image, src: &Rgb8Image, ox: u32, oy: u32) {
    let (sw, sh) = src.dimensions();
    let dw = dst.width() as usize;
    let row_bytes = sw as usize * 3;
    for y in 0..sh as usize {
        let dst_start = ((oy as usize + y) * dw + ox as usize) * 3;
        let src_start = y * row_bytes;
        dst.data_mut()[dst_start..dst_start + row_bytes]
            .copy_from_slice(&src.data()[src_start..src_start + row_bytes]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_half_canvas_size() {
        let canvas = Rgb8Image::filled(64, 48, [128, 128, 128]);
        let clear = Rgba8Image::new(64, 48);
        let combo = Rgb8Image::filled(64, 48, [255, 255, 255]);

        let preview = build_preview(&canvas, &clear, &clear, &combo).unwrap();
        assert_eq!(preview.dimensions(), (64, 48));
    }

    #[test]
    fn odd_canvas_shrinks_by_one() {
        let canvas = Rgb8Image::filled(65, 49, [0, 0, 0]);
        let clear = Rgba8Image::new(65, 49);
        let combo = Rgb8Image::filled(65, 49, [255, 255, 255]);

        let preview = build_preview(&canvas, &clear, &clear, &combo).unwrap();
        assert_eq!(preview.dimensions(), (64, 48));
    }

    #[test]
    fn panels_land_in_their_quadrants() {
        // Distinct flat colors survive Lanczos resampling unchanged.
        let canvas = Rgb8Image::filled(32, 32, [10, 10, 10]);
        let mut line = Rgba8Image::new(32, 32);
        for y in 0..32 {
            for x in 0..32 {
                line.set_pixel(x, y, [40, 40, 40, 255]);
            }
        }
        let clear = Rgba8Image::new(32, 32);
        let combo = Rgb8Image::filled(32, 32, [200, 200, 200]);

        let preview = build_preview(&canvas, &line, &clear, &combo).unwrap();
        assert_eq!(preview.pixel(8, 8), [10, 10, 10]); // original
        assert_eq!(preview.pixel(24, 8), [40, 40, 40]); // line on white
        assert_eq!(preview.pixel(8, 24), [255, 255, 255]); // clear shade on white
        assert_eq!(preview.pixel(24, 24), [200, 200, 200]); // combo
    }

    #[test]
    fn rejects_mismatched_inputs() {
        let canvas = Rgb8Image::new(16, 16);
        let clear = Rgba8Image::new(16, 16);
        let combo = Rgb8Image::new(16, 8);
        assert!(matches!(
            build_preview(&canvas, &clear, &clear, &combo),
            Err(OpsError::SizeMismatch(_))
        ));
    }

    #[test]
    fn rejects_degenerate_canvas() {
        let canvas = Rgb8Image::new(1, 4);
        let clear = Rgba8Image::new(1, 4);
        let combo = Rgb8Image::new(1, 4);
        assert!(matches!(
            build_preview(&canvas, &clear, &clear, &combo),
            Err(OpsError::InvalidImage(_))
        ));
    }
}
