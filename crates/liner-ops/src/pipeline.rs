//! Stage sequencing for the full sketch pipeline.

use crate::{gray, layers, median, preview, resize, shade, xdog, OpsResult};
use liner_core::{CanvasTransform, Rgb8Image, Rgba8Image, StyleConfig};

/// Every buffer the pipeline produces for one source photo.
#[derive(Debug, Clone)]
pub struct SketchArtifacts {
    /// The letterboxed source on the fixed canvas.
    pub canvas: Rgb8Image,
    /// Line layer, transparent where no line was detected.
    pub line: Rgba8Image,
    /// Shade layer, transparent where no shading was detected.
    pub shade: Rgba8Image,
    /// Both layers composited over white.
    pub combo: Rgb8Image,
    /// 2x2 diagnostic grid at half canvas resolution.
    pub preview: Rgb8Image,
    /// How the source was placed on the canvas.
    pub transform: CanvasTransform,
}

/// Runs the complete photo-to-sketch pipeline.
///
/// Stages, in order: letterbox fit, 3x3 median smoothing, grayscale
/// reduction, XDoG edge extraction, shade extraction, layer rendering,
/// combo compositing, preview grid. The edge and shade branches both
/// read the same grayscale map.
///
/// # Errors
///
/// Fails on an invalid [`StyleConfig`] or a zero-area source image.
pub fn run(source: &Rgb8Image, config: &StyleConfig) -> OpsResult<SketchArtifacts> {
    config.validate()?;

    tracing::debug!(
        w = source.width(),
        h = source.height(),
        "pipeline start"
    );

    let (canvas, transform) = resize::letterbox(source, config)?;
    let smoothed = median::median3_rgb8(&canvas);
    let gray_map = gray::to_gray(&smoothed);

    let edge_map = xdog::xdog_edge(&gray_map, &config.xdog)?;
    let shade_map = shade::extract_shade(&gray_map, config)?;

    let line = layers::build_line_rgba(&edge_map, config)?;
    let shade = layers::build_shade_rgba(&shade_map, config)?;
    let combo = layers::build_combo(&line, &shade)?;
    let preview = preview::build_preview(&canvas, &line, &shade, &combo)?;

    tracing::debug!("pipeline done");

    Ok(SketchArtifacts {
        canvas,
        line,
        shade,
        combo,
        preview,
        transform,
    })
}
