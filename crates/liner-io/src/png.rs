//! PNG reading and writing.
//!
//! The pipeline consumes 8-bit RGB and produces 8-bit RGB and RGBA.
//! Reading promotes grayscale, grayscale+alpha, and RGBA sources to
//! plain RGB; anything that is not 8 bits per channel is rejected.
//!
//! # Example
//!
//! ```rust,ignore
//! use liner_io::png::{read_rgb8, write_rgb8};
//!
//! let photo = read_rgb8("input.png")?;
//! write_rgb8("copy.png", &photo)?;
//! ```

use crate::{IoError, IoResult};
use liner_core::{Rgb8Image, Rgba8Image};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Reads a PNG file as 8-bit RGB.
///
/// Grayscale becomes `[g, g, g]`, grayscale+alpha and RGBA drop their
/// alpha channel. Source photos are opaque in practice, so no alpha
/// blending happens on read.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedBitDepth`] for non-8-bit files and
/// [`IoError::DecodeError`] for malformed data.
pub fn read_rgb8<P: AsRef<Path>>(path: P) -> IoResult<Rgb8Image> {
    let file = File::open(path.as_ref())?;
    let decoder = png::Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let (width, height) = (info.width, info.height);
    tracing::debug!(
        path = %path.as_ref().display(),
        width,
        height,
        color_type = ?info.color_type,
        "read png"
    );

    let rgb: Vec<u8> = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => buf[..info.buffer_size()].to_vec(),
        (png::ColorType::Rgba, png::BitDepth::Eight) => buf[..info.buffer_size()]
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => buf[..info.buffer_size()]
            .iter()
            .flat_map(|&g| [g, g, g])
            .collect(),
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => buf[..info.buffer_size()]
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0]])
            .collect(),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedBitDepth(format!(
                "{color_type:?} {bit_depth:?}"
            )));
        }
    };

    Ok(Rgb8Image::from_data(width, height, rgb)?)
}

/// Writes an 8-bit RGB image as PNG.
pub fn write_rgb8<P: AsRef<Path>>(path: P, image: &Rgb8Image) -> IoResult<()> {
    write_png(path.as_ref(), image.width(), image.height(), png::ColorType::Rgb, image.data())
}

/// Writes an 8-bit RGBA image as PNG, preserving the alpha channel.
pub fn write_rgba8<P: AsRef<Path>>(path: P, image: &Rgba8Image) -> IoResult<()> {
    write_png(path.as_ref(), image.width(), image.height(), png::ColorType::Rgba, image.data())
}

fn write_png(
    path: &Path,
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    tracing::debug!(path = %path.display(), width, height, ?color_type, "wrote png");
    Ok(())
}
