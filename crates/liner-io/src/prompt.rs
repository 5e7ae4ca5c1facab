//! Prompt metadata JSON.
//!
//! Every render emits a `{name}_prompt.json` next to the image
//! artifacts describing the run: engine version, canvas, output
//! filenames, the style parameters used, and a ready-to-use styling
//! prompt sentence. Downstream tooling keys on these field names, so
//! the shape is stable.

use crate::IoResult;
use liner_core::StyleConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Format version of the prompt record.
pub const PROMPT_VERSION: &str = "1.0.0";

/// Engine name embedded in every record.
pub const ENGINE_NAME: &str = "liner-rs";

/// Top-level prompt metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Record format version.
    pub version: String,
    /// Producing engine.
    pub engine: String,
    /// Source photo description.
    pub source: SourceInfo,
    /// Output canvas dimensions.
    pub canvas: CanvasInfo,
    /// Filenames of the four image artifacts.
    pub outputs: OutputSet,
    /// Style parameters the render used.
    pub parameters: Parameters,
    /// Timing of this run.
    pub processing: ProcessingInfo,
    /// Styling prompt sentence describing the sketch look.
    pub prompt_template: String,
}

/// Source photo description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source filename without any directory components.
    pub filename: String,
}

/// Output canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasInfo {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Filenames of the four image artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSet {
    /// Line layer RGBA PNG.
    pub line: String,
    /// Shade layer RGBA PNG.
    pub shade: String,
    /// Composited RGB PNG.
    pub combo: String,
    /// 2x2 preview grid PNG.
    pub preview: String,
}

/// Style parameters recorded for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// XDoG base sigma.
    pub xdog_sigma: f32,
    /// XDoG sigma ratio.
    pub xdog_k: f32,
    /// XDoG detection threshold.
    pub xdog_epsilon: f32,
    /// XDoG falloff steepness.
    pub xdog_phi: f32,
    /// Line color as `#RRGGBB`.
    pub line_color: String,
    /// Shade color as `#RRGGBB`.
    pub shade_color: String,
}

/// Timing of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    /// Wall-clock processing time in seconds, 3 decimal places.
    pub time_seconds: f64,
    /// ISO-8601 UTC timestamp of the run.
    pub timestamp: String,
}

impl PromptRecord {
    /// Builds a record for one finished render.
    ///
    /// `stem` is the source filename without extension; the output
    /// filenames are derived from it with the fixed artifact suffixes.
    pub fn new(source_filename: &str, stem: &str, config: &StyleConfig, elapsed: Duration) -> Self {
        Self {
            version: PROMPT_VERSION.to_string(),
            engine: ENGINE_NAME.to_string(),
            source: SourceInfo {
                filename: source_filename.to_string(),
            },
            canvas: CanvasInfo {
                width: config.canvas_width,
                height: config.canvas_height,
            },
            outputs: OutputSet {
                line: format!("{stem}_line_rgba.png"),
                shade: format!("{stem}_shade_rgba.png"),
                combo: format!("{stem}_combo_for_notes.png"),
                preview: format!("{stem}_preview_debug.png"),
            },
            parameters: Parameters {
                xdog_sigma: config.xdog.sigma,
                xdog_k: config.xdog.k,
                xdog_epsilon: config.xdog.epsilon,
                xdog_phi: config.xdog.phi,
                line_color: hex_color(config.line_color),
                shade_color: hex_color(config.shade_color),
            },
            processing: ProcessingInfo {
                time_seconds: (elapsed.as_secs_f64() * 1000.0).round() / 1000.0,
                timestamp: iso8601_utc(SystemTime::now()),
            },
            prompt_template: format!(
                "A detailed pencil sketch drawn with light gray lines ({}) \
                 on white paper, with subtle gray shading ({}). \
                 Hand-drawn artistic style. Canvas {}x{}px.",
                hex_color(config.line_color),
                hex_color(config.shade_color),
                config.canvas_width,
                config.canvas_height
            ),
        }
    }

    /// Writes the record as indented JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        tracing::debug!(path = %path.as_ref().display(), "wrote prompt json");
        Ok(())
    }
}

/// Formats an RGB triple as `#RRGGBB`.
pub fn hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Formats a time as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Times before the Unix epoch clamp to the epoch.
pub fn iso8601_utc(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs();

    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    let (year, month, day) = civil_from_days(days);

    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z")
}

/// Converts days since 1970-01-01 to a (year, month, day) civil date.
///
/// Proleptic Gregorian calendar, valid for the full u64 seconds range.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}
