//! Render command: source photo in, artifact set out.

use anyhow::{bail, Context, Result};
use liner_core::StyleConfig;
use liner_io::{png, PromptRecord};
use liner_ops::pipeline;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Filesystem destinations for one render.
struct ArtifactPaths {
    line: PathBuf,
    shade: PathBuf,
    combo: PathBuf,
    preview: PathBuf,
    prompt: PathBuf,
}

impl ArtifactPaths {
    fn new(dir: &Path, stem: &str) -> Self {
        Self {
            line: dir.join(format!("{stem}_line_rgba.png")),
            shade: dir.join(format!("{stem}_shade_rgba.png")),
            combo: dir.join(format!("{stem}_combo_for_notes.png")),
            preview: dir.join(format!("{stem}_preview_debug.png")),
            prompt: dir.join(format!("{stem}_prompt.json")),
        }
    }

    fn all(&self) -> [&Path; 5] {
        [&self.line, &self.shade, &self.combo, &self.preview, &self.prompt]
    }
}

/// Runs the render command.
///
/// Writes all five artifacts or none: a failure partway through
/// removes everything already written for this render.
pub fn run(input: &Path, output_dir: Option<&Path>, verbose: bool) -> Result<()> {
    if !input.is_file() {
        bail!("File not found: {}", input.display());
    }

    let dir = match output_dir {
        Some(d) => d.to_path_buf(),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Input has no usable filename: {}", input.display()))?;
    let source_filename = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(stem)
        .to_string();

    info!(input = %input.display(), output = %dir.display(), "render start");

    if verbose {
        println!("[1/7] Loading {}", input.display());
    }
    let photo = png::read_rgb8(input)
        .with_context(|| format!("Failed to load: {}", input.display()))?;
    debug!(w = photo.width(), h = photo.height(), "loaded source");

    let config = StyleConfig::default();
    let t0 = Instant::now();

    if verbose {
        println!(
            "[2/7] Rendering {}x{} -> {}x{} canvas",
            photo.width(),
            photo.height(),
            config.canvas_width,
            config.canvas_height
        );
    }
    let artifacts = pipeline::run(&photo, &config).context("Pipeline failed")?;
    let elapsed = t0.elapsed();

    let paths = ArtifactPaths::new(&dir, stem);
    let record = PromptRecord::new(&source_filename, stem, &config, elapsed);

    let result = (|| -> Result<()> {
        if verbose {
            println!("[3/7] Writing {}", paths.line.display());
        }
        png::write_rgba8(&paths.line, &artifacts.line)?;
        if verbose {
            println!("[4/7] Writing {}", paths.shade.display());
        }
        png::write_rgba8(&paths.shade, &artifacts.shade)?;
        if verbose {
            println!("[5/7] Writing {}", paths.combo.display());
        }
        png::write_rgb8(&paths.combo, &artifacts.combo)?;
        if verbose {
            println!("[6/7] Writing {}", paths.preview.display());
        }
        png::write_rgb8(&paths.preview, &artifacts.preview)?;
        if verbose {
            println!("[7/7] Writing {}", paths.prompt.display());
        }
        record.save(&paths.prompt)?;
        Ok(())
    })();

    if let Err(e) = result {
        for path in paths.all() {
            let _ = std::fs::remove_file(path);
        }
        return Err(e).with_context(|| format!("Failed to write artifacts to {}", dir.display()));
    }

    info!(seconds = record.processing.time_seconds, "render done");
    if verbose {
        println!("Done in {:.3}s.", elapsed.as_secs_f64());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_use_fixed_suffixes() {
        let p = ArtifactPaths::new(Path::new("/out"), "photo");
        assert_eq!(p.line, Path::new("/out/photo_line_rgba.png"));
        assert_eq!(p.shade, Path::new("/out/photo_shade_rgba.png"));
        assert_eq!(p.combo, Path::new("/out/photo_combo_for_notes.png"));
        assert_eq!(p.preview, Path::new("/out/photo_preview_debug.png"));
        assert_eq!(p.prompt, Path::new("/out/photo_prompt.json"));
    }

    #[test]
    fn missing_input_fails_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(run(&missing, Some(dir.path()), false).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
