//! liner - photo to pencil-sketch layer renderer
//!
//! Fits a photo onto the fixed portrait canvas, extracts line and
//! shade layers, and writes the artifact set next to the source.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "liner")]
#[command(author, version, about = "Photo to pencil-sketch layer renderer")]
#[command(long_about = "
Renders a source photo into pencil-sketch layers on a fixed 2160x3060
portrait canvas.

For input photo.png the following artifacts are written:
  photo_line_rgba.png        line layer (transparent background)
  photo_shade_rgba.png       shade layer (transparent background)
  photo_combo_for_notes.png  both layers composited over white
  photo_preview_debug.png    2x2 diagnostic grid at half resolution
  photo_prompt.json          styling prompt metadata

Examples:
  liner photo.png                  # Write artifacts next to the photo
  liner photo.png -o out/          # Write artifacts into out/
  liner photo.png -v -j 4          # Verbose, four worker threads
")]
struct Cli {
    /// Input photo (PNG)
    input: PathBuf,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    commands::render::run(&cli.input, cli.output.as_deref(), cli.verbose)
}
