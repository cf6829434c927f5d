//! pixeldesk CLI
//!
//! Loads an image, optionally resizes it and removes its background, and
//! saves the result. The removal runs on a worker while the control path
//! keeps an indeterminate spinner animating, mirroring what a GUI shell
//! would do with the session busy flag.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    config::EditorConfig,
    editor::Editor,
    error::EditorError,
    tracing_config::init_cli_tracing,
    transform::ChromaKeyRemover,
    utils::DimensionValidator,
};

/// Image resize and background removal tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "pixeldesk")]
pub struct Cli {
    /// Input image file (PNG, JPEG, BMP, GIF, TIFF)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file; format follows its extension (png, jpg). Defaults to the
    /// input name with a `_resized` or `_no_bg` suffix next to the input.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Resize to WIDTHxHEIGHT (e.g. 800x600) before any other step
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    pub resize: Option<String>,

    /// Remove the image background
    #[arg(long)]
    pub remove_bg: bool,

    /// JPEG quality (0-100, JPEG outputs only)
    #[arg(long, default_value_t = 95)]
    pub jpeg_quality: u8,

    /// Per-channel threshold for the built-in chroma-key remover (0-255)
    #[arg(long, default_value_t = 30)]
    pub threshold: u8,

    /// Enable verbose logging (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// CLI entry point, called by the binary
///
/// # Errors
/// - Any load, transform, or save failure, with context for display
pub async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_tracing(cli.verbose)?;
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = EditorConfig::builder()
        .jpeg_quality(cli.jpeg_quality)
        .build()
        .context("invalid configuration")?;
    let remover = Arc::new(ChromaKeyRemover::new(cli.threshold));
    let mut editor = Editor::new(config, remover);

    editor
        .load_path(&cli.input)
        .with_context(|| format!("failed to load '{}'", cli.input.display()))?;

    if let Some(spec) = &cli.resize {
        let (width, height) = parse_resize_spec(spec, editor.config().max_dimension)?;
        editor.resize(width, height)?;
        info!(width, height, "resized");
    }

    if cli.remove_bg {
        editor.request_background_removal()?;

        // Indeterminate spinner for the whole removal: starts at submission,
        // stops exactly at delivery.
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message("Removing background...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let outcome = editor.wait_for_removal().await;
        spinner.finish_and_clear();
        outcome.context("background removal failed")?;
    }

    let output = cli.output.unwrap_or_else(|| {
        let name = editor.default_output_name();
        match cli.input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
            _ => PathBuf::from(name),
        }
    });

    editor
        .save(&output)
        .with_context(|| format!("failed to save '{}'", output.display()))?;

    println!("Saved {}", output.display());
    Ok(())
}

/// Parse a `WIDTHxHEIGHT` specification
fn parse_resize_spec(spec: &str, max_dimension: u32) -> std::result::Result<(u32, u32), EditorError> {
    let (width_text, height_text) = spec
        .split_once(&['x', 'X'][..])
        .ok_or_else(|| {
            EditorError::validation(format!(
                "resize must be WIDTHxHEIGHT (e.g. 800x600), got '{spec}'"
            ))
        })?;

    Ok((
        DimensionValidator::parse_dimension(width_text, "width", max_dimension)?,
        DimensionValidator::parse_dimension(height_text, "height", max_dimension)?,
    ))
}
