#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # pixeldesk
//!
//! Session core for interactive image resizing and background removal. This
//! crate is the coordination layer between a presentation shell (desktop
//! window, web form, CLI) and two image transforms: a fast synchronous
//! resize and a slow, pluggable background removal that must never block the
//! interactive path.
//!
//! ## What it provides
//!
//! - **Session state**: one current image pair (source/displayed) per
//!   session, mutated only on the control context through apply methods
//! - **Background task coordination**: removal runs on a worker, the control
//!   context stays responsive, and exactly one terminal outcome (new image
//!   or diagnostic) is delivered per submission
//! - **Fit-to-viewport rendering**: aspect-preserving, non-upscaling preview
//!   scaling with centering offsets
//! - **Export**: PNG (alpha preserved) and JPEG (alpha flattened onto white)
//!   with default output names derived from the last transform applied
//! - **CLI shell**: optional command-line frontend (enable with the `cli`
//!   feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pixeldesk::{ChromaKeyRemover, Editor, EditorConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut editor = Editor::new(EditorConfig::default(), Arc::new(ChromaKeyRemover::default()));
//!
//! editor.load_path("photo.png")?;
//! editor.resize(800, 600)?;
//!
//! // Runs on a worker; the calling context stays free to redraw.
//! editor.request_background_removal()?;
//! editor.wait_for_removal().await?;
//!
//! editor.save(editor.default_output_name())?; // photo_no_bg.png
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom removers
//!
//! Background removal is opaque to this crate: anything implementing
//! [`BackgroundRemover`] plugs in, from the built-in [`ChromaKeyRemover`] to
//! a model-backed implementation. The coordinator treats every remover as a
//! slow black box and keeps its execution off the control context.
//!
//! ## Library vs CLI usage
//!
//! All session functionality is available by default; the `cli` feature adds
//! the command-line shell and tracing subscriber setup:
//!
//! ```toml
//! [dependencies]
//! pixeldesk = { version = "0.1", default-features = false }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod editor;
pub mod error;
pub mod services;
pub mod session;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod transform;
pub mod utils;
pub mod viewport;

use std::sync::Arc;

// Public API exports
pub use config::{EditorConfig, EditorConfigBuilder, OutputFormat};
pub use coordinator::{JobId, RemovalCoordinator, RemovalDelivery};
pub use editor::Editor;
pub use error::{EditorError, Result};
pub use services::{ExportFormatHandler, ImageIoService};
pub use session::SessionState;
pub use transform::{resize, BackgroundRemover, ChromaKeyRemover};
pub use utils::DimensionValidator;
pub use viewport::{fit, FittedPreview};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig, TracingFormat};

/// Remove the background from an image provided as bytes
///
/// One-shot convenience over the session API: decodes the bytes, runs the
/// given remover on a worker, and re-encodes the result as PNG (the only
/// format that keeps the cut-out's transparency). Suitable for web handlers
/// and other memory-based callers.
///
/// # Errors
/// - `EditorError::Decode` when the bytes are not a readable image
/// - `EditorError::Transform` when the remover fails
pub async fn remove_background_from_bytes(
    image_bytes: &[u8],
    remover: Arc<dyn BackgroundRemover>,
) -> Result<Vec<u8>> {
    let mut editor = Editor::with_defaults(remover);
    editor.load_bytes(image_bytes, None)?;
    editor.request_background_removal()?;
    editor.wait_for_removal().await?;
    editor.export_bytes(OutputFormat::Png)
}
