//! Unified session editor
//!
//! `Editor` consolidates the session business logic used by every shell (CLI,
//! desktop, web): it owns the session state and the removal coordinator, and
//! every state mutation happens inside its methods on the calling context.
//! Workers only compute and return; their results are applied here when the
//! shell pumps or awaits deliveries.

use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::{
    config::{EditorConfig, OutputFormat},
    coordinator::{JobId, RemovalCoordinator, RemovalDelivery},
    error::{EditorError, Result},
    services::ImageIoService,
    session::SessionState,
    transform::{self, BackgroundRemover},
    viewport::{self, FittedPreview},
};

/// Session editor: one loaded image, its transforms, and its exports
pub struct Editor {
    config: EditorConfig,
    state: SessionState,
    coordinator: RemovalCoordinator,
}

impl Editor {
    /// Create an editor with the given configuration and remover
    #[must_use]
    pub fn new(config: EditorConfig, remover: Arc<dyn BackgroundRemover>) -> Self {
        Self {
            config,
            state: SessionState::new(),
            coordinator: RemovalCoordinator::new(remover),
        }
    }

    /// Create an editor with the default configuration
    #[must_use]
    pub fn with_defaults(remover: Arc<dyn BackgroundRemover>) -> Self {
        Self::new(EditorConfig::default(), remover)
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a background removal submission is outstanding
    ///
    /// Shells use this to drive the busy indicator and to disable the
    /// removal trigger.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Load an image from a file, replacing the session contents
    ///
    /// # Errors
    /// - `EditorError::WorkerBusy` while a removal is outstanding
    /// - `EditorError::Io` / `EditorError::Decode` from the underlying load
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        self.ensure_idle()?;

        let image = ImageIoService::load_image(path_ref)?;
        let stem = path_ref
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned);

        info!(
            path = %path_ref.display(),
            width = image.width(),
            height = image.height(),
            "loaded image"
        );
        self.state.load(image, stem);
        Ok(())
    }

    /// Load an image from in-memory bytes, replacing the session contents
    ///
    /// # Errors
    /// - `EditorError::WorkerBusy` while a removal is outstanding
    /// - `EditorError::Decode` when the bytes are not a readable image
    pub fn load_bytes(&mut self, bytes: &[u8], name_hint: Option<String>) -> Result<()> {
        self.ensure_idle()?;

        let image = ImageIoService::load_from_bytes(bytes)?;
        debug!(
            width = image.width(),
            height = image.height(),
            "loaded image from bytes"
        );
        self.state.load(image, name_hint);
        Ok(())
    }

    /// Resize the displayed image to exactly `width` × `height`
    ///
    /// Synchronous; applies to the session before returning. Permitted while
    /// a removal is in flight — a later removal delivery then replaces the
    /// resized image (results apply in delivery order, not submission order).
    ///
    /// # Errors
    /// - `EditorError::Validation` for missing image or bad dimensions
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let resized = transform::resize(
            self.state.displayed_or_err()?,
            width,
            height,
            self.config.max_dimension,
        )?;
        self.state.apply_resized(resized)
    }

    /// Submit the displayed image for background removal on a worker
    ///
    /// Returns immediately with the job id; the busy indicator is set until
    /// the delivery is applied via [`Self::pump`] or
    /// [`Self::wait_for_removal`].
    ///
    /// # Errors
    /// - `EditorError::WorkerBusy` when a submission is already outstanding
    /// - `EditorError::Validation` when no image is loaded
    pub fn request_background_removal(&mut self) -> Result<JobId> {
        if self.state.is_busy() {
            return Err(EditorError::WorkerBusy);
        }
        let input = self.state.displayed_or_err()?.clone();
        let job = self.coordinator.submit(input)?;
        self.state.begin_removal();
        Ok(job)
    }

    /// Apply one pending removal delivery, if any has arrived
    ///
    /// Non-blocking; suited to UI loops that poll once per event turn.
    /// Returns `None` when nothing has arrived, `Some(Ok(()))` after a
    /// success is applied, and `Some(Err(_))` after a failure (busy cleared,
    /// image untouched; the error carries the diagnostic for display).
    pub fn pump(&mut self) -> Option<Result<()>> {
        let delivery = self.coordinator.try_delivery()?;
        Some(self.apply_delivery(delivery))
    }

    /// Await the outstanding removal and apply its delivery
    ///
    /// Returns immediately when nothing is in flight.
    ///
    /// # Errors
    /// - `EditorError::Transform` when the worker failed; session state is
    ///   unchanged apart from the cleared busy indicator
    pub async fn wait_for_removal(&mut self) -> Result<()> {
        match self.coordinator.next_delivery().await {
            Some(delivery) => self.apply_delivery(delivery),
            None => Ok(()),
        }
    }

    fn apply_delivery(&mut self, delivery: RemovalDelivery) -> Result<()> {
        match delivery.result {
            Ok(image) => {
                info!(
                    job = delivery.job,
                    elapsed_ms = delivery.elapsed_ms,
                    "background removal applied"
                );
                self.state.apply_removal(image);
                Ok(())
            },
            Err(err) => {
                warn!(
                    job = delivery.job,
                    elapsed_ms = delivery.elapsed_ms,
                    error = %err,
                    "background removal failed"
                );
                self.state.fail_removal();
                Err(err)
            },
        }
    }

    /// Fit the displayed image into a viewport for preview
    ///
    /// Returns `None` when no image is loaded or the viewport has not been
    /// laid out yet (either dimension ≤ 1).
    #[must_use]
    pub fn fit_preview(&self, viewport_width: u32, viewport_height: u32) -> Option<FittedPreview> {
        self.state
            .displayed()
            .and_then(|image| viewport::fit(image, viewport_width, viewport_height))
    }

    /// Save the displayed image, format selected by the destination extension
    ///
    /// # Errors
    /// - `EditorError::Validation` when no image is loaded
    /// - `EditorError::Encode` / `EditorError::Io` from the save path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ImageIoService::save_image(self.state.displayed_or_err()?, path, &self.config)
    }

    /// Encode the displayed image to in-memory bytes
    ///
    /// # Errors
    /// - `EditorError::Validation` when no image is loaded
    /// - `EditorError::Encode` when the encoder fails
    pub fn export_bytes(&self, format: OutputFormat) -> Result<Vec<u8>> {
        ImageIoService::encode(
            self.state.displayed_or_err()?,
            format,
            self.config.jpeg_quality,
        )
    }

    /// Default output filename for the current session
    #[must_use]
    pub fn default_output_name(&self) -> String {
        self.state.default_output_name()
    }

    /// The displayed image, if any
    #[must_use]
    pub fn displayed(&self) -> Option<&DynamicImage> {
        self.state.displayed()
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.state.is_busy() {
            return Err(EditorError::WorkerBusy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_utils::{CircleMaskRemover, FailingRemover, SlowRemover};
    use image::{Rgba, RgbaImage};
    use std::time::Duration;

    fn editor_with(remover: Arc<dyn BackgroundRemover>) -> Editor {
        Editor::with_defaults(remover)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([120, 130, 140, 255]),
        ));
        ImageIoService::encode(&image, OutputFormat::Png, 95).unwrap()
    }

    #[test]
    fn test_resize_requires_loaded_image() {
        let mut editor = editor_with(Arc::new(CircleMaskRemover));
        assert!(matches!(
            editor.resize(100, 100),
            Err(EditorError::Validation(_))
        ));
    }

    #[test]
    fn test_load_and_resize() {
        let mut editor = editor_with(Arc::new(CircleMaskRemover));
        editor
            .load_bytes(&png_bytes(1000, 500), Some("image".to_string()))
            .unwrap();

        editor.resize(400, 300).unwrap();
        let displayed = editor.displayed().unwrap();
        assert_eq!(displayed.width(), 400);
        assert_eq!(displayed.height(), 300);
        assert_eq!(editor.default_output_name(), "image_resized.png");
    }

    #[tokio::test]
    async fn test_busy_lifecycle_and_removal() {
        let mut editor = editor_with(Arc::new(SlowRemover {
            delay: Duration::from_millis(50),
        }));
        editor
            .load_bytes(&png_bytes(20, 20), Some("cat".to_string()))
            .unwrap();

        assert!(!editor.is_busy());
        editor.request_background_removal().unwrap();
        assert!(editor.is_busy(), "busy immediately after submission");

        editor.wait_for_removal().await.unwrap();
        assert!(!editor.is_busy(), "busy cleared exactly at delivery");
        assert!(editor.state().background_removed());
        assert_eq!(editor.default_output_name(), "cat_no_bg.png");
    }

    #[tokio::test]
    async fn test_failed_removal_preserves_state() {
        let mut editor = editor_with(Arc::new(FailingRemover));
        editor
            .load_bytes(&png_bytes(10, 10), Some("dog".to_string()))
            .unwrap();
        let before = editor.displayed().unwrap().to_rgba8();

        editor.request_background_removal().unwrap();
        let outcome = editor.wait_for_removal().await;
        assert!(matches!(outcome, Err(EditorError::Transform(_))));

        assert!(!editor.is_busy());
        assert!(!editor.state().background_removed());
        assert_eq!(
            editor.displayed().unwrap().to_rgba8().as_raw(),
            before.as_raw(),
            "displayed image byte-identical after failure"
        );
    }

    #[tokio::test]
    async fn test_double_submission_rejected() {
        let mut editor = editor_with(Arc::new(SlowRemover {
            delay: Duration::from_millis(100),
        }));
        editor.load_bytes(&png_bytes(10, 10), None).unwrap();

        editor.request_background_removal().unwrap();
        assert!(matches!(
            editor.request_background_removal(),
            Err(EditorError::WorkerBusy)
        ));
        assert!(matches!(
            editor.load_bytes(&png_bytes(5, 5), None),
            Err(EditorError::WorkerBusy)
        ));

        editor.wait_for_removal().await.unwrap();
    }

    #[tokio::test]
    async fn test_pump_applies_delivery() {
        let mut editor = editor_with(Arc::new(CircleMaskRemover));
        editor.load_bytes(&png_bytes(16, 16), None).unwrap();
        editor.request_background_removal().unwrap();

        // Poll like an event loop until the delivery lands.
        let mut applied = false;
        for _ in 0..200 {
            if let Some(outcome) = editor.pump() {
                outcome.unwrap();
                applied = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert!(applied);
        assert!(editor.state().background_removed());
    }

    #[test]
    fn test_fit_preview_without_image() {
        let editor = editor_with(Arc::new(CircleMaskRemover));
        assert!(editor.fit_preview(640, 480).is_none());
    }

    #[test]
    fn test_fit_preview_degenerate_viewport() {
        let mut editor = editor_with(Arc::new(CircleMaskRemover));
        editor.load_bytes(&png_bytes(100, 100), None).unwrap();
        assert!(editor.fit_preview(0, 480).is_none());
        assert!(editor.fit_preview(640, 1).is_none());
        assert!(editor.fit_preview(640, 480).is_some());
    }
}
