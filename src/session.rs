//! Per-session image state
//!
//! One `SessionState` exists per interactive session. All mutation goes
//! through the apply methods below and happens on the context that owns the
//! value; worker contexts never touch it.

use image::DynamicImage;

use crate::error::{EditorError, Result};

/// The current image pair and transform flags for one session
///
/// Invariant: `displayed` is present iff `source` is present. `source` is set
/// once per load action and never mutated afterward; `displayed` is replaced
/// wholesale by each completed transform.
#[derive(Debug, Default)]
pub struct SessionState {
    source: Option<DynamicImage>,
    displayed: Option<DynamicImage>,
    background_removed: bool,
    name_hint: Option<String>,
    busy: bool,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session contents with a freshly loaded image
    ///
    /// Resets the background-removed flag and the busy indicator. `name_hint`
    /// is the stem of the loaded file, used for default output naming.
    pub fn load(&mut self, image: DynamicImage, name_hint: Option<String>) {
        self.displayed = Some(image.clone());
        self.source = Some(image);
        self.background_removed = false;
        self.name_hint = name_hint;
        self.busy = false;
    }

    /// The image as originally loaded
    #[must_use]
    pub fn source(&self) -> Option<&DynamicImage> {
        self.source.as_ref()
    }

    /// The image with all completed transforms applied
    #[must_use]
    pub fn displayed(&self) -> Option<&DynamicImage> {
        self.displayed.as_ref()
    }

    /// The displayed image, or a validation error when nothing is loaded
    pub fn displayed_or_err(&self) -> Result<&DynamicImage> {
        self.displayed
            .as_ref()
            .ok_or_else(|| EditorError::validation("no image loaded"))
    }

    /// Whether a background removal has completed successfully
    #[must_use]
    pub fn background_removed(&self) -> bool {
        self.background_removed
    }

    /// Stem of the loaded file, if known
    #[must_use]
    pub fn name_hint(&self) -> Option<&str> {
        self.name_hint.as_deref()
    }

    /// Whether a background removal submission is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Replace the displayed image with a completed synchronous resize
    ///
    /// Does not clear the background-removed flag: resizing an already
    /// cut-out image keeps its transparency and its output naming.
    pub fn apply_resized(&mut self, image: DynamicImage) -> Result<()> {
        if self.source.is_none() {
            return Err(EditorError::validation("no image loaded"));
        }
        self.displayed = Some(image);
        Ok(())
    }

    /// Mark a background removal submission as outstanding
    pub fn begin_removal(&mut self) {
        debug_assert!(!self.busy, "submissions are serialized by the editor");
        self.busy = true;
    }

    /// Apply a successful background removal delivery
    pub fn apply_removal(&mut self, image: DynamicImage) {
        self.displayed = Some(image);
        self.background_removed = true;
        self.busy = false;
    }

    /// Record a failed background removal delivery
    ///
    /// Clears the busy indicator only; `displayed` and the removed flag keep
    /// their pre-submission values.
    pub fn fail_removal(&mut self) {
        self.busy = false;
    }

    /// Default output filename: input stem plus a suffix for the last
    /// transform applied (`_no_bg` after a removal, `_resized` otherwise)
    #[must_use]
    pub fn default_output_name(&self) -> String {
        match &self.name_hint {
            Some(stem) if self.background_removed => format!("{stem}_no_bg.png"),
            Some(stem) => format!("{stem}_resized.png"),
            None => "processed_image.png".to_string(),
        }
    }
}
