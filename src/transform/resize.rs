//! Synchronous resize transform

use image::{imageops::FilterType, DynamicImage};
use tracing::debug;

use crate::error::Result;
use crate::utils::DimensionValidator;

/// Resize an image to exactly `width` × `height`
///
/// Dimensions are validated before any work happens: both must be positive
/// and neither may exceed `max_dimension`. Resampling uses Lanczos3. Returns
/// a new image; the input is never mutated.
///
/// This runs on the calling context — it is fast relative to background
/// removal and does not go through the coordinator.
///
/// # Errors
/// - `EditorError::Validation` for zero or oversized dimensions
pub fn resize(
    image: &DynamicImage,
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Result<DynamicImage> {
    DimensionValidator::validate_target(width, height, max_dimension)?;

    debug!(width, height, "resizing image");
    Ok(image.resize_exact(width, height, FilterType::Lanczos3))
}
