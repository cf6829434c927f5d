//! Export format conversion service
//!
//! Separates format-sensitive conversion logic from the I/O path. The one
//! nontrivial rule lives here: JPEG cannot carry alpha, so RGBA sources are
//! composited onto an opaque white background before encoding.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage, RgbaImage};

use crate::config::OutputFormat;

/// Service for handling export format conversions
pub struct ExportFormatHandler;

impl ExportFormatHandler {
    /// Prepare an image for encoding in the given format
    ///
    /// PNG keeps the image as-is (alpha preserved). JPEG flattens any alpha
    /// onto white and yields an RGB image.
    #[must_use]
    pub fn convert_for_export(image: &DynamicImage, format: OutputFormat) -> DynamicImage {
        match format {
            OutputFormat::Png => image.clone(),
            OutputFormat::Jpeg => {
                DynamicImage::ImageRgb8(Self::flatten_onto_white(&image.to_rgba8()))
            },
        }
    }

    /// Composite a straight-alpha RGBA image over an opaque white background
    ///
    /// Channel-by-channel alpha-over-white: `out = (c*a + 255*(255-a)) / 255`.
    /// Fully transparent pixels come out pure white, fully opaque pixels are
    /// unchanged.
    #[must_use]
    pub fn flatten_onto_white(rgba: &RgbaImage) -> RgbImage {
        let (width, height) = rgba.dimensions();
        let mut rgb = ImageBuffer::new(width, height);

        for (x, y, pixel) in rgba.enumerate_pixels() {
            let alpha = u32::from(pixel[3]);
            let blend = |channel: u8| -> u8 {
                ((u32::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8
            };
            rgb.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
        }

        rgb
    }

    /// Get the appropriate file extension for a given output format
    #[must_use]
    pub fn extension(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Select the output format from a destination path's extension
    ///
    /// `png` maps to PNG and `jpg`/`jpeg` to JPEG (case-insensitive); any
    /// other or missing extension falls back to PNG rather than being
    /// rejected, so a save never fails on naming alone.
    #[must_use]
    pub fn format_for_path(path: &Path) -> OutputFormat {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg" | "jpeg") => OutputFormat::Jpeg,
            _ => OutputFormat::Png,
        }
    }

    /// Check if a format supports transparency (alpha channel)
    #[must_use]
    pub fn supports_transparency(format: OutputFormat) -> bool {
        match format {
            OutputFormat::Png => true,
            OutputFormat::Jpeg => false,
        }
    }
}
