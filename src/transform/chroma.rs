//! Chroma-key background remover
//!
//! Samples a pixel near the top-left corner as the background color and
//! clears the alpha of every pixel within a per-channel threshold of it.
//! This is the built-in [`BackgroundRemover`]; model-backed removers plug in
//! through the same trait.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use tracing::debug;

use super::BackgroundRemover;
use crate::error::{EditorError, Result};

/// Background remover keyed on a sampled corner color
#[derive(Debug, Clone)]
pub struct ChromaKeyRemover {
    /// Per-channel distance below which a pixel counts as background
    threshold: u8,
    /// Offset from the top-left corner of the sampled pixel
    sample_offset: u32,
}

impl Default for ChromaKeyRemover {
    fn default() -> Self {
        Self {
            threshold: 30,
            sample_offset: 5,
        }
    }
}

impl ChromaKeyRemover {
    /// Create a remover with the given per-channel threshold
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    fn is_background(pixel: &Rgba<u8>, key: &Rgba<u8>, threshold: u8) -> bool {
        let distance = |a: u8, b: u8| (i16::from(a) - i16::from(b)).unsigned_abs();
        distance(pixel[0], key[0]) < u16::from(threshold)
            && distance(pixel[1], key[1]) < u16::from(threshold)
            && distance(pixel[2], key[2]) < u16::from(threshold)
    }
}

impl BackgroundRemover for ChromaKeyRemover {
    fn remove_background(&self, image: &DynamicImage) -> Result<DynamicImage> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EditorError::transform("input image is empty"));
        }

        let rgba = image.to_rgba8();
        let sample_x = self.sample_offset.min(width - 1);
        let sample_y = self.sample_offset.min(height - 1);
        let key = *rgba.get_pixel(sample_x, sample_y);
        debug!(?key, threshold = self.threshold, "sampled background color");

        let mut output = RgbaImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            if Self::is_background(pixel, &key, self.threshold) {
                output.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            } else {
                output.put_pixel(x, y, *pixel);
            }
        }

        Ok(DynamicImage::ImageRgba8(output))
    }

    fn name(&self) -> &'static str {
        "chroma-key"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_background_keeps_subject() {
        // Grey background with a red square in the middle
        let mut image = RgbaImage::from_pixel(32, 32, Rgba([200, 200, 200, 255]));
        for y in 10..20 {
            for x in 10..20 {
                image.put_pixel(x, y, Rgba([220, 30, 30, 255]));
            }
        }

        let remover = ChromaKeyRemover::default();
        let result = remover
            .remove_background(&DynamicImage::ImageRgba8(image))
            .unwrap();
        let rgba = result.to_rgba8();

        assert_eq!(rgba.get_pixel(0, 0)[3], 0, "background pixel transparent");
        assert_eq!(rgba.get_pixel(31, 31)[3], 0);
        assert_eq!(
            *rgba.get_pixel(15, 15),
            Rgba([220, 30, 30, 255]),
            "subject pixel untouched"
        );
    }

    #[test]
    fn test_preserves_dimensions_and_input() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            7,
            3,
            Rgba([100, 100, 100, 255]),
        ));
        let remover = ChromaKeyRemover::new(10);
        let result = remover.remove_background(&image).unwrap();

        assert_eq!(result.width(), 7);
        assert_eq!(result.height(), 3);
        assert_eq!(image.to_rgba8().get_pixel(0, 0)[3], 255, "input not mutated");
    }

    #[test]
    fn test_small_image_sample_clamped() {
        // 2x2 image: sample offset 5 must clamp inside bounds instead of panicking
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([50, 50, 50, 255]),
        ));
        let remover = ChromaKeyRemover::default();
        let result = remover.remove_background(&image).unwrap();
        assert_eq!(result.to_rgba8().get_pixel(0, 0)[3], 0);
    }
}
