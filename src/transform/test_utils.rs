//! Mock removers for coordinator and editor testing

use std::time::Duration;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::BackgroundRemover;
use crate::error::{EditorError, Result};

/// Remover that clears alpha outside a centered circle
///
/// Deterministic and fast; the circular mask makes success easy to assert on
/// without a real model.
pub struct CircleMaskRemover;

impl BackgroundRemover for CircleMaskRemover {
    fn remove_background(&self, image: &DynamicImage) -> Result<DynamicImage> {
        let (width, height) = image.dimensions();
        let rgba = image.to_rgba8();

        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let radius = (center_x.min(center_y) * 2.0 / 3.0).max(1.0);

        let mut output = RgbaImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() <= radius {
                output.put_pixel(x, y, *pixel);
            } else {
                output.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }

        Ok(DynamicImage::ImageRgba8(output))
    }

    fn name(&self) -> &'static str {
        "circle-mask"
    }
}

/// Remover that always fails with a fixed diagnostic
pub struct FailingRemover;

impl FailingRemover {
    pub const DIAGNOSTIC: &'static str = "mock model failure";
}

impl BackgroundRemover for FailingRemover {
    fn remove_background(&self, _image: &DynamicImage) -> Result<DynamicImage> {
        Err(EditorError::transform(Self::DIAGNOSTIC))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Remover that sleeps before delegating, to widen the busy window in tests
pub struct SlowRemover {
    pub delay: Duration,
}

impl BackgroundRemover for SlowRemover {
    fn remove_background(&self, image: &DynamicImage) -> Result<DynamicImage> {
        std::thread::sleep(self.delay);
        CircleMaskRemover.remove_background(image)
    }

    fn name(&self) -> &'static str {
        "slow"
    }
}

/// Remover that panics, for exercising worker panic containment
pub struct PanickingRemover;

impl BackgroundRemover for PanickingRemover {
    fn remove_background(&self, _image: &DynamicImage) -> Result<DynamicImage> {
        panic!("mock remover panic");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}
