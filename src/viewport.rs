//! Fit-to-viewport preview rendering
//!
//! Computes a non-upscaling, aspect-preserving preview copy of an image plus
//! the offsets that center it in a display region. Always recomputes from the
//! image passed in, so repeated layout events cannot compound quality loss.

use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// A preview image scaled to fit a viewport, with centering offsets
#[derive(Debug, Clone)]
pub struct FittedPreview {
    /// The scaled preview copy
    pub image: DynamicImage,
    /// Horizontal offset that centers the preview in the viewport
    pub offset_x: u32,
    /// Vertical offset that centers the preview in the viewport
    pub offset_y: u32,
}

impl FittedPreview {
    /// Dimensions of the scaled preview
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Fit an image into a viewport, shrinking but never enlarging
///
/// Returns `None` when either viewport dimension is ≤ 1 — the region has not
/// been laid out yet and the caller should retry on the next layout event.
///
/// Scale factor is `min(vw/w, vh/h, 1.0)`; scaled dimensions are rounded and
/// clamped to at least one pixel. Resampling uses Lanczos3, which is fine at
/// preview sizes. Offsets use floor integer division.
#[must_use]
pub fn fit(image: &DynamicImage, viewport_width: u32, viewport_height: u32) -> Option<FittedPreview> {
    if viewport_width <= 1 || viewport_height <= 1 {
        return None;
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let scale = (f64::from(viewport_width) / f64::from(width))
        .min(f64::from(viewport_height) / f64::from(height))
        .min(1.0);

    let scaled_width = ((f64::from(width) * scale).round() as u32).max(1);
    let scaled_height = ((f64::from(height) * scale).round() as u32).max(1);

    let preview = if scale < 1.0 {
        image.resize_exact(scaled_width, scaled_height, FilterType::Lanczos3)
    } else {
        image.clone()
    };

    Some(FittedPreview {
        offset_x: (viewport_width - scaled_width) / 2,
        offset_y: (viewport_height - scaled_height) / 2,
        image: preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([200, 100, 50, 255]),
        ))
    }

    #[test]
    fn test_fit_shrinks_to_viewport() {
        let image = test_image(1000, 500);
        let fitted = fit(&image, 400, 400).unwrap();

        let (w, h) = fitted.dimensions();
        assert_eq!((w, h), (400, 200));
        assert_eq!(fitted.offset_x, 0);
        assert_eq!(fitted.offset_y, 100);
    }

    #[test]
    fn test_fit_never_upscales() {
        let image = test_image(100, 80);
        let fitted = fit(&image, 800, 600).unwrap();

        assert_eq!(fitted.dimensions(), (100, 80));
        assert_eq!(fitted.offset_x, 350);
        assert_eq!(fitted.offset_y, 260);
    }

    #[test]
    fn test_fit_never_exceeds_viewport() {
        for (iw, ih) in [(3000, 17), (17, 3000), (999, 998), (2, 2)] {
            let image = test_image(iw, ih);
            let fitted = fit(&image, 640, 480).unwrap();
            let (w, h) = fitted.dimensions();
            assert!(w <= 640, "{iw}x{ih} fitted to {w}x{h}");
            assert!(h <= 480, "{iw}x{ih} fitted to {w}x{h}");
            assert!(w <= iw && h <= ih, "no upscaling for {iw}x{ih}");
        }
    }

    #[test]
    fn test_fit_degenerate_viewport_not_ready() {
        let image = test_image(100, 100);
        assert!(fit(&image, 1, 1).is_none());
        assert!(fit(&image, 0, 480).is_none());
        assert!(fit(&image, 640, 1).is_none());
    }

    #[test]
    fn test_fit_is_idempotent_from_original() {
        let image = test_image(1234, 567);

        let first = fit(&image, 300, 300).unwrap();
        let second = fit(&image, 300, 300).unwrap();

        assert_eq!(first.dimensions(), second.dimensions());
        assert_eq!(first.offset_x, second.offset_x);
        assert_eq!(first.offset_y, second.offset_y);
        assert_eq!(first.image.as_bytes(), second.image.as_bytes());
    }

    #[test]
    fn test_fit_extreme_aspect_clamps_to_one_pixel() {
        // 1000x1 image into a small viewport: height rounds to zero without the clamp
        let image = test_image(1000, 1);
        let fitted = fit(&image, 400, 300).unwrap();
        let (w, h) = fitted.dimensions();
        assert_eq!(w, 400);
        assert!(h >= 1);
    }
}
