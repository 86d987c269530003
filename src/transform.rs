//! Transform engine for black-background removal
//!
//! Pure per-pixel classification and alpha masking. Decides which pixels
//! belong to the solid black background and sets their alpha channel to zero,
//! leaving every other channel value untouched. No I/O happens here.

use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Default per-channel intensity ceiling for the black classification
pub const DEFAULT_THRESHOLD: u8 = 30;

/// Default reserved tolerance value
pub const DEFAULT_TOLERANCE: u8 = 10;

/// Immutable threshold policy used to classify pixels as black background
///
/// A pixel is background when all three color channels are at or below
/// `threshold`, or when it is already fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    /// Per-channel intensity ceiling (0-255) for the background classification
    pub threshold: u8,
    /// Reserved softening knob. Accepted for configuration parity but never
    /// consulted by the classification rule.
    pub tolerance: u8,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ThresholdPolicy {
    /// Create a policy with the given threshold and the default tolerance
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self {
            threshold,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Classify a pixel as black background
    ///
    /// Already fully transparent pixels stay classified as background, which
    /// makes the masking rule idempotent. Otherwise the pixel is background
    /// iff red, green and blue are all at or below the threshold.
    #[must_use]
    pub const fn classify(&self, pixel: Rgba<u8>) -> bool {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            return true;
        }
        r <= self.threshold && g <= self.threshold && b <= self.threshold
    }
}

/// Set alpha to zero for every background pixel of an RGBA buffer, in place
///
/// Runs as a single flat pass over the raw byte buffer in 4-byte chunks so
/// the hot loop stays branch-light and amenable to vectorization.
pub fn mask_background(image: &mut RgbaImage, policy: ThresholdPolicy) {
    let t = policy.threshold;
    for px in image.chunks_exact_mut(4) {
        let background = px[3] == 0 || (px[0] <= t && px[1] <= t && px[2] <= t);
        if background {
            px[3] = 0;
        }
    }
}

/// Produce a copy of `image` with the black background made transparent
///
/// A 3-channel input is upgraded to RGBA with fully opaque alpha before
/// classification, so non-background pixels of RGB inputs come out opaque.
/// Deterministic and total: the same input and policy always yield
/// byte-identical output, including for 0x0 buffers.
#[must_use]
pub fn remove_background(image: &DynamicImage, policy: ThresholdPolicy) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    mask_background(&mut rgba, policy);
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_classify_threshold_boundary() {
        let policy = ThresholdPolicy::new(30);

        assert!(policy.classify(Rgba([0, 0, 0, 255])));
        assert!(policy.classify(Rgba([30, 30, 30, 255])));
        assert!(!policy.classify(Rgba([31, 0, 0, 255])));
        assert!(!policy.classify(Rgba([0, 31, 0, 255])));
        assert!(!policy.classify(Rgba([0, 0, 31, 255])));
        assert!(!policy.classify(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_classify_transparent_pixel_stays_background() {
        let policy = ThresholdPolicy::new(30);

        // Fully transparent pixels are background regardless of color
        assert!(policy.classify(Rgba([200, 200, 200, 0])));
        assert!(policy.classify(Rgba([0, 0, 0, 0])));

        // Partially transparent pixels follow the color rule
        assert!(!policy.classify(Rgba([200, 200, 200, 1])));
        assert!(policy.classify(Rgba([10, 10, 10, 1])));
    }

    #[test]
    fn test_tolerance_has_no_effect() {
        let base = ThresholdPolicy::new(30);
        let softened = ThresholdPolicy {
            threshold: 30,
            tolerance: 200,
        };

        for value in [0_u8, 29, 30, 31, 255] {
            let pixel = Rgba([value, value, value, 255]);
            assert_eq!(base.classify(pixel), softened.classify(pixel));
        }
    }

    #[test]
    fn test_remove_background_rgb_upgrade() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, image::Rgb([0, 0, 0]));
        rgb.put_pixel(1, 0, image::Rgb([31, 0, 0]));

        let result = remove_background(&DynamicImage::ImageRgb8(rgb), ThresholdPolicy::new(30));

        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
        assert_eq!(result.get_pixel(1, 0), &Rgba([31, 0, 0, 255]));
    }

    #[test]
    fn test_remove_background_preserves_foreground() {
        let mut rgba = RgbaImage::new(2, 2);
        rgba.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        rgba.put_pixel(1, 0, Rgba([255, 255, 255, 128]));
        rgba.put_pixel(0, 1, Rgba([40, 40, 40, 255]));
        rgba.put_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let input = DynamicImage::ImageRgba8(rgba);
        let result = remove_background(&input, ThresholdPolicy::new(30));

        // Only the black pixel is masked; all other channels pass through
        assert_eq!(result.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));
        assert_eq!(result.get_pixel(1, 0), &Rgba([255, 255, 255, 128]));
        assert_eq!(result.get_pixel(0, 1), &Rgba([40, 40, 40, 255]));
        assert_eq!(result.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_remove_background_idempotent() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(1, 0, Rgba([15, 20, 25, 255]));
        rgba.put_pixel(2, 0, Rgba([100, 100, 100, 255]));

        let policy = ThresholdPolicy::new(30);
        let once = remove_background(&DynamicImage::ImageRgba8(rgba), policy);
        let twice = remove_background(&DynamicImage::ImageRgba8(once.clone()), policy);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_background_no_background_is_noop() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
        rgba.put_pixel(1, 0, Rgba([31, 31, 31, 255]));

        let input = DynamicImage::ImageRgba8(rgba.clone());
        let result = remove_background(&input, ThresholdPolicy::new(30));

        assert_eq!(result, rgba);
    }

    #[test]
    fn test_remove_background_empty_buffer() {
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let result = remove_background(&empty, ThresholdPolicy::default());
        assert_eq!(result.dimensions(), (0, 0));
    }

    #[test]
    fn test_mask_background_in_place() {
        let mut rgba = RgbaImage::new(1, 2);
        rgba.put_pixel(0, 0, Rgba([10, 10, 10, 255]));
        rgba.put_pixel(0, 1, Rgba([99, 10, 10, 255]));

        mask_background(&mut rgba, ThresholdPolicy::new(30));

        assert_eq!(rgba.get_pixel(0, 0), &Rgba([10, 10, 10, 0]));
        assert_eq!(rgba.get_pixel(0, 1), &Rgba([99, 10, 10, 255]));
    }
}
