//! Edge detection: produce the binary map that border following traces.
//!
//! This module defines the [`EdgeDetector`] trait for pluggable edge
//! strategies and the [`EdgeDetectorKind`] enum for selecting one at
//! runtime. Two strategies are provided:
//!
//! - Canny, for images where object boundaries are gradient edges.
//! - Binary thresholding, for high-contrast scenes where objects
//!   separate from the background by brightness alone.
//!
//! Both return a binary image: 255 for foreground/edge pixels, 0 for
//! background.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Minimum allowed Canny threshold.
///
/// A low threshold of zero causes every pixel with any gradient to be
/// treated as a potential edge, producing an extremely dense edge map
/// that overwhelms downstream contour tracing.
pub const MIN_CANNY_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_CANNY_THRESHOLD > 0.0);

/// Selects which edge detection strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgeDetectorKind {
    /// Canny edge detection with hysteresis thresholds.
    Canny {
        /// Low hysteresis threshold; weak-edge pixels above it survive
        /// only when connected to a strong edge.
        low: f32,
        /// High hysteresis threshold; pixels above it are definite
        /// edges.
        high: f32,
    },
    /// Binary thresholding: pixels brighter than `value` become
    /// foreground.
    Threshold {
        /// Brightness cut, exclusive (`pixel > value` is foreground).
        value: u8,
    },
}

impl EdgeDetectorKind {
    /// Default Canny low threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 100.0;
    /// Default Canny high threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 255.0;
    /// Default binarization threshold.
    pub const DEFAULT_THRESHOLD: u8 = 100;
}

impl Default for EdgeDetectorKind {
    fn default() -> Self {
        Self::Canny {
            low: Self::DEFAULT_CANNY_LOW,
            high: Self::DEFAULT_CANNY_HIGH,
        }
    }
}

/// Trait for edge detection strategies.
///
/// Input: a blurred grayscale image. Output: a binary map (255 =
/// foreground/edge, 0 = background).
pub trait EdgeDetector {
    /// Produce the binary edge map for the given image.
    fn detect(&self, image: &GrayImage) -> GrayImage;
}

impl EdgeDetector for EdgeDetectorKind {
    fn detect(&self, image: &GrayImage) -> GrayImage {
        match *self {
            Self::Canny { low, high } => canny(image, low, high),
            Self::Threshold { value } => binarize(image, value),
        }
    }
}

/// Detect edges using the Canny algorithm.
///
/// Both thresholds are clamped to a minimum of [`MIN_CANNY_THRESHOLD`]
/// and `low_threshold` is clamped to be at most `high_threshold`, which
/// prevents degenerate edge maps.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_CANNY_THRESHOLD);
    let low = low_threshold.max(MIN_CANNY_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}

/// Binary threshold: strictly brighter pixels become foreground (255),
/// everything else background (0).
#[must_use = "returns the binary image"]
pub fn binarize(image: &GrayImage, threshold: u8) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y).0[0] > threshold {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    })
}
