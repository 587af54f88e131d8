//! figura-raster: contour extraction front-end for figura (sans-IO).
//!
//! Converts raster image bytes into the closed contours the
//! classification engine consumes:
//! decode -> grayscale -> blur -> edge detection -> border following ->
//! area filtering.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and image buffers. File reading and writing live with
//! the caller.

pub mod blur;
pub mod edge;
pub mod grayscale;
pub mod trace;

use serde::{Deserialize, Serialize};

use figura_core::{Contour, Dimensions, RgbImage, geometry};

pub use edge::{EdgeDetector, EdgeDetectorKind};

/// Configuration for the extraction pipeline.
///
/// All parameters have documented defaults; the area band mirrors the
/// classifier's expectation that speck-sized and frame-sized contours
/// are noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Gaussian blur kernel sigma applied before edge detection.
    /// Non-positive values skip the blur.
    pub blur_sigma: f32,

    /// Which edge detection strategy to use.
    pub detector: EdgeDetectorKind,

    /// Minimum contour area in square pixels; smaller contours are
    /// dropped.
    pub min_area: f64,

    /// Maximum contour area in square pixels; larger contours are
    /// dropped.
    pub max_area: f64,
}

impl ExtractConfig {
    /// Default blur sigma.
    pub const DEFAULT_BLUR_SIGMA: f32 = 1.4;
    /// Default minimum contour area.
    pub const DEFAULT_MIN_AREA: f64 = 500.0;
    /// Default maximum contour area.
    pub const DEFAULT_MAX_AREA: f64 = 20_000.0;
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
            detector: EdgeDetectorKind::default(),
            min_area: Self::DEFAULT_MIN_AREA,
            max_area: Self::DEFAULT_MAX_AREA,
        }
    }
}

/// Errors that can occur during contour extraction.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// No contour survived edge detection and area filtering.
    #[error("no contours found in the image")]
    NoContours,
}

/// Decoded image plus its extracted contours.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The decoded RGB image, for downstream color sampling.
    pub image: RgbImage,
    /// Contours surviving the area filter, in tracer order.
    pub contours: Vec<Contour>,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Extract contours from an already-decoded RGB image.
///
/// # Errors
///
/// Returns [`RasterError::NoContours`] if no contour survives edge
/// detection and the `[min_area, max_area]` filter.
pub fn extract(image: &RgbImage, config: &ExtractConfig) -> Result<Vec<Contour>, RasterError> {
    let gray = grayscale::to_grayscale(image);
    let blurred = blur::gaussian_blur(&gray, config.blur_sigma);
    let binary = config.detector.detect(&blurred);

    let contours: Vec<Contour> = trace::trace_contours(&binary)
        .into_iter()
        .filter(|c| {
            let area = geometry::area(c);
            area >= config.min_area && area <= config.max_area
        })
        .collect();

    if contours.is_empty() {
        return Err(RasterError::NoContours);
    }
    Ok(contours)
}

/// Run the full extraction pipeline on raw image bytes.
///
/// # Errors
///
/// Returns [`RasterError::EmptyInput`] if `bytes` is empty,
/// [`RasterError::ImageDecode`] if the image cannot be decoded, and
/// [`RasterError::NoContours`] if nothing survives extraction.
pub fn process(bytes: &[u8], config: &ExtractConfig) -> Result<Extraction, RasterError> {
    let image = grayscale::decode_rgb(bytes)?;
    let dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    let contours = extract(&image, config)?;
    Ok(Extraction {
        image,
        contours,
        dimensions,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Config tuned for tiny synthetic test images: threshold edge
    /// strategy, no area floor worth mentioning.
    fn test_config() -> ExtractConfig {
        ExtractConfig {
            blur_sigma: 0.0,
            detector: EdgeDetectorKind::Threshold { value: 128 },
            min_area: 50.0,
            max_area: 1_000_000.0,
        }
    }

    /// Encode an RGB image as PNG bytes.
    fn encode_png(img: &RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
        buf
    }

    /// Black image with a filled white block.
    fn block_image() -> RgbImage {
        let mut img = RgbImage::new(60, 60);
        for y in 10..40 {
            for x in 10..50 {
                img.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
        img
    }

    #[test]
    fn config_defaults_are_documented_values() {
        let config = ExtractConfig::default();
        assert!((config.blur_sigma - 1.4).abs() < f32::EPSILON);
        assert_eq!(config.detector, EdgeDetectorKind::default());
        assert!((config.min_area - 500.0).abs() < f64::EPSILON);
        assert!((config.max_area - 20_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_serde_round_trip() {
        let config = ExtractConfig {
            blur_sigma: 2.0,
            detector: EdgeDetectorKind::Threshold { value: 60 },
            min_area: 200.0,
            max_area: 5_000.0,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ExtractConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn process_empty_input() {
        let result = process(&[], &test_config());
        assert!(matches!(result, Err(RasterError::EmptyInput)));
    }

    #[test]
    fn process_corrupt_input() {
        let result = process(&[0xFF, 0x00], &test_config());
        assert!(matches!(result, Err(RasterError::ImageDecode(_))));
    }

    #[test]
    fn uniform_image_yields_no_contours() {
        let img = RgbImage::from_pixel(40, 40, image::Rgb([30, 30, 30]));
        let result = extract(&img, &test_config());
        assert!(matches!(result, Err(RasterError::NoContours)));
    }

    #[test]
    fn white_block_yields_a_contour() {
        let contours = extract(&block_image(), &test_config()).unwrap();
        assert!(!contours.is_empty());
        let largest = contours
            .iter()
            .map(|c| figura_core::geometry::area(c))
            .fold(0.0_f64, f64::max);
        // The block is 40x30; the traced border encloses nearly all of it.
        assert!(largest > 800.0, "largest contour area: {largest}");
    }

    #[test]
    fn area_filter_drops_out_of_band_contours() {
        let config = ExtractConfig {
            min_area: 5_000.0,
            ..test_config()
        };
        let result = extract(&block_image(), &config);
        assert!(matches!(result, Err(RasterError::NoContours)));
    }

    #[test]
    fn process_decodes_and_reports_dimensions() {
        let extraction = process(&encode_png(&block_image()), &test_config()).unwrap();
        assert_eq!(
            extraction.dimensions,
            Dimensions {
                width: 60,
                height: 60,
            },
        );
        assert!(!extraction.contours.is_empty());
        assert_eq!(extraction.image.width(), 60);
    }

    #[test]
    fn canny_strategy_also_finds_the_block() {
        let config = ExtractConfig {
            blur_sigma: 1.4,
            detector: EdgeDetectorKind::Canny {
                low: 50.0,
                high: 150.0,
            },
            min_area: 50.0,
            max_area: 1_000_000.0,
        };
        let contours = extract(&block_image(), &config).unwrap();
        assert!(!contours.is_empty());
    }
}
