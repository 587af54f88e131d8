//! Image decoding and grayscale conversion.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the two
//! buffers the rest of the pipeline needs: the RGB image the color
//! classifier samples, and a single-channel grayscale image for edge
//! detection.

use image::{GrayImage, RgbImage};

use crate::RasterError;

/// Decode raw image bytes into an RGB buffer.
///
/// Supports whatever formats the `image` crate can decode. The color
/// buffer is kept because the classification stage samples original
/// pixel colors at contour centroids.
///
/// # Errors
///
/// Returns [`RasterError::EmptyInput`] if `bytes` is empty.
/// Returns [`RasterError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, RasterError> {
    if bytes.is_empty() {
        return Err(RasterError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Convert an RGB buffer to grayscale with the standard luminance
/// weights (`0.299*R + 0.587*G + 0.114*B`).
#[must_use = "returns the grayscale image"]
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    image::DynamicImage::ImageRgb8(image.clone()).to_luma8()
}
