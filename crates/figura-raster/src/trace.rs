//! Border following: extract closed contours from a binary image.
//!
//! Wraps Suzuki-Abe border following from
//! [`imageproc::contours::find_contours`] and converts the integer
//! border points into the classifier's floating-point closed rings.

use image::GrayImage;

use figura_core::{Contour, Point};

/// Trace closed contours in a binary image (white = foreground).
///
/// Contours with fewer than 3 border points cannot describe a polygon
/// and are dropped. The remaining rings keep the tracer's point order;
/// the closing edge back to the first point is implicit.
#[must_use = "returns the traced contours"]
pub fn trace_contours(binary: &GrayImage) -> Vec<Contour> {
    let contours: Vec<imageproc::contours::Contour<u32>> =
        imageproc::contours::find_contours(binary);

    contours
        .into_iter()
        .filter(|c| c.points.len() >= 3)
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                .collect();
            Contour::new(points)
        })
        .collect()
}
