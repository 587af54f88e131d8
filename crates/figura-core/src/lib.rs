//! figura-core: shape and color classification for image contours (sans-IO).
//!
//! Takes closed contours (produced by an external edge-detection stage)
//! and classifies them through:
//! circularity test -> polygon simplification -> bucketing ->
//! centroid color sampling.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! contours and pixel buffers and returns structured data. Contour
//! extraction lives in `figura-raster`, annotation rendering in
//! `figura-annotate`.

pub mod color;
pub mod geometry;
pub mod label;
pub mod partition;
pub mod shape;
pub mod types;

pub use color::{ColorEntry, ColorTable, Hsv, HsvImage, HsvRange, UNKNOWN_COLOR, classify_color};
pub use label::label_objects;
pub use partition::{Partition, partition};
pub use shape::{circularity, classify_shape};
pub use types::{
    ClassifiedObject, ClassifyError, Contour, Dimensions, LabelConfig, PartitionConfig, Point,
    RgbImage, ShapeClass, ShapeConfig, ShapeVerdict,
};

/// Run the full classification pipeline over a contour collection.
///
/// Buckets the contours by shape, flattens the buckets into parallel
/// contour/label sequences (circles, then rectangles, then others),
/// converts the image to HSV once, and labels each surviving object
/// with its centroid color and area.
///
/// # Errors
///
/// Returns [`ClassifyError::EmptyInput`] if `contours` is empty. The
/// flattened sequences are parallel by construction, so the labeler's
/// length check cannot fail from here.
pub fn classify_objects(
    image: &RgbImage,
    contours: &[Contour],
    table: &ColorTable,
    partition_config: &PartitionConfig,
    label_config: &LabelConfig,
) -> Result<Vec<ClassifiedObject>, ClassifyError> {
    let buckets = partition(contours, partition_config)?;
    let (flat, labels) = buckets.flatten();
    let hsv = HsvImage::from_rgb(image);
    label_objects(&hsv, &flat, &labels, table, label_config)
}
