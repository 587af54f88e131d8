//! Per-object labeling: compose shape buckets with sampled colors.
//!
//! Consumes the parallel contour/label sequences produced by
//! [`Partition::flatten`](crate::partition::Partition::flatten) (or any
//! equivalent pairing) and attaches a color sampled at each contour's
//! centroid, producing the pipeline's final result list. Rendering the
//! result onto an image is a separate serializer's job.

use crate::color::{ColorTable, HsvImage, classify_color};
use crate::geometry;
use crate::types::{ClassifiedObject, ClassifyError, Contour, LabelConfig, ShapeClass};

/// Label each contour with its shape bucket, centroid color, and area.
///
/// `contours` and `shapes` must be equal-length parallel sequences:
/// one pre-computed shape label per contour. Records are produced in
/// input order. A contour is skipped (no record) when its area falls
/// below `config.min_area` or when its centroid is undefined (zero
/// area moment). A centroid outside the image yields the `"unknown"`
/// color rather than an error.
///
/// # Errors
///
/// Returns [`ClassifyError::LabelMismatch`] when the sequence lengths
/// differ.
#[allow(clippy::cast_possible_truncation)]
pub fn label_objects(
    image: &HsvImage,
    contours: &[Contour],
    shapes: &[ShapeClass],
    table: &ColorTable,
    config: &LabelConfig,
) -> Result<Vec<ClassifiedObject>, ClassifyError> {
    if contours.len() != shapes.len() {
        return Err(ClassifyError::LabelMismatch {
            contours: contours.len(),
            labels: shapes.len(),
        });
    }

    let mut objects = Vec::new();
    for (contour, &shape) in contours.iter().zip(shapes) {
        let area = geometry::area(contour);
        if area < config.min_area {
            continue;
        }
        let Some(center) = geometry::centroid(contour) else {
            continue;
        };

        // Truncation toward zero matches integer pixel sampling of a
        // non-negative centroid.
        let color = classify_color(image, center.x as i64, center.y as i64, table);
        objects.push(ClassifiedObject {
            contour: contour.clone(),
            shape,
            color: color.to_owned(),
            area,
        });
    }
    Ok(objects)
}
