//! Shared types for the figura classification engine.

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can hand color pixel data
/// to the classifier without depending on `image` directly.
pub use image::RgbImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// An ordered sequence of 2D points forming a closed ring.
///
/// The closing edge from the last point back to the first is implicit;
/// the last point is never a repeat of the first. A contour needs at
/// least 3 points to describe a polygon; shorter contours are accepted
/// but classify as degenerate through their derived metrics (zero area).
///
/// The engine never mutates or repairs a contour; it only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the contour.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the contour has enough points to describe a
    /// polygon (at least 3).
    #[must_use]
    pub const fn is_polygon(&self) -> bool {
        self.0.len() >= 3
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the contour and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Fine-grained per-contour shape verdict.
///
/// Produced by [`classify_shape`](crate::shape::classify_shape). `Square`
/// and `Rectangle` are distinct here; the partitioner merges them into a
/// single [`ShapeClass::Rectangle`] bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeVerdict {
    /// Circularity above the configured threshold.
    Circle,
    /// Four-vertex polygon with near-unit aspect ratio.
    Square,
    /// Four-vertex polygon with a stretched aspect ratio.
    Rectangle,
    /// Degenerate geometry or an unrecognized vertex count.
    Unknown,
}

impl ShapeVerdict {
    /// Collapse the fine verdict into the coarse bucket used by the
    /// partitioner and labeler.
    #[must_use]
    pub const fn bucket(self) -> ShapeClass {
        match self {
            Self::Circle => ShapeClass::Circle,
            Self::Square | Self::Rectangle => ShapeClass::Rectangle,
            Self::Unknown => ShapeClass::Other,
        }
    }
}

/// Coarse shape bucket reported per classified object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    Circle,
    Rectangle,
    Other,
}

impl ShapeClass {
    /// Lowercase label used in reports and annotations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labeled object: a contour plus its shape bucket, sampled color
/// name, and derived area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedObject {
    /// The source contour, unchanged.
    pub contour: Contour,
    /// Coarse shape bucket assigned upstream.
    pub shape: ShapeClass,
    /// Color name from the range table, or `"unknown"`.
    pub color: String,
    /// Shoelace area of the contour in square pixels.
    pub area: f64,
}

/// Thresholds for the shape classifier.
///
/// All values are empirical; the defaults reproduce the documented
/// behavior but carry no derivation, so callers tuning for a different
/// contour source should expect to adjust them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeConfig {
    /// Minimum circularity (`4πA/P²`, 1.0 for a perfect circle) for a
    /// contour to classify as a circle. The polygon path is only taken
    /// below this value.
    pub circularity_threshold: f64,

    /// Simplification tolerance as a fraction of the contour perimeter.
    pub simplify_perimeter_fraction: f64,

    /// Lower bound of the aspect-ratio band treated as square.
    pub square_aspect_min: f64,

    /// Upper bound of the aspect-ratio band treated as square.
    pub square_aspect_max: f64,
}

impl ShapeConfig {
    /// Default circularity threshold.
    pub const DEFAULT_CIRCULARITY_THRESHOLD: f64 = 0.8;
    /// Default simplification tolerance fraction.
    pub const DEFAULT_SIMPLIFY_PERIMETER_FRACTION: f64 = 0.04;
    /// Default lower aspect bound for squares.
    pub const DEFAULT_SQUARE_ASPECT_MIN: f64 = 0.95;
    /// Default upper aspect bound for squares.
    pub const DEFAULT_SQUARE_ASPECT_MAX: f64 = 1.05;
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            circularity_threshold: Self::DEFAULT_CIRCULARITY_THRESHOLD,
            simplify_perimeter_fraction: Self::DEFAULT_SIMPLIFY_PERIMETER_FRACTION,
            square_aspect_min: Self::DEFAULT_SQUARE_ASPECT_MIN,
            square_aspect_max: Self::DEFAULT_SQUARE_ASPECT_MAX,
        }
    }
}

/// Thresholds for the contour partitioner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Shape classifier thresholds, applied per contour.
    pub shape: ShapeConfig,

    /// Minimum ratio of contour area to minimum-area bounding rectangle
    /// area for a rectangular verdict to be kept. Jagged or partially
    /// occluded near-rectangles fall below this and demote to `others`.
    pub box_fill_ratio: f64,
}

impl PartitionConfig {
    /// Default box-fill ratio.
    pub const DEFAULT_BOX_FILL_RATIO: f64 = 0.95;
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            shape: ShapeConfig::default(),
            box_fill_ratio: Self::DEFAULT_BOX_FILL_RATIO,
        }
    }
}

/// Thresholds for the object labeler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Absolute pixel-area noise floor. Contours below it produce no
    /// output record.
    pub min_area: f64,
}

impl LabelConfig {
    /// Default minimum object area in square pixels.
    pub const DEFAULT_MIN_AREA: f64 = 100.0;
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_area: Self::DEFAULT_MIN_AREA,
        }
    }
}

/// Errors reported by the classification engine.
///
/// Degenerate geometry and out-of-bounds sample points are recovered
/// locally (the `others` bucket, the `"unknown"` color) and never
/// surface here.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    /// Zero contours were supplied to the partitioner.
    #[error("no contours provided")]
    EmptyInput,

    /// The labeler received contour and label sequences of different
    /// lengths.
    #[error("contour and label counts differ: {contours} contours, {labels} labels")]
    LabelMismatch {
        /// Number of contours supplied.
        contours: usize,
        /// Number of shape labels supplied.
        labels: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_distance_to_self_is_zero() {
        let p = Point::new(7.0, 11.0);
        assert!(p.distance(p).abs() < f64::EPSILON);
    }

    // --- Contour tests ---

    #[test]
    fn contour_accessors() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
        ];
        let contour = Contour::new(points.clone());
        assert_eq!(contour.len(), 3);
        assert!(!contour.is_empty());
        assert!(contour.is_polygon());
        assert_eq!(contour.points(), &points);
        assert_eq!(contour.into_points(), points);
    }

    #[test]
    fn contour_below_three_points_is_not_a_polygon() {
        assert!(!Contour::new(vec![]).is_polygon());
        assert!(!Contour::new(vec![Point::new(1.0, 1.0)]).is_polygon());
        assert!(!Contour::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).is_polygon());
    }

    // --- Verdict / bucket tests ---

    #[test]
    fn square_and_rectangle_share_a_bucket() {
        assert_eq!(ShapeVerdict::Square.bucket(), ShapeClass::Rectangle);
        assert_eq!(ShapeVerdict::Rectangle.bucket(), ShapeClass::Rectangle);
    }

    #[test]
    fn circle_and_unknown_buckets() {
        assert_eq!(ShapeVerdict::Circle.bucket(), ShapeClass::Circle);
        assert_eq!(ShapeVerdict::Unknown.bucket(), ShapeClass::Other);
    }

    #[test]
    fn shape_class_labels() {
        assert_eq!(ShapeClass::Circle.as_str(), "circle");
        assert_eq!(ShapeClass::Rectangle.as_str(), "rectangle");
        assert_eq!(ShapeClass::Other.as_str(), "other");
        assert_eq!(ShapeClass::Circle.to_string(), "circle");
    }

    // --- Config tests ---

    #[test]
    fn shape_config_defaults() {
        let config = ShapeConfig::default();
        assert!((config.circularity_threshold - 0.8).abs() < f64::EPSILON);
        assert!((config.simplify_perimeter_fraction - 0.04).abs() < f64::EPSILON);
        assert!((config.square_aspect_min - 0.95).abs() < f64::EPSILON);
        assert!((config.square_aspect_max - 1.05).abs() < f64::EPSILON);
    }

    #[test]
    fn partition_config_defaults() {
        let config = PartitionConfig::default();
        assert!((config.box_fill_ratio - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.shape, ShapeConfig::default());
    }

    #[test]
    fn label_config_defaults() {
        let config = LabelConfig::default();
        assert!((config.min_area - 100.0).abs() < f64::EPSILON);
    }

    // --- Error tests ---

    #[test]
    fn error_empty_input_display() {
        assert_eq!(ClassifyError::EmptyInput.to_string(), "no contours provided");
    }

    #[test]
    fn error_label_mismatch_display() {
        let err = ClassifyError::LabelMismatch {
            contours: 3,
            labels: 2,
        };
        assert_eq!(
            err.to_string(),
            "contour and label counts differ: 3 contours, 2 labels",
        );
    }

    // --- Serde round-trip tests ---

    #[test]
    fn contour_serde_round_trip() {
        let contour = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 2.5),
            Point::new(3.0, 0.0),
        ]);
        let json = serde_json::to_string(&contour).unwrap();
        let deserialized: Contour = serde_json::from_str(&json).unwrap();
        assert_eq!(contour, deserialized);
    }

    #[test]
    fn shape_class_serializes_lowercase() {
        let json = serde_json::to_string(&ShapeClass::Rectangle).unwrap();
        assert_eq!(json, "\"rectangle\"");
    }

    #[test]
    fn configs_serde_round_trip() {
        let config = PartitionConfig {
            shape: ShapeConfig {
                circularity_threshold: 0.82,
                ..ShapeConfig::default()
            },
            box_fill_ratio: 0.9,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PartitionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn classified_object_serde_round_trip() {
        let object = ClassifiedObject {
            contour: Contour::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
            ]),
            shape: ShapeClass::Other,
            color: "red".to_owned(),
            area: 50.0,
        };
        let json = serde_json::to_string(&object).unwrap();
        let deserialized: ClassifiedObject = serde_json::from_str(&json).unwrap();
        assert_eq!(object, deserialized);
    }
}
