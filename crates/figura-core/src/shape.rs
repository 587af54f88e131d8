//! Per-contour shape classification.
//!
//! Circularity is tested first: it is a single scale-invariant scalar
//! and cheap to compute, so the polygon path (simplification, vertex
//! counting, aspect ratio) is only reached for non-circular contours.

use std::f64::consts::PI;

use crate::geometry;
use crate::types::{Contour, ShapeConfig, ShapeVerdict};

/// Isoperimetric ratio `4πA/P²`: 1.0 for a perfect circle, smaller for
/// everything else (π/4 ≈ 0.785 for a square).
///
/// Returns `None` when the perimeter or area is non-positive; the
/// ratio is meaningless for degenerate geometry.
#[must_use]
pub fn circularity(contour: &Contour) -> Option<f64> {
    let area = geometry::area(contour);
    let perimeter = geometry::perimeter(contour);
    if perimeter <= 0.0 || area <= 0.0 {
        return None;
    }
    Some(4.0 * PI * area / (perimeter * perimeter))
}

/// Classify one closed contour.
///
/// Degenerate contours (non-positive area or perimeter) are `Unknown`;
/// callers treat that as "other". A circularity above
/// `config.circularity_threshold` decides circle-ness outright.
/// Otherwise the contour is simplified with a tolerance of
/// `config.simplify_perimeter_fraction` of its perimeter; exactly 4
/// remaining vertices make it a square or rectangle depending on the
/// axis-aligned aspect ratio, anything else is `Unknown`.
///
/// The contour is read-only; no copy is modified or returned.
#[must_use]
pub fn classify_shape(contour: &Contour, config: &ShapeConfig) -> ShapeVerdict {
    let Some(circularity) = circularity(contour) else {
        return ShapeVerdict::Unknown;
    };
    if circularity > config.circularity_threshold {
        return ShapeVerdict::Circle;
    }

    let epsilon = config.simplify_perimeter_fraction * geometry::perimeter(contour);
    let approx = geometry::simplify_closed(contour, epsilon);
    if approx.len() != 4 {
        return ShapeVerdict::Unknown;
    }

    let Some((_, _, width, height)) = geometry::bounding_box(&approx) else {
        return ShapeVerdict::Unknown;
    };
    if height <= 0.0 {
        return ShapeVerdict::Unknown;
    }
    let aspect = width / height;
    if aspect >= config.square_aspect_min && aspect <= config.square_aspect_max {
        ShapeVerdict::Square
    } else {
        ShapeVerdict::Rectangle
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Point;

    /// Regular n-gon approximating a circle of the given radius.
    fn sampled_circle(radius: f64, samples: usize) -> Contour {
        #[allow(clippy::cast_precision_loss)]
        let points = (0..samples)
            .map(|i| {
                let theta = 2.0 * PI * i as f64 / samples as f64;
                Point::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Contour::new(points)
    }

    /// Same circle with every coordinate snapped to the pixel grid.
    fn pixel_circle(radius: f64, samples: usize) -> Contour {
        let points = sampled_circle(radius, samples)
            .into_points()
            .into_iter()
            .map(|p| Point::new(p.x.round(), p.y.round()))
            .collect();
        Contour::new(points)
    }

    /// Boundary of an axis-aligned rectangle sampled every 1px.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn dense_rect(width: f64, height: f64) -> Contour {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ];
        let mut points = Vec::new();
        for i in 0..4 {
            let from = corners[i];
            let to = corners[(i + 1) % 4];
            let steps = from.distance(to) as usize;
            for s in 0..steps {
                let t = s as f64 / steps as f64;
                points.push(Point::new(
                    (to.x - from.x).mul_add(t, from.x),
                    (to.y - from.y).mul_add(t, from.y),
                ));
            }
        }
        Contour::new(points)
    }

    // --- circularity ---

    #[test]
    fn circularity_of_square_is_pi_over_four() {
        let contour = dense_rect(100.0, 100.0);
        let c = circularity(&contour).unwrap();
        assert!((c - PI / 4.0).abs() < 1e-6, "got {c}");
    }

    #[test]
    fn circularity_of_fine_circle_approaches_one() {
        let c = circularity(&sampled_circle(50.0, 256)).unwrap();
        assert!(c > 0.999, "got {c}");
        assert!(c <= 1.0 + 1e-9);
    }

    #[test]
    fn circularity_of_degenerate_contour_is_none() {
        assert!(circularity(&Contour::new(vec![])).is_none());
        let collinear = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ]);
        assert!(circularity(&collinear).is_none());
    }

    // --- classify_shape ---

    #[test]
    fn degenerate_contour_is_unknown() {
        let collinear = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ]);
        assert_eq!(
            classify_shape(&collinear, &ShapeConfig::default()),
            ShapeVerdict::Unknown,
        );
    }

    #[test]
    fn sampled_circle_classifies_as_circle() {
        let verdict = classify_shape(&sampled_circle(20.0, 64), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Circle);
    }

    #[test]
    fn pixel_snapped_circle_still_classifies_as_circle() {
        // Radius 20 with 24 boundary samples: grid snapping perturbs
        // each vertex by at most half a pixel on ~5px edges, which
        // cannot push circularity below the 0.8 threshold.
        let verdict = classify_shape(&pixel_circle(20.0, 24), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Circle);
    }

    #[test]
    fn square_contour_classifies_as_square() {
        let verdict = classify_shape(&dense_rect(100.0, 100.0), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Square);
    }

    #[test]
    fn stretched_square_becomes_rectangle() {
        // Stretching one dimension past the 1.05 aspect band flips the
        // verdict.
        let verdict = classify_shape(&dense_rect(110.0, 100.0), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Rectangle);
        let verdict = classify_shape(&dense_rect(100.0, 110.0), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Rectangle);
    }

    #[test]
    fn aspect_inside_band_is_square() {
        let verdict = classify_shape(&dense_rect(104.0, 100.0), &ShapeConfig::default());
        assert_eq!(verdict, ShapeVerdict::Square);
    }

    #[test]
    fn triangle_is_unknown() {
        let contour = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(30.0, 50.0),
        ]);
        assert_eq!(
            classify_shape(&contour, &ShapeConfig::default()),
            ShapeVerdict::Unknown,
        );
    }

    #[test]
    fn hexagon_is_unknown_below_circle_threshold() {
        // A regular hexagon has circularity ~0.907; force the polygon
        // path with a raised threshold and it fails the 4-vertex test.
        let config = ShapeConfig {
            circularity_threshold: 0.95,
            ..ShapeConfig::default()
        };
        assert_eq!(
            classify_shape(&sampled_circle(30.0, 6), &config),
            ShapeVerdict::Unknown,
        );
    }

    #[test]
    fn threshold_is_configurable_per_call() {
        // A regular hexagon (~0.907) is a circle under the default 0.8
        // threshold but not under 0.95.
        let hexagon = sampled_circle(30.0, 6);
        assert_eq!(
            classify_shape(&hexagon, &ShapeConfig::default()),
            ShapeVerdict::Circle,
        );
        let strict = ShapeConfig {
            circularity_threshold: 0.95,
            ..ShapeConfig::default()
        };
        assert_ne!(classify_shape(&hexagon, &strict), ShapeVerdict::Circle);
    }

    #[test]
    fn classify_does_not_mutate_the_contour() {
        let contour = dense_rect(30.0, 20.0);
        let before = contour.clone();
        let _ = classify_shape(&contour, &ShapeConfig::default());
        assert_eq!(contour, before);
    }

    #[test]
    fn square_below_082_threshold_still_takes_polygon_path() {
        // Circularity of a square is ~0.785, below the 0.82 threshold
        // used by the end-to-end flow, so the polygon path decides.
        let config = ShapeConfig {
            circularity_threshold: 0.82,
            ..ShapeConfig::default()
        };
        assert_eq!(
            classify_shape(&dense_rect(100.0, 100.0), &config),
            ShapeVerdict::Square,
        );
    }
}
