//! Geometry primitives consumed by the classifiers.
//!
//! Area, perimeter, and centroid come from the closed-ring shoelace and
//! polygon-moment formulas. Simplification is Ramer-Douglas-Peucker
//! adapted to closed rings, implemented from scratch (~40 lines) to
//! avoid pulling in a geometry crate dependency tree. The minimum-area
//! bounding rectangle uses rotating calipers over a monotone-chain
//! convex hull.
//!
//! All functions treat the contour as read-only.

use crate::types::{Contour, Point};

/// Absolute shoelace area of the closed ring, in square pixels.
///
/// Contours with fewer than 3 points have zero area.
#[must_use]
pub fn area(contour: &Contour) -> f64 {
    signed_area(contour.points()).abs()
}

/// Signed shoelace area: positive for counter-clockwise rings in a
/// y-up frame (clockwise in image coordinates).
fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x.mul_add(b.y, -(b.x * a.y));
    }
    sum / 2.0
}

/// Perimeter of the closed ring: the sum of all edge lengths including
/// the implicit closing edge.
#[must_use]
pub fn perimeter(contour: &Contour) -> f64 {
    let points = contour.points();
    if points.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..points.len() {
        total += points[i].distance(points[(i + 1) % points.len()]);
    }
    total
}

/// Centroid of the ring from its zeroth and first polygon area moments:
/// `cx = m10/m00`, `cy = m01/m00`.
///
/// Returns `None` when `m00` is zero (degenerate or self-cancelling
/// geometry); the centroid is undefined there.
#[must_use]
pub fn centroid(contour: &Contour) -> Option<Point> {
    let points = contour.points();
    if points.len() < 3 {
        return None;
    }

    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let cross = a.x.mul_add(b.y, -(b.x * a.y));
        m00 += cross;
        m10 += (a.x + b.x) * cross;
        m01 += (a.y + b.y) * cross;
    }
    m00 /= 2.0;
    if m00 == 0.0 {
        return None;
    }
    m10 /= 6.0;
    m01 /= 6.0;

    // The sign of m00 cancels in the ratios, so ring orientation does
    // not matter.
    Some(Point::new(m10 / m00, m01 / m00))
}

/// Axis-aligned bounding box of a point set as `(x, y, width, height)`.
///
/// Returns `None` for an empty set.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some((min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Simplify a closed ring with Ramer-Douglas-Peucker.
///
/// The open-chain algorithm needs fixed endpoints, which a ring does
/// not have. Anchors are picked by the farthest-point double sweep (an
/// approximate diameter pair), the ring is split into the two chains
/// between them, and each chain is simplified independently. The result
/// keeps ring order, starting at the first anchor.
///
/// Rings with fewer than 3 points are returned unchanged.
#[must_use = "returns the simplified ring"]
pub fn simplify_closed(contour: &Contour, epsilon: f64) -> Vec<Point> {
    let points = contour.points();
    if points.len() < 3 {
        return points.to_vec();
    }

    // Approximate diameter: farthest from an arbitrary start, then
    // farthest from that.
    let first = farthest_from(points, points[0]);
    let second = farthest_from(points, points[first]);
    let (lo, hi) = (first.min(second), first.max(second));

    // Rotate the ring so it starts at one anchor; the other lands at
    // `split`. Append the start anchor so the second chain closes.
    let mut work: Vec<Point> = Vec::with_capacity(points.len() + 1);
    work.extend_from_slice(&points[lo..]);
    work.extend_from_slice(&points[..lo]);
    work.push(points[lo]);
    let split = hi - lo;

    let mut kept = vec![false; work.len()];
    kept[0] = true;
    kept[split] = true;
    rdp_recurse(&work, 0, split, epsilon, &mut kept);
    rdp_recurse(&work, split, work.len() - 1, epsilon, &mut kept);

    work.iter()
        .zip(&kept)
        .take(points.len())
        .filter(|&(_, k)| *k)
        .map(|(&p, _)| p)
        .collect()
}

/// Index of the point farthest from `origin`.
fn farthest_from(points: &[Point], origin: Point) -> usize {
    let mut best = 0;
    let mut best_dist = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = origin.distance_squared(*p);
        if d > best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Recursive step of the Ramer-Douglas-Peucker algorithm.
///
/// Finds the point between `start` and `end` that is farthest from the
/// line segment between them. If that distance exceeds `epsilon`, the
/// point is kept and both sub-segments are processed recursively.
fn rdp_recurse(points: &[Point], start: usize, end: usize, epsilon: f64, kept: &mut [bool]) {
    if end <= start + 1 {
        return;
    }

    let mut max_dist = 0.0;
    let mut max_idx = start;

    for i in (start + 1)..end {
        let d = perpendicular_distance(points[i], points[start], points[end]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist > epsilon {
        kept[max_idx] = true;
        rdp_recurse(points, start, max_idx, epsilon, kept);
        rdp_recurse(points, max_idx, end, epsilon, kept);
    }
}

/// Perpendicular distance from point `p` to the line defined by `a` and `b`.
///
/// Uses the formula: |cross(b-a, p-a)| / |b-a|.
/// When `a` and `b` coincide, returns the distance from `p` to `a`.
fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance(a);
    }

    let cross = dx.mul_add(a.y - p.y, -(dy * (a.x - p.x)));
    cross.abs() / length_sq.sqrt()
}

/// Corner points of the minimum-area (possibly rotated) rectangle
/// enclosing the contour, via rotating calipers over the convex hull.
///
/// The corners come back in rectangle order (adjacent corners share an
/// edge). Returns `None` for degenerate input whose hull collapses to
/// fewer than 3 points, where no rectangle with positive area exists.
#[must_use]
pub fn min_area_rect(contour: &Contour) -> Option<[Point; 4]> {
    let hull = convex_hull(contour.points());
    if hull.len() < 3 {
        return None;
    }

    let mut best: Option<([Point; 4], f64)> = None;

    // The minimum-area enclosing rectangle has a side collinear with
    // some hull edge, so trying every edge direction is exhaustive.
    for i in 0..hull.len() {
        let p = hull[i];
        let q = hull[(i + 1) % hull.len()];
        let ex = q.x - p.x;
        let ey = q.y - p.y;
        let len = ex.hypot(ey);
        if len == 0.0 {
            continue;
        }
        let ux = ex / len;
        let uy = ey / len;

        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for h in &hull {
            let dx = h.x - p.x;
            let dy = h.y - p.y;
            let u = dx.mul_add(ux, dy * uy);
            let v = dy.mul_add(ux, -(dx * uy));
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }

        let rect_area = (max_u - min_u) * (max_v - min_v);
        if best.is_none_or(|(_, a)| rect_area < a) {
            let corner = |u: f64, v: f64| {
                Point::new(
                    p.x + u.mul_add(ux, -(v * uy)),
                    p.y + u.mul_add(uy, v * ux),
                )
            };
            best = Some((
                [
                    corner(min_u, min_v),
                    corner(max_u, min_v),
                    corner(max_u, max_v),
                    corner(min_u, max_v),
                ],
                rect_area,
            ));
        }
    }

    best.map(|(corners, _)| corners)
}

/// Convex hull via Andrew's monotone chain, in counter-clockwise order
/// without a repeated first point.
///
/// Collinear interior points are dropped. Collinear input collapses to
/// 2 points (or fewer).
fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let turns_right = |o: Point, a: Point, b: Point| {
        (a.x - o.x).mul_add(b.y - o.y, -((a.y - o.y) * (b.x - o.x))) <= 0.0
    };

    let mut lower: Vec<Point> = Vec::new();
    for &p in &sorted {
        while lower.len() >= 2 && turns_right(lower[lower.len() - 2], lower[lower.len() - 1], p) {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::new();
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turns_right(upper[upper.len() - 2], upper[upper.len() - 1], p) {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
