//! Geometry helpers for contour simplification
use crate::models::Point;

/// Distance from `p` to the infinite line through `a` and `b`
///
/// Falls back to the distance to `a` when `a == b`.
pub fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-6 {
        return p.distance(a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}

/// Perimeter of a closed polygon
pub fn closed_arc_length(points: &[Point]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f32 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    open + points[points.len() - 1].distance(&points[0])
}
