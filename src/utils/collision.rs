// utils/collision.rs

use crate::utils::vec2d::Vec2d;

/// Ray-cast point-in-polygon test.
pub fn point_in_polygon(point: Vec2d, polygon: &[Vec2d]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        let denom = if (pj.y - pi.y).abs() > 1e-9 {
            pj.y - pi.y
        } else {
            1e-9
        };
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / denom + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closest point on the segment `a`-`b` to `point`.
pub fn closest_point_on_segment(point: Vec2d, a: Vec2d, b: Vec2d) -> Vec2d {
    let ab = b - a;
    let ab_len_sq = ab.length_sq();
    if ab_len_sq <= 1e-6 {
        return a;
    }
    let t = ((point - a).dot(ab) / ab_len_sq).clamp(0.0, 1.0);
    a + ab.scale(t)
}

/// Minimum distance from `point` to the segment `a`-`b`.
pub fn point_segment_distance(point: Vec2d, a: Vec2d, b: Vec2d) -> f64 {
    (closest_point_on_segment(point, a, b) - point).length()
}

/// Checks whether a circle overlaps a convex polygon, either by containing
/// its center or by touching an edge.
pub fn circle_polygon_collision(center: Vec2d, radius: f64, polygon: &[Vec2d]) -> bool {
    if polygon.is_empty() {
        return false;
    }
    if point_in_polygon(center, polygon) {
        return true;
    }
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if point_segment_distance(center, a, b) <= radius {
            return true;
        }
    }
    false
}
