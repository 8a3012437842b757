//! 2D vector math and the segment/projection geometry the sensors are built
//! on. Everything here is pure: degenerate inputs (parallel segments,
//! zero-length lines) yield "no result", never a panic.

use serde::{Deserialize, Serialize};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Vec2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn add(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    /// Clockwise rotation by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Vec2 {
        Vec2::new(
            self.x * angle.cos() + self.y * angle.sin(),
            -self.x * angle.sin() + self.y * angle.cos(),
        )
    }

    /// Scales to unit length in place. Zero-length vectors are left as-is.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len);
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.x *= factor;
        self.y *= factor;
    }
}

/// Segment intersection between (p1,p2) and (p3,p4).
///
/// Returns the intersection parameter along (p1,p2) when both segments'
/// parameters lie in the half-open interval `(0, 1]`, otherwise `None`.
/// The asymmetry is deliberate: a ray whose origin sits exactly on a wall
/// does not self-intersect, while a hit exactly at full range still counts.
/// Parallel segments (zero denominator) yield `None`.
pub fn line_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<f64> {
    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return None;
    }

    let t_a = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let t_b = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;

    if t_a > 0.0 && t_a <= 1.0 && t_b > 0.0 && t_b <= 1.0 {
        Some(t_a)
    } else {
        None
    }
}

/// Perpendicular distance from `p0` to the infinite line through `p1`, `p2`.
pub fn line_point_orthogonal_distance(p1: Vec2, p2: Vec2, p0: Vec2) -> f64 {
    let segment_length = ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt();
    let cross = ((p2.y - p1.y) * p0.x - (p2.x - p1.x) * p0.y + p2.x * p1.y - p2.y * p1.x).abs();
    cross / segment_length
}

/// Scalar projection of (p1 -> p0) onto (p1 -> p2): `|p1p0| * cos(phi)`,
/// computed through the dot product so coincident points project to 0
/// instead of a 0/0 angle.
///
/// Negative values or values beyond the segment length signal "off the ray"
/// to the caller. A degenerate (zero-length) segment projects everything
/// to 0.
pub fn projection_proximity(p1: Vec2, p2: Vec2, p0: Vec2) -> f64 {
    let p1p0 = p0.sub(p1);
    let p1p2 = p2.sub(p1);
    let length = p1p2.length();
    if length == 0.0 {
        return 0.0;
    }
    p1p0.dot(p1p2) / length
}

/// Euclidean distance between two points.
pub fn distance(p1: Vec2, p2: Vec2) -> f64 {
    p1.distance_to(p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_intersect_at_midpoints() {
        // Two segments crossing exactly at their midpoints.
        let result = line_intersect(
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
        );
        assert_eq!(result, Some(0.5), "midpoint crossing should be at 0.5");

        let mirrored = line_intersect(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        );
        assert_eq!(mirrored, Some(0.5));
    }

    #[test]
    fn test_line_intersect_parallel_is_none() {
        let result = line_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        );
        assert_eq!(result, None, "parallel segments never intersect");
    }

    #[test]
    fn test_line_intersect_origin_on_segment_is_excluded() {
        // Parameter 0 is outside the (0, 1] acceptance window.
        let result = line_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
        );
        assert_eq!(result, None, "a ray origin on the wall must not self-intersect");
    }

    #[test]
    fn test_line_intersect_hit_at_full_range_counts() {
        let result = line_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-5.0, 10.0),
            Vec2::new(5.0, 10.0),
        );
        assert_eq!(result, Some(1.0), "a hit exactly at full range counts");
    }

    #[test]
    fn test_orthogonal_distance() {
        let d = line_point_orthogonal_distance(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 3.0),
        );
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_proximity_along_ray() {
        // Point 4 to the right of a ray along +x projects at 4.
        let p = projection_proximity(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(4.0, 2.0),
        );
        assert!((p - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_proximity_of_coincident_point_is_zero() {
        // The ray origin itself must project to 0, not NaN.
        let p = projection_proximity(
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 96.0),
            Vec2::new(1.0, 1.0),
        );
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_projection_proximity_behind_ray_is_negative() {
        let p = projection_proximity(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(-4.0, 0.0),
        );
        assert!(p < 0.0, "points behind the ray origin project negatively");
    }

    #[test]
    fn test_rotate_clockwise() {
        let v = Vec2::new(1.0, 0.0).rotate(std::f64::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_zero_vector_stays_zero() {
        let mut v = Vec2::ZERO;
        v.normalize();
        assert_eq!(v, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_orthogonal_distance_is_non_negative(
            x1 in -1e3..1e3f64, y1 in -1e3..1e3f64,
            x0 in -1e3..1e3f64, y0 in -1e3..1e3f64,
        ) {
            // Any non-degenerate horizontal segment vs. any point.
            let d = line_point_orthogonal_distance(
                Vec2::new(x1, y1),
                Vec2::new(x1 + 10.0, y1),
                Vec2::new(x0, y0),
            );
            prop_assert!(d >= 0.0);
            prop_assert!((d - (y0 - y1).abs()) < 1e-6);
        }

        #[test]
        fn prop_rotation_preserves_length(
            x in -1e3..1e3f64, y in -1e3..1e3f64, angle in -10.0..10.0f64,
        ) {
            let v = Vec2::new(x, y);
            let rotated = v.rotate(angle);
            prop_assert!((v.length() - rotated.length()).abs() < 1e-6);
        }

        #[test]
        fn prop_projection_is_finite(
            x0 in -1e3..1e3f64, y0 in -1e3..1e3f64,
        ) {
            let p = projection_proximity(
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 95.0),
                Vec2::new(x0, y0),
            );
            prop_assert!(p.is_finite());
        }

        #[test]
        fn prop_intersection_parameter_in_unit_interval(
            x in -100.0..100.0f64, y in 1.0..100.0f64,
        ) {
            // Vertical probe through a horizontal segment at y.
            let hit = line_intersect(
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 200.0),
                Vec2::new(-200.0 + x, y),
                Vec2::new(200.0 + x, y),
            );
            if let Some(t) = hit {
                prop_assert!(t > 0.0 && t <= 1.0);
            }
        }
    }
}
