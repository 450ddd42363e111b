use serde::{Deserialize, Serialize};

/// Angle between the arrow shaft and each arrowhead stroke, in radians.
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// A 2D point in rink coordinates (origin top-left, x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Scales each axis independently. Used to map reference-space drill
    /// coordinates onto a rink of a different size.
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Returns true when every point in the slice has finite coordinates.
pub fn all_finite(points: &[Point]) -> bool {
    points.iter().all(Point::is_finite)
}

/// Endpoints of the two arrowhead strokes for a shaft from `start` to `end`.
///
/// Each stroke runs from `end` back toward the shaft at ±30°, with length
/// `head_size`. Returns `None` for a zero-length or non-finite shaft, which
/// has no direction to point the head along.
pub fn arrow_head_points(start: Point, end: Point, head_size: f64) -> Option<(Point, Point)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let angle = dy.atan2(dx);
    let left = Point::new(
        end.x - head_size * (angle - ARROW_HEAD_ANGLE).cos(),
        end.y - head_size * (angle - ARROW_HEAD_ANGLE).sin(),
    );
    let right = Point::new(
        end.x - head_size * (angle + ARROW_HEAD_ANGLE).cos(),
        end.y - head_size * (angle + ARROW_HEAD_ANGLE).sin(),
    );
    Some((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point_scale() {
        let p = Point::new(200.0, 100.0).scale(2.0, 0.5);
        assert!((p.x - 400.0).abs() < 1e-10);
        assert!((p.y - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_arrow_head_symmetry() {
        let end = Point::new(10.0, 0.0);
        let (left, right) = arrow_head_points(Point::new(0.0, 0.0), end, 8.0).unwrap();
        assert!((left.x - right.x).abs() < 1e-10);
        assert!((left.y + right.y).abs() < 1e-10);
        assert!((left.distance_to(&end) - 8.0).abs() < 1e-10);
        assert!((right.distance_to(&end) - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_arrow_head_zero_length() {
        let p = Point::new(5.0, 5.0);
        assert!(arrow_head_points(p, p, 8.0).is_none());
    }

    #[test]
    fn test_all_finite_rejects_nan() {
        let pts = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(!all_finite(&pts));
    }
}
