//! Planar geometry helpers
//!
//! Convex hull (Andrew's monotone chain) and centroid over 2D points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in the layout plane
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// Errors raised by hull computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HullError {
    #[error("Degenerate hull: {points} point(s) do not span an area")]
    DegenerateHull { points: usize },
}

pub type HullResult<T> = Result<T, HullError>;

/// Z component of (a - o) x (b - o)
fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull of a point set, counter-clockwise, starting at the lowest-x point.
///
/// Fails with `DegenerateHull` when fewer than three distinct points remain or
/// all points are collinear.
pub fn convex_hull(points: &[Point]) -> HullResult<Vec<Point>> {
    let mut sorted: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return Err(HullError::DegenerateHull { points: points.len() });
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }

    // Last point of each chain is the first point of the other
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(HullError::DegenerateHull { points: points.len() });
    }

    Ok(lower)
}

/// Arithmetic mean of the points, `None` for an empty slice
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    fn is_counter_clockwise(hull: &[Point]) -> bool {
        let n = hull.len();
        (0..n).all(|i| cross(&hull[i], &hull[(i + 1) % n], &hull[(i + 2) % n]) > 0.0)
    }

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.5)]);
        let hull = convex_hull(&points).unwrap();

        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(0.5, 0.5)));
        assert!(is_counter_clockwise(&hull));
        assert_eq!(hull[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_hull_triangle() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]);
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.len(), 3);
        assert!(is_counter_clockwise(&hull));
        assert_eq!(hull[1], Point::new(2.0, 0.0));
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(
            convex_hull(&points),
            Err(HullError::DegenerateHull { points: 3 })
        );
    }

    #[test]
    fn test_duplicate_points_are_degenerate() {
        let points = pts(&[(0.3, 0.3), (0.3, 0.3), (1.0, 0.0)]);
        assert!(convex_hull(&points).is_err());
    }

    #[test]
    fn test_centroid() {
        assert_eq!(centroid(&[]), None);
        let c = centroid(&pts(&[(0.0, 0.0), (2.0, 4.0)])).unwrap();
        assert_eq!(c, Point::new(1.0, 2.0));
    }
}
