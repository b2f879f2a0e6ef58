//! Polygon type for closed boundary contours.

use super::{BoundingBox, Line, Point};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, Index};

/// A closed polygon defined by a sequence of points.
///
/// The polygon is implicitly closed - the last point connects back to the first.
/// Points should be ordered counter-clockwise for outer contours (positive area)
/// and clockwise for holes (negative area).
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Get the points of this polygon.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points in the polygon.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polygon is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the polygon.
    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Check if the polygon can enclose a region (at least 3 points).
    #[inline]
    pub fn is_closed_region(&self) -> bool {
        self.points.len() >= 3
    }

    /// Get the line segment at the given index (from point[i] to point[i+1]).
    #[inline]
    pub fn edge(&self, index: usize) -> Line {
        let len = self.points.len();
        Line::new(self.points[index % len], self.points[(index + 1) % len])
    }

    /// Iterate over all edges, including the closing edge back to the first point.
    ///
    /// A single-point polygon yields one degenerate edge; an empty one yields none.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        (0..self.points.len()).map(move |i| self.edge(i))
    }

    /// Calculate the signed area of the polygon.
    /// Positive for counter-clockwise (exterior), negative for clockwise (hole).
    /// Uses the shoelace formula.
    pub fn signed_area(&self) -> CoordF {
        if self.points.len() < 3 {
            return 0.0;
        }

        let mut sum: i128 = 0;
        for edge in self.edges() {
            sum += edge.a.cross(&edge.b);
        }

        sum as CoordF / 2.0
    }

    /// Calculate the unsigned area of the polygon.
    #[inline]
    pub fn area(&self) -> CoordF {
        self.signed_area().abs()
    }

    /// Check if the polygon is counter-clockwise (positive area).
    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Check if the polygon is clockwise (negative area).
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Reverse the order of points in the polygon.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Return a reversed copy of the polygon.
    pub fn reversed(&self) -> Self {
        let mut result = self.clone();
        result.reverse();
        result
    }

    /// Calculate the perimeter (total edge length) of the polygon.
    pub fn perimeter(&self) -> CoordF {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges().map(|edge| edge.length()).sum()
    }

    /// Get the bounding box of the polygon.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Winding number of the polygon around `p`.
    ///
    /// +1 inside a counter-clockwise polygon, -1 inside a clockwise one,
    /// 0 outside. Points on an edge get whatever the half-open rule yields;
    /// check [`Polygon::is_point_on_boundary`] first when that matters.
    pub fn winding_number(&self, p: &Point) -> i32 {
        if self.points.len() < 3 {
            return 0;
        }
        self.edges().map(|edge| ray_crossing(p, &edge)).sum()
    }

    /// Check if a point is inside the polygon using the even-odd rule.
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let crossings = self.edges().filter(|edge| ray_crossing(p, edge) != 0).count();
        crossings % 2 == 1
    }

    /// Check if a point lies exactly on one of the polygon's edges.
    pub fn is_point_on_boundary(&self, p: &Point) -> bool {
        self.edges().any(|edge| edge.contains_point(p))
    }

    /// Create a rectangular polygon (counter-clockwise).
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self::from_points(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ])
    }

    /// Create a square polygon centered at a point (counter-clockwise).
    pub fn square(center: Point, half_size: Coord) -> Self {
        Self::rectangle(
            Point::new(center.x - half_size, center.y - half_size),
            Point::new(center.x + half_size, center.y + half_size),
        )
    }
}

/// Contribution of one edge to the winding number of `p`, using a rightward
/// ray and a half-open rule on y so shared vertices are counted once.
#[inline]
fn ray_crossing(p: &Point, edge: &Line) -> i32 {
    if edge.a.y <= p.y {
        if edge.b.y > p.y && p.orient(&edge.a, &edge.b) > 0 {
            return 1;
        }
    } else if edge.b.y <= p.y && p.orient(&edge.a, &edge.b) < 0 {
        return -1;
    }
    0
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} points)", self.points.len())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

impl Deref for Polygon {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl Index<usize> for Polygon {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.points
    }
}

/// Type alias for a collection of polygons.
pub type Polygons = Vec<Polygon>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_square() -> Polygon {
        Polygon::from_points(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ])
    }

    #[test]
    fn test_polygon_edge_wraps() {
        let poly = make_square();
        let last_edge = poly.edge(3);
        assert_eq!(last_edge.a, Point::new(0, 100));
        assert_eq!(last_edge.b, Point::new(0, 0));
        assert_eq!(poly.edges().count(), 4);
    }

    #[test]
    fn test_polygon_signed_area() {
        let ccw = make_square();
        assert!((ccw.signed_area() - 10000.0).abs() < 1e-9);
        assert!(ccw.is_counter_clockwise());

        let cw = ccw.reversed();
        assert!(cw.signed_area() < 0.0);
        assert!(cw.is_clockwise());
    }

    #[test]
    fn test_polygon_perimeter() {
        assert!((make_square().perimeter() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_winding_number() {
        let poly = make_square();
        assert_eq!(poly.winding_number(&Point::new(50, 50)), 1);
        assert_eq!(poly.reversed().winding_number(&Point::new(50, 50)), -1);
        assert_eq!(poly.winding_number(&Point::new(150, 50)), 0);
        // Level with a vertex: the half-open rule counts it once.
        assert_eq!(poly.winding_number(&Point::new(-10, 0)), 0);
        assert_eq!(poly.winding_number(&Point::new(-10, 100)), 0);
    }

    #[test]
    fn test_polygon_contains_point() {
        let poly = make_square();
        assert!(poly.contains_point(&Point::new(50, 50)));
        assert!(poly.reversed().contains_point(&Point::new(50, 50)));
        assert!(!poly.contains_point(&Point::new(-10, 50)));
        assert!(!poly.contains_point(&Point::new(110, 50)));
        assert!(!poly.contains_point(&Point::new(50, -10)));
        assert!(!poly.contains_point(&Point::new(50, 110)));
    }

    #[test]
    fn test_polygon_is_point_on_boundary() {
        let poly = make_square();
        assert!(poly.is_point_on_boundary(&Point::new(50, 0)));
        assert!(poly.is_point_on_boundary(&Point::new(0, 100)));
        assert!(!poly.is_point_on_boundary(&Point::new(50, 1)));
    }

    #[test]
    fn test_polygon_degenerate() {
        let line = Polygon::from_points(vec![Point::new(0, 0), Point::new(100, 0)]);
        assert!(!line.is_closed_region());
        assert_eq!(line.winding_number(&Point::new(50, 0)), 0);
        assert!(!line.contains_point(&Point::new(50, 0)));
        assert_eq!(Polygon::new().edges().count(), 0);
    }

    #[test]
    fn test_polygon_square() {
        let poly = Polygon::square(Point::new(0, 0), 10);
        assert_eq!(poly[0], Point::new(-10, -10));
        assert_eq!(poly[2], Point::new(10, 10));
        assert!(poly.is_counter_clockwise());
    }
}
