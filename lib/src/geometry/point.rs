//! Point type for 2D planar geometry.
//!
//! Points use scaled integer coordinates so every orientation predicate the
//! planner relies on is computed exactly.

use crate::{scale, unscale, Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D point with scaled integer coordinates.
///
/// 1 unit = 1 nanometer (see [`crate::SCALING_FACTOR`]).
///
/// # Example
/// ```
/// use comb::geometry::Point;
/// use comb::scale;
///
/// // Create a point at (1mm, 2mm)
/// let p = Point::new(scale(1.0), scale(2.0));
/// assert_eq!(p, Point::new_scale(1.0, 2.0));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

/// Which side of a directed line a point lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Counter-clockwise of the line direction.
    Left,
    /// Clockwise of the line direction.
    Right,
    /// Exactly on the (infinite) line.
    On,
}

impl Side {
    /// Signed value of the side: +1 left, -1 right, 0 on the line.
    #[inline]
    pub fn signum(self) -> i32 {
        match self {
            Side::Left => 1,
            Side::Right => -1,
            Side::On => 0,
        }
    }

    /// True when `self` and `other` are strictly on opposite sides.
    #[inline]
    pub fn is_opposite(self, other: Side) -> bool {
        self.signum() * other.signum() < 0
    }
}

impl Point {
    /// Create a new point with the given coordinates.
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a new point from floating-point coordinates (in mm), scaling them.
    #[inline]
    pub fn new_scale(x: CoordF, y: CoordF) -> Self {
        Self {
            x: scale(x),
            y: scale(y),
        }
    }

    /// Create a point at the origin (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Calculate the squared distance to another point.
    /// Returns i128 to avoid overflow with large coordinates.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> i128 {
        let dx = other.x as i128 - self.x as i128;
        let dy = other.y as i128 - self.y as i128;
        dx * dx + dy * dy
    }

    /// Calculate the distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> CoordF {
        (self.distance_squared(other) as CoordF).sqrt()
    }

    /// Calculate the squared length (magnitude) of this point as a vector.
    #[inline]
    pub fn length_squared(&self) -> i128 {
        (self.x as i128) * (self.x as i128) + (self.y as i128) * (self.y as i128)
    }

    /// Calculate the length (magnitude) of this point as a vector.
    #[inline]
    pub fn length(&self) -> CoordF {
        (self.length_squared() as CoordF).sqrt()
    }

    /// Rotate 90 degrees counter-clockwise.
    #[inline]
    pub const fn perpendicular_left(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Rotate 90 degrees clockwise.
    #[inline]
    pub const fn perpendicular_right(&self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// This vector rescaled to the given length, rounded to the grid.
    ///
    /// A zero vector has no direction and stays zero.
    pub fn normal(&self, length: Coord) -> Self {
        let current = self.length();
        if current == 0.0 {
            return Self::zero();
        }
        let factor = length as CoordF / current;
        Self {
            x: (self.x as CoordF * factor).round() as Coord,
            y: (self.y as CoordF * factor).round() as Coord,
        }
    }

    /// Calculate the cross product with another point (2D pseudo-cross product).
    /// Returns a positive value if other is counter-clockwise from self.
    #[inline]
    pub fn cross(&self, other: &Point) -> i128 {
        (self.x as i128) * (other.y as i128) - (self.y as i128) * (other.x as i128)
    }

    /// Calculate the dot product with another point.
    #[inline]
    pub fn dot(&self, other: &Point) -> i128 {
        (self.x as i128) * (other.x as i128) + (self.y as i128) * (other.y as i128)
    }

    /// Twice the signed area of the triangle (a, b, self).
    /// Positive if self is left of the directed line a->b.
    #[inline]
    pub fn orient(&self, a: &Point, b: &Point) -> i128 {
        let ab_x = b.x as i128 - a.x as i128;
        let ab_y = b.y as i128 - a.y as i128;
        let ap_x = self.x as i128 - a.x as i128;
        let ap_y = self.y as i128 - a.y as i128;
        ab_x * ap_y - ab_y * ap_x
    }

    /// Classify this point against the directed line through `a` and `b`.
    #[inline]
    pub fn side_of_line(&self, a: &Point, b: &Point) -> Side {
        match self.orient(a, b).signum() {
            1 => Side::Left,
            -1 => Side::Right,
            _ => Side::On,
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", unscale(self.x), unscale(self.y))
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<Coord> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: Coord) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<CoordF> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: CoordF) -> Self {
        Self {
            x: (self.x as CoordF * scalar).round() as Coord,
            y: (self.y as CoordF * scalar).round() as Coord,
        }
    }
}

impl Div<Coord> for Point {
    type Output = Self;

    #[inline]
    fn div(self, scalar: Coord) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (Coord, Coord) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SCALING_FACTOR;

    #[test]
    fn test_point_new_scale() {
        let p = Point::new_scale(1.0, 2.0);
        assert_eq!(p.x, SCALING_FACTOR as Coord);
        assert_eq!(p.y, 2 * SCALING_FACTOR as Coord);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0, 0);
        let p2 = Point::new(3_000_000, 4_000_000); // 3mm, 4mm
        let dist = p1.distance(&p2);
        assert!((dist - 5_000_000.0).abs() < 1.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(10, 20);
        let p2 = Point::new(3, 4);

        assert_eq!(p1 + p2, Point::new(13, 24));
        assert_eq!(p1 - p2, Point::new(7, 16));
        assert_eq!(-p1, Point::new(-10, -20));
        assert_eq!(p2 * 3, Point::new(9, 12));
        assert_eq!(p1 / 10, Point::new(1, 2));
    }

    #[test]
    fn test_point_perpendicular() {
        let p = Point::new(1, 0);
        assert_eq!(p.perpendicular_left(), Point::new(0, 1));
        assert_eq!(p.perpendicular_right(), Point::new(0, -1));
        assert_eq!(p.perpendicular_left().perpendicular_right(), p);
    }

    #[test]
    fn test_point_normal() {
        let v = Point::new(3, 4);
        assert_eq!(v.normal(1000), Point::new(600, 800));
        assert_eq!(Point::new(0, -7).normal(1000), Point::new(0, -1000));
        assert_eq!(Point::zero().normal(1000), Point::zero());
    }

    #[test]
    fn test_point_cross_dot() {
        let v1 = Point::new(1, 0);
        let v2 = Point::new(0, 1);
        assert_eq!(v1.cross(&v2), 1);
        assert_eq!(v2.cross(&v1), -1);
        assert_eq!(Point::new(3, 4).dot(&Point::new(2, 5)), 3 * 2 + 4 * 5);
    }

    #[test]
    fn test_side_of_line() {
        let a = Point::new(0, 0);
        let b = Point::new(100, 0);
        assert_eq!(Point::new(50, 10).side_of_line(&a, &b), Side::Left);
        assert_eq!(Point::new(50, -10).side_of_line(&a, &b), Side::Right);
        assert_eq!(Point::new(500, 0).side_of_line(&a, &b), Side::On);
        assert!(Side::Left.is_opposite(Side::Right));
        assert!(!Side::Left.is_opposite(Side::On));
    }

    #[test]
    fn test_side_of_line_large_coordinates() {
        // Products exceed i64; orient must not overflow.
        let a = Point::new(-4_000_000_000_000, -4_000_000_000_000);
        let b = Point::new(4_000_000_000_000, 4_000_000_000_001);
        let p = Point::new(0, 1);
        assert_eq!(p.side_of_line(&a, &b), Side::Left);
    }
}
