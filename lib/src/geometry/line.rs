//! Line segment type.

use super::{BoundingBox, Point, Side};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed line segment from `a` to `b`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    /// Create a new line segment.
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Direction vector `b - a`.
    #[inline]
    pub fn vector(&self) -> Point {
        self.b - self.a
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> CoordF {
        self.a.distance(&self.b)
    }

    /// Check if the segment has zero length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&[self.a, self.b])
    }

    /// Check if `p` lies exactly on this segment (endpoints included).
    pub fn contains_point(&self, p: &Point) -> bool {
        p.orient(&self.a, &self.b) == 0 && self.within_extent(p)
    }

    /// Check if a point known to be collinear with the segment lies within its extent.
    #[inline]
    fn within_extent(&self, p: &Point) -> bool {
        p.x >= self.a.x.min(self.b.x)
            && p.x <= self.a.x.max(self.b.x)
            && p.y >= self.a.y.min(self.b.y)
            && p.y <= self.a.y.max(self.b.y)
    }

    /// Check if two segments share at least one point.
    ///
    /// Proper crossings, an endpoint resting on the other segment and
    /// collinear overlap all count. Computed exactly.
    pub fn touches(&self, other: &Line) -> bool {
        let s1 = other.a.side_of_line(&self.a, &self.b);
        let s2 = other.b.side_of_line(&self.a, &self.b);
        let s3 = self.a.side_of_line(&other.a, &other.b);
        let s4 = self.b.side_of_line(&other.a, &other.b);

        if s1.is_opposite(s2) && s3.is_opposite(s4) {
            return true;
        }

        (s1 == Side::On && self.within_extent(&other.a))
            || (s2 == Side::On && self.within_extent(&other.b))
            || (s3 == Side::On && other.within_extent(&self.a))
            || (s4 == Side::On && other.within_extent(&self.b))
    }

    /// Parameter `t` in `[0, 1]` along this segment of the first point it
    /// shares with `other`, or `None` if they do not touch.
    pub fn intersection_param(&self, other: &Line) -> Option<CoordF> {
        if !self.touches(other) {
            return None;
        }

        let r = self.vector();
        let len_sq = r.length_squared();
        if len_sq == 0 {
            return Some(0.0);
        }

        let s = other.vector();
        let denom = r.cross(&s);
        if denom != 0 {
            let t = (other.a - self.a).cross(&s) as CoordF / denom as CoordF;
            return Some(t.clamp(0.0, 1.0));
        }

        // Collinear overlap: first shared point along self.
        let t_a = (other.a - self.a).dot(&r) as CoordF / len_sq as CoordF;
        let t_b = (other.b - self.a).dot(&r) as CoordF / len_sq as CoordF;
        Some(t_a.min(t_b).clamp(0.0, 1.0))
    }

    /// Point at parameter `t` along the segment, rounded to the grid.
    #[inline]
    pub fn point_at(&self, t: CoordF) -> Point {
        let r = self.vector();
        Point::new(
            self.a.x + (r.x as CoordF * t).round() as Coord,
            self.a.y + (r.y as CoordF * t).round() as Coord,
        )
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?} -> {:?})", self.a, self.b)
    }
}
