//! Axis-aligned bounding box type.
//!
//! The travel planner keeps one box per boundary polygon so segment queries
//! can skip polygons that are nowhere near the move.

use super::Point;
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D axis-aligned bounding box with scaled integer coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
    defined: bool,
}

impl BoundingBox {
    /// Create a new empty (undefined) bounding box.
    #[inline]
    pub fn new() -> Self {
        Self {
            min: Point::new(Coord::MAX, Coord::MAX),
            max: Point::new(Coord::MIN, Coord::MIN),
            defined: false,
        }
    }

    /// Create a bounding box from min and max points.
    #[inline]
    pub fn from_points_minmax(min: Point, max: Point) -> Self {
        Self {
            min,
            max,
            defined: true,
        }
    }

    /// Create a bounding box from a slice of points.
    pub fn from_points(points: &[Point]) -> Self {
        let mut bb = Self::new();
        for p in points {
            bb.merge_point(*p);
        }
        bb
    }

    /// Check if the bounding box is defined (has been merged with at least one point).
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.defined
    }

    /// Check if the bounding box is empty (not defined).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.defined
    }

    /// Merge a point into the bounding box.
    pub fn merge_point(&mut self, p: Point) {
        if self.defined {
            self.min.x = self.min.x.min(p.x);
            self.min.y = self.min.y.min(p.y);
            self.max.x = self.max.x.max(p.x);
            self.max.y = self.max.y.max(p.y);
        } else {
            self.min = p;
            self.max = p;
            self.defined = true;
        }
    }

    /// Check if this bounding box intersects another bounding box.
    /// Boxes that only share an edge or a corner intersect.
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.defined
            && other.defined
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defined {
            write!(f, "BoundingBox({:?} - {:?})", self.min, self.max)
        } else {
            write!(f, "BoundingBox(undefined)")
        }
    }
}
