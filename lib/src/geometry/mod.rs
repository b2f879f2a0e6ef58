//! Planar geometry primitives with scaled integer coordinates.

mod bounding_box;
mod line;
mod point;
mod polygon;

pub use bounding_box::BoundingBox;
pub use line::Line;
pub use point::{Point, Side};
pub use polygon::{Polygon, Polygons};
