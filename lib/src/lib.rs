//! # Comb
//!
//! Travel path planning for a print head that must stay inside the region
//! bounded by already-printed perimeters.
//!
//! Given a start and an end point and the perimeter polygons of a layer, the
//! planner:
//! - pulls an endpoint that lies outside the allowed region onto its boundary
//! - routes around every boundary polygon the direct move would cross
//! - shortens the resulting detour to the waypoints that are actually needed
//!
//! ## Example
//!
//! ```rust
//! use comb::geometry::{Point, Polygon};
//! use comb::travel::AvoidCrossingPerimeters;
//!
//! let boundary = vec![Polygon::rectangle(
//!     Point::new_scale(0.0, 0.0),
//!     Point::new_scale(10.0, 10.0),
//! )];
//! let planner = AvoidCrossingPerimeters::with_defaults(&boundary);
//!
//! let mut path = Vec::new();
//! let ok = planner.create_path_inside_boundary(
//!     Point::new_scale(1.0, 1.0),
//!     Point::new_scale(9.0, 9.0),
//!     &mut path,
//! );
//! assert!(ok);
//! assert!(path.is_empty()); // the direct move never leaves the square
//! ```

pub mod config;
pub mod geometry;
pub mod travel;

pub use config::{ConfigError, FillRule, TravelConfig};
pub use geometry::{BoundingBox, Line, Point, Polygon, Polygons, Side};
pub use travel::{AvoidCrossingPerimeters, Projection, TravelError, TravelPlan};

/// Coordinate type used throughout the planner.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to keep predicates exact.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 nanometer, so 1mm = 1_000_000 units.
pub const SCALING_FACTOR: f64 = 1_000_000.0;

/// Scale a floating-point coordinate (mm) to integer units.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point (mm).
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for planner operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Travel error: {0}")]
    Travel(#[from] TravelError),
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
