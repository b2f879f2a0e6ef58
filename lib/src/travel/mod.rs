//! Travel path planning module.
//!
//! This module provides the AvoidCrossingPerimeters planner, which routes
//! travel moves around perimeter walls instead of through them.
//!
//! # Overview
//!
//! When the print head travels from one point to another without extruding,
//! crossing already-printed perimeter walls can leave visible marks on the
//! surface. The planner keeps each travel move inside the region bounded by
//! the layer's perimeter polygons.
//!
//! # Algorithm
//!
//! 1. Pull an endpoint lying outside the region onto its boundary
//! 2. Find where the direct move meets boundary edges
//! 3. For each polygon entered and left again, walk the shorter way around it
//! 4. Simplify the resulting path to remove unnecessary points
//!
//! # Example
//!
//! ```rust
//! use comb::geometry::{Point, Polygon};
//! use comb::travel::AvoidCrossingPerimeters;
//!
//! let outer = Polygon::rectangle(Point::new(0, 0), Point::new(100_000, 100_000));
//! let hole = Polygon::rectangle(Point::new(40_000, 40_000), Point::new(60_000, 60_000)).reversed();
//! let boundary = vec![outer, hole];
//! let planner = AvoidCrossingPerimeters::with_defaults(&boundary);
//!
//! let plan = planner
//!     .plan_path(Point::new(10_000, 50_000), Point::new(90_000, 50_000))
//!     .unwrap();
//! assert_eq!(plan.crossings, 2);
//! assert_eq!(plan.waypoints.len(), 3); // two hole corners, then the end
//! ```

mod boundary;
mod crossing;
mod projection;
mod simplify;

pub use crossing::Crossing;
pub use projection::Projection;

use crate::config::{ConfigResult, TravelConfig};
use crate::geometry::{Point, Polygon};
use crate::CoordF;
use boundary::Boundary;
use simplify::simplify_path;

/// Reason a travel move could not be routed inside the boundary.
///
/// The caller should fall back to a move that does not need to stay inside,
/// typically by retracting first.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TravelError {
    #[error("start point {point:?} cannot be moved inside the boundary")]
    StartUnreachable { point: Point },

    #[error("end point {point:?} cannot be moved inside the boundary")]
    EndUnreachable { point: Point },

    #[error("detour of {detour:.0} exceeds the limit for a direct distance of {direct:.0}")]
    DetourTooLong { direct: CoordF, detour: CoordF },

    #[error("route segment {from:?} -> {to:?} leaves the boundary")]
    RouteBlocked { from: Point, to: Point },
}

/// Result of travel planning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TravelPlan {
    /// Points to travel through after the current position, in order.
    /// Empty when the direct move already stays inside.
    pub waypoints: Vec<Point>,
    /// Number of boundary crossings on the direct move between the
    /// (possibly moved) endpoints. An endpoint resting on an edge counts
    /// when the move leaves it through the outside of the region.
    pub crossings: usize,
    /// Whether the start point had to be moved inside.
    pub start_moved: bool,
    /// Whether the end point had to be moved inside.
    pub end_moved: bool,
}

impl TravelPlan {
    /// Check if the direct move can be used as is.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Length of the planned path starting at `from`.
    pub fn length_from(&self, from: Point) -> CoordF {
        let mut length = 0.0;
        let mut prev = from;
        for p in &self.waypoints {
            length += prev.distance(p);
            prev = *p;
        }
        length
    }
}

/// Avoid Crossing Perimeters travel planner.
///
/// Built once per layer from that layer's perimeter polygons, then queried
/// once per travel move. The polygons are borrowed for the planner's
/// lifetime; when they change, build a new planner. Queries take `&self`,
/// so one planner may serve several threads at once.
#[derive(Clone, Debug)]
pub struct AvoidCrossingPerimeters<'a> {
    /// Configuration.
    config: TravelConfig,
    /// Boundary polygons with their cached lengths and bounding boxes.
    boundary: Boundary<'a>,
}

impl<'a> AvoidCrossingPerimeters<'a> {
    /// Create a new planner over `polygons`.
    ///
    /// Outer contours should run counter-clockwise and holes clockwise when
    /// the fill rule is [`FillRule::NonZero`](crate::config::FillRule::NonZero).
    pub fn new(polygons: &'a [Polygon], config: TravelConfig) -> ConfigResult<Self> {
        config.validate()?;
        let boundary = Boundary::new(polygons, &config);
        tracing::trace!(
            polygons = polygons.len(),
            fill_rule = ?config.fill_rule,
            "travel planner built"
        );
        Ok(Self { config, boundary })
    }

    /// Create with default configuration.
    pub fn with_defaults(polygons: &'a [Polygon]) -> Self {
        let config = TravelConfig::default();
        Self {
            boundary: Boundary::new(polygons, &config),
            config,
        }
    }

    pub fn config(&self) -> &TravelConfig {
        &self.config
    }

    /// The boundary polygons this planner was built over.
    pub fn boundary_polygons(&self) -> &'a [Polygon] {
        self.boundary.polygons()
    }

    pub fn polygon_count(&self) -> usize {
        self.boundary.polygons().len()
    }

    /// Total number of boundary edges, closing edges included.
    pub fn edge_count(&self) -> usize {
        self.boundary.polygons().iter().map(Polygon::len).sum()
    }

    /// Check if there is no boundary geometry at all.
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// Check if `point` lies inside the allowed region.
    /// Points exactly on a boundary edge count as inside.
    pub fn point_is_inside_boundary(&self, point: &Point) -> bool {
        self.boundary.point_is_inside(point)
    }

    /// Move `point` inside the boundary if it is not already.
    pub fn move_point_inside_boundary(&self, point: Point) -> Projection {
        projection::move_point_inside(
            &self.boundary,
            point,
            self.config.max_perturbation_depth,
            self.config.reliable_depth,
        )
    }

    /// Check if the segment `a`-`b` intersects, touches or ends on any
    /// boundary edge.
    pub fn does_line_cross_boundary(&self, a: &Point, b: &Point) -> bool {
        self.boundary.does_line_cross(a, b)
    }

    /// Every crossing of the segment `start`-`end` with a boundary edge,
    /// ordered from `start` to `end`.
    pub fn find_crossing_points(&self, start: Point, end: Point) -> Vec<Crossing> {
        crossing::find_crossing_points(&self.boundary, start, end)
    }

    /// Plan a travel move from `start` to `end` that stays inside the boundary.
    pub fn plan_path(&self, start: Point, end: Point) -> Result<TravelPlan, TravelError> {
        let mut plan = TravelPlan::default();

        let start_projection = self.move_point_inside_boundary(start);
        if start_projection.is_failed() {
            tracing::debug!(start = ?start, projection = ?start_projection, "start unreachable");
            return Err(TravelError::StartUnreachable { point: start });
        }
        let from = start_projection.position_or(start);
        plan.start_moved = start_projection.is_moved();
        if plan.start_moved {
            plan.waypoints.push(from);
        }

        let end_projection = self.move_point_inside_boundary(end);
        if end_projection.is_failed() {
            tracing::debug!(end = ?end, projection = ?end_projection, "end unreachable");
            return Err(TravelError::EndUnreachable { point: end });
        }
        let to = end_projection.position_or(end);
        plan.end_moved = end_projection.is_moved();

        let mut crossings = self.find_crossing_points(from, to);
        crossing::add_endpoint_crossings(&self.boundary, from, to, &mut crossings);
        plan.crossings = crossings.len();

        if crossings.is_empty() && !plan.start_moved && !plan.end_moved {
            tracing::trace!(start = ?start, end = ?end, "direct travel");
            return Ok(plan);
        }

        let mut route = crossing::route_around_crossings(
            &self.boundary,
            from,
            to,
            &crossings,
            self.config.waypoint_clearance,
        );
        let raw_len = route.len();
        simplify_path(&mut route, |a, b| self.boundary.does_line_cross(a, b));

        if let Some(w) = route
            .windows(2)
            .find(|w| !crossing::segment_stays_inside(&self.boundary, w[0], w[1]))
        {
            tracing::debug!(from = ?w[0], to = ?w[1], "route leaves the boundary");
            return Err(TravelError::RouteBlocked { from: w[0], to: w[1] });
        }

        // The route starts at `from`, which is either the current position or
        // already pushed above.
        plan.waypoints.extend(route.into_iter().skip(1));

        if let Some(factor) = self.config.max_detour_factor {
            let direct = start.distance(&end);
            let detour = plan.length_from(start);
            if direct > 0.0 && detour > direct * factor {
                tracing::debug!(direct, detour, factor, "detour too long");
                return Err(TravelError::DetourTooLong { direct, detour });
            }
        }

        tracing::trace!(
            start = ?start,
            end = ?end,
            crossings = plan.crossings,
            raw_points = raw_len,
            waypoints = plan.waypoints.len(),
            "travel routed"
        );
        Ok(plan)
    }

    /// Append a path from `start` to `end` that stays inside the boundary to
    /// `path`.
    ///
    /// Returns `true` when a path was produced, including the case where the
    /// direct move already stays inside and nothing is appended. Returns
    /// `false`, appending nothing, when routing is impossible; the caller
    /// should then fall back to a retracted direct move.
    pub fn create_path_inside_boundary(&self, start: Point, end: Point, path: &mut Vec<Point>) -> bool {
        match self.plan_path(start, end) {
            Ok(plan) => {
                path.extend(plan.waypoints);
                true
            }
            Err(_) => false,
        }
    }
}
