//! Pulling points that lie outside the boundary back onto it.
//!
//! The nearest boundary location is found by scanning every edge. Rounding to
//! the integer grid can leave that location just outside the region at thin
//! features and corners, so it is nudged along the winning edge's normal with
//! a step that doubles each round and flips direction every round, plus a
//! half-size sideways jitter whose sign repeats every third round. The
//! pattern is fixed, so projections are reproducible.

use super::boundary::Boundary;
use crate::geometry::Point;
use crate::{Coord, CoordF};

/// Length the edge normals are scaled to before use.
const NORMAL_LENGTH: Coord = 1_000;

/// Outcome of moving a point inside the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// The point was already inside; nothing moved.
    Unchanged,
    /// The point was moved to `position`, which tests inside.
    /// `depth` is the number of perturbation rounds it took.
    Moved { position: Point, depth: u32 },
    /// No trustworthy position was found. `best` is the last candidate,
    /// which may still be outside (or may be inside but found too deep to trust).
    Failed { best: Point, depth: u32 },
}

impl Projection {
    /// True if the point was moved to a trusted position.
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, Projection::Moved { .. })
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, Projection::Failed { .. })
    }

    /// The position to use: `original` when unchanged, otherwise the
    /// moved or best-effort position.
    #[inline]
    pub fn position_or(&self, original: Point) -> Point {
        match *self {
            Projection::Unchanged => original,
            Projection::Moved { position, .. } => position,
            Projection::Failed { best, .. } => best,
        }
    }

    /// Perturbation rounds used, `None` when nothing had to move.
    #[inline]
    pub fn depth(&self) -> Option<u32> {
        match *self {
            Projection::Unchanged => None,
            Projection::Moved { depth, .. } | Projection::Failed { depth, .. } => Some(depth),
        }
    }
}

/// Nearest location on the boundary together with the normal of the edge it
/// was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NearestBoundary {
    pub position: Point,
    /// Left perpendicular of the winning edge, `NORMAL_LENGTH` long.
    /// Points into the region for counter-clockwise contours and clockwise holes.
    pub normal: Point,
}

/// Scan every edge of every polygon with at least 3 points for the boundary
/// location closest to `p`.
///
/// The foot of the perpendicular wins when it falls strictly inside an edge's
/// span; otherwise the edge's start vertex stands in. Returns `None` when the
/// boundary has no closed polygons.
pub(crate) fn nearest_boundary_point(boundary: &Boundary<'_>, p: &Point) -> Option<NearestBoundary> {
    let mut best: Option<NearestBoundary> = None;
    let mut best_dist = CoordF::MAX;

    for poly in boundary.polygons().iter().filter(|poly| poly.is_closed_region()) {
        for edge in poly.edges() {
            let segment = edge.vector();
            let normal = segment.perpendicular_left().normal(NORMAL_LENGTH);

            let dist_from_start = p.distance(&edge.a);
            if dist_from_start < best_dist {
                best_dist = dist_from_start;
                best = Some(NearestBoundary {
                    position: edge.a,
                    normal,
                });
            }

            let len_sq = segment.length_squared();
            if len_sq == 0 {
                continue;
            }

            let rel = *p - edge.a;
            let along = rel.dot(&segment);
            if along <= 0 || along >= len_sq {
                continue;
            }

            let dist_to_line = (segment.cross(&rel) as CoordF).abs() / (len_sq as CoordF).sqrt();
            if dist_to_line < best_dist {
                best_dist = dist_to_line;
                best = Some(NearestBoundary {
                    position: edge.point_at(along as CoordF / len_sq as CoordF),
                    normal,
                });
            }
        }
    }

    best
}

/// Offset applied to a candidate after perturbation round `depth`.
///
/// The step along `normal` is `2^depth` units, positive on even rounds and
/// negative on odd ones. A sideways jitter of half that size follows the edge
/// direction, positive when `depth` is a multiple of 3 and negative otherwise.
pub(crate) fn perturbation(depth: u32, normal: Point) -> Point {
    let normal_len = normal.length();
    if normal_len == 0.0 {
        return Point::zero();
    }

    let step = 2f64.powi(depth as i32);
    let normal_sign = if depth % 2 == 0 { 1.0 } else { -1.0 };
    let jitter_sign = if depth % 3 == 0 { 1.0 } else { -1.0 };

    let along = normal_sign * step / normal_len;
    let sideways = normal.perpendicular_right();
    let across = jitter_sign * step / (2.0 * normal_len);

    Point::new(
        (normal.x as CoordF * along + sideways.x as CoordF * across).round() as Coord,
        (normal.y as CoordF * along + sideways.y as CoordF * across).round() as Coord,
    )
}

/// Move `point` inside the boundary, or report why it could not be.
///
/// At most `max_depth` perturbation rounds are tried; a position that only
/// turns up after more than `reliable_depth` rounds is reported as
/// [`Projection::Failed`] with that position as `best`.
pub(crate) fn move_point_inside(
    boundary: &Boundary<'_>,
    point: Point,
    max_depth: u32,
    reliable_depth: u32,
) -> Projection {
    if boundary.point_is_inside(&point) {
        return Projection::Unchanged;
    }

    let settle = |position: Point, depth: u32| {
        if depth > reliable_depth {
            tracing::debug!(point = ?point, position = ?position, depth, "projection too deep to trust");
            Projection::Failed {
                best: position,
                depth,
            }
        } else {
            Projection::Moved { position, depth }
        }
    };

    let mut candidate = point;
    let mut depth = 0;
    loop {
        let Some(nearest) = nearest_boundary_point(boundary, &candidate) else {
            tracing::debug!(point = ?point, "no closed boundary polygon to project onto");
            return Projection::Failed {
                best: candidate,
                depth,
            };
        };

        if boundary.point_is_inside(&nearest.position) {
            return settle(nearest.position, depth);
        }

        if depth >= max_depth || nearest.normal.is_zero() {
            tracing::debug!(point = ?point, best = ?nearest.position, depth, "projection did not converge");
            return Projection::Failed {
                best: nearest.position,
                depth,
            };
        }

        candidate = nearest.position + perturbation(depth, nearest.normal);
        depth += 1;

        if boundary.point_is_inside(&candidate) {
            return settle(candidate, depth);
        }
    }
}
