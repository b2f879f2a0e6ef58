//! Finding where a travel move meets the boundary and routing around it.

use super::boundary::Boundary;
use crate::geometry::{BoundingBox, Line, Point};
use crate::{Coord, CoordF};

/// A point where a travel segment meets a boundary edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Crossing {
    /// Index of the boundary polygon.
    pub contour_idx: usize,
    /// Index of the edge within the polygon (edge i runs from point i to point i+1).
    pub segment_idx: usize,
    /// The intersection point, rounded to the grid.
    pub point: Point,
    /// Parameter along the travel segment, 0 at the start and 1 at the end.
    pub distance: CoordF,
}

/// Direction for walking around a boundary polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Increasing vertex index.
    Forward,
    /// Decreasing vertex index.
    Backward,
}

/// Find every crossing of the segment `start`-`end` with a boundary edge,
/// ordered from `start` to `end`.
///
/// Edges that merely hold `start` or `end` are not reported: an endpoint
/// resting on the boundary is not an obstacle to route around.
pub(crate) fn find_crossing_points(boundary: &Boundary<'_>, start: Point, end: Point) -> Vec<Crossing> {
    let travel = Line::new(start, end);
    let mut crossings = Vec::new();

    for contour_idx in boundary.candidates(travel.bounding_box(), 3) {
        let poly = boundary.polygon(contour_idx);
        for (segment_idx, edge) in poly.edges().enumerate() {
            if edge.contains_point(&start) || edge.contains_point(&end) {
                continue;
            }
            if let Some(distance) = travel.intersection_param(&edge) {
                crossings.push(Crossing {
                    contour_idx,
                    segment_idx,
                    point: travel.point_at(distance),
                    distance,
                });
            }
        }
    }

    // Stable: crossings at the same spot keep polygon/edge order.
    crossings.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    crossings
}

/// First edge of a closed boundary polygon that holds `p`.
fn edge_holding(boundary: &Boundary<'_>, p: &Point) -> Option<(usize, usize)> {
    let query = BoundingBox::from_points_minmax(*p, *p);
    boundary.candidates(query, 3).find_map(|contour_idx| {
        boundary
            .polygon(contour_idx)
            .edges()
            .position(|edge| edge.contains_point(p))
            .map(|segment_idx| (contour_idx, segment_idx))
    })
}

/// Check if the open segment `a`-`b` runs outside the region, judged at
/// its midpoint. Only meaningful when no boundary edge crosses it.
fn runs_outside(boundary: &Boundary<'_>, a: Point, b: Point) -> bool {
    a != b && !boundary.point_is_inside(&Line::new(a, b).point_at(0.5))
}

/// Record `start` and `end` as crossings of the edge they rest on when the
/// move leaves them through the outside of the region.
///
/// [`find_crossing_points`] skips edges holding an endpoint, so a move from
/// a hole's edge straight across the hole would otherwise show only its
/// far crossing and never be paired.
pub(crate) fn add_endpoint_crossings(
    boundary: &Boundary<'_>,
    start: Point,
    end: Point,
    crossings: &mut Vec<Crossing>,
) {
    let first = crossings.first().map_or(end, |c| c.point);
    let last = crossings.last().map_or(start, |c| c.point);

    if let Some((contour_idx, segment_idx)) = edge_holding(boundary, &start) {
        if runs_outside(boundary, start, first) {
            crossings.insert(
                0,
                Crossing {
                    contour_idx,
                    segment_idx,
                    point: start,
                    distance: 0.0,
                },
            );
        }
    }

    if let Some((contour_idx, segment_idx)) = edge_holding(boundary, &end) {
        if runs_outside(boundary, last, end) {
            crossings.push(Crossing {
                contour_idx,
                segment_idx,
                point: end,
                distance: 1.0,
            });
        }
    }
}

/// Check if the segment `a`-`b` stays inside the region, touching the
/// boundary at most.
///
/// The region can only change between consecutive crossings, so each piece
/// between them is judged at its midpoint.
pub(crate) fn segment_stays_inside(boundary: &Boundary<'_>, a: Point, b: Point) -> bool {
    let mut prev = a;
    for crossing in find_crossing_points(boundary, a, b) {
        if runs_outside(boundary, prev, crossing.point) {
            return false;
        }
        prev = crossing.point;
    }
    !runs_outside(boundary, prev, b)
}

/// Get the shorter way around a polygon from `entry` to `exit`.
/// Ties go forward.
pub(crate) fn get_shortest_direction(
    boundary: &Boundary<'_>,
    entry: &Crossing,
    exit: &Crossing,
) -> Direction {
    let poly_idx = entry.contour_idx;
    let total_length = boundary.polygon_length(poly_idx);
    if total_length <= 0.0 {
        return Direction::Forward;
    }

    let from = boundary.distance_along(poly_idx, entry.segment_idx, &entry.point);
    let to = boundary.distance_along(poly_idx, exit.segment_idx, &exit.point);

    let forward_dist = if to >= from {
        to - from
    } else {
        total_length - from + to
    };
    let backward_dist = total_length - forward_dist;

    if forward_dist <= backward_dist {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Vertex indices passed when walking from `entry` to `exit` in `direction`.
pub(crate) fn walk_vertices(
    boundary: &Boundary<'_>,
    entry: &Crossing,
    exit: &Crossing,
    direction: Direction,
) -> Vec<usize> {
    let n = boundary.polygon(entry.contour_idx).len();
    if n == 0 {
        return Vec::new();
    }

    let (first, last) = (entry.segment_idx, exit.segment_idx);
    let same_edge = first == last;
    let exit_ahead = same_edge && {
        let a = boundary.polygon(entry.contour_idx)[first];
        a.distance_squared(&exit.point) >= a.distance_squared(&entry.point)
    };

    match direction {
        Direction::Forward => {
            let count = if same_edge && !exit_ahead {
                n
            } else {
                (last + n - first) % n
            };
            (1..=count).map(|k| (first + k) % n).collect()
        }
        Direction::Backward => {
            let count = if same_edge && exit_ahead {
                n
            } else {
                (first + n - last) % n
            };
            (0..count).map(|k| (first + n - k) % n).collect()
        }
    }
}

/// Push `point`, which lies on edge `segment_idx` of polygon `contour_idx`,
/// `clearance` units off that edge to whichever side is inside the region.
pub(crate) fn clear_of_edge(
    boundary: &Boundary<'_>,
    contour_idx: usize,
    segment_idx: usize,
    point: Point,
    clearance: Coord,
) -> Point {
    if clearance == 0 {
        return point;
    }
    let edge = boundary.polygon(contour_idx).edge(segment_idx);
    let offset = edge.vector().perpendicular_left().normal(clearance);
    pick_inside(boundary, point, offset)
}

/// Push vertex `vertex_idx` of polygon `contour_idx` `clearance` units off
/// the boundary along its corner bisector, to whichever side is inside.
pub(crate) fn clear_of_vertex(
    boundary: &Boundary<'_>,
    contour_idx: usize,
    vertex_idx: usize,
    clearance: Coord,
) -> Point {
    let points = boundary.polygon(contour_idx).points();
    let n = points.len();
    let curr = points[vertex_idx];
    if clearance == 0 || n < 3 {
        return curr;
    }

    let prev = points[(vertex_idx + n - 1) % n];
    let next = points[(vertex_idx + 1) % n];

    let unit_normal = |v: Point| -> (CoordF, CoordF) {
        let len = v.length();
        if len == 0.0 {
            (0.0, 0.0)
        } else {
            let n = v.perpendicular_left();
            (n.x as CoordF / len, n.y as CoordF / len)
        }
    };
    let n1 = unit_normal(curr - prev);
    let n2 = unit_normal(next - curr);

    let mut bisector = (n1.0 + n2.0, n1.1 + n2.1);
    let mut len = (bisector.0 * bisector.0 + bisector.1 * bisector.1).sqrt();
    if len < 1e-6 {
        // Hairpin: the two edges fold back on each other.
        bisector = if n1 != (0.0, 0.0) { n1 } else { n2 };
        len = (bisector.0 * bisector.0 + bisector.1 * bisector.1).sqrt();
        if len == 0.0 {
            return curr;
        }
    }

    let scale = clearance as CoordF / len;
    let offset = Point::new(
        (bisector.0 * scale).round() as Coord,
        (bisector.1 * scale).round() as Coord,
    );
    pick_inside(boundary, curr, offset)
}

fn pick_inside(boundary: &Boundary<'_>, point: Point, offset: Point) -> Point {
    if offset.is_zero() {
        return point;
    }
    [point + offset, point - offset]
        .into_iter()
        .find(|candidate| boundary.point_is_inside(candidate) && !on_any_edge(boundary, candidate))
        .unwrap_or(point)
}

fn on_any_edge(boundary: &Boundary<'_>, p: &Point) -> bool {
    boundary
        .polygons()
        .iter()
        .any(|poly| poly.is_point_on_boundary(p))
}

/// Build the raw detour from `start` to `end` around every polygon the
/// direct segment passes through.
///
/// The first crossing of a polygon is paired with its last crossing further
/// along the segment; crossings in between belong to that detour. A polygon
/// crossed only once needs no detour. The result starts with `start` and
/// ends with `end`.
pub(crate) fn route_around_crossings(
    boundary: &Boundary<'_>,
    start: Point,
    end: Point,
    crossings: &[Crossing],
    clearance: Coord,
) -> Vec<Point> {
    let mut result = vec![start];

    let mut it_first_idx = 0;
    while it_first_idx < crossings.len() {
        let entry = &crossings[it_first_idx];

        let it_second_idx = (it_first_idx + 1..crossings.len())
            .rev()
            .find(|&j| crossings[j].contour_idx == entry.contour_idx);

        let Some(second_idx) = it_second_idx else {
            it_first_idx += 1;
            continue;
        };
        let exit = &crossings[second_idx];

        result.push(clear_of_edge(
            boundary,
            entry.contour_idx,
            entry.segment_idx,
            entry.point,
            clearance,
        ));

        let direction = get_shortest_direction(boundary, entry, exit);
        for vertex_idx in walk_vertices(boundary, entry, exit, direction) {
            result.push(clear_of_vertex(boundary, entry.contour_idx, vertex_idx, clearance));
        }

        result.push(clear_of_edge(
            boundary,
            exit.contour_idx,
            exit.segment_idx,
            exit.point,
            clearance,
        ));

        it_first_idx = second_idx + 1;
    }

    result.push(end);
    result
}
