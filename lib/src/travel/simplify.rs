//! String-pulling: drop waypoints that a straight chord can skip.

use crate::geometry::Point;

/// Remove every waypoint that lies between two retained points joined by a
/// chord for which `crosses` is false.
///
/// For each retained point, later points are tried from the far end of the
/// path backwards, so each step skips as much as it can. The first and last
/// points are never removed. Worst case is O(n²) chord tests.
pub(crate) fn simplify_path<F>(points: &mut Vec<Point>, crosses: F)
where
    F: Fn(&Point, &Point) -> bool,
{
    let mut start_index = 0;
    while start_index + 2 < points.len() {
        let from = points[start_index];
        let skip_to = (start_index + 2..points.len())
            .rev()
            .find(|&j| !crosses(&from, &points[j]));

        if let Some(j) = skip_to {
            points.drain(start_index + 1..j);
        }
        start_index += 1;
    }
}
