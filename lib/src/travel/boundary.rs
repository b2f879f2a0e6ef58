//! Boundary polygon set with the containment and crossing predicates.

use crate::config::{FillRule, TravelConfig};
use crate::geometry::{BoundingBox, Line, Point, Polygon};
use crate::CoordF;

/// The polygons bounding the allowed travel region, plus data derived from
/// them once per layer.
///
/// The polygons are borrowed and never modified; when the layer's perimeters
/// change, build a new `Boundary`.
#[derive(Clone, Debug)]
pub(crate) struct Boundary<'a> {
    /// The boundary polygons.
    polygons: &'a [Polygon],
    /// Bounding box of each polygon.
    bboxes: Vec<BoundingBox>,
    /// Pre-computed cumulative distances along each polygon.
    polygon_params: Vec<Vec<CoordF>>,
    fill_rule: FillRule,
    use_pruning: bool,
}

impl<'a> Boundary<'a> {
    pub(crate) fn new(polygons: &'a [Polygon], config: &TravelConfig) -> Self {
        let bboxes = polygons.iter().map(Polygon::bounding_box).collect();

        let mut polygon_params = Vec::with_capacity(polygons.len());
        for poly in polygons {
            let mut params = Vec::with_capacity(poly.len() + 1);
            let mut cumulative = 0.0;
            params.push(cumulative);
            for edge in poly.edges() {
                cumulative += edge.length();
                params.push(cumulative);
            }
            polygon_params.push(params);
        }

        Self {
            polygons,
            bboxes,
            polygon_params,
            fill_rule: config.fill_rule,
            use_pruning: config.use_bounding_box_pruning,
        }
    }

    #[inline]
    pub(crate) fn polygons(&self) -> &'a [Polygon] {
        self.polygons
    }

    #[inline]
    pub(crate) fn polygon(&self, idx: usize) -> &'a Polygon {
        &self.polygons[idx]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// Total perimeter length of a polygon.
    pub(crate) fn polygon_length(&self, poly_idx: usize) -> CoordF {
        self.polygon_params
            .get(poly_idx)
            .and_then(|params| params.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Distance along a polygon from its first vertex to `point`, which lies
    /// on the edge starting at `seg_idx`.
    pub(crate) fn distance_along(&self, poly_idx: usize, seg_idx: usize, point: &Point) -> CoordF {
        let Some(params) = self.polygon_params.get(poly_idx) else {
            return 0.0;
        };
        let Some(vertex) = self.polygons[poly_idx].get(seg_idx) else {
            return 0.0;
        };
        params.get(seg_idx).copied().unwrap_or(0.0) + vertex.distance(point)
    }

    /// Indices of polygons with at least `min_points` points whose bounding
    /// box could touch `query`.
    pub(crate) fn candidates(
        &self,
        query: BoundingBox,
        min_points: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        (0..self.polygons.len()).filter(move |&idx| {
            self.polygons[idx].len() >= min_points
                && (!self.use_pruning || self.bboxes[idx].intersects(&query))
        })
    }

    /// Containment test against the whole polygon set.
    ///
    /// Points exactly on any boundary edge count as inside. Everything else
    /// is decided by the configured fill rule, so a point inside an outer
    /// contour and inside one of its holes is outside.
    pub(crate) fn point_is_inside(&self, p: &Point) -> bool {
        let query = BoundingBox::from_points_minmax(*p, *p);

        let mut winding = 0;
        let mut enclosing = 0;
        for idx in self.candidates(query, 3) {
            let poly = &self.polygons[idx];
            if poly.is_point_on_boundary(p) {
                return true;
            }
            match self.fill_rule {
                FillRule::NonZero => winding += poly.winding_number(p),
                FillRule::EvenOdd => {
                    if poly.contains_point(p) {
                        enclosing += 1;
                    }
                }
            }
        }

        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => enclosing % 2 == 1,
        }
    }

    /// Check if the segment `a`-`b` touches any boundary edge.
    ///
    /// Proper crossings, an endpoint resting on an edge and running along an
    /// edge all count. A segment strictly inside or strictly outside every
    /// polygon does not cross.
    pub(crate) fn does_line_cross(&self, a: &Point, b: &Point) -> bool {
        let travel = Line::new(*a, *b);
        let query = travel.bounding_box();

        self.candidates(query, 1)
            .any(|idx| self.polygons[idx].edges().any(|edge| travel.touches(&edge)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_square_boundary() -> Vec<Polygon> {
        vec![Polygon::rectangle(Point::new(0, 0), Point::new(1000, 1000))]
    }

    fn make_square_with_hole() -> Vec<Polygon> {
        vec![
            Polygon::rectangle(Point::new(0, 0), Point::new(1000, 1000)),
            Polygon::rectangle(Point::new(400, 400), Point::new(600, 600)).reversed(),
        ]
    }

    #[test]
    fn test_boundary_params() {
        let polygons = make_square_boundary();
        let boundary = Boundary::new(&polygons, &TravelConfig::default());

        assert!((boundary.polygon_length(0) - 4000.0).abs() < 1e-9);
        assert_eq!(boundary.polygon_length(7), 0.0);
        let along = boundary.distance_along(0, 1, &Point::new(1000, 250));
        assert!((along - 1250.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_inside_square() {
        let polygons = make_square_boundary();
        let boundary = Boundary::new(&polygons, &TravelConfig::default());

        assert!(boundary.point_is_inside(&Point::new(500, 500)));
        assert!(!boundary.point_is_inside(&Point::new(1500, 500)));
        assert!(!boundary.point_is_inside(&Point::new(-1, 500)));
        // On an edge or a vertex counts as inside.
        assert!(boundary.point_is_inside(&Point::new(1000, 500)));
        assert!(boundary.point_is_inside(&Point::new(0, 0)));
    }

    #[test]
    fn test_point_inside_honors_holes() {
        let polygons = make_square_with_hole();
        for fill_rule in [FillRule::NonZero, FillRule::EvenOdd] {
            let config = TravelConfig::new().with_fill_rule(fill_rule);
            let boundary = Boundary::new(&polygons, &config);

            assert!(boundary.point_is_inside(&Point::new(100, 100)));
            assert!(!boundary.point_is_inside(&Point::new(500, 500)));
            assert!(boundary.point_is_inside(&Point::new(400, 500)));
        }
    }

    #[test]
    fn test_fill_rules_differ_on_same_orientation_nesting() {
        // Inner square wound the same way as the outer one.
        let polygons = vec![
            Polygon::rectangle(Point::new(0, 0), Point::new(1000, 1000)),
            Polygon::rectangle(Point::new(400, 400), Point::new(600, 600)),
        ];
        let p = Point::new(500, 500);

        let nonzero = Boundary::new(&polygons, &TravelConfig::default());
        assert!(nonzero.point_is_inside(&p));

        let even_odd = Boundary::new(
            &polygons,
            &TravelConfig::new().with_fill_rule(FillRule::EvenOdd),
        );
        assert!(!even_odd.point_is_inside(&p));
    }

    #[test]
    fn test_point_inside_pruning_is_transparent() {
        let polygons = make_square_with_hole();
        let pruned = Boundary::new(&polygons, &TravelConfig::default());
        let full = Boundary::new(
            &polygons,
            &TravelConfig::new().with_bounding_box_pruning(false),
        );

        for x in (-100..=1100).step_by(50) {
            for y in (-100..=1100).step_by(50) {
                let p = Point::new(x, y);
                assert_eq!(pruned.point_is_inside(&p), full.point_is_inside(&p));
            }
        }
    }

    #[test]
    fn test_degenerate_polygons_ignored_for_containment() {
        let mut polygons = make_square_boundary();
        polygons.push(Polygon::from_points(vec![Point::new(2000, 0), Point::new(3000, 0)]));
        polygons.push(Polygon::new());
        let boundary = Boundary::new(&polygons, &TravelConfig::default());

        assert!(boundary.point_is_inside(&Point::new(500, 500)));
        assert!(!boundary.point_is_inside(&Point::new(2500, 0)));
    }

    #[test]
    fn test_does_line_cross() {
        let polygons = make_square_with_hole();
        let boundary = Boundary::new(&polygons, &TravelConfig::default());

        // Through the hole.
        assert!(boundary.does_line_cross(&Point::new(100, 500), &Point::new(900, 500)));
        // Beside the hole, although it straddles the hole edges' infinite lines.
        assert!(!boundary.does_line_cross(&Point::new(100, 100), &Point::new(900, 300)));
        // Out through the outer contour.
        assert!(boundary.does_line_cross(&Point::new(100, 100), &Point::new(1100, 100)));
        // Ending exactly on an edge.
        assert!(boundary.does_line_cross(&Point::new(100, 500), &Point::new(400, 500)));
        // Entirely outside.
        assert!(!boundary.does_line_cross(&Point::new(1100, 0), &Point::new(1100, 1000)));
    }

    #[test]
    fn test_does_line_cross_single_point_polygon() {
        let polygons = vec![Polygon::from_points(vec![Point::new(50, 0)])];
        let boundary = Boundary::new(&polygons, &TravelConfig::default());

        assert!(boundary.does_line_cross(&Point::new(0, 0), &Point::new(100, 0)));
        assert!(!boundary.does_line_cross(&Point::new(0, 10), &Point::new(100, 10)));
    }
}
