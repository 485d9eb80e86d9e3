use geo::{BoundingRect, Contains, Coord, MultiPolygon, Point, Rect};
use rstar::{RTree, AABB};

use crate::geom::BoundingBox;

/// Geometries represents an immutable collection of district MultiPolygons
/// with a bounding-box R-tree for point queries.
///
/// Degenerate shapes (no computable bounding rect) keep their index slot so
/// callers' parallel name vectors stay aligned, but never appear as
/// candidates.
#[derive(Debug, Clone)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    pub(crate) fn new(polygons: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                polygons.iter().enumerate()
                    .filter_map(|(i, polygon)| {
                        polygon.bounding_rect().map(|rect| BoundingBox::new(i, rect))
                    })
                    .collect()
            ),
            shapes: polygons,
        }
    }

    /// Get the number of MultiPolygons.
    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no MultiPolygons.
    #[inline] pub(crate) fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub(crate) fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Bbox-level candidate indices at a point, sorted ascending so a scan
    /// over them is deterministic in shape insertion order.
    pub(crate) fn candidates_at(&self, point: Point<f64>) -> Vec<usize> {
        let env = AABB::from_corners([point.x(), point.y()], [point.x(), point.y()]);
        let mut indices: Vec<usize> = self.rtree
            .locate_in_envelope_intersecting(&env)
            .map(|bb| bb.idx())
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Exact point-in-polygon test for the shape at `idx`. Holes are honored
    /// as exclusions by `geo::Contains`.
    #[inline]
    pub(crate) fn contains(&self, idx: usize, point: Point<f64>) -> bool {
        self.shapes.get(idx).is_some_and(|shape| shape.contains(&point))
    }

    /// Compute the bounding rectangle of all MultiPolygons.
    pub(crate) fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter()
            .filter_map(|polygon| polygon.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                }
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, Polygon};

    fn unit_square(x0: f64, y0: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + 1.0, y: y0),
            (x: x0 + 1.0, y: y0 + 1.0),
            (x: x0, y: y0 + 1.0),
            (x: x0, y: y0),
        ]])
    }

    #[test]
    fn candidates_are_sorted_by_index() {
        // Three coincident squares: bbox candidates must come back 0, 1, 2
        // regardless of R-tree internals.
        let geoms = Geometries::new(vec![
            unit_square(0.0, 0.0),
            unit_square(0.0, 0.0),
            unit_square(0.0, 0.0),
        ]);
        assert_eq!(geoms.candidates_at(Point::new(0.5, 0.5)), vec![0, 1, 2]);
    }

    #[test]
    fn contains_honors_holes() {
        let outer = LineString::from(vec![
            (0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0),
        ]);
        let hole = LineString::from(vec![
            (1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0),
        ]);
        let geoms = Geometries::new(vec![MultiPolygon(vec![Polygon::new(outer, vec![hole])])]);

        assert!(geoms.contains(0, Point::new(0.5, 0.5)));
        assert!(!geoms.contains(0, Point::new(2.0, 2.0))); // inside the hole
        assert!(!geoms.contains(0, Point::new(5.0, 5.0)));
    }

    #[test]
    fn degenerate_shape_keeps_its_slot() {
        let geoms = Geometries::new(vec![
            MultiPolygon(vec![]), // no bounding rect
            unit_square(0.0, 0.0),
        ]);
        assert_eq!(geoms.len(), 2);
        assert_eq!(geoms.candidates_at(Point::new(0.5, 0.5)), vec![1]);
        assert!(!geoms.contains(0, Point::new(0.5, 0.5)));
    }
}
