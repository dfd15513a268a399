//! Pairwise relationships between boxes.
//!
//! For every pair of boxes this computes where their orientation lines meet
//! (kept only inside the page boundary) and whether either orientation line
//! passes through the other box.

use itertools::Itertools;

use crate::bbox::BoundingBox;
use crate::geometry::{Boundary, Point};

use super::matrix::SquareMatrix;

/// Intersections of orientation lines, present only inside the boundary.
pub type PointOfIntersections = SquareMatrix<Option<Point>>;

/// Symmetric passthrough relation.
pub type PassThroughs = SquareMatrix<bool>;

/// Intersection of the orientation lines of `a` and `b`, if it falls inside
/// `boundary`.
pub fn point_of_intersection(
    a: &BoundingBox,
    b: &BoundingBox,
    boundary: &Boundary,
) -> Option<Point> {
    let poi = a.orientation_line().intersection(&b.orientation_line());
    boundary.contains(&poi).then_some(poi)
}

/// Builds the symmetric intersection matrix for `boxes`. The diagonal is
/// always absent.
pub fn point_of_intersections(boxes: &[BoundingBox], boundary: &Boundary) -> PointOfIntersections {
    let mut pois = SquareMatrix::new(boxes.len(), None);
    for (i, j) in (0..boxes.len()).tuple_combinations() {
        if let Some(poi) = point_of_intersection(&boxes[i], &boxes[j], boundary) {
            pois.set_symmetric(i, j, Some(poi));
        }
    }
    pois
}

/// Whether the orientation line of `a` comes within `tolerance` times half
/// of `b`'s average height of `b`'s midpoint.
pub fn passes_through(a: &BoundingBox, b: &BoundingBox, tolerance: f64) -> bool {
    let distance = b.midpoint().distance_to_line(&a.orientation_line());
    distance <= tolerance * b.average_height() / 2.0
}

/// Builds the symmetric passthrough matrix: a pair is related when either
/// box passes through the other.
pub fn passthroughs(boxes: &[BoundingBox], tolerance: f64) -> PassThroughs {
    let mut relation = SquareMatrix::new(boxes.len(), false);
    for (i, j) in (0..boxes.len()).tuple_combinations() {
        let (a, b) = (&boxes[i], &boxes[j]);
        if passes_through(a, b, tolerance) || passes_through(b, a, tolerance) {
            relation.set_symmetric(i, j, true);
        }
    }
    relation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Boundary {
        Boundary::from_rect((0.0, 0.0, 670.0, 1000.0))
    }

    /// Box of the given size centred on (cx, cy), tilted by `slope`.
    fn tilted(cx: f64, cy: f64, w: f64, h: f64, slope: f64, index: usize) -> BoundingBox {
        let (hw, hh) = (w / 2.0, h / 2.0);
        let dy = slope * hw;
        BoundingBox::new(
            [
                Point::new(cx - hw, cy - hh - dy),
                Point::new(cx + hw, cy - hh + dy),
                Point::new(cx + hw, cy + hh + dy),
                Point::new(cx - hw, cy + hh - dy),
            ],
            index,
        )
        .unwrap()
    }

    #[test]
    fn intersection_inside_boundary_is_kept() {
        let a = tilted(100.0, 100.0, 80.0, 20.0, 0.05, 0);
        let b = tilted(300.0, 100.0, 80.0, 20.0, -0.05, 1);
        let poi = point_of_intersection(&a, &b, &page()).unwrap();
        assert!((poi.x - 200.0).abs() < 1e-9);
        assert!((poi.y - 105.0).abs() < 1e-9);
    }

    #[test]
    fn intersection_outside_boundary_is_dropped() {
        let a = tilted(100.0, 100.0, 80.0, 20.0, 0.001, 0);
        let b = tilted(300.0, 100.0, 80.0, 20.0, -0.001, 1);
        // Nearly parallel to a and far below it: the lines meet off the page.
        let c = tilted(300.0, 900.0, 80.0, 20.0, 0.002, 2);
        assert!(point_of_intersection(&a, &b, &page()).is_some());
        assert!(point_of_intersection(&a, &c, &page()).is_none());
    }

    #[test]
    fn parallel_boxes_have_no_intersection() {
        let a = tilted(100.0, 100.0, 80.0, 20.0, 0.0, 0);
        let b = tilted(300.0, 110.0, 80.0, 20.0, 0.0, 1);
        let pois = point_of_intersections(&[a, b], &page());
        assert!(pois.get(0, 1).is_none());
        assert!(pois.get(1, 0).is_none());
    }

    #[test]
    fn matrices_are_symmetric() {
        let boxes = vec![
            tilted(100.0, 100.0, 80.0, 20.0, 0.01, 0),
            tilted(250.0, 102.0, 80.0, 20.0, -0.01, 1),
            tilted(400.0, 300.0, 80.0, 20.0, 0.02, 2),
        ];
        let pois = point_of_intersections(&boxes, &page());
        let pass = passthroughs(&boxes, 1.0);
        assert!(pois.is_symmetric());
        assert!(pass.is_symmetric());
        for i in 0..boxes.len() {
            assert!(pois.get(i, i).is_none());
            assert!(!pass.get(i, i));
        }
        assert!(*pass.get(0, 1));
        assert!(!pass.get(0, 2));
    }

    #[test]
    fn passthrough_scales_with_tolerance() {
        let a = tilted(100.0, 100.0, 80.0, 20.0, 0.0, 0);
        let b = tilted(300.0, 108.0, 80.0, 20.0, 0.0, 1);
        assert!(passes_through(&a, &b, 1.0));
        assert!(!passes_through(&a, &b, 0.5));
    }
}
