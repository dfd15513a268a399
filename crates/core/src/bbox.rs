//! Word bounding box model.
//!
//! A [`BoundingBox`] owns four corners in clockwise order starting at the
//! top-left corner and derives everything line reconstruction needs from
//! them once, at construction.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{AlignError, Result};
use crate::geometry::{Coords, Line, Point, Rect};

/// Bounding box of a single detected word.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    midpoint: Point,
    approx_orientation: f64,
    average_height: f64,
    average_width: f64,
    index: usize,
}

impl BoundingBox {
    /// Creates a box from clockwise corners (top-left, top-right,
    /// bottom-right, bottom-left), rejecting any other winding.
    pub fn new(corners: [Point; 4], index: usize) -> Result<Self> {
        check_clockwise(&corners)
            .map_err(|violation| AlignError::NotClockwise { index, violation })?;
        Ok(Self::from_corners_unchecked(corners, index))
    }

    /// Creates a box from caller coordinates, checking arity and winding.
    pub fn from_coords(coords: &[Coords], index: usize) -> Result<Self> {
        let corners: [Coords; 4] = coords.try_into().map_err(|_| AlignError::BoxArity {
            index,
            found: coords.len(),
        })?;
        Self::new(corners.map(Point::from), index)
    }

    /// Creates a box without validating the corner order.
    ///
    /// Intended for trusted or deliberately degenerate geometry, such as a
    /// box rotated to a vertical baseline.
    pub fn from_corners_unchecked([p1, p2, p3, p4]: [Point; 4], index: usize) -> Self {
        let midpoint = (p1 + p3) / 2.0;

        let m1 = p1.slope_to(&p2);
        let m2 = p3.slope_to(&p4);
        let approx_orientation = (m1 + m2) / 2.0;

        let average_height = ((p1.y - p4.y).abs() + (p2.y - p3.y).abs()) / 2.0;
        let average_width = ((p1.x - p2.x).abs() + (p3.x - p4.x).abs()) / 2.0;

        Self {
            p1,
            p2,
            p3,
            p4,
            midpoint,
            approx_orientation,
            average_height,
            average_width,
            index,
        }
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn p3(&self) -> Point {
        self.p3
    }

    pub fn p4(&self) -> Point {
        self.p4
    }

    pub fn corners(&self) -> [Point; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }

    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    /// Average slope of the top and bottom edges.
    pub fn approx_orientation(&self) -> f64 {
        self.approx_orientation
    }

    pub fn average_height(&self) -> f64 {
        self.average_height
    }

    pub fn average_width(&self) -> f64 {
        self.average_width
    }

    /// Position of the box in the caller's input sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Line through the midpoint along the approximate orientation.
    pub fn orientation_line(&self) -> Line {
        Line::new(self.midpoint, self.approx_orientation)
    }

    /// Axis-aligned extent covering all four corners.
    pub fn extent(&self) -> Rect {
        let corners = self.corners();
        corners.iter().fold(
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }

    pub fn area(&self) -> f64 {
        let (x0, y0, x1, y1) = self.extent();
        (x1 - x0) * (y1 - y0)
    }

    /// Overlap between the axis-aligned extents of two boxes.
    ///
    /// Returns whether the extents intersect with positive area, and the
    /// intersection area as a percentage of the smaller extent's area.
    /// Touching extents do not intersect; a zero-area smaller extent yields
    /// a percentage of 0.
    pub fn is_overlapping(&self, other: &BoundingBox) -> (bool, f64) {
        let (ax0, ay0, ax1, ay1) = self.extent();
        let (bx0, by0, bx1, by1) = other.extent();

        let iw = ax1.min(bx1) - ax0.max(bx0);
        let ih = ay1.min(by1) - ay0.max(by0);
        if iw <= 0.0 || ih <= 0.0 {
            return (false, 0.0);
        }

        let smaller = self.area().min(other.area());
        if smaller <= 0.0 {
            return (true, 0.0);
        }
        (true, 100.0 * iw * ih / smaller)
    }
}

/// Checks p1 left-of p2, p2 above p3, p3 right-of p4 and p4 below p1.
fn check_clockwise([p1, p2, p3, p4]: &[Point; 4]) -> std::result::Result<(), &'static str> {
    if !p1.is_left_of(p2) {
        return Err("p1 is not left of p2");
    }
    if !p2.is_above(p3) {
        return Err("p2 is not above p3");
    }
    if !p3.is_right_of(p4) {
        return Err("p3 is not right of p4");
    }
    if !p4.is_below(p1) {
        return Err("p4 is not below p1");
    }
    Ok(())
}

/// Orders boxes by midpoint x. Used for display only; reading order comes
/// from line sorting.
impl PartialOrd for BoundingBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.midpoint.x.partial_cmp(&other.midpoint.x)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}\n{}, {}", self.p1, self.p2, self.p4, self.p3)
    }
}
