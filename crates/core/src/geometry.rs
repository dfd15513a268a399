//! Geometry primitives - points, slope lines and the boundary polygon.
//!
//! All coordinates are image coordinates: x grows to the right and y grows
//! downward, so a point is "above" another when its y is smaller.
//!
//! Every operation is total. Vertical segments yield an infinite slope and
//! parallel lines yield [`Point::INFINITY`] instead of failing, since both
//! show up routinely in OCR output.

use std::fmt;
use std::ops::{Add, Div, Sub};

use crate::error::{AlignError, Result};

/// A pair of raw (x, y) coordinates as supplied by callers.
pub type Coords = (f64, f64);

/// An axis-aligned rectangle (x0, y0, x1, y1) with x0 <= x1 and y0 <= y1.
pub type Rect = (f64, f64, f64, f64);

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Sentinel returned for the intersection of parallel lines.
    pub const INFINITY: Point = Point {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn is_left_of(&self, other: &Point) -> bool {
        self.x < other.x
    }

    #[inline]
    pub fn is_right_of(&self, other: &Point) -> bool {
        self.x > other.x
    }

    #[inline]
    pub fn is_above(&self, other: &Point) -> bool {
        self.y < other.y
    }

    #[inline]
    pub fn is_below(&self, other: &Point) -> bool {
        self.y > other.y
    }

    /// Slope of the segment between `self` and `other`.
    ///
    /// Returns `f64::INFINITY` when the segment is vertical (including the
    /// case of two coincident points).
    pub fn slope_to(&self, other: &Point) -> f64 {
        let d = *self - *other;
        if d.x == 0.0 {
            return f64::INFINITY;
        }
        d.y / d.x
    }

    pub fn distance_to_point(&self, other: &Point) -> f64 {
        let d = *self - *other;
        d.x.hypot(d.y)
    }

    /// Perpendicular (shortest) distance from this point to `line`.
    pub fn distance_to_line(&self, line: &Line) -> f64 {
        let (a, b, c) = line.standard_form_coeffs();
        (a * self.x + b * self.y + c).abs() / a.hypot(b)
    }
}

impl From<Coords> for Point {
    fn from((x, y): Coords) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight line in point-slope form.
///
/// An infinite slope denotes a vertical line through the anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    anchor: Point,
    slope: f64,
}

impl Line {
    pub fn new(anchor: Point, slope: f64) -> Self {
        Self { anchor, slope }
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    #[inline]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.slope.is_infinite()
    }

    /// y-intercept of the slope-intercept form; infinite for vertical lines.
    pub fn intercept(&self) -> f64 {
        if self.is_vertical() {
            return f64::INFINITY;
        }
        self.anchor.y - self.anchor.x * self.slope
    }

    /// Coefficients (A, B, C) of the standard form `A·x + B·y + C = 0`.
    pub fn standard_form_coeffs(&self) -> (f64, f64, f64) {
        if self.is_vertical() {
            (1.0, 0.0, -self.anchor.x)
        } else {
            (self.slope, -1.0, self.intercept())
        }
    }

    pub fn distance_to_point(&self, p: &Point) -> f64 {
        p.distance_to_line(self)
    }

    /// x for a given y. Infinite for horizontal lines.
    pub fn find_x(&self, y: f64) -> f64 {
        if self.is_vertical() {
            return self.anchor.x;
        }
        if self.slope == 0.0 {
            return f64::INFINITY;
        }
        (y - self.intercept()) / self.slope
    }

    /// y for a given x. Infinite for vertical lines.
    pub fn find_y(&self, x: f64) -> f64 {
        if self.is_vertical() {
            return f64::INFINITY;
        }
        self.slope * x + self.intercept()
    }

    /// Signed vertical offset of `p` from the line (line y minus point y).
    pub fn point_position(&self, p: &Point) -> f64 {
        self.find_y(p.x) - p.y
    }

    /// Intersection with `other`, or [`Point::INFINITY`] for parallel lines.
    pub fn intersection(&self, other: &Line) -> Point {
        let (a1, b1, c1) = self.standard_form_coeffs();
        let (a2, b2, c2) = other.standard_form_coeffs();

        let denom = a1 * b2 - a2 * b1;
        if denom == 0.0 || !denom.is_finite() {
            return Point::INFINITY;
        }

        Point::new((b1 * c2 - b2 * c1) / denom, (c1 * a2 - c2 * a1) / denom)
    }

    /// Acute angle between the two lines, in degrees.
    ///
    /// Perpendicular lines (`1 + m1·m2 == 0`) report 90.
    pub fn angle_of_intersection(&self, other: &Line) -> f64 {
        let (m1, m2) = (self.slope, other.slope);

        if m1.is_infinite() || m2.is_infinite() {
            let theta = (m1.atan() - m2.atan()).abs().to_degrees();
            return if theta > 90.0 { 180.0 - theta } else { theta };
        }

        let denom = 1.0 + m1 * m2;
        if denom == 0.0 {
            return 90.0;
        }
        ((m2 - m1) / denom).abs().atan().to_degrees()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_vertical() {
            write!(f, "x = {}", self.anchor.x)
        } else {
            write!(f, "y = {}.x + {}", self.slope, self.intercept())
        }
    }
}

/// The quadrilateral inside which line intersections count as anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    vertices: [Point; 4],
}

impl Boundary {
    pub fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// Builds a boundary from caller coordinates, which must be four points.
    pub fn from_coords(coords: &[Coords]) -> Result<Self> {
        let vertices: [Coords; 4] = coords
            .try_into()
            .map_err(|_| AlignError::BoundaryArity {
                found: coords.len(),
            })?;
        Ok(Self::new(vertices.map(Point::from)))
    }

    /// Axis-aligned boundary covering `rect`, vertices clockwise from top-left.
    pub fn from_rect((x0, y0, x1, y1): Rect) -> Self {
        Self::new([
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    /// Ray-casting containment test.
    ///
    /// Counts the edges crossed by a horizontal ray from `p`; the point is
    /// inside iff the count is odd. Non-finite points are never inside.
    pub fn contains(&self, p: &Point) -> bool {
        if !p.is_finite() {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Boundary {
        Boundary::from_rect((0.0, 0.0, 670.0, 1000.0))
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(4.0, 6.0);
        let b = Point::new(2.0, 2.0);
        assert_eq!(a + b, Point::new(6.0, 8.0));
        assert_eq!(a - b, Point::new(2.0, 4.0));
        assert_eq!((a + b) / 2.0, Point::new(3.0, 4.0));
        assert_eq!(a.distance_to_point(&b), 20.0_f64.sqrt());
    }

    #[test]
    fn relative_position_uses_image_coordinates() {
        let top = Point::new(0.0, 10.0);
        let bottom = Point::new(5.0, 20.0);
        assert!(top.is_above(&bottom));
        assert!(bottom.is_below(&top));
        assert!(top.is_left_of(&bottom));
        assert!(bottom.is_right_of(&top));
        assert!(!top.is_below(&bottom));
    }

    #[test]
    fn vertical_slope_is_infinite() {
        let a = Point::new(3.0, 0.0);
        assert_eq!(a.slope_to(&Point::new(3.0, 10.0)), f64::INFINITY);
        assert_eq!(a.slope_to(&a), f64::INFINITY);
        assert_eq!(a.slope_to(&Point::new(5.0, 4.0)), 2.0);
    }

    #[test]
    fn standard_form_and_distance() {
        let line = Line::new(Point::new(0.0, 1.0), 1.0);
        assert_eq!(line.standard_form_coeffs(), (1.0, -1.0, 1.0));
        let d = Point::new(1.0, 0.0).distance_to_line(&line);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);

        let vertical = Line::new(Point::new(5.0, 0.0), f64::INFINITY);
        assert_eq!(vertical.standard_form_coeffs(), (1.0, 0.0, -5.0));
        assert_eq!(Point::new(8.0, 100.0).distance_to_line(&vertical), 3.0);
    }

    #[test]
    fn find_coordinates() {
        let line = Line::new(Point::new(0.0, 2.0), 0.5);
        assert_eq!(line.find_y(4.0), 4.0);
        assert_eq!(line.find_x(4.0), 4.0);
        assert_eq!(line.point_position(&Point::new(4.0, 1.0)), 3.0);

        let flat = Line::new(Point::new(0.0, 2.0), 0.0);
        assert_eq!(flat.find_x(7.0), f64::INFINITY);

        let vertical = Line::new(Point::new(5.0, 0.0), f64::INFINITY);
        assert_eq!(vertical.find_y(1.0), f64::INFINITY);
        assert_eq!(vertical.find_x(42.0), 5.0);
    }

    #[test]
    fn intersection_of_crossing_lines() {
        let l1 = Line::new(Point::new(0.0, 0.0), 1.0);
        let l2 = Line::new(Point::new(0.0, 4.0), -1.0);
        assert_eq!(l1.intersection(&l2), Point::new(2.0, 2.0));
        assert_eq!(l2.intersection(&l1), Point::new(2.0, 2.0));

        let vertical = Line::new(Point::new(3.0, 0.0), f64::INFINITY);
        assert_eq!(l1.intersection(&vertical), Point::new(3.0, 3.0));
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let l1 = Line::new(Point::new(0.0, 0.0), 0.25);
        let l2 = Line::new(Point::new(0.0, 10.0), 0.25);
        assert_eq!(l1.intersection(&l2), Point::INFINITY);

        let v1 = Line::new(Point::new(0.0, 0.0), f64::INFINITY);
        let v2 = Line::new(Point::new(4.0, 0.0), f64::INFINITY);
        assert!(!v1.intersection(&v2).is_finite());
    }

    #[test]
    fn angle_between_lines() {
        let flat = Line::new(Point::new(0.0, 0.0), 0.0);
        let diagonal = Line::new(Point::new(0.0, 0.0), 1.0);
        assert!((flat.angle_of_intersection(&diagonal) - 45.0).abs() < 1e-9);

        let perpendicular = Line::new(Point::new(0.0, 0.0), -1.0);
        assert_eq!(diagonal.angle_of_intersection(&perpendicular), 90.0);

        let vertical = Line::new(Point::new(0.0, 0.0), f64::INFINITY);
        assert!((flat.angle_of_intersection(&vertical) - 90.0).abs() < 1e-9);
        assert!((diagonal.angle_of_intersection(&vertical) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn boundary_contains() {
        let boundary = page();
        assert!(boundary.contains(&Point::new(10.0, 10.0)));
        assert!(boundary.contains(&Point::new(669.0, 999.0)));
        assert!(!boundary.contains(&Point::new(-1.0, 10.0)));
        assert!(!boundary.contains(&Point::new(10.0, 1001.0)));
        assert!(!boundary.contains(&Point::INFINITY));
    }

    #[test]
    fn skewed_boundary_contains() {
        let boundary = Boundary::new([
            Point::new(10.0, 0.0),
            Point::new(100.0, 10.0),
            Point::new(90.0, 100.0),
            Point::new(0.0, 90.0),
        ]);
        assert!(boundary.contains(&Point::new(50.0, 50.0)));
        assert!(!boundary.contains(&Point::new(2.0, 2.0)));
        assert!(!boundary.contains(&Point::new(98.0, 98.0)));
    }

    #[test]
    fn boundary_arity_is_checked() {
        let err = Boundary::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert_eq!(err, AlignError::BoundaryArity { found: 3 });
        assert!(Boundary::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).is_ok());
    }
}
