//! Rectangular bounding boxes and associated trait implementations.

use serde::{Deserialize, Serialize};

use super::{Dir, Point, Span};

/// An axis-aligned rectangular bounding box.
///
/// Points `p0` and `p1` represent opposite corners of a bounding rectangle.
/// `p0` is always closest to negative-infinity, in both x and y,
/// and `p1` is always closest to positive-infinity.
///
/// The box may be empty, meaning that `p0` is to the upper right of `p1`.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Bbox {
    /// Create a new [`Bbox`] from two [`Point`]s.
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }
    /// Creates a new [`Bbox`] from a single [`Point`].
    ///
    /// The resultant [`Bbox`] comprises solely of the point, having zero area.
    pub fn from_point(pt: Point) -> Self {
        Self { p0: pt, p1: pt }
    }
    /// Creates the smallest [`Bbox`] enclosing every point of `points`.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// # use waygeom::bbox::Bbox;
    /// let bbox = Bbox::from_points([Point::new(0., 5.), Point::new(3., -1.)]);
    /// assert_eq!(bbox, Bbox::new(Point::new(0., -1.), Point::new(3., 5.)));
    /// assert!(Bbox::from_points([]).is_empty());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bbox, pt| bbox.union(Self::from_point(pt)))
    }
    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(f64::INFINITY, f64::INFINITY),
            p1: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
    /// Returns `true` if the bounding box is empty.
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }
    /// Finds the width of the bounding box in the x-direction.
    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }
    /// Finds the height of the bounding box in the y-direction.
    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }
    /// Returns true if [`Point`] `pt` lies inside the bounding box.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
    /// Returns the smallest box containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }
    /// The extent of the box along `dir`.
    ///
    /// Returns [`None`] for an empty box.
    pub fn span(&self, dir: Dir) -> Option<Span> {
        if self.is_empty() {
            return None;
        }
        Some(Span::new(self.p0.coord(dir), self.p1.coord(dir)))
    }
    /// The center of the box, or [`None`] for an empty box.
    pub fn center(&self) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        Some(Point::new(
            0.5 * (self.p0.x + self.p1.x),
            0.5 * (self.p0.y + self.p1.y),
        ))
    }
}

/// Objects with a rectangular bounding box.
pub trait BoundBox {
    fn bbox(&self) -> Bbox;
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox::from_point(*self)
    }
}

impl BoundBox for Bbox {
    fn bbox(&self) -> Bbox {
        *self
    }
}

impl<T: BoundBox> BoundBox for [T] {
    fn bbox(&self) -> Bbox {
        self.iter()
            .fold(Bbox::empty(), |acc, item| acc.union(item.bbox()))
    }
}
