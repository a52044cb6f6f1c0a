//! Core geometric types for routing in continuous layout-space.

use std::fmt::Display;
use std::str::FromStr;

use array_map::{ArrayMap, Indexable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bbox;
pub mod orientation;
pub mod transform;

/// The default absolute tolerance used when comparing coordinates.
pub const POINT_TOLERANCE: f64 = 1e-9;

/// A point in two-dimensional layout-space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0., y: 0. }
    }

    /// Gets the coordinate associated with direction `dir`.
    pub fn coord(&self, dir: Dir) -> f64 {
        match dir {
            Dir::Horiz => self.x,
            Dir::Vert => self.y,
        }
    }

    /// Returns a copy of this point with the coordinate associated with `dir` replaced.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// let p = Point::new(1., 2.);
    /// assert_eq!(p.with_coord(Dir::Vert, 5.), Point::new(1., 5.));
    /// ```
    pub fn with_coord(&self, dir: Dir, val: f64) -> Self {
        match dir {
            Dir::Horiz => Self { x: val, y: self.y },
            Dir::Vert => Self { x: self.x, y: val },
        }
    }

    /// Creates a new [`Point`] moved `distance` units towards `side`.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// let p = Point::new(1., 2.);
    /// assert_eq!(p.step(Side::Left, 3.), Point::new(-2., 2.));
    /// assert_eq!(p.step(Side::Top, 3.), Point::new(1., 5.));
    /// ```
    pub fn step(&self, side: Side, distance: f64) -> Self {
        let dir = side.coord_dir();
        self.with_coord(dir, self.coord(dir) + side.sign().as_f64() * distance)
    }

    /// Returns `true` if both coordinates differ from those of `other` by at most `tol`.
    pub fn approx_eq(&self, other: &Point, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    /// The z-component of the cross product of `self` and `other`, treated as vectors.
    #[inline]
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The dot product of `self` and `other`, treated as vectors.
    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The Euclidean norm of this point, treated as a vector.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A one-dimensional span.
#[derive(Debug, Default, Clone, Copy, PartialOrd, Serialize, Deserialize, PartialEq)]
pub struct Span {
    start: f64,
    stop: f64,
}

impl Span {
    /// Creates a new [`Span`] between two numbers, in either order.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// let span = Span::new(10., 2.);
    /// assert_eq!(span.start(), 2.);
    /// assert_eq!(span.stop(), 10.);
    /// ```
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    /// Creates a span of zero length encompassing the given point.
    pub fn from_point(x: f64) -> Self {
        Self { start: x, stop: x }
    }

    /// Gets the center of the span.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// assert_eq!(Span::new(0., 20.).center(), 10.);
    /// ```
    #[inline]
    pub fn center(&self) -> f64 {
        0.5 * (self.start + self.stop)
    }

    /// Gets the start of the span.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Gets the stop of the span.
    #[inline]
    pub fn stop(&self) -> f64 {
        self.stop
    }
}

/// An enumeration of axis-aligned directions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Dir {
    /// The horizontal, or x-aligned, direction.
    Horiz,
    /// The vertical, or y-aligned, direction.
    Vert,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("error parsing direction `{original}`; expected horizontal or vertical")]
pub struct DirParseError {
    original: String,
}

impl FromStr for Dir {
    type Err = DirParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();
        match lowercase.trim() {
            "vertical" | "vert" | "v" => Ok(Self::Vert),
            "horizontal" | "horiz" | "h" => Ok(Self::Horiz),
            _ => Err(DirParseError {
                original: s.to_string(),
            }),
        }
    }
}

/// Enumeration over possible signs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Sign {
    /// Positive.
    Pos,
    /// Negative.
    Neg,
}

impl Sign {
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Pos => 1.,
            Self::Neg => -1.,
        }
    }
}

impl std::ops::Not for Sign {
    type Output = Self;
    /// Flips the [`Sign`].
    fn not(self) -> Self::Output {
        match self {
            Self::Pos => Self::Neg,
            Self::Neg => Self::Pos,
        }
    }
}

impl Dir {
    /// Returns the perpendicular direction.
    pub fn other(self) -> Self {
        match self {
            Self::Horiz => Self::Vert,
            Self::Vert => Self::Horiz,
        }
    }
}

impl Default for Dir {
    #[inline]
    fn default() -> Self {
        Self::Horiz
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Horiz => write!(f, "horizontal"),
            Self::Vert => write!(f, "vertical"),
        }
    }
}

impl std::ops::Not for Dir {
    type Output = Self;
    /// Exclamation Operator returns the opposite direction
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// An enumeration of the sides of an axis-aligned rectangle.
///
/// Sides double as the four cardinal directions a route can travel in:
/// [`Side::Top`] is north, [`Side::Right`] is east,
/// [`Side::Bot`] is south and [`Side::Left`] is west.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
#[derive(Indexable)]
pub enum Side {
    #[serde(alias = "north")]
    Top,
    #[serde(alias = "east")]
    Right,
    #[serde(alias = "south")]
    Bot,
    #[serde(alias = "west")]
    Left,
}

impl Side {
    /// Gets the direction of the coordinate corresponding to this side.
    ///
    /// Top and bottom edges are y-coordinates, so they are on the **vertical** axis.
    /// Left and right edges are x-coordinates, so they are on the **horizontal** axis.
    ///
    /// Also see [`Side::edge_dir`].
    pub fn coord_dir(&self) -> Dir {
        use Dir::*;
        use Side::*;
        match self {
            Top | Bot => Vert,
            Left | Right => Horiz,
        }
    }

    /// Gets the direction of the edge corresponding to this side.
    ///
    /// Top and bottom edges are **horizontal** line segments;
    /// left and right edges are **vertical** line segments.
    ///
    /// Also see [`Side::coord_dir`].
    pub fn edge_dir(&self) -> Dir {
        use Dir::*;
        use Side::*;
        match self {
            Top | Bot => Horiz,
            Left | Right => Vert,
        }
    }

    /// Returns the opposite direction.
    pub fn other(&self) -> Self {
        match self {
            Side::Top => Side::Bot,
            Side::Right => Side::Left,
            Side::Bot => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Returns the sign corresponding to moving towards this side.
    pub fn sign(&self) -> Sign {
        use Side::*;
        use Sign::*;
        match self {
            Top | Right => Pos,
            Bot | Left => Neg,
        }
    }

    /// Returns `true` if `other` lies on the same axis as `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// assert!(Side::Left.is_parallel(Side::Right));
    /// assert!(Side::Left.is_parallel(Side::Left));
    /// assert!(!Side::Left.is_parallel(Side::Top));
    /// ```
    pub fn is_parallel(&self, other: Side) -> bool {
        self.coord_dir() == other.coord_dir()
    }

    /// Signed distance travelled from `from` to `to` when moving towards this side.
    ///
    /// Positive values mean `to` lies further towards this side than `from`.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// let a = Point::new(0., 0.);
    /// let b = Point::new(-4., 1.);
    /// assert_eq!(Side::Left.advance(a, b), 4.);
    /// assert_eq!(Side::Right.advance(a, b), -4.);
    /// ```
    pub fn advance(&self, from: Point, to: Point) -> f64 {
        let dir = self.coord_dir();
        self.sign().as_f64() * (to.coord(dir) - from.coord(dir))
    }

    /// The unit vector pointing towards this side.
    pub fn unit(&self) -> Point {
        Point::zero().step(*self, 1.)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("error parsing side `{original}`; expected one of north, east, south, or west")]
pub struct SideParseError {
    original: String,
}

impl FromStr for Side {
    type Err = SideParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();
        match lowercase.trim() {
            "north" | "top" | "n" => Ok(Self::Top),
            "east" | "right" | "e" => Ok(Self::Right),
            "south" | "bot" | "bottom" | "s" => Ok(Self::Bot),
            "west" | "left" | "w" => Ok(Self::Left),
            _ => Err(SideParseError {
                original: s.to_string(),
            }),
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Top => write!(f, "north"),
            Self::Right => write!(f, "east"),
            Self::Bot => write!(f, "south"),
            Self::Left => write!(f, "west"),
        }
    }
}

impl std::ops::Not for Side {
    type Output = Self;
    /// Exclamation Operator returns the opposite direction
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// An association of a value with type `T` to each of the four [`Side`]s.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq)]
pub struct Sides<T> {
    inner: ArrayMap<Side, T, 4>,
}

impl<T> Sides<T>
where
    T: Copy,
{
    /// Creates a new [`Sides`] with `value` associated with all sides.
    pub const fn uniform(value: T) -> Self {
        Self {
            inner: ArrayMap::new([value; 4]),
        }
    }
}

impl<T> std::ops::Index<Side> for Sides<T> {
    type Output = T;
    fn index(&self, index: Side) -> &Self::Output {
        self.inner.index(index)
    }
}

impl<T> std::ops::IndexMut<Side> for Sides<T> {
    fn index_mut(&mut self, index: Side) -> &mut Self::Output {
        self.inner.index_mut(index)
    }
}
