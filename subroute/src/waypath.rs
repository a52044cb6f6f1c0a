//! Waypoint paths and the stitching of path fragments.

use serde::{Deserialize, Serialize};
use waygeom::bbox::{Bbox, BoundBox};
use waygeom::transform::{Transform, Transformation};
use waygeom::{Point, POINT_TOLERANCE};

use crate::error::{ErrorSource, Result};

/// Relative tolerance on the sine of the turn angle below which a corner is flat.
const FLAT_TOLERANCE: f64 = 1e-9;

/// An ordered sequence of corner points describing one orthogonal route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waypath(Vec<Point>);

impl Waypath {
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self(points.into())
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.0.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over consecutive pairs of points.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// The total length of the path.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Returns `true` if every segment is horizontal or vertical.
    pub fn is_manhattan(&self) -> bool {
        self.segments().all(|(a, b)| {
            (a.x - b.x).abs() <= POINT_TOLERANCE || (a.y - b.y).abs() <= POINT_TOLERANCE
        })
    }

    /// Returns a copy of the path with duplicate and flat-angle points removed.
    pub fn simplified(&self) -> Self {
        Self(simplify(self.0.iter().copied()))
    }
}

impl From<Vec<Point>> for Waypath {
    fn from(value: Vec<Point>) -> Self {
        Self(value)
    }
}

impl BoundBox for Waypath {
    fn bbox(&self) -> Bbox {
        self.0.bbox()
    }
}

impl Transform for Waypath {
    fn transform(&self, trans: Transformation) -> Self {
        Self(self.0.iter().map(|p| p.transform(trans)).collect())
    }
}

/// Removes consecutive duplicates and interior points on a straight run.
///
/// A point is only removed when the path continues forward through it;
/// reversals are kept. At least two points are always returned
/// for non-empty input.
pub(crate) fn simplify(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for point in points {
        if out.last() == Some(&point) {
            continue;
        }
        while out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            if is_flat(a, b, point) {
                out.pop();
            } else {
                break;
            }
        }
        out.push(point);
    }
    if out.len() == 1 {
        out.push(out[0]);
    }
    out
}

fn is_flat(a: Point, b: Point, c: Point) -> bool {
    let ab = b - a;
    let bc = c - b;
    let scale = ab.norm() * bc.norm();
    scale > 0. && ab.cross(&bc).abs() <= FLAT_TOLERANCE * scale && ab.dot(&bc) > 0.
}

/// Accumulates the fragments of one logical route, in traversal order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionAssembler {
    fragments: Vec<Waypath>,
}

impl ConnectionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next fragment of the route.
    pub fn push(&mut self, fragment: Waypath) {
        self.fragments.push(fragment);
    }

    /// The end point of the most recently added fragment.
    pub fn cursor(&self) -> Option<Point> {
        self.fragments.last().and_then(Waypath::last)
    }

    /// Stitches the fragments into one simplified [`Waypath`].
    ///
    /// Each fragment after the first must start where the previous one ended,
    /// within [`POINT_TOLERANCE`]; otherwise an
    /// [`ErrorSource::InvariantViolation`] is returned.
    pub fn assemble(&self) -> Result<Waypath> {
        let mut points: Vec<Point> = Vec::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            let (Some(first), Some(_)) = (fragment.first(), fragment.last()) else {
                return Err(ErrorSource::InvariantViolation(format!(
                    "fragment {i} of route is empty"
                ))
                .into());
            };
            match points.last() {
                None => points.extend_from_slice(fragment.points()),
                Some(prev) => {
                    if !prev.approx_eq(&first, POINT_TOLERANCE) {
                        return Err(ErrorSource::InvariantViolation(format!(
                            "fragment {i} starts at {first} but the route ends at {prev}"
                        ))
                        .into());
                    }
                    points.extend_from_slice(&fragment.points()[1..]);
                }
            }
        }
        if points.is_empty() {
            return Err(
                ErrorSource::InvariantViolation("route has no fragments".to_string()).into(),
            );
        }
        Ok(Waypath(simplify(points)))
    }
}
