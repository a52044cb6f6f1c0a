//! Directional connection points.

use arcstr::ArcStr;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use waygeom::orientation::wrap_angle;
use waygeom::transform::{Transform, Transformation};
use waygeom::{Dir, Point, Side};

use crate::error::{ErrorSource, Result};

/// The identifier of a [`Port`].
pub type PortId = ArcStr;

/// A directional connection point.
///
/// The orientation is the outward direction of propagation,
/// in degrees counterclockwise from the positive x-axis.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    #[builder(setter(into))]
    pub id: PortId,
    #[builder(setter(into))]
    pub position: Point,
    pub orientation: f64,
    #[builder(default = "1.0")]
    #[serde(default = "default_port_width")]
    pub width: f64,
}

const fn default_port_width() -> f64 {
    1.0
}

impl Port {
    pub fn new(id: impl Into<PortId>, position: impl Into<Point>, orientation: f64) -> Self {
        Self {
            id: id.into(),
            position: position.into(),
            orientation,
            width: default_port_width(),
        }
    }

    #[inline]
    pub fn builder() -> PortBuilder {
        PortBuilder::default()
    }

    /// Returns a copy of this port with the given width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// The cardinal direction this port faces.
    ///
    /// Returns an [`ErrorSource::InvalidInput`] error if the orientation
    /// is not a multiple of 90 degrees.
    pub fn side(&self) -> Result<Side> {
        Side::from_angle(self.orientation).ok_or_else(|| {
            ErrorSource::InvalidInput(format!(
                "port {} has orientation {} degrees; expected a multiple of 90",
                self.id, self.orientation
            ))
            .into()
        })
    }

    /// The coordinate of this port's position along `dir`.
    #[inline]
    pub fn coord(&self, dir: Dir) -> f64 {
        self.position.coord(dir)
    }

    /// Returns a copy of this port moved to `position`, facing `side`.
    pub fn moved_to(&self, position: Point, side: Side) -> Self {
        Self {
            id: self.id.clone(),
            position,
            orientation: side.angle(),
            width: self.width,
        }
    }

    /// Returns `true` if both ports face the same way.
    pub(crate) fn same_orientation(&self, other: &Port) -> bool {
        let delta = wrap_angle(self.orientation - other.orientation + 180.) - 180.;
        delta.abs() <= waygeom::orientation::ANGLE_TOLERANCE
    }
}

impl Transform for Port {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            id: self.id.clone(),
            position: self.position.transform(trans),
            orientation: trans.apply_to_angle(self.orientation),
            width: self.width,
        }
    }
}

/// Checks that every port in `ports` shares the orientation of the first.
///
/// Returns the shared side, or [`None`] for an empty set.
pub(crate) fn uniform_side(ports: &[Port], set: &'static str) -> Result<Option<Side>> {
    let Some(first) = ports.first() else {
        return Ok(None);
    };
    let side = first.side()?;
    for port in ports.iter().skip(1) {
        port.side()?;
        if !first.same_orientation(port) {
            return Err(ErrorSource::MixedOrientation {
                set,
                first: first.orientation,
                other: port.orientation,
            }
            .into());
        }
    }
    Ok(Some(side))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_orientation() {
        assert_eq!(Port::new("a", (0., 0.), 0.).side().unwrap(), Side::Right);
        assert_eq!(Port::new("a", (0., 0.), -90.).side().unwrap(), Side::Bot);
        assert_eq!(Port::new("a", (0., 0.), 540.).side().unwrap(), Side::Left);
        let err = Port::new("a", (0., 0.), 45.).side().unwrap_err();
        assert!(matches!(err.source(), ErrorSource::InvalidInput(_)));
    }

    #[test]
    fn builder_defaults_width() {
        let port = Port::builder()
            .id("in")
            .position(Point::new(1., 2.))
            .orientation(90.)
            .build()
            .unwrap();
        assert_eq!(port.width, 1.0);
        assert_eq!(port, Port::new("in", (1., 2.), 90.));
    }

    #[test]
    fn transform_rotates_orientation() {
        let port = Port::new("a", (10., 0.), 0.).with_width(0.5);
        let rotated = port.transform(Transformation::rotate(90.));
        assert_eq!(rotated.position, Point::new(0., 10.));
        assert_eq!(rotated.orientation, 90.);
        assert_eq!(rotated.width, 0.5);
    }

    #[test]
    fn uniform_side_detects_mixed_sets() {
        let ports = vec![Port::new("a", (0., 0.), 0.), Port::new("b", (0., 1.), 360.)];
        assert_eq!(uniform_side(&ports, "ports1").unwrap(), Some(Side::Right));

        let ports = vec![Port::new("a", (0., 0.), 0.), Port::new("b", (0., 1.), 90.)];
        let err = uniform_side(&ports, "ports1").unwrap_err();
        assert!(matches!(
            err.source(),
            ErrorSource::MixedOrientation { set: "ports1", .. }
        ));
        assert_eq!(uniform_side(&[], "ports1").unwrap(), None);
    }
}
