//! Port orientation angles and their relation to [`Side`]s.

use crate::Side;

/// Tolerance, in degrees, when snapping an angle onto a cardinal direction.
pub const ANGLE_TOLERANCE: f64 = 1e-6;

/// Wraps the given angle to the interval `[0, 360)` degrees.
///
/// # Examples
///
/// ```
/// use waygeom::orientation::wrap_angle;
///
/// assert_eq!(wrap_angle(10.), 10.);
/// assert_eq!(wrap_angle(-10.), 350.);
/// assert_eq!(wrap_angle(-740.), 340.);
/// assert_eq!(wrap_angle(725.), 5.);
/// assert_eq!(wrap_angle(360.), 0.);
/// assert_eq!(wrap_angle(-360.), 0.);
/// ```
pub fn wrap_angle(angle: f64) -> f64 {
    ((angle % 360.) + 360.) % 360.
}

impl Side {
    /// The outward angle of this side, in degrees counterclockwise from the positive x-axis.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// assert_eq!(Side::Right.angle(), 0.);
    /// assert_eq!(Side::Top.angle(), 90.);
    /// assert_eq!(Side::Left.angle(), 180.);
    /// assert_eq!(Side::Bot.angle(), 270.);
    /// ```
    pub fn angle(&self) -> f64 {
        match self {
            Side::Right => 0.,
            Side::Top => 90.,
            Side::Left => 180.,
            Side::Bot => 270.,
        }
    }

    /// Converts an angle in degrees into the cardinal direction it points to.
    ///
    /// Returns [`None`] if the angle is not within [`ANGLE_TOLERANCE`]
    /// of a multiple of 90 degrees.
    ///
    /// # Example
    ///
    /// ```
    /// # use waygeom::*;
    /// assert_eq!(Side::from_angle(0.), Some(Side::Right));
    /// assert_eq!(Side::from_angle(-90.), Some(Side::Bot));
    /// assert_eq!(Side::from_angle(450.), Some(Side::Top));
    /// assert_eq!(Side::from_angle(359.9999999999), Some(Side::Right));
    /// assert_eq!(Side::from_angle(45.), None);
    /// ```
    pub fn from_angle(angle: f64) -> Option<Side> {
        if !angle.is_finite() {
            return None;
        }
        let angle = wrap_angle(angle);
        [Side::Right, Side::Top, Side::Left, Side::Bot]
            .into_iter()
            .find(|side| {
                let delta = wrap_angle(angle - side.angle() + 180.) - 180.;
                delta.abs() <= ANGLE_TOLERANCE
            })
    }
}
