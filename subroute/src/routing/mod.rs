//! Routing of port bundles and the single-port routers they are built from.

use serde::{Deserialize, Serialize};
use waygeom::Side;

use crate::error::Result;
use crate::port::Port;
use crate::waypath::Waypath;

pub mod bundle;
pub mod manual;
pub mod tracks;

/// Computes one Manhattan path between a pair of ports.
pub trait WaypointRouter {
    /// Routes `start` to `end`.
    ///
    /// The path leaves `start` along its orientation for at least
    /// `start_straight + bend_radius` before the first corner, and enters `end`
    /// against its orientation after at least `end_straight + bend_radius`
    /// past the last corner.
    fn route_pair(
        &self,
        start: &Port,
        end: &Port,
        start_straight: f64,
        end_straight: f64,
        bend_radius: f64,
    ) -> Result<Waypath>;
}

/// Parameters shared by every port in one side-routing pass.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideRouteParams {
    pub separation: f64,
    pub bend_radius: f64,
}

/// The result of extending a group of ports towards a side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideRoute {
    /// One path fragment per port, in no particular order.
    pub fragments: Vec<Waypath>,
    /// The new frontier ports, facing the requested side.
    pub ports: Vec<Port>,
}

/// Extends a group of same-orientation ports towards one of four sides.
pub trait SideRouter {
    fn route_to_side(
        &self,
        ports: &[Port],
        side: Side,
        extension_length: f64,
        params: &SideRouteParams,
    ) -> Result<SideRoute>;
}

impl<T: WaypointRouter + ?Sized> WaypointRouter for &T {
    fn route_pair(
        &self,
        start: &Port,
        end: &Port,
        start_straight: f64,
        end_straight: f64,
        bend_radius: f64,
    ) -> Result<Waypath> {
        (**self).route_pair(start, end, start_straight, end_straight, bend_radius)
    }
}

impl<T: SideRouter + ?Sized> SideRouter for &T {
    fn route_to_side(
        &self,
        ports: &[Port],
        side: Side,
        extension_length: f64,
        params: &SideRouteParams,
    ) -> Result<SideRoute> {
        (**self).route_to_side(ports, side, extension_length, params)
    }
}
