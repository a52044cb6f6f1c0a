//! Fanning groups of ports out towards a side.

use std::cmp::Ordering;

use itertools::Itertools;
use waygeom::{Side, Sides};

use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::log::debug;
use crate::port::{uniform_side, Port};
use crate::routing::tracks::UniformTracks;
use crate::routing::{SideRoute, SideRouteParams, SideRouter};
use crate::waypath::Waypath;

/// Extends same-orientation ports towards a side with at most one corner each.
///
/// Ports facing the requested side are run straight out to a common frontier.
/// Ports facing perpendicular to it are turned on a staircase of tracks,
/// the port nearest the side turning first, so that no two fragments cross.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SideJogRouter;

impl SideJogRouter {
    pub fn new() -> Self {
        Self
    }

    fn route(
        &self,
        ports: &[Port],
        side: Side,
        extension_length: f64,
        params: &SideRouteParams,
    ) -> Result<SideRoute> {
        let Some(facing) = uniform_side(ports, "side-routed ports")? else {
            return Ok(SideRoute::default());
        };
        if !extension_length.is_finite() || extension_length < 0. {
            return Err(ErrorSource::InvalidInput(format!(
                "extension length must be finite and non-negative, got {extension_length}"
            ))
            .into());
        }

        let reach = reach(ports);
        if facing == side {
            return Ok(extend(ports, side, reach[side] + extension_length));
        }
        if facing == !side {
            return Err(ErrorSource::InvalidInput(format!(
                "ports facing {facing} cannot be routed to the {side} without a U-turn"
            ))
            .into());
        }

        let turns = UniformTracks {
            start: facing.sign().as_f64()
                * (reach[facing] + extension_length + params.bend_radius),
            pitch: params.separation,
            sign: facing.sign(),
        };
        let frontier = side.sign().as_f64() * (reach[side] + params.bend_radius);
        debug!(
            "routing {} ports facing {} to the {}: first turn at {}, frontier at {}",
            ports.len(),
            facing,
            side,
            turns.start,
            frontier
        );

        let ranked = ports.iter().sorted_by(|a, b| {
            let (a, b) = (
                side.sign().as_f64() * a.coord(side.coord_dir()),
                side.sign().as_f64() * b.coord(side.coord_dir()),
            );
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });

        let mut out = SideRoute::default();
        for (port, turn) in ranked.zip(turns.iter()) {
            let corner = port.position.with_coord(facing.coord_dir(), turn);
            let end = corner.with_coord(side.coord_dir(), frontier);
            out.fragments
                .push(Waypath::new(vec![port.position, corner, end]));
            out.ports.push(port.moved_to(end, side));
        }
        Ok(out)
    }
}

/// The outermost coordinate of `ports` towards each side,
/// measured positively in the direction of that side.
fn reach(ports: &[Port]) -> Sides<f64> {
    let mut out = Sides::uniform(f64::NEG_INFINITY);
    for port in ports {
        for side in [Side::Top, Side::Right, Side::Bot, Side::Left] {
            let coord = side.sign().as_f64() * port.coord(side.coord_dir());
            out[side] = out[side].max(coord);
        }
    }
    out
}

/// Runs ports that already face `side` straight out to the frontier `reach`.
fn extend(ports: &[Port], side: Side, reach: f64) -> SideRoute {
    let dir = side.coord_dir();
    let frontier = side.sign().as_f64() * reach;

    let mut out = SideRoute::default();
    for port in ports {
        let end = port.position.with_coord(dir, frontier);
        out.fragments.push(Waypath::new(vec![port.position, end]));
        out.ports.push(port.moved_to(end, side));
    }
    out
}

impl SideRouter for SideJogRouter {
    fn route_to_side(
        &self,
        ports: &[Port],
        side: Side,
        extension_length: f64,
        params: &SideRouteParams,
    ) -> Result<SideRoute> {
        with_err_context(
            self.route(ports, side, extension_length, params),
            || ErrorContext::SideRoute {
                side,
                num_ports: ports.len(),
            },
        )
    }
}
