//! Indirect bundles: port sets facing away from each other.
//!
//! Each half of the start ports is turned towards a side twice, which leaves
//! both halves facing the same way as the end ports. The remainder is then
//! routed as a direct bundle, and the fragments of every route are stitched.

use waygeom::{Point, Side, POINT_TOLERANCE};

use super::{direct, port_sides, sorted_across, split_cut, split_ports, RoutingRequest};
use crate::error::{ErrorSource, Result};
use crate::log::debug;
use crate::port::Port;
use crate::routing::{SideRouteParams, SideRouter, WaypointRouter};
use crate::waypath::{ConnectionAssembler, Waypath};

/// The two sides each half of the start ports is turned towards.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct SidePlan {
    /// Turns for the ports at or below the cut.
    pub(crate) group1: [Side; 2],
    /// Turns for the ports above the cut.
    pub(crate) group2: [Side; 2],
}

/// Looks up the side plan for start ports facing `start` and end ports facing `end`.
pub(crate) fn side_plan(start: Side, end: Side) -> Option<SidePlan> {
    use Side::*;
    let (group1, group2) = match (start, end) {
        (Right, Left) => ([Top, Left], [Bot, Left]),
        (Left, Right) => ([Top, Right], [Bot, Right]),
        (Top, Bot) => ([Right, Bot], [Left, Bot]),
        (Bot, Top) => ([Right, Top], [Left, Top]),
        _ => return None,
    };
    Some(SidePlan { group1, group2 })
}

/// A route under construction, keyed by the index of its port pair.
struct OpenRoute {
    start: Point,
    fragments: ConnectionAssembler,
}

impl OpenRoute {
    /// Where the next fragment of this route must begin.
    fn cursor(&self) -> Point {
        self.fragments.cursor().unwrap_or(self.start)
    }
}

struct Arena {
    routes: Vec<OpenRoute>,
}

impl Arena {
    fn new(ports1: &[Port]) -> Self {
        Self {
            routes: ports1
                .iter()
                .map(|p| OpenRoute {
                    start: p.position,
                    fragments: ConnectionAssembler::new(),
                })
                .collect(),
        }
    }

    /// Appends each fragment to the route whose cursor it starts from.
    ///
    /// Every route takes at most one fragment per batch.
    fn attach(&mut self, stage: &str, batch: Vec<Waypath>) -> Result<()> {
        let mut taken = vec![false; self.routes.len()];
        for fragment in batch {
            let Some(first) = fragment.first() else {
                return Err(ErrorSource::InvariantViolation(format!(
                    "{stage} produced an empty fragment"
                ))
                .into());
            };
            let owner = self
                .routes
                .iter()
                .enumerate()
                .position(|(i, r)| !taken[i] && r.cursor().approx_eq(&first, POINT_TOLERANCE))
                .ok_or_else(|| {
                    ErrorSource::InvariantViolation(format!(
                        "{stage} produced a fragment starting at {first}, which continues no open route"
                    ))
                })?;
            taken[owner] = true;
            self.routes[owner].fragments.push(fragment);
        }
        Ok(())
    }

    fn assemble(self) -> Result<Vec<Waypath>> {
        self.routes
            .iter()
            .map(|r| r.fragments.assemble())
            .collect()
    }
}

pub(crate) fn route<W: WaypointRouter, S: SideRouter>(
    waypoint: &W,
    side_router: &S,
    bend_radius: f64,
    request: &RoutingRequest,
    extension_length: f64,
) -> Result<Vec<Waypath>> {
    let ports1 = &request.ports1;
    let ports2 = &request.ports2;
    super::check_counts(ports1, ports2)?;
    let (side1, side2) = port_sides(ports1, ports2)?;
    let plan = side_plan(side1, side2).ok_or_else(|| ErrorSource::UnsupportedConfiguration {
        start: ports1[0].orientation,
        end: ports2[0].orientation,
    })?;

    let axis = super::resolve_axis(side1);
    let cut = split_cut(ports2, axis).ok_or_else(|| {
        ErrorSource::InvariantViolation("end ports have no extent".to_string())
    })?;
    let (group1, group2) = split_ports(ports1, axis, cut);
    debug!(
        "indirect bundle of {} pairs: cut at {}, {} ports turn {:?}, {} ports turn {:?}",
        ports1.len(),
        cut,
        group1.len(),
        plan.group1,
        group2.len(),
        plan.group2
    );

    let params = SideRouteParams {
        separation: request.separation,
        bend_radius,
    };
    let mut arena = Arena::new(ports1);

    let first1 = side_router.route_to_side(
        &group1.ports(),
        plan.group1[0],
        extension_length,
        &params,
    )?;
    let first2 = side_router.route_to_side(
        &group2.ports(),
        plan.group2[0],
        extension_length,
        &params,
    )?;
    arena.attach("first side routing pass", concat(&first1.fragments, &first2.fragments))?;

    let second1 = side_router.route_to_side(&first1.ports, plan.group1[1], 0., &params)?;
    let second2 = side_router.route_to_side(&first2.ports, plan.group2[1], 0., &params)?;
    arena.attach(
        "second side routing pass",
        concat(&second1.fragments, &second2.fragments),
    )?;

    let ends = sorted_across(ports2, axis);
    let (ends1, ends2) = ends.split_at(second1.ports.len());
    let mut batch = Vec::with_capacity(ports1.len());
    for (starts, ends) in [(&second1.ports, ends1), (&second2.ports, ends2)] {
        if starts.is_empty() {
            continue;
        }
        batch.extend(direct::route(
            waypoint,
            bend_radius,
            starts,
            ends,
            request.separation,
            request.start_straight_length,
            request.end_straight_length,
        )?);
    }
    arena.attach("direct routing pass", batch)?;

    arena.assemble()
}

fn concat(a: &[Waypath], b: &[Waypath]) -> Vec<Waypath> {
    a.iter().chain(b).cloned().collect()
}
