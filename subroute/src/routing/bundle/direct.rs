//! Direct bundles: facing or same-orientation port sets, routed pairwise on a staircase.

use waygeom::{Side, Sign};

use super::{check_counts, port_sides, sorted_across, split_cut, split_ports, PortGroup};
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::log::{debug, trace};
use crate::port::Port;
use crate::routing::tracks::UniformTracks;
use crate::routing::WaypointRouter;
use crate::waypath::Waypath;

/// Routes `ports1[i]` to its partner in `ports2` for every `i`.
///
/// The returned paths are index-aligned with `ports1`. Pairing is by rank
/// across the bundle axis, so the caller is responsible for checking that
/// route `i` ends where it expects.
pub(crate) fn route<W: WaypointRouter>(
    waypoint: &W,
    bend_radius: f64,
    ports1: &[Port],
    ports2: &[Port],
    separation: f64,
    start_straight: f64,
    end_straight: f64,
) -> Result<Vec<Waypath>> {
    check_counts(ports1, ports2)?;
    let (side1, side2) = port_sides(ports1, ports2)?;
    if !side1.is_parallel(side2) {
        return Err(ErrorSource::UnsupportedConfiguration {
            start: ports1[0].orientation,
            end: ports2[0].orientation,
        }
        .into());
    }
    let axis = super::resolve_axis(side1);
    let facing = side2 == !side1;

    let cut = split_cut(ports2, axis).ok_or_else(|| {
        ErrorSource::InvariantViolation("end ports have no extent".to_string())
    })?;
    let (mut group1, mut group2) = split_ports(ports1, axis, cut);
    debug!(
        "direct bundle of {} pairs along the {} axis: cut at {}, groups of {} and {}",
        ports1.len(),
        axis,
        cut,
        group1.len(),
        group2.len()
    );

    let ends = sorted_across(ports2, axis);
    let (ends1, ends2) = ends.split_at(group1.len());
    let mut ends1 = ends1.to_vec();
    let mut ends2 = ends2.to_vec();

    // Tracks nearest the cut come first. Facing sets pair by rank; U-shaped
    // sets pair the innermost start with the innermost end to nest the turns.
    group1.sort(axis, true);
    group2.sort(axis, false);
    if facing {
        ends1.reverse();
    } else {
        ends2.reverse();
    }

    let (start_straight, end_straight) =
        clearances(ports1, ports2, side1, facing, start_straight, end_straight);
    trace!("base straight lengths: start {start_straight}, end {end_straight}");
    let starts = Staircase::new(ports1, side1, start_straight, separation);
    let stops = Staircase::new(ports2, side2, end_straight, separation);

    let mut routes: Vec<Option<Waypath>> = vec![None; ports1.len()];
    for (group, ends) in [(&group1, &ends1), (&group2, &ends2)] {
        route_group(waypoint, bend_radius, group, ends, &starts, &stops, &mut routes)?;
    }

    routes
        .into_iter()
        .enumerate()
        .map(|(i, route)| {
            route.ok_or_else(|| {
                ErrorSource::InvariantViolation(format!("no route produced for pair {i}")).into()
            })
        })
        .collect()
}

/// How far `port` lies towards `side`.
fn depth(port: &Port, side: Side) -> f64 {
    side.sign().as_f64() * port.coord(side.coord_dir())
}

/// Straight lengths for one port set, measured from the outermost port of the set.
///
/// Track `k` sits `base + k * separation` beyond the outermost port, so
/// ports set back from the edge get a correspondingly longer straight and
/// every route of a pass turns on a common staircase.
#[derive(Debug, Copy, Clone)]
struct Staircase {
    side: Side,
    reach: f64,
    tracks: UniformTracks,
}

impl Staircase {
    fn new(ports: &[Port], side: Side, base: f64, separation: f64) -> Self {
        let reach = ports
            .iter()
            .map(|p| depth(p, side))
            .fold(f64::NEG_INFINITY, f64::max);
        Self {
            side,
            reach,
            tracks: UniformTracks {
                start: base,
                pitch: separation,
                sign: Sign::Pos,
            },
        }
    }

    /// The straight length `port` needs to reach track `k`.
    fn length(&self, port: &Port, k: usize) -> f64 {
        self.tracks.index(k) + (self.reach - depth(port, self.side))
    }
}

/// Extends the base straight lengths so that every path clears the far port set.
fn clearances(
    ports1: &[Port],
    ports2: &[Port],
    side1: Side,
    facing: bool,
    start_straight: f64,
    end_straight: f64,
) -> (f64, f64) {
    let extent = |ports: &[Port]| -> (f64, f64) {
        ports.iter().map(|p| depth(p, side1)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        )
    };
    let (_, start_max) = extent(ports1);
    let (end_min, end_max) = extent(ports2);

    if facing {
        (start_straight, end_straight.max(start_max - end_min))
    } else {
        // Both staircases turn back beyond whichever set reaches further.
        (
            start_straight.max(end_max - start_max),
            end_straight.max(start_max - end_max),
        )
    }
}

fn route_group<W: WaypointRouter>(
    waypoint: &W,
    bend_radius: f64,
    group: &PortGroup,
    ends: &[Port],
    starts: &Staircase,
    stops: &Staircase,
    routes: &mut [Option<Waypath>],
) -> Result<()> {
    for (k, ((index, start), end)) in group.iter().zip(ends).enumerate() {
        let (s, e) = (starts.length(start, k), stops.length(end, k));
        trace!("track {k}: {} -> {} with straights {s} and {e}", start.id, end.id);
        let path = with_err_context(
            waypoint.route_pair(start, end, s, e, bend_radius),
            || ErrorContext::RoutePair {
                start: start.id.clone(),
                end: end.id.clone(),
                start_straight: s,
                end_straight: e,
            },
        )?;
        routes[index] = Some(path);
    }
    Ok(())
}
