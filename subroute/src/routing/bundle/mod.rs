//! Routing of port bundles.
//!
//! A bundle connects `ports1[i]` to `ports2[i]` for every `i` with
//! non-crossing Manhattan paths whose parallel tracks are spaced
//! by at least the requested separation.
//!
//! Two configurations are supported:
//! * **Direct**: the two port sets either face each other or face the same way
//!   with the end ports reachable by a single U-turn. See [`BundleRouter::route_direct`].
//! * **Indirect**: the two port sets face opposite ways but away from each other.
//!   Each half of the start ports is first turned towards a side twice,
//!   after which the remaining problem is direct. See [`BundleRouter::route_indirect`].

use std::cmp::Ordering;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use waygeom::bbox::{Bbox, BoundBox};
use waygeom::{Dir, Side, POINT_TOLERANCE};

use crate::config::RouterConfig;
use crate::error::{with_err_context, ErrorContext, ErrorSource, Result};
use crate::log::debug;
use crate::port::{uniform_side, Port};
use crate::routing::manual::{ManhattanRouter, SideJogRouter};
use crate::routing::{SideRouter, WaypointRouter};
use crate::waypath::Waypath;

mod direct;
mod indirect;

#[cfg(test)]
mod tests;

/// The inputs of one bundle routing call.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct RoutingRequest {
    #[builder(setter(into))]
    pub ports1: Vec<Port>,
    #[builder(setter(into))]
    pub ports2: Vec<Port>,
    /// Minimum spacing between parallel tracks.
    #[builder(default = "5.0")]
    pub separation: f64,
    #[builder(default = "0.01")]
    pub start_straight_length: f64,
    #[builder(default = "0.01")]
    pub end_straight_length: f64,
    /// Extra clearance of the first side-routing pass of an indirect bundle.
    #[builder(default = "0.0")]
    pub extension_length: f64,
}

impl RoutingRequestBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(separation) = self.separation {
            if !(separation.is_finite() && separation > 0.) {
                return Err(format!("separation must be positive, got {separation}"));
            }
        }
        for (name, value) in [
            ("start_straight_length", self.start_straight_length),
            ("end_straight_length", self.end_straight_length),
            ("extension_length", self.extension_length),
        ] {
            if let Some(value) = value {
                if !(value.is_finite() && value >= 0.) {
                    return Err(format!("{name} must be non-negative, got {value}"));
                }
            }
        }
        Ok(())
    }
}

impl RoutingRequest {
    #[inline]
    pub fn builder() -> RoutingRequestBuilder {
        RoutingRequestBuilder::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ports1.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ports1.is_empty()
    }

    /// Checks the request before any routing is attempted.
    ///
    /// Returns the sides faced by `ports1` and `ports2`.
    pub fn validate(&self) -> Result<(Side, Side)> {
        check_counts(&self.ports1, &self.ports2)?;
        if !(self.separation.is_finite() && self.separation > 0.) {
            return Err(ErrorSource::InvalidInput(format!(
                "separation must be positive, got {}",
                self.separation
            ))
            .into());
        }
        for (name, value) in [
            ("start straight length", self.start_straight_length),
            ("end straight length", self.end_straight_length),
            ("extension length", self.extension_length),
        ] {
            if !(value.is_finite() && value >= 0.) {
                return Err(ErrorSource::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {value}"
                ))
                .into());
            }
        }
        port_sides(&self.ports1, &self.ports2)
    }
}

/// Checks that both port sets have the same, non-zero length.
pub(crate) fn check_counts(ports1: &[Port], ports2: &[Port]) -> Result<()> {
    if ports1.len() != ports2.len() {
        return Err(ErrorSource::CountMismatch {
            ports1: ports1.len(),
            ports2: ports2.len(),
        }
        .into());
    }
    if ports1.is_empty() {
        return Err(ErrorSource::InvalidInput("a bundle needs at least one port pair".into()).into());
    }
    Ok(())
}

/// The sides shared by each port set.
pub(crate) fn port_sides(ports1: &[Port], ports2: &[Port]) -> Result<(Side, Side)> {
    let side1 = uniform_side(ports1, "ports1")?;
    let side2 = uniform_side(ports2, "ports2")?;
    match (side1, side2) {
        (Some(side1), Some(side2)) => Ok((side1, side2)),
        _ => Err(ErrorSource::InvalidInput("a bundle needs at least one port pair".into()).into()),
    }
}

/// Routed paths, index-aligned with the caller's port pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleResult(Vec<Waypath>);

impl BundleResult {
    #[inline]
    pub fn routes(&self) -> &[Waypath] {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> Vec<Waypath> {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypath> {
        self.0.iter()
    }

    /// Serializes the routes as a JSON array of point arrays.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::ops::Index<usize> for BundleResult {
    type Output = Waypath;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for BundleResult {
    type Item = Waypath;
    type IntoIter = std::vec::IntoIter<Waypath>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BundleResult {
    type Item = &'a Waypath;
    type IntoIter = std::slice::Iter<'a, Waypath>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The principal axis of a bundle whose start ports face `side`.
///
/// Ports facing east or west give a [`Dir::Horiz`] bundle whose tracks are
/// separated in y; ports facing north or south give a [`Dir::Vert`] bundle.
#[inline]
pub fn resolve_axis(side: Side) -> Dir {
    side.coord_dir()
}

/// The axis of the bundle starting at `port`.
///
/// Returns an [`ErrorSource::InvalidInput`] error for non-cardinal orientations.
pub fn port_axis(port: &Port) -> Result<Dir> {
    Ok(resolve_axis(port.side()?))
}

/// The midpoint of the extent of `ports` perpendicular to `axis`.
///
/// Returns [`None`] if `ports` is empty.
pub fn split_cut(ports: &[Port], axis: Dir) -> Option<f64> {
    let bbox = Bbox::from_points(ports.iter().map(|p| p.position));
    bbox.span(!axis).map(|span| span.center())
}

/// Ports of one set, tagged with their index in that set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortGroup {
    members: Vec<(usize, Port)>,
}

impl PortGroup {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Port)> {
        self.members.iter().map(|(i, p)| (*i, p))
    }

    pub fn indices(&self) -> Vec<usize> {
        self.members.iter().map(|(i, _)| *i).collect()
    }

    pub fn ports(&self) -> Vec<Port> {
        self.members.iter().map(|(_, p)| p.clone()).collect()
    }

    /// Sorts the group by the coordinate perpendicular to `axis`.
    pub(crate) fn sort(&mut self, axis: Dir, descending: bool) {
        self.members.sort_by(|(_, a), (_, b)| {
            let ord = cmp_coord(a, b, !axis);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

/// Splits `ports` about `cut`, perpendicular to `axis`.
///
/// Ports at or below the cut go to the first group, the rest to the second.
/// Input order is preserved within each group.
pub fn split_ports(ports: &[Port], axis: Dir, cut: f64) -> (PortGroup, PortGroup) {
    let mut low = PortGroup::default();
    let mut high = PortGroup::default();
    for (i, port) in ports.iter().enumerate() {
        if port.coord(!axis) <= cut {
            low.members.push((i, port.clone()));
        } else {
            high.members.push((i, port.clone()));
        }
    }
    (low, high)
}

pub(crate) fn cmp_coord(a: &Port, b: &Port, dir: Dir) -> Ordering {
    a.coord(dir)
        .partial_cmp(&b.coord(dir))
        .unwrap_or(Ordering::Equal)
}

/// Returns a copy of `ports` sorted by the coordinate perpendicular to `axis`.
pub(crate) fn sorted_across(ports: &[Port], axis: Dir) -> Vec<Port> {
    let mut out = ports.to_vec();
    out.sort_by(|a, b| cmp_coord(a, b, !axis));
    out
}

/// Routes bundles using a single-pair router and a side router.
#[derive(Debug, Clone)]
pub struct BundleRouter<W = ManhattanRouter, S = SideJogRouter> {
    config: RouterConfig,
    waypoint: W,
    side: S,
}

impl Default for BundleRouter {
    fn default() -> Self {
        Self::with_config(RouterConfig::default())
    }
}

impl BundleRouter {
    pub fn with_config(config: RouterConfig) -> Self {
        Self::new(config, ManhattanRouter, SideJogRouter)
    }
}

impl<W, S> BundleRouter<W, S> {
    pub fn new(config: RouterConfig, waypoint: W, side: S) -> Self {
        Self {
            config,
            waypoint,
            side,
        }
    }

    #[inline]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    #[inline]
    pub fn bend_radius(&self) -> f64 {
        self.config.bend_radius
    }

    /// Builds a request for the given ports from this router's configuration.
    pub fn request(&self, ports1: Vec<Port>, ports2: Vec<Port>) -> RoutingRequest {
        self.config.request(ports1, ports2)
    }
}

impl<W: WaypointRouter, S: SideRouter> BundleRouter<W, S> {
    /// Routes port sets that face each other, or face the same way.
    ///
    /// Route `i` of the result connects `request.ports1[i]` to `request.ports2[i]`.
    pub fn route_direct(&self, request: &RoutingRequest) -> Result<BundleResult> {
        let ctx = || ErrorContext::RouteDirect {
            num_pairs: request.len(),
        };
        with_err_context(request.validate(), ctx)?;
        let routes = with_err_context(
            direct::route(
                &self.waypoint,
                self.bend_radius(),
                &request.ports1,
                &request.ports2,
                request.separation,
                request.start_straight_length,
                request.end_straight_length,
            ),
            ctx,
        )?;
        let result = BundleResult(routes);
        with_err_context(validate_connections(request, &result), ctx)?;
        Ok(result)
    }

    /// Routes port sets that face opposite ways but away from each other.
    ///
    /// `extension_length` is the extra clearance of the first side-routing pass.
    pub fn route_indirect(
        &self,
        request: &RoutingRequest,
        extension_length: f64,
    ) -> Result<BundleResult> {
        let ctx = || ErrorContext::RouteIndirect {
            num_pairs: request.len(),
        };
        with_err_context(request.validate(), ctx)?;
        if !(extension_length.is_finite() && extension_length >= 0.) {
            return with_err_context(
                Err(ErrorSource::InvalidInput(format!(
                    "extension length must be finite and non-negative, got {extension_length}"
                ))),
                ctx,
            );
        }
        let routes = with_err_context(
            indirect::route(
                &self.waypoint,
                &self.side,
                self.bend_radius(),
                request,
                extension_length,
            ),
            ctx,
        )?;
        let result = BundleResult(routes);
        with_err_context(validate_connections(request, &result), ctx)?;
        Ok(result)
    }

    /// Routes a bundle, choosing between direct and indirect routing.
    pub fn route_bundle(&self, request: &RoutingRequest) -> Result<BundleResult> {
        let (side1, side2) = with_err_context(request.validate(), || {
            ErrorContext::Task(arcstr::literal!("selecting a bundle router"))
        })?;
        if side1 == side2 {
            debug!("ports face the same way; routing a direct bundle");
            self.route_direct(request)
        } else if side1 == !side2 {
            if ends_ahead(request, side1) {
                debug!("ports face each other; routing a direct bundle");
                self.route_direct(request)
            } else {
                debug!("ports face away from each other; routing an indirect bundle");
                self.route_indirect(request, request.extension_length)
            }
        } else {
            Err(ErrorSource::UnsupportedConfiguration {
                start: request.ports1[0].orientation,
                end: request.ports2[0].orientation,
            }
            .into())
        }
    }
}

/// Returns `true` if every end port lies strictly beyond every start port towards `side`.
fn ends_ahead(request: &RoutingRequest, side: Side) -> bool {
    let dir = side.coord_dir();
    let sign = side.sign().as_f64();
    let starts = request.ports1.iter().map(|p| sign * p.coord(dir));
    let ends = request.ports2.iter().map(|p| sign * p.coord(dir));
    ends.fold(f64::INFINITY, f64::min) > starts.fold(f64::NEG_INFINITY, f64::max)
}

/// Routes a direct bundle with the default routers and configuration.
pub fn route_direct(request: &RoutingRequest) -> Result<BundleResult> {
    BundleRouter::default().route_direct(request)
}

/// Routes an indirect bundle with the default routers and configuration.
pub fn route_indirect(request: &RoutingRequest, extension_length: f64) -> Result<BundleResult> {
    BundleRouter::default().route_indirect(request, extension_length)
}

/// Routes a bundle with the default routers and configuration.
pub fn route_bundle(request: &RoutingRequest) -> Result<BundleResult> {
    BundleRouter::default().route_bundle(request)
}

/// Checks that route `i` runs from `ports1[i]` to `ports2[i]`.
pub fn validate_connections(request: &RoutingRequest, result: &BundleResult) -> Result<()> {
    if result.len() != request.len() {
        return Err(ErrorSource::InvariantViolation(format!(
            "expected {} routes, got {}",
            request.len(),
            result.len()
        ))
        .into());
    }
    for (i, route) in result.iter().enumerate() {
        let start = &request.ports1[i];
        let expected = &request.ports2[i];
        let (Some(first), Some(last)) = (route.first(), route.last()) else {
            return Err(ErrorSource::InvariantViolation(format!(
                "route from {} is empty",
                start.id
            ))
            .into());
        };
        if !first.approx_eq(&start.position, POINT_TOLERANCE) {
            return Err(ErrorSource::InvariantViolation(format!(
                "route {i} starts at {first} instead of port {} at {}",
                start.id, start.position
            ))
            .into());
        }
        if last.approx_eq(&expected.position, POINT_TOLERANCE) {
            continue;
        }
        return Err(
            match request
                .ports2
                .iter()
                .find(|p| last.approx_eq(&p.position, POINT_TOLERANCE))
            {
                Some(actual) => ErrorSource::PairingMismatch {
                    start: start.id.clone(),
                    expected: expected.id.clone(),
                    actual: actual.id.clone(),
                },
                None => ErrorSource::InvariantViolation(format!(
                    "route from {} ends at {last}, which is not an end port",
                    start.id
                )),
            }
            .into(),
        );
    }
    Ok(())
}

/// The minimum spacing needed to fan `ports1` out to `ports2`.
///
/// Both sets are sorted across the bundle axis and walked pairwise;
/// the spread of the running count of rising and falling pairs
/// determines how many tracks are stacked side by side.
pub fn min_spacing(ports1: &[Port], ports2: &[Port], separation: f64, radius: f64) -> Result<f64> {
    check_counts(ports1, ports2)?;
    let axis = port_axis(&ports1[0])?;
    let starts = sorted_across(ports1, axis);
    let ends = sorted_across(ports2, axis);

    let (mut j, mut min_j, mut max_j) = (0i64, 0i64, 0i64);
    for (start, end) in starts.iter().zip(&ends) {
        if end.coord(!axis) >= start.coord(!axis) {
            j += 1;
        } else {
            j -= 1;
        }
        min_j = min_j.min(j);
        max_j = max_j.max(j);
    }
    Ok((max_j - min_j) as f64 * separation + 2. * radius + 1.0)
}

impl BoundBox for BundleResult {
    fn bbox(&self) -> Bbox {
        self.0.as_slice().bbox()
    }
}
