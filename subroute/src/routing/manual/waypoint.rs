//! Point-to-point Manhattan jogs.

use waygeom::{Point, Side, POINT_TOLERANCE};

use crate::error::{ErrorSource, Result};
use crate::log::trace;
use crate::port::Port;
use crate::routing::WaypointRouter;
use crate::waypath::Waypath;

/// The shape of a single point-to-point route.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum JogKind {
    /// No corners.
    Straight,
    /// Two corners between facing ports on different lines.
    Offset,
    /// Two corners between ports facing the same way.
    UTurn,
    /// One corner between perpendicular ports.
    Elbow,
    /// Three corners between perpendicular ports.
    DoubleElbow,
}

/// Routes port pairs using at most three right-angle corners.
///
/// Every corner is assumed to be drawn with radius `bend_radius`,
/// so a leg between two corners must be at least `2 * bend_radius` long.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ManhattanRouter;

impl ManhattanRouter {
    pub fn new() -> Self {
        Self
    }

    /// Computes the jog shape and corner points from `start` to `end`.
    pub fn jog(
        &self,
        start: &Port,
        end: &Port,
        start_straight: f64,
        end_straight: f64,
        bend_radius: f64,
    ) -> Result<(JogKind, Waypath)> {
        for (name, value) in [
            ("start straight length", start_straight),
            ("end straight length", end_straight),
            ("bend radius", bend_radius),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(ErrorSource::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {value}"
                ))
                .into());
            }
        }

        let jog = Jog {
            start,
            end,
            u: start.side()?,
            end_side: end.side()?,
            lead_in: start_straight + bend_radius,
            lead_out: end_straight + bend_radius,
            radius: bend_radius,
        };

        let res = if jog.end_side == !jog.u {
            jog.facing()
        } else if jog.end_side == jog.u {
            jog.u_turn()
        } else {
            jog.elbow()
        }?;
        trace!(
            "routed {} to {} as {:?} with {} points",
            start.id,
            end.id,
            res.0,
            res.1.len()
        );
        Ok(res)
    }
}

impl WaypointRouter for ManhattanRouter {
    fn route_pair(
        &self,
        start: &Port,
        end: &Port,
        start_straight: f64,
        end_straight: f64,
        bend_radius: f64,
    ) -> Result<Waypath> {
        let (_, path) = self.jog(start, end, start_straight, end_straight, bend_radius)?;
        Ok(path)
    }
}

struct Jog<'a> {
    start: &'a Port,
    end: &'a Port,
    /// The direction the start port faces.
    u: Side,
    /// The direction the end port faces.
    end_side: Side,
    /// Minimum length of the first leg.
    lead_in: f64,
    /// Minimum length of the last leg.
    lead_out: f64,
    radius: f64,
}

impl<'a> Jog<'a> {
    fn p1(&self) -> Point {
        self.start.position
    }

    fn p2(&self) -> Point {
        self.end.position
    }

    fn fail(&self, reason: String) -> crate::error::RoutingError {
        ErrorSource::RoutingFailure {
            start: self.start.id.clone(),
            end: self.end.id.clone(),
            reason,
        }
        .into()
    }

    fn check_leg(&self, what: &str, len: f64, min: f64) -> Result<()> {
        if len < min - POINT_TOLERANCE {
            Err(self.fail(format!("{what} is {len}, which is shorter than {min}")))
        } else {
            Ok(())
        }
    }

    /// Lateral offset of the end port relative to the start, perpendicular to `u`.
    fn lateral(&self) -> f64 {
        let dir = self.u.edge_dir();
        self.p2().coord(dir) - self.p1().coord(dir)
    }

    fn facing(&self) -> Result<(JogKind, Waypath)> {
        let (p1, p2) = (self.p1(), self.p2());
        let ahead = self.u.advance(p1, p2);
        let lateral = self.lateral();

        if lateral.abs() <= POINT_TOLERANCE {
            if ahead < -POINT_TOLERANCE {
                return Err(self.fail(format!(
                    "end port lies {} behind the start port",
                    -ahead
                )));
            }
            return Ok((JogKind::Straight, Waypath::new(vec![p1, p2])));
        }

        self.check_leg("lateral offset", lateral.abs(), 2. * self.radius)?;
        let c1 = p1.step(self.u, self.lead_in);
        let c2 = c1.with_coord(self.u.edge_dir(), p2.coord(self.u.edge_dir()));
        self.check_leg("final leg", self.u.advance(c2, p2), self.lead_out)?;
        Ok((JogKind::Offset, Waypath::new(vec![p1, c1, c2, p2])))
    }

    fn u_turn(&self) -> Result<(JogKind, Waypath)> {
        let (p1, p2) = (self.p1(), self.p2());
        self.check_leg("lateral offset", self.lateral().abs(), 2. * self.radius)?;

        let dir = self.u.coord_dir();
        let sign = self.u.sign().as_f64();
        let turn = sign * f64::max(
            sign * p1.coord(dir) + self.lead_in,
            sign * p2.coord(dir) + self.lead_out,
        );
        let c1 = p1.with_coord(dir, turn);
        let c2 = p2.with_coord(dir, turn);
        Ok((JogKind::UTurn, Waypath::new(vec![p1, c1, c2, p2])))
    }

    fn elbow(&self) -> Result<(JogKind, Waypath)> {
        let (p1, p2) = (self.p1(), self.p2());
        let dir = self.u.coord_dir();
        let into_end = !self.end_side;

        let corner = p1.with_coord(dir, p2.coord(dir));
        let first = self.u.advance(p1, corner);
        let last = into_end.advance(corner, p2);
        if first >= self.lead_in - POINT_TOLERANCE && last >= self.lead_out - POINT_TOLERANCE {
            return Ok((JogKind::Elbow, Waypath::new(vec![p1, corner, p2])));
        }

        let c1 = p1.step(self.u, self.lead_in);
        let c3 = p2.step(self.end_side, self.lead_out);
        let c2 = c1.with_coord(!dir, c3.coord(!dir));
        self.check_leg(
            "second leg",
            (c2.coord(!dir) - c1.coord(!dir)).abs(),
            2. * self.radius,
        )?;
        self.check_leg(
            "third leg",
            (c3.coord(dir) - c2.coord(dir)).abs(),
            2. * self.radius,
        )?;
        Ok((JogKind::DoubleElbow, Waypath::new(vec![p1, c1, c2, c3, p2])))
    }
}
