#![allow(dead_code)]

use std::path::PathBuf;

use float_eq::float_eq;
use subroute::waygeom::{Dir, Point};
use subroute::{BundleResult, Port, RoutingRequest, Waypath};

pub const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tests");

pub const TOL: f64 = 1e-9;

/// Returns the path to the router config TOML file with the given name.
pub fn config_path(name: &str) -> PathBuf {
    PathBuf::from(DATA_DIR).join(format!("configs/{name}.toml"))
}

/// Ports stacked along y at a fixed x.
pub fn row(prefix: &str, x: f64, ys: &[f64], orientation: f64) -> Vec<Port> {
    ys.iter()
        .map(|&y| Port::new(format!("{prefix}{y}"), (x, y), orientation))
        .collect()
}

/// Ports spread along x at a fixed y.
pub fn column(prefix: &str, y: f64, xs: &[f64], orientation: f64) -> Vec<Port> {
    xs.iter()
        .map(|&x| Port::new(format!("{prefix}{x}"), (x, y), orientation))
        .collect()
}

pub fn request(ports1: Vec<Port>, ports2: Vec<Port>) -> RoutingRequest {
    RoutingRequest::builder()
        .ports1(ports1)
        .ports2(ports2)
        .build()
        .unwrap()
}

/// Asserts that route `i` runs from `ports1[i]` to `ports2[i]` along axis-aligned segments.
pub fn assert_endpoints(request: &RoutingRequest, result: &BundleResult) {
    assert_eq!(result.len(), request.ports1.len());
    for (i, route) in result.iter().enumerate() {
        assert!(route.len() >= 2, "route {i} has fewer than two points");
        assert!(route.is_manhattan(), "route {i} is not Manhattan: {route:?}");
        assert_eq!(route.first().unwrap(), request.ports1[i].position);
        assert_eq!(route.last().unwrap(), request.ports2[i].position);
    }
}

pub fn assert_points_eq(actual: &Waypath, expected: &Waypath) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} != {expected:?}");
    for (a, e) in actual.points().iter().zip(expected.points()) {
        assert!(
            float_eq!(a.x, e.x, abs <= TOL) && float_eq!(a.y, e.y, abs <= TOL),
            "{actual:?} != {expected:?}"
        );
    }
}

/// An axis-aligned segment: its direction, its fixed coordinate, and the span it covers.
struct Segment {
    dir: Dir,
    pos: f64,
    lo: f64,
    hi: f64,
}

fn segments(route: &Waypath) -> Vec<Segment> {
    route
        .segments()
        .filter(|(a, b)| a != b)
        .map(|(a, b)| {
            let dir = if (a.y - b.y).abs() <= TOL {
                Dir::Horiz
            } else {
                Dir::Vert
            };
            let (pa, pb) = (a.coord(dir), b.coord(dir));
            Segment {
                dir,
                pos: a.coord(!dir),
                lo: pa.min(pb),
                hi: pa.max(pb),
            }
        })
        .collect()
}

fn touches(a: &Segment, b: &Segment) -> bool {
    if a.dir == b.dir {
        (a.pos - b.pos).abs() <= TOL && a.lo <= b.hi + TOL && b.lo <= a.hi + TOL
    } else {
        a.lo - TOL <= b.pos && b.pos <= a.hi + TOL && b.lo - TOL <= a.pos && a.pos <= b.hi + TOL
    }
}

/// Asserts that no two routes share a point.
pub fn assert_no_crossings(result: &BundleResult) {
    let segs: Vec<Vec<Segment>> = result.iter().map(segments).collect();
    for i in 0..segs.len() {
        for j in i + 1..segs.len() {
            for a in &segs[i] {
                for b in &segs[j] {
                    assert!(
                        !touches(a, b),
                        "routes {i} and {j} intersect:\n{:?}\n{:?}",
                        result[i],
                        result[j]
                    );
                }
            }
        }
    }
}

/// Asserts that parallel, overlapping segments of different routes are at least `separation` apart.
pub fn assert_separation(result: &BundleResult, separation: f64) {
    let segs: Vec<Vec<Segment>> = result.iter().map(segments).collect();
    for i in 0..segs.len() {
        for j in i + 1..segs.len() {
            for a in &segs[i] {
                for b in &segs[j] {
                    let overlap = a.hi.min(b.hi) - a.lo.max(b.lo);
                    if a.dir == b.dir && overlap > TOL {
                        assert!(
                            (a.pos - b.pos).abs() >= separation - TOL,
                            "routes {i} and {j} run {} apart:\n{:?}\n{:?}",
                            (a.pos - b.pos).abs(),
                            result[i],
                            result[j]
                        );
                    }
                }
            }
        }
    }
}

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
