use float_eq::float_eq;
use waygeom::{Dir, Point, Side};

use super::*;

fn row(prefix: &str, x: f64, ys: &[f64], orientation: f64) -> Vec<Port> {
    ys.iter()
        .map(|&y| Port::new(format!("{prefix}{y}"), (x, y), orientation))
        .collect()
}

fn request(ports1: Vec<Port>, ports2: Vec<Port>) -> RoutingRequest {
    RoutingRequest::builder()
        .ports1(ports1)
        .ports2(ports2)
        .build()
        .unwrap()
}

#[test]
fn axis_follows_start_orientation() {
    assert_eq!(resolve_axis(Side::Right), Dir::Horiz);
    assert_eq!(resolve_axis(Side::Left), Dir::Horiz);
    assert_eq!(resolve_axis(Side::Top), Dir::Vert);
    assert_eq!(port_axis(&Port::new("a", (0., 0.), 270.)).unwrap(), Dir::Vert);
    let err = port_axis(&Port::new("a", (0., 0.), 30.)).unwrap_err();
    assert_eq!(err.source().kind(), "InvalidInput");
}

#[test]
fn split_uses_the_other_sets_extent() {
    let ends = row("b", 100., &[-10., 0., 10., 20.], 180.);
    let cut = split_cut(&ends, Dir::Horiz).unwrap();
    assert!(float_eq!(cut, 5., abs <= 1e-12));

    let starts = row("a", 0., &[5., -100., 90., 4.], 0.);
    let (low, high) = split_ports(&starts, Dir::Horiz, cut);
    assert_eq!(low.indices(), vec![0, 1, 3]);
    assert_eq!(high.indices(), vec![2]);
    assert_eq!(split_cut(&[], Dir::Horiz), None);
}

#[test]
fn builder_applies_defaults_and_validates() {
    let req = request(row("a", 0., &[0.], 0.), row("b", 10., &[0.], 180.));
    assert_eq!(req.separation, 5.0);
    assert_eq!(req.start_straight_length, 0.01);
    assert_eq!(req.end_straight_length, 0.01);
    assert_eq!(req.extension_length, 0.0);

    assert!(RoutingRequest::builder()
        .ports1(row("a", 0., &[0.], 0.))
        .ports2(row("b", 10., &[0.], 180.))
        .separation(0.)
        .build()
        .is_err());
    assert!(RoutingRequest::builder()
        .ports1(row("a", 0., &[0.], 0.))
        .ports2(row("b", 10., &[0.], 180.))
        .end_straight_length(-1.)
        .build()
        .is_err());
}

#[test]
fn validation_reports_count_and_orientation_errors() {
    let req = request(row("a", 0., &[0., 10.], 0.), row("b", 10., &[0.], 180.));
    let err = req.validate().unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::CountMismatch {
            ports1: 2,
            ports2: 1
        }
    ));

    let mut ports1 = row("a", 0., &[0., 10.], 0.);
    ports1[1].orientation = 90.;
    let req = request(ports1, row("b", 10., &[0., 10.], 180.));
    let err = req.validate().unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::MixedOrientation { set: "ports1", .. }
    ));

    let req = request(vec![], vec![]);
    assert_eq!(req.validate().unwrap_err().source().kind(), "InvalidInput");
}

#[test]
fn reversed_pairing_is_reported() {
    let ports1 = row("a", 0., &[0., 10., 20.], 0.);
    let ports2 = row("b", 100., &[20., 10., 0.], 180.);
    let err = route_direct(&request(ports1, ports2)).unwrap_err();
    match err.source() {
        ErrorSource::PairingMismatch {
            start,
            expected,
            actual,
        } => {
            assert_eq!(start, "a0");
            assert_eq!(expected, "b20");
            assert_eq!(actual, "b0");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        err.context(),
        [ErrorContext::RouteDirect { num_pairs: 3 }]
    ));
}

#[test]
fn connections_must_start_and_end_at_ports() {
    let req = request(row("a", 0., &[0.], 0.), row("b", 100., &[0.], 180.));
    let stray = BundleResult(vec![Waypath::new(vec![
        Point::new(0., 0.),
        Point::new(50., 0.),
    ])]);
    let err = validate_connections(&req, &stray).unwrap_err();
    assert_eq!(err.source().kind(), "InvariantViolation");

    let good = BundleResult(vec![Waypath::new(vec![
        Point::new(0., 0.),
        Point::new(100., 0.),
    ])]);
    validate_connections(&req, &good).unwrap();
    assert_eq!(
        validate_connections(&req, &BundleResult::default())
            .unwrap_err()
            .source()
            .kind(),
        "InvariantViolation"
    );
}

#[test]
fn min_spacing_counts_rising_and_falling_pairs() {
    let ports1 = row("a", 0., &[20., 0., 10.], 0.);
    let rising = row("b", 100., &[5., 15., 25.], 180.);
    let spacing = min_spacing(&ports1, &rising, 5., 10.).unwrap();
    assert!(float_eq!(spacing, 36., abs <= 1e-12));

    let mixed = row("b", 100., &[-5., 15., 25.], 180.);
    let spacing = min_spacing(&ports1, &mixed, 5., 10.).unwrap();
    assert!(float_eq!(spacing, 31., abs <= 1e-12));

    let err = min_spacing(&ports1, &mixed[..2], 5., 10.).unwrap_err();
    assert_eq!(err.source().kind(), "CountMismatch");
}

#[test]
fn dispatcher_rejects_perpendicular_sets() {
    let req = request(row("a", 0., &[0.], 0.), row("b", 100., &[50.], 90.));
    let err = route_bundle(&req).unwrap_err();
    assert!(matches!(
        err.source(),
        ErrorSource::UnsupportedConfiguration { start, end } if *start == 0. && *end == 90.
    ));
}

#[test]
fn dispatcher_picks_direct_for_facing_sets() {
    let req = request(
        row("a", 0., &[0., 10.], 0.),
        row("b", 100., &[0., 10.], 180.),
    );
    let result = route_bundle(&req).unwrap();
    assert_eq!(result, route_direct(&req).unwrap());
    assert!(result.iter().all(|r| r.len() == 2));
}

#[test]
fn result_serializes_as_nested_point_arrays() {
    let result = BundleResult(vec![Waypath::new(vec![
        Point::new(0., 0.),
        Point::new(1., 0.),
    ])]);
    let json = result.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0][1]["x"], 1.0);
    assert_eq!(value[0][1]["y"], 0.0);
}
