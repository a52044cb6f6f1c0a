use subroute::waygeom::transform::{Transform, Transformation};
use subroute::{
    route_bundle, route_indirect, BundleRouter, ConnectionAssembler, ErrorContext, ErrorSource,
    Port, RoutingRequest, Waypath,
};

mod common;
use common::{
    assert_endpoints, assert_no_crossings, assert_points_eq, assert_separation, point, request,
    row,
};

/// Start ports facing east on either side of the end ports, which face west
/// from behind them. Pairs are listed out of order.
fn u_request() -> RoutingRequest {
    request(
        row("a", 100., &[90., -100., 100., -90.], 0.),
        row("b", 0., &[10., -10., 20., 0.], 180.),
    )
}

#[test]
fn u_bundle_routes_around_both_sides() {
    let req = u_request();
    let result = route_indirect(&req, 0.).unwrap();

    assert_endpoints(&req, &result);
    assert_no_crossings(&result);
    assert_separation(&result, req.separation);

    assert_points_eq(
        &result[3],
        &Waypath::new(vec![
            point(100., -90.),
            point(110., -90.),
            point(110., -70.),
            point(-15.01, -70.),
            point(-15.01, 0.),
            point(0., 0.),
        ]),
    );
    assert_points_eq(
        &result[2],
        &Waypath::new(vec![
            point(100., 100.),
            point(115., 100.),
            point(115., 65.),
            point(-10.01, 65.),
            point(-10.01, 20.),
            point(0., 20.),
        ]),
    );
}

#[test]
fn rotated_u_bundle_gives_rotated_routes() {
    let req = u_request();
    let result = route_indirect(&req, 0.).unwrap();

    let rotation = Transformation::rotate(90.);
    let turn = |ports: &[Port]| ports.iter().map(|p| p.transform(rotation)).collect();
    let rotated = request(turn(req.ports1.as_slice()), turn(req.ports2.as_slice()));
    assert_eq!(rotated.ports1[0].orientation, 90.);
    assert_eq!(rotated.ports2[0].orientation, 270.);

    let rotated_result = route_indirect(&rotated, 0.).unwrap();
    assert_endpoints(&rotated, &rotated_result);
    for (route, image) in result.iter().zip(rotated_result.iter()) {
        assert_points_eq(image, &route.transform(rotation));
    }
}

#[test]
fn extension_pushes_the_first_turn_out() {
    let req = u_request();
    let result = route_indirect(&req, 3.).unwrap();
    assert_endpoints(&req, &result);
    assert_no_crossings(&result);
    assert_eq!(result[3].points()[1], point(113., -90.));
    assert_eq!(result[1].points()[1], point(118., -100.));
}

#[test]
fn dispatcher_routes_u_bundles_indirectly() {
    let req = u_request();
    assert_eq!(
        route_bundle(&req).unwrap(),
        route_indirect(&req, req.extension_length).unwrap()
    );
}

#[test]
fn assembled_routes_are_already_simplified() {
    let result = route_indirect(&u_request(), 0.).unwrap();
    for route in &result {
        let mut asm = ConnectionAssembler::new();
        asm.push(route.clone());
        assert_eq!(&asm.assemble().unwrap(), route);
    }
}

#[test]
fn unsupported_orientation_pairs_fail() {
    for end_orientation in [90., 0.] {
        let req = request(
            row("a", 100., &[-100., 100.], 0.),
            row("b", 0., &[-10., 10.], end_orientation),
        );
        let err = route_indirect(&req, 0.).unwrap_err();
        assert!(
            matches!(
                err.source(),
                ErrorSource::UnsupportedConfiguration { start, end }
                    if *start == 0. && *end == end_orientation
            ),
            "unexpected error: {err}"
        );
        assert!(matches!(
            err.context(),
            [ErrorContext::RouteIndirect { num_pairs: 2 }]
        ));
    }
}

#[test]
fn count_mismatch_is_reported_before_routing() {
    let req = request(
        row("a", 100., &[-100., 100.], 0.),
        row("b", 0., &[-10.], 180.),
    );
    let err = BundleRouter::default().route_indirect(&req, 0.).unwrap_err();
    assert_eq!(err.source().kind(), "CountMismatch");
}

#[test]
fn caller_ports_are_not_reordered() {
    let req = u_request();
    let before = req.clone();
    route_indirect(&req, 0.).unwrap();
    assert_eq!(req, before);
}

/// Every start port lies below the cut, so one half of the bundle is empty.
fn lower_request() -> RoutingRequest {
    request(
        row("a", 100., &[-100., -90., -80.], 0.),
        row("b", 0., &[-10., 0., 10.], 180.),
    )
}

#[test]
fn one_sided_bundle_routes_around_one_side() {
    let req = lower_request();
    let result = route_indirect(&req, 0.).unwrap();

    assert_endpoints(&req, &result);
    assert_no_crossings(&result);
    assert_separation(&result, req.separation);
    assert_points_eq(
        &result[1],
        &Waypath::new(vec![
            point(100., -90.),
            point(115., -90.),
            point(115., -55.),
            point(-15.01, -55.),
            point(-15.01, 0.),
            point(0., 0.),
        ]),
    );
    assert_points_eq(
        &result[0],
        &Waypath::new(vec![
            point(100., -100.),
            point(120., -100.),
            point(120., -50.),
            point(-10.01, -50.),
            point(-10.01, -10.),
            point(0., -10.),
        ]),
    );
}

#[test]
fn one_sided_bundle_above_the_cut_mirrors_the_one_below() {
    let req = lower_request();
    let result = route_indirect(&req, 0.).unwrap();

    let mirror = Transformation::mirror_y(0.);
    let flip = |ports: &[Port]| ports.iter().map(|p| p.transform(mirror)).collect();
    let upper = request(flip(req.ports1.as_slice()), flip(req.ports2.as_slice()));
    assert!(upper.ports1.iter().all(|p| p.position.y > 0.));

    let upper_result = route_indirect(&upper, 0.).unwrap();
    assert_endpoints(&upper, &upper_result);
    assert_no_crossings(&upper_result);
    for (route, image) in result.iter().zip(upper_result.iter()) {
        assert_points_eq(image, &route.transform(mirror));
    }
}

#[test]
fn single_pair_bundle() {
    let req = request(
        vec![Port::new("a", (100., -50.), 0.)],
        vec![Port::new("b", (0., 0.), 180.)],
    );
    let result = route_indirect(&req, 0.).unwrap();

    assert_eq!(result.len(), 1);
    assert_endpoints(&req, &result);
    assert_points_eq(
        &result[0],
        &Waypath::new(vec![
            point(100., -50.),
            point(110., -50.),
            point(110., -30.),
            point(-10.01, -30.),
            point(-10.01, 0.),
            point(0., 0.),
        ]),
    );
}

#[test]
fn invalid_extension_is_reported_with_context() {
    let err = route_indirect(&u_request(), -1.).unwrap_err();
    assert_eq!(err.source().kind(), "InvalidInput");
    assert!(matches!(
        err.context(),
        [ErrorContext::RouteIndirect { num_pairs: 4 }]
    ));
}
