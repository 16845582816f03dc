use assert_matches::assert_matches;
use geotopo::error::ValidationError;
use geotopo::geotopo_types::linearization::{CurveLinearizer, LinearizationCriterion};
use geotopo::geotopo_types::{
    Arc, Circle, CompositeGeometry, Crs, Curve, CurveSegment, Envelope, Geometry,
    LineStringSegment, MultiGeometry, Point, Primitive, Solid, Surface,
};
use geotopo::{
    CrsDimensionCheck, GeometryValidator, KnownCrsRegistry, RecordingHandler, StrictHandler,
    ValidationEventKind,
};
use insta::assert_compact_debug_snapshot;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn curve(points: &[(f64, f64)]) -> Curve {
    Curve::line_string(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
        .expect("valid curve")
}

fn validate(geometry: &Geometry) -> (bool, RecordingHandler) {
    init_logger();
    let mut handler = RecordingHandler::new();
    let is_valid = GeometryValidator::new()
        .validate(geometry, &mut handler)
        .expect("validation succeeds");
    (is_valid, handler)
}

fn exterior() -> Curve {
    curve(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
}

#[test]
fn points_are_always_valid() {
    let (is_valid, handler) = validate(&Point::new_3d(1.0, 2.0, 3.0).into());
    assert!(is_valid);
    assert!(handler.events().is_empty());
}

#[test]
fn exterior_ring_orientation() {
    let ccw = curve(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(ccw, vec![]).into());
    assert!(is_valid);
    assert!(handler.events().is_empty());

    let cw = curve(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(cw, vec![]).into());
    assert!(!is_valid);
    assert_eq!(handler.kinds(), vec![ValidationEventKind::ExteriorRingClockwise]);
}

#[test]
fn discontinuous_curve() {
    let curve = Curve::new(vec![
        LineStringSegment::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .expect("valid segment")
            .into(),
        LineStringSegment::new(vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)])
            .expect("valid segment")
            .into(),
    ])
    .expect("valid curve");

    let (is_valid, handler) = validate(&curve.into());
    assert!(!is_valid);
    assert_eq!(handler.count(ValidationEventKind::CurveDiscontinuity), 1);
    assert_eq!(
        handler.events()[0].message,
        "segment 1 does not start at the end of segment 0"
    );
}

#[test]
fn unclosed_ring_is_reported_once() {
    let ring = curve(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(ring, vec![]).into());
    assert!(!is_valid);
    assert_eq!(handler.kinds(), vec![ValidationEventKind::RingNotClosed]);
}

#[test]
fn self_intersecting_ring_is_reported_as_curve_and_ring() {
    let bowtie = curve(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(bowtie, vec![]).into());
    assert!(!is_valid);
    assert_eq!(handler.count(ValidationEventKind::CurveSelfIntersection), 1);
    assert_eq!(handler.count(ValidationEventKind::RingSelfIntersection), 1);
    assert!(handler.events()[0].message.starts_with("curve intersects itself at"));
}

#[test]
fn holes_sharing_a_point_touch_once() {
    let first = curve(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)]);
    let second = curve(&[(3.0, 3.0), (3.0, 5.0), (5.0, 5.0), (5.0, 3.0), (3.0, 3.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(exterior(), vec![first, second]).into());

    assert!(!is_valid);
    assert_eq!(handler.kinds(), vec![ValidationEventKind::InteriorRingsTouch]);
    assert_eq!(handler.events()[0].message, "interior rings 0 and 1 touch");
}

#[test]
fn crossing_holes_intersect() {
    let first = curve(&[(1.0, 1.0), (1.0, 4.0), (4.0, 4.0), (4.0, 1.0), (1.0, 1.0)]);
    let second = curve(&[(3.0, 3.0), (3.0, 6.0), (6.0, 6.0), (6.0, 3.0), (3.0, 3.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(exterior(), vec![first, second]).into());

    assert!(!is_valid);
    assert_eq!(handler.kinds(), vec![ValidationEventKind::InteriorRingsIntersect]);
}

#[test]
fn hole_touching_exterior() {
    let hole = curve(&[(0.0, 5.0), (2.0, 7.0), (2.0, 3.0), (0.0, 5.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(exterior(), vec![hole]).into());

    assert!(!is_valid);
    assert_eq!(
        handler.kinds(),
        vec![ValidationEventKind::InteriorRingTouchesExterior]
    );
}

#[test]
fn exterior_inside_its_hole_is_reported_twice() {
    let exterior = curve(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]);
    let hole = curve(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
    let (is_valid, handler) = validate(&Surface::polygon(exterior, vec![hole]).into());

    assert!(!is_valid);
    assert_eq!(
        handler.kinds(),
        vec![
            ValidationEventKind::InteriorRingOutsideExterior,
            ValidationEventKind::InteriorRingOutsideExterior,
        ]
    );
}

#[test]
fn multi_geometry_reports_only_invalid_members() {
    let valid = Surface::polygon(exterior(), vec![]);
    let invalid = curve(&[(0.0, 0.0), (1.0, 1.0), (1.0, 1.0), (2.0, 0.0)]);
    let multi = MultiGeometry::new(vec![valid.into(), invalid.into()]);

    let (is_valid, handler) = validate(&multi.into());
    assert!(!is_valid);
    assert_eq!(
        handler.kinds(),
        vec![ValidationEventKind::SegmentDuplicatePoints]
    );
    assert_eq!(handler.events()[0].depth, 2);
}

#[test]
fn composite_members_are_validated() {
    let composite = CompositeGeometry::new(vec![
        Primitive::Point(Point::new(0.0, 0.0)),
        Primitive::Curve(curve(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])),
    ]);

    let (is_valid, handler) = validate(&composite.into());
    assert!(!is_valid);
    assert_eq!(
        handler.kinds(),
        vec![ValidationEventKind::CurveSelfIntersection]
    );
}

#[test]
fn validation_is_idempotent() {
    let bowtie = curve(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
    let hole = curve(&[(20.0, 20.0), (20.0, 21.0), (21.0, 21.0), (21.0, 20.0), (20.0, 20.0)]);
    let geometry: Geometry = MultiGeometry::new(vec![
        Surface::polygon(bowtie, vec![]).into(),
        Surface::polygon(exterior(), vec![hole]).into(),
    ])
    .into();

    let validator = GeometryValidator::new();
    let mut first = RecordingHandler::new();
    let mut second = RecordingHandler::new();
    let first_result = validator.validate(&geometry, &mut first);
    let second_result = validator.validate(&geometry, &mut second);

    assert_eq!(first_result, second_result);
    assert_eq!(first.events(), second.events());
    assert!(!first.events().is_empty());
}

#[test]
fn unsupported_geometries_are_errors() {
    init_logger();
    let validator = GeometryValidator::new();

    let solid = Solid::new(Surface::polygon(exterior(), vec![]), vec![]);
    assert_compact_debug_snapshot!(
        validator.validate(&solid.into(), &mut StrictHandler),
        @"Err(SolidNotSupported)"
    );

    let envelope = Envelope::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    assert_compact_debug_snapshot!(
        validator.validate(&envelope.into(), &mut StrictHandler),
        @"Err(EnvelopeNotValidatable)"
    );
}

#[test]
fn curved_rings_are_linearized() {
    init_logger();
    let circle = Circle::new(
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 0.0),
    );
    let ring = Curve::new(vec![circle.into()]).expect("valid curve");

    let validator = GeometryValidator::builder()
        .with_criterion(LinearizationCriterion::MaxError {
            max_error: 0.001,
            max_points: 500,
        })
        .build()
        .expect("valid configuration");
    let mut handler = RecordingHandler::new();
    let result = validator.validate(&Surface::polygon(ring, vec![]).into(), &mut handler);

    assert_matches!(result, Ok(_));
    assert_eq!(handler.count(ValidationEventKind::RingNotClosed), 0);
    assert_eq!(handler.count(ValidationEventKind::RingSelfIntersection), 0);
}

#[test]
fn crs_dimension_check() {
    init_logger();
    let check = CrsDimensionCheck::<KnownCrsRegistry>::default();
    let point: Geometry = Point::new_3d(1.0, 2.0, 3.0).into();

    assert_compact_debug_snapshot!(
        check.check(&point, &Crs::parse("EPSG:4326").expect("valid crs")),
        @r#"Err(DimensionMismatch { crs: Crs { authority: "EPSG", code: "4326" }, expected: 2, actual: 3 })"#
    );
    assert_eq!(
        check.check(&point, &Crs::parse("urn:ogc:def:crs:EPSG::4979").expect("valid crs")),
        Ok(())
    );
    assert_eq!(
        check.check(&point, &Crs::parse("EPSG:123456").expect("valid crs")),
        Ok(())
    );
}

#[test]
fn linearized_points_lie_on_circle() {
    let arc = Arc::new(
        Point::new(0.0, 10.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, -10.0),
    );
    let curve = Curve::new(vec![arc.into()]).expect("valid curve");
    let linear = CurveLinearizer.linearize(&curve, &LinearizationCriterion::NumPoints(33));

    let CurveSegment::LineString(segment) = &linear.segments()[0] else {
        panic!("curve is not linearized");
    };
    assert_eq!(segment.start_point(), &arc.start);
    assert_eq!(segment.end_point(), &arc.end);
    for point in segment.points() {
        let radius = (point.x().powi(2) + point.y().powi(2)).sqrt();
        approx::assert_abs_diff_eq!(radius, 10.0, epsilon = 1e-9);
        assert!(point.x() >= -1e-9);
    }
}

#[test]
fn invalid_criterion_is_a_configuration_error() {
    let result = GeometryValidator::builder()
        .with_criterion(LinearizationCriterion::MaxError {
            max_error: -1.0,
            max_points: 0,
        })
        .build();
    assert_matches!(result, Err(ValidationError::Configuration(_)));
}
