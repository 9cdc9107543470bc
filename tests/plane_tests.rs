use meshcleave::errors::SliceError;
use meshcleave::float_types::EPSILON;
use meshcleave::plane::Plane;
use nalgebra::{Matrix4, Point3, Vector3};

mod support;

use crate::support::approx_eq;

#[test]
fn from_normal_normalizes() {
    // 2z . p = 4 is the same plane as z . p = 2
    let plane = Plane::from_normal(Vector3::new(0.0, 0.0, 2.0), 4.0).unwrap();
    assert!(approx_eq(plane.normal().norm(), 1.0, EPSILON));
    assert!(approx_eq(plane.offset(), 2.0, EPSILON));
    assert!(approx_eq(
        plane.signed_distance(&Point3::new(0.0, 0.0, 3.0)),
        1.0,
        EPSILON
    ));
}

#[test]
fn zero_normal_is_rejected() {
    let result = Plane::from_normal(Vector3::zeros(), 0.0);
    assert_eq!(result.unwrap_err(), SliceError::DegeneratePlane);
}

#[test]
fn on_plane_points_count_as_positive() {
    let plane = Plane::from_normal(Vector3::y(), 1.0).unwrap();
    assert!(plane.is_above(&Point3::new(0.0, 1.0, 0.0)));
    assert!(plane.is_above(&Point3::new(5.0, 2.0, -3.0)));
    assert!(!plane.is_above(&Point3::new(0.0, 0.999, 0.0)));
}

#[test]
fn flip_reverses_half_spaces() {
    let plane = Plane::from_normal(Vector3::x(), 0.5).unwrap();
    let flipped = plane.flipped();
    let p = Point3::new(2.0, 0.0, 0.0);
    assert!(approx_eq(
        plane.signed_distance(&p),
        -flipped.signed_distance(&p),
        EPSILON
    ));

    let mut plane = plane;
    plane.flip();
    assert_eq!(plane, flipped);
}

#[test]
fn from_normal_and_point_passes_through_point() {
    let point = Point3::new(1.0, 2.0, 3.0);
    let plane = Plane::from_normal_and_point(Vector3::new(0.0, 3.0, 0.0), point).unwrap();
    assert!(approx_eq(plane.signed_distance(&point), 0.0, EPSILON));
}

#[test]
fn to_local_undoes_translation() {
    let transform = Matrix4::new_translation(&Vector3::new(5.0, -2.0, 0.0));
    let plane = Plane::to_local(
        &transform,
        &Point3::new(5.5, -2.0, 0.0),
        &Vector3::x(),
    )
    .unwrap();
    // World x = 5.5 is local x = 0.5.
    assert!(approx_eq(
        plane.signed_distance(&Point3::new(0.5, 0.0, 0.0)),
        0.0,
        EPSILON
    ));
    assert!(approx_eq(plane.normal().dot(&Vector3::x()), 1.0, EPSILON));
}

#[test]
fn to_local_handles_scale() {
    let transform = Matrix4::new_scaling(2.0);
    let plane =
        Plane::to_local(&transform, &Point3::new(0.5, 0.0, 0.0), &Vector3::x()).unwrap();
    // The world plane at x = 0.5 sits at x = 0.25 in the scaled-up
    // candidate's local space.
    assert!(approx_eq(
        plane.signed_distance(&Point3::new(0.25, 0.0, 0.0)),
        0.0,
        EPSILON
    ));
}

#[test]
fn to_local_rejects_singular_transform() {
    let result = Plane::to_local(&Matrix4::zeros(), &Point3::origin(), &Vector3::x());
    assert_eq!(result.unwrap_err(), SliceError::NonInvertibleTransform);
}
