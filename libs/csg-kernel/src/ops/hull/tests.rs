//! # Hull Tests

use super::*;
use crate::geometry::Storage;
use crate::ops::boolean::union;
use glam::DVec3;

#[test]
fn test_hull_single_cube() {
    let cube = Solid::cuboid(DVec3::splat(-5.0), DVec3::splat(5.0)).unwrap();
    let result = hull(&cube).unwrap();

    assert_eq!(result.face_count(), 12);
    assert!((result.volume() - 1000.0).abs() < 1e-6);
}

#[test]
fn test_hull_bridges_two_cubes() {
    let a = Solid::cuboid(DVec3::ZERO, DVec3::splat(5.0)).unwrap();
    let b = a.translated(DVec3::new(10.0, 0.0, 0.0));

    let result = hull(&union(&a, &b).unwrap()).unwrap();

    let (min, max) = result.bounding_box().unwrap();
    assert!(min.x.abs() < 1e-9);
    assert!((max.x - 15.0).abs() < 1e-9);
    // Hull of two separated equal boxes on a line is one long box.
    assert!((result.volume() - 375.0).abs() < 1e-6);
}

#[test]
fn test_hull_empty_solid() {
    let result = hull(&Solid::empty()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_hull_flat_solid_fails() {
    let flat = Solid::from_polygons(vec![crate::geometry::Polygon::from_points(&[
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
    ])
    .unwrap()]);
    assert!(hull(&flat).is_err());
}

#[test]
fn test_hull_keeps_storage() {
    let storage = Storage::new("slice");
    let cube = Solid::cuboid_with_storage(DVec3::ZERO, DVec3::ONE, storage.clone()).unwrap();
    let result = hull(&cube).unwrap();

    assert!(result
        .polygons()
        .iter()
        .all(|polygon| polygon.storage().ptr_eq(&storage)));
}
