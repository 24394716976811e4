use super::*;
use csg_kernel::{BspEngine, CsgError, CsgResult, EarClipTessellator, MeshEngine, Storage};

use crate::error::ExtrudeError;
use crate::orientation::is_ccw;

fn outline(coords: &[(f64, f64)]) -> Vec<DVec3> {
    coords.iter().map(|&(x, y)| DVec3::new(x, y, 0.0)).collect()
}

fn unit_square() -> Vec<DVec3> {
    outline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

fn l_hexagon() -> Vec<DVec3> {
    outline(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)])
}

fn u_octagon() -> Vec<DVec3> {
    outline(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 2.0),
        (2.0, 2.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ])
}

/// Engine whose unions always fail.
struct RejectingEngine;

impl MeshEngine for RejectingEngine {
    fn union(&self, _a: &Solid, _b: &Solid) -> CsgResult<Solid> {
        Err(CsgError::boolean_failed("union", "rejected"))
    }

    fn hull(&self, solid: &Solid) -> CsgResult<Solid> {
        BspEngine::default().hull(solid)
    }
}

fn rejecting() -> MonotoneExtrusion<RejectingEngine, EarClipTessellator> {
    MonotoneExtrusion::new(RejectingEngine, EarClipTessellator::default())
}

// =============================================================================
// Monotone strategy
// =============================================================================

#[test]
fn test_unit_square_prism() {
    let square = unit_square();
    assert!(is_ccw(&square).unwrap());

    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &square).unwrap();
    assert!(!outcome.is_degraded());
    assert_eq!(outcome.solid.face_count(), 6);
    assert!((outcome.solid.volume() - 1.0).abs() < 1e-12);
}

#[test]
fn test_convex_ngon_has_one_wall_per_edge() {
    let hexagon: Vec<DVec3> = (0..6)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / 6.0;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();

    let solid = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &hexagon)
        .unwrap()
        .into_solid();

    let walls = solid
        .polygons()
        .iter()
        .filter(|p| p.plane().normal().z.abs() < 1e-9)
        .count();
    assert_eq!(walls, 6);
    assert_eq!(solid.face_count(), 8);
}

#[test]
fn test_l_hexagon_is_unioned() {
    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &l_hexagon()).unwrap();

    assert!(!outcome.is_degraded());
    assert!(!outcome.solid.is_empty());
    assert!((outcome.solid.volume() - 3.0).abs() < 1e-9);

    let (min, max) = outcome.solid.bounding_box().unwrap();
    assert!((min - DVec3::ZERO).length() < 1e-9);
    assert!((max - DVec3::new(2.0, 2.0, 1.0)).length() < 1e-9);
}

#[test]
fn test_clockwise_outline_gives_same_solid() {
    let mut l = l_hexagon();
    l.reverse();
    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &l).unwrap();
    assert!((outcome.solid.volume() - 3.0).abs() < 1e-9);
}

#[test]
fn test_u_octagon_volume() {
    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::new(0.0, 0.0, 2.0), &u_octagon())
        .unwrap();
    assert!(!outcome.is_degraded());
    assert!((outcome.solid.volume() - 10.0).abs() < 1e-9);
}

#[test]
fn test_strategies_agree_on_volume() {
    let direction = DVec3::new(0.5, 0.0, 1.0);
    let strategies: Vec<Box<dyn ExtrusionStrategy>> = vec![
        Box::new(MonotoneExtrusion::default()),
        Box::new(DirectExtrusion::default()),
    ];

    for strategy in &strategies {
        let outcome = extrude_points(strategy.as_ref(), direction, &u_octagon()).unwrap();
        assert!((outcome.solid.volume() - 5.0).abs() < 1e-9);
    }
}

#[test]
fn test_storage_survives_decomposition() {
    let storage = Storage::new("outline");
    let polygon = Polygon::from_points_with_storage(&l_hexagon(), storage.clone()).unwrap();
    let outcome = MonotoneExtrusion::default().extrude(DVec3::Z, &polygon).unwrap();

    assert!(outcome
        .solid
        .polygons()
        .iter()
        .all(|p| p.storage().ptr_eq(&storage)));
}

// =============================================================================
// Degraded results
// =============================================================================

#[test]
fn test_failed_final_union_returns_accumulator() {
    let outcome = extrude_points(&rejecting(), DVec3::Z, &l_hexagon()).unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(matches!(outcome.warnings[0], ExtrudeWarning::BaseDropped { .. }));
    // Only the first run, (0,0) (2,0) (2,1) (1,1), survives.
    assert!((outcome.solid.volume() - 1.5).abs() < 1e-12);
}

#[test]
fn test_failed_piece_union_is_reported() {
    let outcome = extrude_points(&rejecting(), DVec3::Z, &u_octagon()).unwrap();

    assert_eq!(
        outcome.warnings,
        vec![
            ExtrudeWarning::PieceDropped {
                index: 1,
                reason: "Boolean operation 'union' failed: rejected".to_string(),
            },
            ExtrudeWarning::BaseDropped {
                reason: "Boolean operation 'union' failed: rejected".to_string(),
            },
        ]
    );
    assert!((outcome.solid.volume() - 3.0).abs() < 1e-12);
}

#[test]
fn test_monotone_outline_never_unions() {
    let outcome = extrude_points(&rejecting(), DVec3::Z, &unit_square()).unwrap();
    assert!(!outcome.is_degraded());
    assert!((outcome.solid.volume() - 1.0).abs() < 1e-12);
}

#[test]
fn test_direct_strategy_never_degrades() {
    let strategy = DirectExtrusion::new(RejectingEngine, EarClipTessellator::default());
    let outcome = extrude_points(&strategy, DVec3::Z, &u_octagon()).unwrap();
    assert!(!outcome.is_degraded());
    assert!((outcome.solid.volume() - 5.0).abs() < 1e-9);
}

#[test]
fn test_warning_display() {
    let warning = ExtrudeWarning::PieceDropped {
        index: 2,
        reason: "empty result".to_string(),
    };
    assert_eq!(warning.to_string(), "piece 2 dropped: empty result");

    let warning = ExtrudeWarning::BaseDropped {
        reason: "empty result".to_string(),
    };
    assert_eq!(warning.to_string(), "base piece dropped: empty result");
}

// =============================================================================
// Validation
// =============================================================================

fn assert_invalid(result: ExtrudeResult<ExtrudeOutcome>) {
    assert!(matches!(result, Err(ExtrudeError::InvalidInput { .. })));
}

#[test]
fn test_downward_direction_is_rejected() {
    assert_invalid(extrude_points(
        &MonotoneExtrusion::default(),
        DVec3::new(0.0, 0.0, -1.0),
        &unit_square(),
    ));
    assert_invalid(extrude_points(
        &rejecting(),
        DVec3::new(0.0, 0.0, -1.0),
        &l_hexagon(),
    ));

    let polygon = Polygon::from_points(&unit_square()).unwrap();
    assert_invalid(DirectExtrusion::default().extrude(DVec3::NEG_Z, &polygon));
    assert_invalid(MonotoneExtrusion::default().extrude(DVec3::NEG_Z, &polygon));
}

#[test]
fn test_degenerate_directions_are_rejected() {
    let strategy = MonotoneExtrusion::default();
    assert_invalid(extrude_points(&strategy, DVec3::ZERO, &unit_square()));
    assert_invalid(extrude_points(
        &strategy,
        DVec3::new(0.0, f64::NAN, 1.0),
        &unit_square(),
    ));
}

#[test]
fn test_bad_outlines_are_rejected() {
    let strategy = MonotoneExtrusion::default();
    assert_invalid(extrude_points(&strategy, DVec3::Z, &unit_square()[..2]));
    assert_invalid(extrude_points(&strategy, DVec3::Z, &[]));

    let mut square = unit_square();
    square[2].x = f64::INFINITY;
    assert_invalid(extrude_points(&strategy, DVec3::Z, &square));
}

#[test]
fn test_outcome_accessors() {
    let outcome = ExtrudeOutcome::complete(Solid::empty());
    assert!(!outcome.is_degraded());
    assert!(outcome.into_solid().is_empty());
}
