use std::f64::consts::TAU;

use glam::DVec3;
use polygon_extrude::{
    decompose, extrude_points, is_ccw, to_ccw, to_cw, DirectExtrusion, ExtrudeError,
    ExtrusionStrategy, MonotoneExtrusion,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn outline(coords: &[(f64, f64)]) -> Vec<DVec3> {
    coords.iter().map(|&(x, y)| DVec3::new(x, y, 0.0)).collect()
}

fn l_hexagon() -> Vec<DVec3> {
    outline(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)])
}

/// Comb with three teeth.
fn comb() -> Vec<DVec3> {
    outline(&[
        (0.0, 0.0),
        (5.0, 0.0),
        (5.0, 3.0),
        (4.0, 3.0),
        (4.0, 1.0),
        (3.0, 1.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ])
}

/// Outline with notches that are not axis aligned.
fn skewed() -> Vec<DVec3> {
    outline(&[
        (0.59, 0.7),
        (-0.06, 0.62),
        (-0.11, 0.75),
        (-0.17, 0.35),
        (-0.68, 0.48),
        (0.36, -0.24),
        (0.25, -0.07),
        (1.08, -0.13),
    ])
}

/// Random star-shaped outline around the origin.
fn random_star(rng: &mut StdRng) -> Vec<DVec3> {
    let n = rng.gen_range(5..=12);
    (0..n)
        .map(|k| {
            let angle = (k as f64 + rng.gen_range(0.0..0.8)) * TAU / n as f64;
            let radius = rng.gen_range(0.2..1.0);
            DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}

fn area(points: &[DVec3]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

#[test]
fn winding_is_independent_of_start_vertex() {
    for shape in [l_hexagon(), comb()] {
        for shift in 0..shape.len() {
            let mut rotated = shape.clone();
            rotated.rotate_left(shift);
            assert!(is_ccw(&rotated).unwrap());

            rotated.reverse();
            assert!(!is_ccw(&rotated).unwrap());
        }
    }
}

#[test]
fn winding_helpers_agree() {
    let cw = to_cw(&comb()).unwrap();
    assert!(!is_ccw(&cw).unwrap());
    assert_eq!(to_ccw(&cw).unwrap(), comb());
}

#[test]
fn unit_square_scenario() {
    let square = outline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert!(is_ccw(&square).unwrap());

    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &square).unwrap();
    assert_eq!(outcome.solid.face_count(), 6);
    assert!((outcome.solid.volume() - 1.0).abs() < 1e-12);
}

#[test]
fn l_hexagon_scenario() {
    let l = l_hexagon();
    let pieces = decompose(&l).unwrap();
    assert_eq!(pieces.reversals, 1);
    assert_eq!(pieces.piece_count(), 2);
    for vertex in &l {
        assert!(pieces.pieces().any(|piece| piece.contains(vertex)));
    }

    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &l).unwrap();
    assert!(!outcome.solid.is_empty());
    assert!((outcome.solid.volume() - 3.0).abs() < 1e-9);
}

#[test]
fn downward_direction_scenario() {
    let result = extrude_points(
        &MonotoneExtrusion::default(),
        DVec3::new(0.0, 0.0, -1.0),
        &l_hexagon(),
    );
    assert!(matches!(result, Err(ExtrudeError::InvalidInput { .. })));
}

#[test]
fn comb_decomposes_into_convex_area_cover() {
    let pieces = decompose(&comb()).unwrap();
    assert!(pieces.piece_count() > 2);

    let total: f64 = pieces.pieces().map(area).sum();
    assert!((total - area(&comb())).abs() < 1e-12);
}

#[test]
fn comb_extrudes_to_the_same_solid_with_either_strategy() {
    let direction = DVec3::new(0.0, 0.0, 0.5);
    let strategies: [&dyn ExtrusionStrategy; 2] =
        [&MonotoneExtrusion::default(), &DirectExtrusion::default()];

    for strategy in strategies {
        let outcome = extrude_points(strategy, direction, &comb()).unwrap();
        assert!(!outcome.is_degraded());
        assert!((outcome.solid.volume() - 5.5).abs() < 1e-9);

        let mesh = outcome.solid.to_mesh();
        assert!((mesh.signed_volume() - 5.5).abs() < 1e-9);
    }
}

#[test]
fn skewed_outline_keeps_its_area_as_volume() {
    let shape = skewed();
    assert!((area(&shape) - 0.7887).abs() < 1e-4);

    let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &shape).unwrap();
    assert!(!outcome.is_degraded());
    assert!((outcome.solid.volume() - area(&shape)).abs() < 1e-9);
}

#[test]
fn random_star_outlines_keep_their_area_as_volume() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..30 {
        let shape = random_star(&mut rng);
        let pieces = decompose(&shape).unwrap();
        assert!(pieces.pieces().all(|piece| area(piece) > 0.0), "{shape:?}");
        let total: f64 = pieces.pieces().map(area).sum();
        assert!((total - area(&shape)).abs() < 1e-12);

        let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &shape).unwrap();
        assert!(!outcome.is_degraded(), "{shape:?}");
        assert!((outcome.solid.volume() - area(&shape)).abs() < 1e-6, "{shape:?}");
    }
}
