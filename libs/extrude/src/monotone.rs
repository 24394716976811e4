//! # Monotone Decomposition
//!
//! Splits a counter-clockwise polygon into pieces at turning-direction
//! reversals.
//!
//! ## Algorithm
//!
//! Walk consecutive vertex triples `(i, i+1, i+2)` and compute the turning
//! sign `orient2d(v[i], v[i+1], v[i+2])`. Scanning starts on a convex corner,
//! so the reference sign is a left turn. A right turn marks a reversal at the
//! middle vertex: the chain collected since the last reversal is closed there
//! and split off as a run, and the breaking vertex starts the next chain.
//! Collinear triples never break a chain.
//!
//! A run is only split off when its closing edge is an internal diagonal of
//! the polygon: it stays inside both corner cones and touches no other edge
//! or vertex. When the whole chain cannot be closed, later chain starts are
//! tried; when none works, the split is deferred to the next reversal. Every
//! split therefore cuts the polygon into two simple polygons of positive area.
//!
//! The remainder is scanned again until no run can be split off; what is
//! left is the base polygon. The whole decomposition is a flat loop.

use glam::DVec3;
use robust::{orient2d, Coord};

use crate::error::{ExtrudeError, ExtrudeResult};

/// Result of decomposing a polygon.
///
/// Every piece winds the same way as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Runs closed off at reversals, in emission order.
    pub runs: Vec<Vec<DVec3>>,
    /// What remains after every run has been removed.
    pub base: Vec<DVec3>,
    /// Number of reflex corners in the input, where the turning direction
    /// reverses.
    pub reversals: usize,
}

impl Decomposition {
    /// All pieces: the runs followed by the base.
    pub fn pieces(&self) -> impl Iterator<Item = &[DVec3]> {
        self.runs
            .iter()
            .map(Vec::as_slice)
            .chain(std::iter::once(self.base.as_slice()))
    }

    /// Number of pieces, base included.
    pub fn piece_count(&self) -> usize {
        self.runs.len() + 1
    }

    /// Returns true if the polygon needed no splitting.
    pub fn is_monotone(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Decomposes a counter-clockwise polygon into monotone pieces.
///
/// ## Errors
///
/// `InvalidInput` for fewer than 3 vertices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use polygon_extrude::monotone::decompose;
///
/// let l: Vec<DVec3> = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]
///     .into_iter()
///     .map(|(x, y)| DVec3::new(x, y, 0.0))
///     .collect();
///
/// let pieces = decompose(&l).unwrap();
/// assert_eq!(pieces.reversals, 1);
/// assert_eq!(pieces.piece_count(), 2);
/// ```
pub fn decompose(points: &[DVec3]) -> ExtrudeResult<Decomposition> {
    if points.len() < 3 {
        return Err(ExtrudeError::invalid_input(format!(
            "only polygons with at least 3 vertices are supported, got {}",
            points.len()
        )));
    }

    let reversals = reflex_corners(points);
    let mut runs = Vec::new();
    let mut remaining = points.to_vec();

    while let Some((run, rest)) = split_off_run(&remaining) {
        tracing::debug!(
            vertices = remaining.len(),
            run = run.len(),
            "split run off at turning reversal"
        );
        runs.push(run);
        remaining = rest;
    }

    tracing::debug!(
        runs = runs.len(),
        base = remaining.len(),
        reversals,
        "decomposed polygon"
    );

    Ok(Decomposition {
        runs,
        base: remaining,
        reversals,
    })
}

/// Number of corners turning against a counter-clockwise outline.
fn reflex_corners(points: &[DVec3]) -> usize {
    let n = points.len();
    (0..n)
        .filter(|&i| {
            Turn::of(points[(i + n - 1) % n], points[i], points[(i + 1) % n]) == Turn::Right
        })
        .count()
}

/// Scans for the first reversal whose run can be cut off along an internal
/// diagonal. Returns the run and the remaining polygon.
fn split_off_run(points: &[DVec3]) -> Option<(Vec<DVec3>, Vec<DVec3>)> {
    let v = start_on_convex_corner(points);
    let n = v.len();
    let mut chain_start = 0;

    for i in 1..n - 1 {
        if Turn::of(v[i - 1], v[i], v[i + 1]) != Turn::Right {
            continue;
        }

        let closable = (chain_start..i.saturating_sub(1)).find(|&start| {
            signed_area(&v[start..=i]) > 0.0 && is_diagonal(&v, start, i)
        });
        if let Some(start) = closable {
            let run = v[start..=i].to_vec();
            let mut rest = v[..=start].to_vec();
            rest.extend_from_slice(&v[i..]);
            return Some((run, rest));
        }
        chain_start = i;
    }

    None
}

/// Rotates the vertex list so that scanning starts inside a convex stretch.
///
/// The scan never tests the turn at the first and last vertex, so a reflex
/// corner sitting there would go unnoticed. Prefers a start whose wrap-around
/// neighbours are both convex, then one with a convex first corner and
/// successor.
fn start_on_convex_corner(points: &[DVec3]) -> Vec<DVec3> {
    let n = points.len();
    let convex: Vec<bool> = (0..n)
        .map(|i| Turn::of(points[(i + n - 1) % n], points[i], points[(i + 1) % n]) == Turn::Left)
        .collect();
    let at = |i: usize| convex[i % n];

    let shift = (0..n)
        .find(|&k| at(k + n - 1) && at(k) && at(k + 1))
        .or_else(|| (0..n).find(|&k| at(k) && at(k + 1)))
        .or_else(|| (0..n).find(|&k| at(k + 1)))
        .unwrap_or(0);

    let mut rotated = points.to_vec();
    rotated.rotate_left(shift);
    rotated
}

/// Turning direction at the middle of a vertex triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Turn {
    Left,
    Right,
    Straight,
}

impl Turn {
    /// Left when `a, b, c` wind counter-clockwise.
    pub(crate) fn of(a: DVec3, b: DVec3, c: DVec3) -> Turn {
        let det = orient(a, b, c);
        if det > 0.0 {
            Turn::Left
        } else if det < 0.0 {
            Turn::Right
        } else {
            Turn::Straight
        }
    }
}

// =============================================================================
// DIAGONAL TESTS
// =============================================================================

/// Returns true if the segment `v[a]`-`v[b]` is an internal diagonal of the
/// counter-clockwise polygon `v`.
fn is_diagonal(v: &[DVec3], a: usize, b: usize) -> bool {
    in_cone(v, a, b) && in_cone(v, b, a) && clear_of_boundary(v, a, b)
}

/// Returns true if `v[b]` lies strictly inside the interior angle at `v[a]`.
fn in_cone(v: &[DVec3], a: usize, b: usize) -> bool {
    let n = v.len();
    let prev = v[(a + n - 1) % n];
    let next = v[(a + 1) % n];
    let (apex, target) = (v[a], v[b]);

    if orient(prev, apex, next) >= 0.0 {
        orient(apex, target, prev) > 0.0 && orient(target, apex, next) > 0.0
    } else {
        !(orient(apex, target, next) >= 0.0 && orient(target, apex, prev) >= 0.0)
    }
}

/// Returns true if no edge or vertex other than the endpoints touches the
/// segment `v[a]`-`v[b]`.
fn clear_of_boundary(v: &[DVec3], a: usize, b: usize) -> bool {
    let n = v.len();
    let (p, q) = (v[a], v[b]);

    let vertex_clear = (0..n)
        .filter(|&k| k != a && k != b)
        .all(|k| !on_segment(p, q, v[k]));

    vertex_clear
        && (0..n).all(|k| {
            let l = (k + 1) % n;
            k == a || k == b || l == a || l == b || !segments_touch(p, q, v[k], v[l])
        })
}

/// Closed segment intersection.
fn segments_touch(p: DVec3, q: DVec3, r: DVec3, s: DVec3) -> bool {
    let d1 = orient(p, q, r);
    let d2 = orient(p, q, s);
    let d3 = orient(r, s, p);
    let d4 = orient(r, s, q);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    on_segment(p, q, r) || on_segment(p, q, s) || on_segment(r, s, p) || on_segment(r, s, q)
}

/// Returns true if `x` lies on the closed segment `p`-`q`.
fn on_segment(p: DVec3, q: DVec3, x: DVec3) -> bool {
    orient(p, q, x) == 0.0
        && x.x >= p.x.min(q.x)
        && x.x <= p.x.max(q.x)
        && x.y >= p.y.min(q.y)
        && x.y <= p.y.max(q.y)
}

/// Shoelace area in the XY plane; positive for counter-clockwise loops.
pub(crate) fn signed_area(points: &[DVec3]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

#[inline]
fn orient(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

#[inline]
fn coord(p: DVec3) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn polygon(coords: &[(f64, f64)]) -> Vec<DVec3> {
        coords.iter().map(|&(x, y)| DVec3::new(x, y, 0.0)).collect()
    }

    fn l_hexagon() -> Vec<DVec3> {
        polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)])
    }

    fn u_octagon() -> Vec<DVec3> {
        polygon(&[
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

    fn dart() -> Vec<DVec3> {
        polygon(&[(0.0, 0.0), (4.0, 1.0), (0.0, 2.0), (1.0, 1.0)])
    }

    fn arrowhead() -> Vec<DVec3> {
        polygon(&[(0.0, 0.0), (3.0, 1.5), (0.0, 3.0), (0.9, 2.0), (1.2, 1.5), (0.9, 1.0)])
    }

    fn star() -> Vec<DVec3> {
        (0..10)
            .map(|k| {
                let angle = k as f64 * std::f64::consts::PI / 5.0 + 0.1;
                let radius = if k % 2 == 0 { 1.0 } else { 0.4 };
                DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect()
    }

    /// Two reflex corners in a row along a staircase notch.
    fn staircase() -> Vec<DVec3> {
        polygon(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (3.0, 1.5),
            (2.0, 2.5),
            (1.5, 4.0),
            (0.0, 4.0),
        ])
    }

    fn skewed() -> Vec<DVec3> {
        polygon(&[
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

    fn fixtures() -> Vec<Vec<DVec3>> {
        vec![l_hexagon(), u_octagon(), dart(), arrowhead(), star(), staircase(), skewed()]
    }

    /// Random star-shaped outline around the origin.
    fn random_star(rng: &mut impl Rng) -> Vec<DVec3> {
        let n = rng.gen_range(5..=14);
        (0..n)
            .map(|k| {
                let angle = (k as f64 + rng.gen_range(0.0..0.8)) * TAU / n as f64;
                let radius = rng.gen_range(0.2..1.0);
                DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect()
    }

    /// Puts every run back between its diagonal endpoints, latest run first.
    fn reassemble(result: &Decomposition) -> Vec<DVec3> {
        let mut outline = result.base.clone();
        for run in result.runs.iter().rev() {
            let first = run[0];
            let last = run[run.len() - 1];
            let n = outline.len();
            let at = (0..n)
                .find(|&k| outline[k] == first && outline[(k + 1) % n] == last)
                .expect("run diagonal is an edge of the remainder");
            for (offset, vertex) in run[1..run.len() - 1].iter().enumerate() {
                outline.insert(at + 1 + offset, *vertex);
            }
        }
        outline
    }

    fn is_rotation_of(candidate: &[DVec3], expected: &[DVec3]) -> bool {
        candidate.len() == expected.len()
            && (0..expected.len()).any(|shift| {
                let mut rotated = expected.to_vec();
                rotated.rotate_left(shift);
                rotated == candidate
            })
    }

    fn assert_exact_partition(shape: &[DVec3]) {
        let result = decompose(shape).unwrap();
        for piece in result.pieces() {
            assert!(piece.len() >= 3);
            assert!(signed_area(piece) > 0.0, "piece {piece:?} of {shape:?}");
        }
        let total: f64 = result.pieces().map(signed_area).sum();
        assert_relative_eq!(total, signed_area(shape), epsilon = 1e-12);
        assert!(is_rotation_of(&reassemble(&result), shape), "{shape:?}");
    }

    #[test]
    fn test_turn_sign() {
        assert_eq!(Turn::of(DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)), Turn::Left);
        assert_eq!(Turn::of(DVec3::ZERO, DVec3::X, DVec3::new(1.0, -1.0, 0.0)), Turn::Right);
        assert_eq!(Turn::of(DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)), Turn::Straight);
    }

    #[test]
    fn test_convex_polygon_is_one_piece() {
        let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let result = decompose(&square).unwrap();

        assert!(result.is_monotone());
        assert_eq!(result.reversals, 0);
        assert_eq!(result.base, square);
    }

    #[test]
    fn test_l_hexagon_splits_once() {
        let l = l_hexagon();
        let result = decompose(&l).unwrap();

        assert_eq!(result.reversals, 1);
        assert_eq!(result.piece_count(), 2);
        assert_eq!(result.runs[0], polygon(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]));
        assert_eq!(result.base, polygon(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]));

        for vertex in &l {
            assert!(result.pieces().any(|piece| piece.contains(vertex)));
        }
    }

    #[test]
    fn test_pieces_rebuild_vertex_sequence() {
        for shape in fixtures() {
            let result = decompose(&shape).unwrap();
            assert!(is_rotation_of(&reassemble(&result), &shape), "{shape:?}");
        }
    }

    #[test]
    fn test_pieces_cover_the_area_exactly() {
        for shape in fixtures() {
            assert_exact_partition(&shape);
        }
    }

    #[test]
    fn test_skewed_outline_pieces_stay_inside() {
        let shape = skewed();
        let result = decompose(&shape).unwrap();

        assert_relative_eq!(signed_area(&shape), 0.7887, epsilon = 1e-4);
        assert!(result.pieces().all(|piece| signed_area(piece) > 0.0));
        let total: f64 = result.pieces().map(signed_area).sum();
        assert_relative_eq!(total, 0.7887, epsilon = 1e-4);
    }

    #[test]
    fn test_consecutive_reflex_corners() {
        let result = decompose(&staircase()).unwrap();
        assert_eq!(result.reversals, 2);
        assert!(!result.is_monotone());
        assert_exact_partition(&staircase());
    }

    #[test]
    fn test_dart_splits_at_notch() {
        let result = decompose(&dart()).unwrap();
        assert_eq!(result.reversals, 1);
        assert_eq!(result.piece_count(), 2);
        assert!(result.pieces().all(|piece| piece.len() == 3));
    }

    #[test]
    fn test_random_star_polygons_partition_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_exact_partition(&random_star(&mut rng));
        }
    }

    #[test]
    fn test_u_octagon_is_decomposed_iteratively() {
        let result = decompose(&u_octagon()).unwrap();
        assert_eq!(result.runs.len(), 2);
        assert_eq!(result.base.len(), 4);
        assert_eq!(result.reversals, 2);
    }

    #[test]
    fn test_reflex_start_is_rotated_away() {
        // The L with its reflex corner first.
        let mut l = l_hexagon();
        l.rotate_left(3);
        let result = decompose(&l).unwrap();

        assert_eq!(result.piece_count(), 2);
        let total: f64 = result.pieces().map(signed_area).sum();
        assert_relative_eq!(total, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_vertices_do_not_split() {
        let rectangle = polygon(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]);
        let result = decompose(&rectangle).unwrap();
        assert!(result.is_monotone());
    }

    #[test]
    fn test_too_few_vertices() {
        assert!(decompose(&l_hexagon()[..2]).is_err());
    }
}
