//! # Orientation
//!
//! Winding classification of simple polygons in the XY plane.
//!
//! The test looks only at the highest-left vertex and its two neighbours, so
//! it is O(n) with no area accumulation and is unaffected by uniform scaling
//! or by which vertex the list starts at.

use glam::DVec3;

use crate::error::{ExtrudeError, ExtrudeResult};

/// Returns true if the polygon winds counter-clockwise seen from +Z.
///
/// ## Errors
///
/// `InvalidInput` for fewer than 3 vertices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use polygon_extrude::is_ccw;
///
/// let square = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
/// ];
/// assert!(is_ccw(&square).unwrap());
/// ```
pub fn is_ccw(points: &[DVec3]) -> ExtrudeResult<bool> {
    let n = points.len();
    if n < 3 {
        return Err(ExtrudeError::invalid_input(format!(
            "only polygons with at least 3 vertices are supported, got {n}"
        )));
    }

    let mut pivot = 0;
    for (i, p) in points.iter().enumerate() {
        let best = points[pivot];
        if p.y > best.y || (p.y == best.y && p.x < best.x) {
            pivot = i;
        }
    }

    let next = (pivot + 1) % n;
    let prev = (pivot + n - 1) % n;
    let next_x = normalized_x(points[pivot], points[next]);
    let prev_x = normalized_x(points[pivot], points[prev]);

    // The neighbour lying further left is the one the boundary leaves towards
    // when winding counter-clockwise.
    let mut selected = if prev_x > next_x { next } else { prev };

    if selected == 0 && pivot == n - 1 {
        selected = n;
    }
    if pivot == 0 && selected == n - 1 {
        pivot = n;
    }

    Ok(selected > pivot)
}

/// X component of the unit vector from `from` to `to`.
fn normalized_x(from: DVec3, to: DVec3) -> f64 {
    (to - from).normalize_or_zero().x
}

/// Returns the points in counter-clockwise order, reversing if needed.
pub fn to_ccw(points: &[DVec3]) -> ExtrudeResult<Vec<DVec3>> {
    let mut result = points.to_vec();
    if !is_ccw(&result)? {
        result.reverse();
    }
    Ok(result)
}

/// Returns the points in clockwise order, reversing if needed.
pub fn to_cw(points: &[DVec3]) -> ExtrudeResult<Vec<DVec3>> {
    let mut result = points.to_vec();
    if is_ccw(&result)? {
        result.reverse();
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
    }

    fn l_hexagon() -> Vec<DVec3> {
        [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]
            .into_iter()
            .map(|(x, y)| DVec3::new(x, y, 0.0))
            .collect()
    }

    fn rotations(points: &[DVec3]) -> impl Iterator<Item = Vec<DVec3>> + '_ {
        (0..points.len()).map(move |k| {
            let mut rotated = points.to_vec();
            rotated.rotate_left(k);
            rotated
        })
    }

    #[test]
    fn test_square_is_ccw() {
        assert!(is_ccw(&square()).unwrap());
    }

    #[test]
    fn test_invariant_under_rotation() {
        for polygon in [square(), l_hexagon()] {
            for rotated in rotations(&polygon) {
                assert!(is_ccw(&rotated).unwrap(), "rotation {rotated:?}");
            }
        }
    }

    #[test]
    fn test_reverse_flips_result() {
        for polygon in [square(), l_hexagon()] {
            for rotated in rotations(&polygon) {
                let mut reversed = rotated.clone();
                reversed.reverse();
                assert_eq!(is_ccw(&reversed).unwrap(), !is_ccw(&rotated).unwrap());
            }
        }
    }

    #[test]
    fn test_invariant_under_scaling() {
        let scaled: Vec<DVec3> = l_hexagon().iter().map(|p| *p * 37.5).collect();
        assert!(is_ccw(&scaled).unwrap());
    }

    #[test]
    fn test_too_few_vertices() {
        let err = is_ccw(&square()[..2]).unwrap_err();
        assert!(matches!(err, ExtrudeError::InvalidInput { .. }));
    }

    #[test]
    fn test_to_ccw_and_to_cw() {
        let mut cw = square();
        cw.reverse();

        assert_eq!(to_ccw(&cw).unwrap(), square());
        assert_eq!(to_ccw(&square()).unwrap(), square());
        assert_eq!(to_cw(&square()).unwrap(), cw);
        assert!(!is_ccw(&to_cw(&l_hexagon()).unwrap()).unwrap());
    }
}
