//! # Walls and Caps
//!
//! Closes a single polygon into a prism: a bottom cap, one quadrilateral wall
//! per edge and a top cap.
//!
//! ## Orientation
//!
//! The bottom polygon is first oriented so that its normal points along the
//! extrusion direction. Then:
//!
//! - bottom cap: the flipped bottom, tessellated (faces away from the prism)
//! - walls: `(bottom_next, top_next, top_current, bottom_current)`
//! - top cap: the bottom translated by the direction, tessellated
//!
//! Every face carries the bottom polygon's storage.

use csg_kernel::{MeshEngine, Polygon, Solid, Tessellator};
use glam::DVec3;

use crate::error::ExtrudeResult;

/// Extrudes one polygon along `direction`.
///
/// The polygon may be concave; the caps go through the tessellator and the
/// walls only need the outline. Zero-length edges produce no wall.
///
/// # Errors
///
/// Fails when a wall has no area, which happens when `direction` lies in the
/// polygon's plane.
///
/// # Example
///
/// ```rust
/// use csg_kernel::{BspEngine, EarClipTessellator, Polygon};
/// use glam::DVec3;
/// use polygon_extrude::walls::extrude_monotone;
///
/// let square = Polygon::from_points(&[
///     DVec3::ZERO,
///     DVec3::X,
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::Y,
/// ])
/// .unwrap();
///
/// let prism = extrude_monotone(&BspEngine::default(), &EarClipTessellator::default(), DVec3::Z, &square).unwrap();
/// assert_eq!(prism.face_count(), 6);
/// assert!((prism.volume() - 1.0).abs() < 1e-12);
/// ```
pub fn extrude_monotone<E, T>(
    engine: &E,
    tessellator: &T,
    direction: DVec3,
    polygon: &Polygon,
) -> ExtrudeResult<Solid>
where
    E: MeshEngine + ?Sized,
    T: Tessellator + ?Sized,
{
    let bottom = if polygon.plane().normal().dot(direction) < 0.0 {
        polygon.flipped()
    } else {
        polygon.clone()
    };
    let top = bottom.translated(direction);

    let bottom_cap = tessellator.concave_to_convex(&bottom.flipped());
    let top_cap = tessellator.concave_to_convex(&top);
    let walls = build_walls(&bottom, &top)?;

    let mut faces = Vec::with_capacity(bottom_cap.len() + walls.len() + top_cap.len());
    faces.extend(bottom_cap);
    faces.extend(walls);
    faces.extend(top_cap);

    Ok(engine.from_polygons(faces))
}

/// One quad per edge between matching outlines.
fn build_walls(bottom: &Polygon, top: &Polygon) -> ExtrudeResult<Vec<Polygon>> {
    let lower = bottom.positions();
    let upper = top.positions();
    let n = lower.len();

    let mut walls = Vec::with_capacity(n);
    for current in 0..n {
        let next = (current + 1) % n;
        if lower[current] == lower[next] {
            continue;
        }

        let quad = [lower[next], upper[next], upper[current], lower[current]];
        walls.push(Polygon::from_points_with_storage(
            &quad,
            bottom.storage().clone(),
        )?);
    }

    Ok(walls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csg_kernel::{BspEngine, EarClipTessellator, Storage};

    fn extrude(points: &[DVec3], direction: DVec3) -> Solid {
        let polygon = Polygon::from_points(points).unwrap();
        extrude_monotone(
            &BspEngine::default(),
            &EarClipTessellator::default(),
            direction,
            &polygon,
        )
        .unwrap()
    }

    fn unit_square() -> Vec<DVec3> {
        vec![
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::Y,
        ]
    }

    #[test]
    fn test_triangle_has_five_faces() {
        let prism = extrude(&[DVec3::ZERO, DVec3::X, DVec3::Y], DVec3::Z);
        assert_eq!(prism.face_count(), 5);
        assert!((prism.volume() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_square_prism() {
        let prism = extrude(&unit_square(), DVec3::Z);
        assert_eq!(prism.face_count(), 6);
        assert!((prism.volume() - 1.0).abs() < 1e-12);

        let (min, max) = prism.bounding_box().unwrap();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ONE);
    }

    #[test]
    fn test_faces_point_outward() {
        let prism = extrude(&unit_square(), DVec3::new(0.0, 0.0, 2.0));
        let center = DVec3::new(0.5, 0.5, 1.0);

        for face in prism.polygons() {
            let centroid = face.positions().iter().sum::<DVec3>() / face.len() as f64;
            assert!(face.plane().normal().dot(centroid - center) > 0.0);
        }
    }

    #[test]
    fn test_clockwise_input_is_reoriented() {
        let mut points = unit_square();
        points.reverse();
        let prism = extrude(&points, DVec3::Z);
        assert!((prism.volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_oblique_direction_keeps_volume() {
        let prism = extrude(&unit_square(), DVec3::new(1.0, 0.5, 2.0));
        assert!((prism.volume() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_concave_outline_is_capped_by_tessellator() {
        let l = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]
            .map(|(x, y)| DVec3::new(x, y, 0.0));
        let prism = extrude(&l, DVec3::Z);

        let walls = prism
            .polygons()
            .iter()
            .filter(|p| p.plane().normal().z.abs() < 1e-12)
            .count();
        assert_eq!(walls, 6);
        assert!((prism.volume() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_vertex_adds_no_wall() {
        let points = [DVec3::ZERO, DVec3::X, DVec3::X, DVec3::Y];
        let prism = extrude(&points, DVec3::Z);
        assert_eq!(prism.face_count(), 5);
    }

    #[test]
    fn test_storage_on_every_face() {
        let storage = Storage::new(7_u32);
        let polygon = Polygon::from_points_with_storage(&unit_square(), storage.clone()).unwrap();
        let prism = extrude_monotone(
            &BspEngine::default(),
            &EarClipTessellator::default(),
            DVec3::Z,
            &polygon,
        )
        .unwrap();

        assert!(prism.polygons().iter().all(|p| p.storage().ptr_eq(&storage)));
    }

    #[test]
    fn test_in_plane_direction_fails() {
        let polygon = Polygon::from_points(&unit_square()).unwrap();
        let result = extrude_monotone(
            &BspEngine::default(),
            &EarClipTessellator::default(),
            DVec3::X,
            &polygon,
        );
        assert!(result.is_err());
    }
}
