//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls of solids.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside

mod quickhull;

#[cfg(test)]
mod tests;

pub use quickhull::{convex_hull, convex_hull_with_tolerance};

use config::constants::VERTEX_MERGE_EPSILON;

use crate::error::CsgResult;
use crate::solid::Solid;

/// Computes the convex hull of a solid's vertices.
///
/// The hull's faces carry the storage of the solid's first polygon. An empty
/// solid yields an empty solid.
///
/// ## Errors
///
/// `DegenerateGeometry` when fewer than 4 non-coplanar points remain.
///
/// # Example
///
/// ```rust
/// use csg_kernel::ops::hull::hull;
/// use csg_kernel::Solid;
/// use glam::DVec3;
///
/// let cube = Solid::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
/// let result = hull(&cube).unwrap();
/// assert!((result.volume() - 1.0).abs() < 1e-9);
/// ```
pub fn hull(solid: &Solid) -> CsgResult<Solid> {
    hull_with_tolerance(solid, VERTEX_MERGE_EPSILON)
}

/// Computes the convex hull, merging vertices closer than `merge_tolerance`.
pub fn hull_with_tolerance(solid: &Solid, merge_tolerance: f64) -> CsgResult<Solid> {
    let Some(first) = solid.polygons().first() else {
        return Ok(Solid::empty());
    };
    let storage = first.storage().clone();

    let points: Vec<_> = solid
        .polygons()
        .iter()
        .flat_map(|polygon| polygon.vertices().iter().map(|v| v.pos))
        .collect();

    let mesh = convex_hull_with_tolerance(&points, merge_tolerance)?;
    Ok(Solid::from_mesh_with_storage(&mesh, storage))
}
