//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry union using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//!
//! ## Example
//!
//! ```rust
//! use csg_kernel::ops::boolean::union;
//! use csg_kernel::Solid;
//!
//! let a = Solid::cuboid(glam::DVec3::ZERO, glam::DVec3::ONE).unwrap();
//! let b = Solid::cuboid(glam::DVec3::splat(0.5), glam::DVec3::splat(1.5)).unwrap();
//! let merged = union(&a, &b).unwrap();
//! assert!((merged.volume() - 1.875).abs() < 1e-9);
//! ```

mod bsp;


pub use bsp::BspNode;

use crate::error::{CsgError, CsgResult};
use crate::solid::Solid;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two solids.
///
/// An empty input yields a copy of the other input.
///
/// ## Parameters
///
/// - `a`: First solid
/// - `b`: Second solid
///
/// ## Errors
///
/// `BooleanFailed` when an input carries non-finite coordinates, or when two
/// non-empty inputs clip each other away entirely (inconsistent orientation).
pub fn union(a: &Solid, b: &Solid) -> CsgResult<Solid> {
    if !a.is_finite() || !b.is_finite() {
        return Err(CsgError::boolean_failed(
            "union",
            "input contains non-finite coordinates",
        ));
    }

    if a.is_empty() {
        return Ok(b.clone());
    }
    if b.is_empty() {
        return Ok(a.clone());
    }

    let mut bsp_a = BspNode::new(a.polygons().to_vec());
    let mut bsp_b = BspNode::new(b.polygons().to_vec());

    // a.clipTo(b) - remove parts of A inside B
    // b.clipTo(a) - remove parts of B inside A
    // b.invert(); b.clipTo(a); b.invert() - remove coplanar faces from B
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut polygons = bsp_a.all_polygons();
    polygons.extend(bsp_b.all_polygons());

    if polygons.is_empty() {
        return Err(CsgError::boolean_failed(
            "union",
            "non-empty inputs produced an empty result",
        ));
    }

    Ok(Solid::from_polygons(polygons))
}
