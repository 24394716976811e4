//! # Mesh Engine
//!
//! The solid operations the extrusion and sweep code depend on, behind a
//! trait so callers can swap in another kernel.

use config::constants::KernelConfig;

use crate::error::CsgResult;
use crate::geometry::Polygon;
use crate::ops::{boolean, hull};
use crate::solid::Solid;

/// Solid-level operations consumed by extrusion and sweeping.
///
/// Implementations must be shareable across threads: sweeps may stitch
/// slices on the rayon pool.
pub trait MeshEngine: Send + Sync {
    /// Union of two solids.
    ///
    /// # Errors
    ///
    /// Fails on degenerate or non-manifold input.
    fn union(&self, a: &Solid, b: &Solid) -> CsgResult<Solid>;

    /// Convex hull of a solid.
    fn hull(&self, solid: &Solid) -> CsgResult<Solid>;

    /// Builds a solid from boundary polygons.
    fn from_polygons(&self, polygons: Vec<Polygon>) -> Solid {
        Solid::from_polygons(polygons)
    }
}

/// Default engine: csg.js BSP union and QuickHull.
///
/// # Example
///
/// ```rust
/// use csg_kernel::{BspEngine, MeshEngine, Solid};
/// use glam::DVec3;
///
/// let engine = BspEngine::default();
/// let a = Solid::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
/// let b = a.translated(DVec3::new(2.0, 0.0, 0.0));
/// let bridge = engine.hull(&engine.union(&a, &b).unwrap()).unwrap();
/// assert!((bridge.volume() - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BspEngine {
    config: KernelConfig,
}

impl BspEngine {
    /// Engine using the given configuration.
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }
}

impl MeshEngine for BspEngine {
    fn union(&self, a: &Solid, b: &Solid) -> CsgResult<Solid> {
        boolean::union(a, b)
    }

    fn hull(&self, solid: &Solid) -> CsgResult<Solid> {
        hull::hull_with_tolerance(solid, self.config.tolerance)
    }
}
