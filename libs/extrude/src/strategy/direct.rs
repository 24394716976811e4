//! Whole-outline extrusion without decomposition.

use config::constants::KernelConfig;
use csg_kernel::{BspEngine, EarClipTessellator, MeshEngine, Polygon, Tessellator};
use glam::DVec3;

use super::{validate_direction, validate_outline, ExtrudeOutcome, ExtrusionStrategy};
use crate::error::ExtrudeResult;
use crate::orientation::to_ccw;
use crate::walls::extrude_monotone;

/// Normalizes the outline to counter-clockwise and builds walls and caps
/// directly.
///
/// Never degrades: a concave outline is handled by the tessellator alone.
#[derive(Debug, Clone)]
pub struct DirectExtrusion<E = BspEngine, T = EarClipTessellator> {
    engine: E,
    tessellator: T,
}

impl<E, T> DirectExtrusion<E, T> {
    /// Strategy over the given collaborators.
    pub fn new(engine: E, tessellator: T) -> Self {
        Self {
            engine,
            tessellator,
        }
    }
}

impl DirectExtrusion {
    /// Default collaborators tuned by `config`.
    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(BspEngine::new(*config), EarClipTessellator::from_config(config))
    }
}

impl Default for DirectExtrusion {
    fn default() -> Self {
        Self::from_config(&KernelConfig::default())
    }
}

impl<E, T> ExtrusionStrategy for DirectExtrusion<E, T>
where
    E: MeshEngine,
    T: Tessellator,
{
    fn extrude(&self, direction: DVec3, polygon: &Polygon) -> ExtrudeResult<ExtrudeOutcome> {
        validate_direction(direction)?;
        let positions = polygon.positions();
        validate_outline(&positions)?;

        let outline =
            Polygon::from_points_with_storage(&to_ccw(&positions)?, polygon.storage().clone())?;
        let solid = extrude_monotone(&self.engine, &self.tessellator, direction, &outline)?;
        Ok(ExtrudeOutcome::complete(solid))
    }
}
