//! Decompose-extrude-union.

use config::constants::KernelConfig;
use csg_kernel::{
    BspEngine, EarClipTessellator, MeshEngine, Polygon, Solid, Storage, Tessellator,
};
use glam::DVec3;

use super::{
    validate_direction, validate_outline, ExtrudeOutcome, ExtrudeWarning, ExtrusionStrategy,
};
use crate::error::ExtrudeResult;
use crate::monotone::decompose;
use crate::orientation::to_ccw;
use crate::walls::extrude_monotone;

/// Splits the outline into monotone pieces and unions their prisms.
///
/// ## Steps
///
/// 1. Normalize the outline to counter-clockwise
/// 2. Decompose at turning reversals
/// 3. Extrude every run; the first seeds an accumulator and the rest are
///    unioned into it, dropping (with a warning) any that fail
/// 4. Extrude the base piece and union the accumulator into it; if that
///    fails, return the accumulator with a warning
#[derive(Debug, Clone)]
pub struct MonotoneExtrusion<E = BspEngine, T = EarClipTessellator> {
    engine: E,
    tessellator: T,
}

impl<E, T> MonotoneExtrusion<E, T> {
    /// Strategy over the given collaborators.
    pub fn new(engine: E, tessellator: T) -> Self {
        Self {
            engine,
            tessellator,
        }
    }
}

impl MonotoneExtrusion {
    /// Default collaborators tuned by `config`.
    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(BspEngine::new(*config), EarClipTessellator::from_config(config))
    }
}

impl Default for MonotoneExtrusion {
    fn default() -> Self {
        Self::from_config(&KernelConfig::default())
    }
}

impl<E, T> MonotoneExtrusion<E, T>
where
    E: MeshEngine,
    T: Tessellator,
{
    fn build(&self, direction: DVec3, points: &[DVec3], storage: &Storage) -> ExtrudeResult<Solid> {
        let polygon = Polygon::from_points_with_storage(points, storage.clone())?;
        extrude_monotone(&self.engine, &self.tessellator, direction, &polygon)
    }
}

impl<E, T> ExtrusionStrategy for MonotoneExtrusion<E, T>
where
    E: MeshEngine,
    T: Tessellator,
{
    fn extrude(&self, direction: DVec3, polygon: &Polygon) -> ExtrudeResult<ExtrudeOutcome> {
        validate_direction(direction)?;
        let positions = polygon.positions();
        validate_outline(&positions)?;

        let outline = to_ccw(&positions)?;
        let pieces = decompose(&outline)?;
        let storage = polygon.storage();
        let mut warnings = Vec::new();

        let mut accumulator: Option<Solid> = None;
        for (index, run) in pieces.runs.iter().enumerate() {
            let merged = self
                .build(direction, run, storage)
                .and_then(|solid| match &accumulator {
                    None => Ok(solid),
                    Some(acc) => Ok(self.engine.union(acc, &solid)?),
                });

            match merged {
                Ok(solid) => accumulator = Some(solid),
                Err(err) => {
                    tracing::warn!(index, error = %err, "dropping extrusion piece");
                    warnings.push(ExtrudeWarning::PieceDropped {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let base = self.build(direction, &pieces.base, storage);
        let solid = match (base, accumulator) {
            (Ok(base), None) => base,
            (Ok(base), Some(acc)) => match self.engine.union(&base, &acc) {
                Ok(solid) => solid,
                Err(err) => base_dropped(&mut warnings, err.to_string(), acc),
            },
            (Err(err), Some(acc)) => base_dropped(&mut warnings, err.to_string(), acc),
            (Err(err), None) => return Err(err),
        };

        tracing::debug!(
            pieces = pieces.piece_count(),
            reversals = pieces.reversals,
            dropped = warnings.len(),
            "extruded polygon"
        );

        Ok(ExtrudeOutcome { solid, warnings })
    }
}

fn base_dropped(warnings: &mut Vec<ExtrudeWarning>, reason: String, accumulator: Solid) -> Solid {
    tracing::warn!(error = %reason, "dropping base piece; returning the remaining pieces");
    warnings.push(ExtrudeWarning::BaseDropped { reason });
    accumulator
}
