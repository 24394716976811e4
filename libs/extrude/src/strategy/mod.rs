//! # Extrusion Strategies
//!
//! How a planar outline becomes a closed solid. The strategy is an explicit
//! value handed to each entry point; there is no process-wide default.
//!
//! ## Strategies
//!
//! - [`MonotoneExtrusion`]: splits the outline at turning reversals, extrudes
//!   each piece and unions them back together
//! - [`DirectExtrusion`]: extrudes the whole outline in one go, relying on the
//!   tessellator for concave caps
//!
//! ## Degraded Results
//!
//! Union failures between pieces do not abort an extrusion. The affected
//! geometry is left out and an [`ExtrudeWarning`] says what was lost and why.

mod direct;
mod fold;

#[cfg(test)]
mod tests;

pub use direct::DirectExtrusion;
pub use fold::MonotoneExtrusion;

use std::fmt;

use config::constants::approx_zero;
use csg_kernel::{Polygon, Solid};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{ExtrudeError, ExtrudeResult};

/// Turns a planar polygon into a solid.
///
/// Implementations must reject a direction with a negative z component
/// before building any geometry.
pub trait ExtrusionStrategy: Send + Sync {
    /// Extrudes `polygon` along `direction`.
    fn extrude(&self, direction: DVec3, polygon: &Polygon) -> ExtrudeResult<ExtrudeOutcome>;
}

// =============================================================================
// OUTCOME
// =============================================================================

/// A solid plus anything that had to be left out of it.
#[derive(Debug, Clone)]
pub struct ExtrudeOutcome {
    /// The best solid that could be assembled.
    pub solid: Solid,
    /// Pieces that were dropped, in the order they were dropped.
    pub warnings: Vec<ExtrudeWarning>,
}

impl ExtrudeOutcome {
    /// An outcome with nothing dropped.
    pub fn complete(solid: Solid) -> Self {
        Self {
            solid,
            warnings: Vec::new(),
        }
    }

    /// Returns true if some geometry was dropped.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Discards the warnings.
    pub fn into_solid(self) -> Solid {
        self.solid
    }
}

/// Geometry dropped from an extrusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtrudeWarning {
    /// A decomposition piece could not be built or unioned.
    PieceDropped {
        /// Position of the piece in decomposition order.
        index: usize,
        /// Error reported by the kernel.
        reason: String,
    },
    /// The final union with the base piece failed; only the other pieces were
    /// returned.
    BaseDropped {
        /// Error reported by the kernel.
        reason: String,
    },
}

impl fmt::Display for ExtrudeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PieceDropped { index, reason } => {
                write!(f, "piece {index} dropped: {reason}")
            }
            Self::BaseDropped { reason } => write!(f, "base piece dropped: {reason}"),
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Extrudes a point list with the given strategy.
///
/// The points are read as an outline in the XY plane; either winding is
/// accepted.
///
/// ## Errors
///
/// `InvalidInput`, before any geometry is built, when:
///
/// - fewer than 3 points are given
/// - a point or the direction is not finite
/// - the direction is zero or has a negative z component
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use polygon_extrude::{extrude_points, MonotoneExtrusion};
///
/// let l = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]
///     .map(|(x, y)| DVec3::new(x, y, 0.0));
///
/// let outcome = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &l).unwrap();
/// assert!(!outcome.is_degraded());
/// assert!((outcome.solid.volume() - 3.0).abs() < 1e-9);
/// ```
pub fn extrude_points<S>(
    strategy: &S,
    direction: DVec3,
    points: &[DVec3],
) -> ExtrudeResult<ExtrudeOutcome>
where
    S: ExtrusionStrategy + ?Sized,
{
    validate_outline(points)?;
    validate_direction(direction)?;

    let polygon = Polygon::from_points(points)?;
    strategy.extrude(direction, &polygon)
}

/// Rejects directions the extruders cannot handle.
pub(crate) fn validate_direction(direction: DVec3) -> ExtrudeResult<()> {
    if !direction.is_finite() {
        return Err(ExtrudeError::invalid_input(format!(
            "extrusion direction must be finite, got {direction}"
        )));
    }
    if direction.z < 0.0 {
        return Err(ExtrudeError::invalid_input(format!(
            "extrusion direction must not point below the XY plane, got z = {}",
            direction.z
        )));
    }
    if approx_zero(direction.length()) {
        return Err(ExtrudeError::invalid_input("extrusion direction has zero length"));
    }
    Ok(())
}

/// Rejects outlines too short or not finite.
pub(crate) fn validate_outline(points: &[DVec3]) -> ExtrudeResult<()> {
    if points.len() < 3 {
        return Err(ExtrudeError::invalid_input(format!(
            "only polygons with at least 3 vertices are supported, got {}",
            points.len()
        )));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ExtrudeError::invalid_input(format!(
            "vertex {index} is not finite"
        )));
    }
    Ok(())
}
