//! # Tessellation
//!
//! Concave-to-convex decomposition of planar polygons, used to cap the ends
//! of extruded solids.

mod ear_clip;


pub use ear_clip::ear_clip;

use config::constants::{KernelConfig, EPSILON};

use crate::geometry::Polygon;

/// Splits a simple planar polygon into convex pieces.
///
/// Implementations must cover the input area exactly once, keep the input's
/// winding (and therefore its normal) on every piece, and copy the input's
/// storage onto every piece.
pub trait Tessellator: Send + Sync {
    /// Returns a convex cover of `polygon`.
    fn concave_to_convex(&self, polygon: &Polygon) -> Vec<Polygon>;
}

/// Ear-clipping tessellator.
///
/// Convex polygons are returned unchanged as a single piece. Concave ones are
/// clipped into triangles in the polygon's own plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarClipTessellator {
    /// Slack allowed when deciding whether a corner is convex.
    pub convexity_tolerance: f64,
}

impl EarClipTessellator {
    /// Tessellator using the configured tolerance.
    pub fn from_config(config: &KernelConfig) -> Self {
        Self {
            convexity_tolerance: config.tolerance,
        }
    }
}

impl Default for EarClipTessellator {
    fn default() -> Self {
        Self {
            convexity_tolerance: EPSILON,
        }
    }
}

impl Tessellator for EarClipTessellator {
    fn concave_to_convex(&self, polygon: &Polygon) -> Vec<Polygon> {
        if polygon.is_convex(self.convexity_tolerance) {
            return vec![polygon.clone()];
        }
        ear_clip(polygon)
    }
}
