//! # Polygon Extrude
//!
//! Turns planar outlines into closed solids and sweeps cross-sections along
//! curves.
//!
//! ## Architecture
//!
//! ```text
//! points → orientation (to_ccw) → monotone (decompose) → walls (extrude_monotone)
//!                                                      ↘ union into one solid
//!
//! curves → sweep::transforms (frames) → sweep::assemble (place, stitch)
//! ```
//!
//! Solid operations come from a [`MeshEngine`](csg_kernel::MeshEngine) and cap
//! tessellation from a [`Tessellator`](csg_kernel::Tessellator); both are
//! passed in, with `csg-kernel`'s BSP engine and ear clipper as defaults.
//!
//! ## Usage
//!
//! ```rust
//! use csg_kernel::Solid;
//! use glam::DVec3;
//! use polygon_extrude::sweep::{BezierControls, Sweeper};
//! use polygon_extrude::{extrude_points, MonotoneExtrusion};
//!
//! let outline = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)]
//!     .map(|(x, y)| DVec3::new(x, y, 0.0));
//! let bracket = extrude_points(&MonotoneExtrusion::default(), DVec3::Z, &outline).unwrap();
//! assert!(!bracket.is_degraded());
//!
//! let rail = Sweeper::default()
//!     .sweep_bezier_solid(
//!         &bracket.solid,
//!         &BezierControls::linear(DVec3::new(0.0, 0.0, 10.0)),
//!         4,
//!     )
//!     .unwrap();
//! assert_eq!(rail.len(), 4);
//! ```

pub mod error;
pub mod monotone;
pub mod orientation;
pub mod strategy;
pub mod sweep;
pub mod walls;

pub use error::{ExtrudeError, ExtrudeResult};
pub use monotone::{decompose, Decomposition};
pub use orientation::{is_ccw, to_ccw, to_cw};
pub use strategy::{
    extrude_points, DirectExtrusion, ExtrudeOutcome, ExtrudeWarning, ExtrusionStrategy,
    MonotoneExtrusion,
};
pub use walls::extrude_monotone;
