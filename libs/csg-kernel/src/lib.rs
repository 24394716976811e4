//! # CSG Kernel
//!
//! Polygon-soup solids and the operations the extrusion core builds on.
//!
//! ## Architecture
//!
//! ```text
//! geometry (Vertex, Plane, Polygon) → Solid → ops (union, hull, tessellate)
//!                                          ↘ MeshEngine / Tessellator traits
//! ```
//!
//! ## Algorithms
//!
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Hull**: QuickHull
//! - **Tessellation**: Ear clipping with robust orientation predicates
//! - **Curves**: Cubic beziers and SVG-style path data
//!
//! ## Usage
//!
//! ```rust
//! use csg_kernel::{BspEngine, MeshEngine, Solid, Transform};
//! use glam::DVec3;
//!
//! let engine = BspEngine::default();
//! let cube = Solid::cuboid(DVec3::ZERO, DVec3::ONE).unwrap();
//! let turned = cube.transformed(&Transform::new().rot_z(45.0)).unwrap();
//! let merged = engine.union(&cube, &turned).unwrap();
//! assert!(merged.volume() > 1.0);
//! ```

pub mod curve;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod solid;
pub mod transform;

pub use curve::{BezierPath, CubicBezier, ParametricCurve};
pub use engine::{BspEngine, MeshEngine};
pub use error::{CsgError, CsgResult};
pub use geometry::{Classification, Plane, Polygon, Storage, Vertex};
pub use mesh::Mesh;
pub use ops::tessellate::{EarClipTessellator, Tessellator};
pub use solid::Solid;
pub use transform::Transform;
