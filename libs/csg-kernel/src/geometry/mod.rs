//! # Geometry Primitives
//!
//! Vertices, planes and planar polygons shared by every kernel operation.

mod plane;
mod polygon;
mod vertex;


pub use plane::{Classification, Plane};
pub use polygon::{Polygon, Storage};
pub use vertex::Vertex;
