//! # Solid Operations
//!
//! - [`boolean`]: BSP union
//! - [`hull`]: QuickHull convex hull
//! - [`tessellate`]: concave-to-convex polygon decomposition

pub mod boolean;
pub mod hull;
pub mod tessellate;
