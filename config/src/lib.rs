//! # Config Crate
//!
//! Centralized configuration constants for the extrusion and sweep kernel.
//! Tolerances, curve sampling offsets and stack budgets are defined here so
//! that `csg-kernel` and `polygon-extrude` agree on every magic number.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, SWEEP_FINAL_PARAMETER};
//!
//! let value: f64 = 0.00000000001;
//! assert!(value.abs() < EPSILON);
//! assert!(SWEEP_FINAL_PARAMETER < 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies on Geometry**: Plain numbers only
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
