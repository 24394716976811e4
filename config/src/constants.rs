//! # Configuration Constants
//!
//! Centralized constants for the extrusion kernel. All geometry tolerances,
//! sweep sampling parameters and safety budgets are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Sweep Sampling**: Parameter offsets used when sampling curves
//! - **Limits**: Stack budgets for deep BSP trees

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when classifying points against BSP splitting planes.
///
/// Points closer than this to a plane are treated as coplanar. The value
/// matches the csg.js reference implementation.
///
/// # Example
///
/// ```rust
/// use config::constants::PLANE_EPSILON;
///
/// let distance: f64 = 2e-6;
/// assert!(distance.abs() < PLANE_EPSILON);
/// ```
pub const PLANE_EPSILON: f64 = 1e-5;

/// Epsilon for vertex deduplication.
///
/// Used by the convex hull and the ear-clipping tessellator when deciding
/// whether two points are the same point.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

// =============================================================================
// SWEEP SAMPLING CONSTANTS
// =============================================================================

/// Offset, in sample-index units, of the first curve sample.
///
/// Samples are taken at `(k + SWEEP_SAMPLE_OFFSET) / (slices - 1)` so that the
/// first finite difference is never measured at exactly `t = 0`.
///
/// # Example
///
/// ```rust
/// use config::constants::SWEEP_SAMPLE_OFFSET;
///
/// let slices = 4.0;
/// let first_t = SWEEP_SAMPLE_OFFSET / (slices - 1.0);
/// assert!(first_t > 0.0 && first_t < 0.01);
/// ```
pub const SWEEP_SAMPLE_OFFSET: f64 = 0.01;

/// Parameter of the last curve sample.
///
/// The final sample stops short of `t = 1` so that the last finite
/// difference never collapses onto a degenerate curve end.
pub const SWEEP_FINAL_PARAMETER: f64 = 0.99999;

/// Arc length of a full revolution in degrees.
pub const FULL_REVOLUTION_DEGREES: f64 = 360.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Minimum number of non-coplanar points required by the convex hull.
pub const HULL_MIN_POINTS: usize = 4;

/// Bytes of stack space reserved when growing the stack for BSP recursion
/// using the `stacker` crate.
///
/// # Example
///
/// ```rust
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker` allocates a new segment.
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// KERNEL CONFIGURATION
// =============================================================================

/// Immutable snapshot of kernel settings shared between crates.
///
/// # Examples
/// ```
/// use config::constants::KernelConfig;
/// let config = KernelConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert!(config.parallel_sweep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Tolerance used by the hull and the tessellator for point coincidence
    /// and convexity decisions.
    pub tolerance: f64,
    /// Whether sweep slices are transformed and stitched on the rayon pool.
    pub parallel_sweep: bool,
}

impl KernelConfig {
    /// Builds a configuration, rejecting non-positive or non-finite
    /// tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-6, false).expect("valid config");
    /// assert!(!cfg.parallel_sweep);
    /// ```
    pub fn new(tolerance: f64, parallel_sweep: bool) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            parallel_sweep,
        })
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: VERTEX_MERGE_EPSILON,
            parallel_sweep: true,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
