//! # Kernel Errors
//!
//! Error types for polygon construction and solid operations.
//!
//! ## Error Policy
//!
//! - Operations that cannot produce a meaningful solid return an error
//! - Errors carry a human-readable message for the caller's diagnostics

use thiserror::Error;

/// Errors that can occur inside the CSG kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// A polygon could not be formed from the supplied vertices.
    #[error("Invalid polygon: {message}")]
    InvalidPolygon {
        /// What was wrong with the vertex list.
        message: String,
    },

    /// Degenerate geometry (collinear, coplanar or too few points).
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the degeneracy.
        message: String,
    },

    /// Boolean operation failed.
    #[error("Boolean operation '{operation}' failed: {message}")]
    BooleanFailed {
        /// Name of the boolean operation.
        operation: &'static str,
        /// Error message.
        message: String,
    },

    /// Path description could not be parsed.
    #[error("Invalid path at byte {position}: {message}")]
    InvalidPath {
        /// Byte offset of the offending token.
        position: usize,
        /// Error message.
        message: String,
    },
}

impl CsgError {
    /// Creates an invalid polygon error.
    pub fn invalid_polygon(message: impl Into<String>) -> Self {
        Self::InvalidPolygon {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boolean operation failed error.
    pub fn boolean_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::BooleanFailed {
            operation,
            message: message.into(),
        }
    }

    /// Creates a path parse error.
    pub fn invalid_path(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for kernel operations.
pub type CsgResult<T> = Result<T, CsgError>;
