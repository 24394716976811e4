//! # Extrusion Errors
//!
//! Hard failures of the extrusion and sweep entry points. Degraded results
//! are not errors; they are reported as [`ExtrudeWarning`](crate::ExtrudeWarning)s.

use csg_kernel::CsgError;
use thiserror::Error;

/// Errors returned by extrusion and sweep operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtrudeError {
    /// Rejected before any geometry was built.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// A kernel operation failed.
    #[error(transparent)]
    Kernel(#[from] CsgError),
}

impl ExtrudeError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for extrusion operations.
pub type ExtrudeResult<T> = Result<T, ExtrudeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_errors_convert() {
        fn fails() -> ExtrudeResult<()> {
            Err(CsgError::degenerate("flat"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, ExtrudeError::Kernel(CsgError::DegenerateGeometry { .. })));
        assert!(err.to_string().contains("flat"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = ExtrudeError::invalid_input("direction points down");
        assert_eq!(err.to_string(), "Invalid input: direction points down");
    }
}
