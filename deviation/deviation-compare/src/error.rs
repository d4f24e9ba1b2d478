//! Error types for comparison operations.

use thiserror::Error;

/// Result type alias for comparison operations.
pub type CompareResult<T> = Result<T, CompareError>;

/// Errors that can occur during comparison.
///
/// Missing data is not an error: empty inputs produce an empty analysis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompareError {
    /// Grid cell size is zero, negative or not finite.
    #[error("grid size must be positive and finite, got {grid_size}")]
    InvalidGridSize {
        /// The rejected cell size.
        grid_size: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CompareError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }

    /// Returns `true` for caller contract violations (all current variants).
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidGridSize { .. } | Self::InvalidParameter(_))
    }
}
