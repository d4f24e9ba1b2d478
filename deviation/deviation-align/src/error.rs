//! Error types for alignment operations.

use thiserror::Error;

/// Result type alias for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;

/// Errors that can occur during alignment.
///
/// Missing data is not an error: an empty point set normalizes to the
/// identity, and too few correspondences yield
/// [`CorrespondenceAlignment::Insufficient`](crate::CorrespondenceAlignment::Insufficient).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A correspondence point has a non-finite coordinate.
    #[error("correspondence {index} has non-finite coordinates")]
    NonFiniteCorrespondence {
        /// Position of the correspondence in the input slice.
        index: usize,
    },

    /// The two correspondences do not define a horizontal direction.
    #[error(
        "correspondence {index} coincides horizontally with the first; rotation is undefined"
    )]
    DegenerateCorrespondence {
        /// Position of the second correspondence in the input slice.
        index: usize,
    },
}

impl AlignError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }

    /// Returns `true` for caller contract violations (all current variants).
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_)
                | Self::NonFiniteCorrespondence { .. }
                | Self::DegenerateCorrespondence { .. }
        )
    }
}
