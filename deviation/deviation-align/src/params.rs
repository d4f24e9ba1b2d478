//! Parameters for bounding-box normalization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AlignError, AlignResult};

/// Default fitted size for [`NormalizeParams::default`]: 10 units on the
/// longest axis.
pub const DEFAULT_TARGET_SIZE: f64 = 10.0;

/// Which normalization steps to apply.
///
/// The three steps are independent; any subset may be enabled. They are
/// combined into a single transform in the order center, scale, ground.
///
/// # Example
///
/// ```
/// use deviation_align::NormalizeParams;
///
/// // Center and fit the longest axis to 10 units
/// let params = NormalizeParams::default();
/// assert!(params.center);
/// assert_eq!(params.target_size, Some(10.0));
///
/// // Only drop the model onto Y = 0
/// let ground = NormalizeParams::ground_only();
/// assert!(!ground.center && ground.ground);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizeParams {
    /// Move the bounding-box center to the origin.
    pub center: bool,
    /// Uniformly scale so the longest bounding-box edge has this length.
    pub target_size: Option<f64>,
    /// Move the bounding-box bottom to Y = 0.
    pub ground: bool,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            center: true,
            target_size: Some(DEFAULT_TARGET_SIZE),
            ground: false,
        }
    }
}

impl NormalizeParams {
    /// Creates default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Centering only, no scaling.
    #[must_use]
    pub const fn center_only() -> Self {
        Self {
            center: true,
            target_size: None,
            ground: false,
        }
    }

    /// Ground snap only.
    #[must_use]
    pub const fn ground_only() -> Self {
        Self {
            center: false,
            target_size: None,
            ground: true,
        }
    }

    /// Enable or disable centering.
    #[must_use]
    pub const fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Set or clear the fitted size.
    #[must_use]
    pub const fn with_target_size(mut self, target_size: Option<f64>) -> Self {
        self.target_size = target_size;
        self
    }

    /// Enable or disable the ground snap.
    #[must_use]
    pub const fn with_ground(mut self, ground: bool) -> Self {
        self.ground = ground;
        self
    }

    /// Checks the fitted size.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::InvalidParameter`] if `target_size` is set and is
    /// not a positive finite number.
    pub fn validate(&self) -> AlignResult<()> {
        match self.target_size {
            Some(size) if !(size.is_finite() && size > 0.0) => Err(AlignError::invalid_parameter(
                format!("target size must be positive and finite, got {size}"),
            )),
            _ => Ok(()),
        }
    }
}
