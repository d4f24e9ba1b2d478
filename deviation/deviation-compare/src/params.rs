//! Parameters for model comparison.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CompareError, CompareResult};

/// Default downsampling cell size: 20 cm.
pub const DEFAULT_GRID_SIZE: f64 = 0.2;

/// How a grid cell picks its representative point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DownsampleStrategy {
    /// The first point seen in the cell. Later points are dropped.
    #[default]
    KeepFirst,
    /// The centroid of all points in the cell.
    Centroid,
}

/// How nearest observed points are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NeighborSearch {
    /// Scan every observed point. O(R x O).
    #[default]
    BruteForce,
    /// Query a KD-tree over the observed points. Same distances, O(R log O).
    ///
    /// kiddo's bucketed tree cannot hold many points sharing one coordinate
    /// value on an axis, such as an axis-aligned floor sampled on a lattice.
    /// Those inputs are scanned instead, so results always match
    /// [`BruteForce`](Self::BruteForce).
    KdTree,
}

/// Parameters for [`compare_models`](crate::compare_models).
///
/// # Example
///
/// ```
/// use deviation_compare::{CompareParams, NeighborSearch};
///
/// // 20 cm cells, brute-force search
/// let params = CompareParams::default();
/// assert!((params.grid_size - 0.2).abs() < 1e-12);
///
/// // Finer grid with a KD-tree for large scans
/// let fine = CompareParams::with_grid_size(0.05).search(NeighborSearch::KdTree);
/// assert!(fine.validate().is_ok());
///
/// assert!(CompareParams::with_grid_size(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompareParams {
    /// Downsampling cell size, in the units of the points (meters).
    pub grid_size: f64,
    /// Representative selection per cell.
    pub downsample: DownsampleStrategy,
    /// Nearest-neighbor search method.
    pub search: NeighborSearch,
    /// Split the reference points across threads.
    pub parallel: bool,
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            downsample: DownsampleStrategy::KeepFirst,
            search: NeighborSearch::BruteForce,
            parallel: true,
        }
    }
}

impl CompareParams {
    /// Creates default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates params with a custom grid size.
    #[must_use]
    pub const fn with_grid_size(grid_size: f64) -> Self {
        Self {
            grid_size,
            downsample: DownsampleStrategy::KeepFirst,
            search: NeighborSearch::BruteForce,
            parallel: true,
        }
    }

    /// Set the grid size.
    #[must_use]
    pub const fn grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Set the downsampling strategy.
    #[must_use]
    pub const fn downsample(mut self, strategy: DownsampleStrategy) -> Self {
        self.downsample = strategy;
        self
    }

    /// Set the neighbor search method.
    #[must_use]
    pub const fn search(mut self, search: NeighborSearch) -> Self {
        self.search = search;
        self
    }

    /// Enable or disable the parallel scan.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the grid size.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::InvalidGridSize`] if the grid size is not a
    /// positive finite number.
    pub fn validate(&self) -> CompareResult<()> {
        validate_grid_size(self.grid_size)
    }
}

pub(crate) fn validate_grid_size(grid_size: f64) -> CompareResult<()> {
    if grid_size.is_finite() && grid_size > 0.0 {
        Ok(())
    } else {
        Err(CompareError::InvalidGridSize { grid_size })
    }
}
