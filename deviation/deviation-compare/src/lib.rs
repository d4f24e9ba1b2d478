//! Deviation analysis between a design model and an as-built capture.
//!
//! This crate runs the comparison pipeline:
//! - **Downsampling** - One representative point per grid cell
//! - **Nearest-neighbor deviation** - Distance from every reference point to
//!   the closest observed point, in millimeters
//! - **Statistics** - Per-band counts and mean/min/max deviation
//! - **Element attribution** - Optional per-element summaries from external
//!   element bounds
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero rendering dependencies. Models are read
//! through the [`SceneNode`](deviation_scene::SceneNode) trait.
//!
//! # Quick Start
//!
//! ```
//! use deviation_compare::{compare_models, CompareParams};
//! use deviation_scene::SceneObject;
//! use nalgebra::{Point3, Vector3};
//!
//! let design = SceneObject::mesh(
//!     "slab",
//!     vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0), Point3::new(0.0, 0.0, 4.0)],
//! );
//! let scan = design.clone().with_position(Vector3::new(0.0, 0.012, 0.0));
//!
//! let analysis = compare_models(&design, &scan, &CompareParams::default()).unwrap();
//! println!("{}", analysis.statistics);
//!
//! assert_eq!(analysis.statistics.warning_count, 3);
//! ```
//!
//! # Empty Inputs
//!
//! A model without geometry is valid input. The comparison then returns
//! [`DeviationAnalysis::empty`](deviation_types::DeviationAnalysis::empty):
//! zero points and all-zero statistics. Only caller contract violations, such
//! as a non-positive grid size, are errors.
//!
//! # Performance Tips
//!
//! - The nearest scan is O(R x O) after downsampling; a coarser grid cuts both
//! - `CompareParams::parallel` splits reference points across rayon threads
//! - `NeighborSearch::KdTree` builds a KD-tree over the observed points, unless
//!   repeated axis values would overflow its buckets

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod diagnostics;
mod downsample;
mod elements;
mod engine;
mod error;
mod nearest;
mod params;

pub use diagnostics::{DiagnosticEvent, DiagnosticSink, ModelRole, NullSink, TracingSink};
pub use downsample::{CellKey, cell_key, downsample, downsample_with};
pub use elements::{ElementRegion, attribute_elements};
pub use engine::{
    compare_models, compare_models_with_sink, compute_deviation, compute_deviation_with_sink,
};
pub use error::{CompareError, CompareResult};
pub use nearest::{Nearest, nearest_point};
pub use params::{CompareParams, DEFAULT_GRID_SIZE, DownsampleStrategy, NeighborSearch};
