//! As-built vs. as-designed deviation analysis.
//!
//! This umbrella crate re-exports the deviation-* crates. It compares a design
//! model ("reference") with a field capture ("observed") and measures how far
//! the capture departs from the design at every sampled location. All crates
//! are Layer 0 (zero rendering dependencies): models are read through the
//! [`scene::SceneNode`] trait, and results are plain values.
//!
//! # Quick Start
//!
//! ```
//! use deviation::prelude::*;
//!
//! // Design: a 4 m wall face. Scan: the same face, built 15 mm out of plane.
//! let wall: Vec<Point3<f64>> = (0..=8)
//!     .flat_map(|i| (0..=6).map(move |j| Point3::new(f64::from(i) * 0.5, f64::from(j) * 0.5, 0.0)))
//!     .collect();
//! let design = SceneObject::mesh("wall", wall.clone());
//! let scan = SceneObject::points("scan", wall).with_position(Vector3::new(0.0, 0.0, 0.015));
//!
//! let analysis = compare_models(&design, &scan, &CompareParams::default()).unwrap();
//! assert_eq!(analysis.statistics.warning_count, analysis.statistics.total_points);
//! println!("{}", analysis.statistics);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Point sets, severity bands, heatmap colors, analysis results,
//!   alignment transforms
//! - [`scene`] - The scene-node trait, an owned scene tree, world-space point
//!   extraction
//! - [`compare`] - Grid downsampling, nearest-neighbor deviation, element
//!   attribution, diagnostics
//! - [`align`] - Correspondence alignment and bounding-box normalization
//!
//! # Typical Pipeline
//!
//! 1. Load both models into anything implementing [`scene::SceneNode`]
//! 2. Align: [`align::align_models`] with user-placed correspondences, or
//!    normalization when there are none; apply the result to the scene
//! 3. Compare: [`compare::compare_models`]
//! 4. Optionally attribute to building elements with
//!    [`compare::attribute_elements`]
//! 5. Color vertices with [`types::DeviationAnalysis::deviation_at`] and
//!    [`types::deviation_color`]
//!
//! # Feature Flags
//!
//! - `serde` - Serialize results and parameters

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Point sets, severity bands, analysis results and alignment transforms.
pub use deviation_types as types;

/// Scene traversal and world-space point extraction.
pub use deviation_scene as scene;

/// Downsampling, nearest-neighbor deviation and statistics.
pub use deviation_compare as compare;

/// Correspondence and bounding-box alignment.
pub use deviation_align as align;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for deviation analysis.
///
/// # Usage
///
/// ```
/// use deviation::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use deviation_types::{
        AlignmentResult, DeviationAnalysis, DeviationPoint, DeviationStatistics, Point3,
        PointSet, ReferenceCorrespondence, Severity, Vector3, classify_deviation,
        deviation_color,
    };

    // Scene
    pub use deviation_scene::{SceneNode, SceneObject, extract_points};

    // Comparison (main use case)
    pub use deviation_compare::{CompareParams, compare_models, downsample};

    // Alignment
    pub use deviation_align::{
        CorrespondenceAlignment, ModelAlignment, NormalizeParams, align_models, align_to_ground,
    };
}

// =============================================================================
// Tests
// =============================================================================
