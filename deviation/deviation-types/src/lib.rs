//! Core types for as-built deviation analysis.
//!
//! This crate provides the value types shared by the comparison and alignment
//! pipeline:
//!
//! - [`PointSet`] - An ordered set of finite world-space points
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Severity`] - Ok / warning / critical bands and [`classify_deviation`]
//! - [`HeatmapColor`] - Color mapping for deviation heatmaps
//! - [`DeviationAnalysis`] - Per-point deviations plus aggregate statistics
//! - [`AlignmentResult`] - Translation, uniform scale and rotation for a model
//! - [`ReferenceCorrespondence`] - A feature located in both models
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero rendering dependencies**. Nothing here
//! knows about file formats, scene graphs or UI state.
//!
//! # Units
//!
//! Positions are in **meters**. Deviations are in **millimeters**.
//!
//! # Coordinate System
//!
//! Right-handed, **+Y is vertical**. Horizontal alignment happens in the X-Z plane.
//!
//! # Example
//!
//! ```
//! use deviation_types::{classify_deviation, DeviationAnalysis, DeviationPoint, Point3, Severity};
//!
//! assert_eq!(classify_deviation(4.0), Severity::Ok);
//! assert_eq!(classify_deviation(10.0), Severity::Warning);
//! assert_eq!(classify_deviation(-42.0), Severity::Critical);
//!
//! let analysis = DeviationAnalysis::from_points(vec![
//!     DeviationPoint::new(Point3::new(0.0, 0.0, 0.0), 2.0),
//!     DeviationPoint::new(Point3::new(1.0, 0.0, 0.0), 35.0),
//! ]);
//! assert_eq!(analysis.statistics.total_points, 2);
//! assert_eq!(analysis.statistics.critical_count, 1);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod alignment;
mod analysis;
mod bounds;
mod color;
mod correspondence;
mod point;
mod severity;

pub use alignment::AlignmentResult;
pub use analysis::{
    DeviationAnalysis, DeviationPoint, DeviationStatistics, ElementDeviation, StatisticsAccumulator,
};
pub use bounds::Aabb;
pub use color::{HeatmapColor, deviation_color};
pub use correspondence::{CorrespondenceKind, ReferenceCorrespondence};
pub use point::{PointSet, is_finite_point};
pub use severity::{CRITICAL_THRESHOLD_MM, Severity, WARNING_THRESHOLD_MM, classify_deviation};

/// Meters to millimeters.
pub const MM_PER_METER: f64 = 1000.0;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
