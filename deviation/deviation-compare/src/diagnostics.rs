//! Progress and diagnostic reporting.
//!
//! The pipeline reports what it did through a [`DiagnosticSink`]. The default
//! sink forwards to `tracing`; callers that want the events themselves pass a
//! closure.

use tracing::{info, warn};

/// Which side of a comparison an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    /// The as-designed model.
    Reference,
    /// The as-built scan or model.
    Observed,
}

impl std::fmt::Display for ModelRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Observed => write!(f, "observed"),
        }
    }
}

/// An event emitted while comparing models.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    /// World-space points were extracted from a model.
    PointsExtracted {
        /// Model side.
        role: ModelRole,
        /// Valid points extracted.
        count: usize,
        /// Vertices dropped as non-finite.
        rejected: usize,
    },
    /// A point set was grid-downsampled.
    Downsampled {
        /// Model side.
        role: ModelRole,
        /// Points before downsampling.
        before: usize,
        /// Points after downsampling.
        after: usize,
    },
    /// One side had no points; an empty analysis was returned.
    ComparisonSkipped {
        /// Reference points after downsampling.
        reference: usize,
        /// Observed points after downsampling.
        observed: usize,
    },
    /// The comparison finished.
    ComparisonComplete {
        /// Reference points compared.
        total: usize,
        /// Mean deviation (mm).
        avg_deviation: f64,
        /// Largest deviation (mm).
        max_deviation: f64,
    },
}

/// Receives [`DiagnosticEvent`]s.
pub trait DiagnosticSink {
    /// Handles one event.
    fn record(&self, event: &DiagnosticEvent);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DiagnosticEvent),
{
    fn record(&self, event: &DiagnosticEvent) {
        self(event);
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match *event {
            DiagnosticEvent::PointsExtracted {
                role,
                count,
                rejected,
            } => {
                if rejected > 0 {
                    warn!(%role, count, rejected, "Dropped non-finite vertices");
                }
                info!(%role, count, "Extracted points");
            }
            DiagnosticEvent::Downsampled {
                role,
                before,
                after,
            } => {
                info!(%role, before, after, "Downsampled points");
            }
            DiagnosticEvent::ComparisonSkipped {
                reference,
                observed,
            } => {
                warn!(reference, observed, "No points to compare");
            }
            DiagnosticEvent::ComparisonComplete {
                total,
                avg_deviation,
                max_deviation,
            } => {
                info!(
                    total,
                    avg_mm = format!("{avg_deviation:.1}"),
                    max_mm = format!("{max_deviation:.1}"),
                    "Deviation analysis complete"
                );
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}
