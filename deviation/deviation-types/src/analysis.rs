//! Deviation analysis results.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Severity, classify_deviation};

/// A reference-space point with its deviation from the observed model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviationPoint {
    /// Position in the reference model (meters).
    pub position: Point3<f64>,
    /// Distance to the nearest observed point (millimeters).
    pub deviation: f64,
    /// Band of `deviation`.
    pub severity: Severity,
}

impl DeviationPoint {
    /// Creates a point, classifying the deviation.
    ///
    /// # Example
    ///
    /// ```
    /// use deviation_types::{DeviationPoint, Point3, Severity};
    ///
    /// let p = DeviationPoint::new(Point3::origin(), 12.5);
    /// assert_eq!(p.severity, Severity::Warning);
    /// ```
    #[must_use]
    pub fn new(position: Point3<f64>, deviation_mm: f64) -> Self {
        Self {
            position,
            deviation: deviation_mm,
            severity: classify_deviation(deviation_mm),
        }
    }
}

/// Aggregate statistics over a set of [`DeviationPoint`]s.
///
/// All deviations are in millimeters. An empty analysis reports zeros, never
/// NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviationStatistics {
    /// Number of reference points compared.
    pub total_points: usize,
    /// Points in [`Severity::Ok`].
    pub ok_count: usize,
    /// Points in [`Severity::Warning`].
    pub warning_count: usize,
    /// Points in [`Severity::Critical`].
    pub critical_count: usize,
    /// Mean deviation.
    pub avg_deviation: f64,
    /// Largest deviation.
    pub max_deviation: f64,
    /// Smallest deviation.
    pub min_deviation: f64,
}

impl DeviationStatistics {
    /// Number of points in a band.
    #[must_use]
    pub const fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Ok => self.ok_count,
            Severity::Warning => self.warning_count,
            Severity::Critical => self.critical_count,
        }
    }

    /// Share of points in a band, in percent. Zero when there are no points.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, severity: Severity) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            100.0 * self.count(severity) as f64 / self.total_points as f64
        }
    }

    /// Returns `true` if nothing was compared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_points == 0
    }
}

impl std::fmt::Display for DeviationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Deviation Analysis:")?;
        writeln!(f, "  Points compared: {}", self.total_points)?;
        writeln!(f, "  Avg deviation: {:.1} mm", self.avg_deviation)?;
        writeln!(f, "  Max deviation: {:.1} mm", self.max_deviation)?;
        writeln!(f, "  Min deviation: {:.1} mm", self.min_deviation)?;
        for severity in Severity::ALL {
            writeln!(
                f,
                "  {}: {} ({:.1}%)",
                severity,
                self.count(severity),
                self.percent(severity)
            )?;
        }
        Ok(())
    }
}

/// Running sum/min/max over deviations.
///
/// Partial accumulators can be merged, so a split scan gives the same totals
/// as a sequential one.
///
/// # Example
///
/// ```
/// use deviation_types::{DeviationPoint, Point3, StatisticsAccumulator};
///
/// let mut acc = StatisticsAccumulator::new();
/// acc.push(&DeviationPoint::new(Point3::origin(), 4.0));
/// acc.push(&DeviationPoint::new(Point3::origin(), 40.0));
///
/// let stats = acc.finish();
/// assert_eq!(stats.total_points, 2);
/// assert!((stats.avg_deviation - 22.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAccumulator {
    count: usize,
    counts: [usize; 3],
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticsAccumulator {
    /// Creates an accumulator with no samples.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: 0,
            counts: [0; 3],
            sum: 0.0,
            min: f64::INFINITY,
            max: 0.0,
        }
    }

    /// Adds one deviation point.
    pub fn push(&mut self, point: &DeviationPoint) {
        self.count += 1;
        self.counts[point.severity as usize] += 1;
        self.sum += point.deviation;
        self.min = self.min.min(point.deviation);
        self.max = self.max.max(point.deviation);
    }

    /// Combines two partial accumulators.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            counts: [
                self.counts[0] + other.counts[0],
                self.counts[1] + other.counts[1],
                self.counts[2] + other.counts[2],
            ],
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Produces the statistics. No samples gives all zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self) -> DeviationStatistics {
        if self.count == 0 {
            return DeviationStatistics::default();
        }
        DeviationStatistics {
            total_points: self.count,
            ok_count: self.counts[Severity::Ok as usize],
            warning_count: self.counts[Severity::Warning as usize],
            critical_count: self.counts[Severity::Critical as usize],
            avg_deviation: self.sum / self.count as f64,
            max_deviation: self.max,
            min_deviation: self.min,
        }
    }
}

/// Deviation summary for a named building element.
///
/// Produced by an explicit attribution stage from external element metadata;
/// never fabricated by the comparison itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementDeviation {
    /// Element identifier from the source metadata.
    pub id: u64,
    /// Human-readable element name.
    pub element: String,
    /// Zone or area label.
    pub zone: String,
    /// Representative (mean) deviation in millimeters.
    pub deviation: f64,
    /// Worst deviation in millimeters.
    pub max_deviation: f64,
    /// Analysis points attributed to the element.
    pub point_count: usize,
    /// Band of `deviation`.
    pub severity: Severity,
}

/// Result of comparing a reference model against an observed model.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviationAnalysis {
    /// One entry per downsampled reference point, in reference order.
    pub points: Vec<DeviationPoint>,
    /// Aggregates over `points`.
    pub statistics: DeviationStatistics,
    /// Optional per-element breakdown. Empty unless attribution was run.
    pub elements: Vec<ElementDeviation>,
}

impl DeviationAnalysis {
    /// An analysis with no points and zero statistics.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an analysis, computing statistics from the points.
    #[must_use]
    pub fn from_points(points: Vec<DeviationPoint>) -> Self {
        let mut acc = StatisticsAccumulator::new();
        for point in &points {
            acc.push(point);
        }
        Self {
            points,
            statistics: acc.finish(),
            elements: Vec::new(),
        }
    }

    /// Attaches an element breakdown.
    #[must_use]
    pub fn with_elements(mut self, elements: Vec<ElementDeviation>) -> Self {
        self.elements = elements;
        self
    }

    /// Returns `true` if no points were compared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The analysis point closest to `query`.
    ///
    /// Ties go to the earliest point. Returns `None` for an empty analysis.
    #[must_use]
    pub fn nearest_point(&self, query: &Point3<f64>) -> Option<&DeviationPoint> {
        let mut best: Option<(&DeviationPoint, f64)> = None;
        for point in &self.points {
            let dist_sq = (point.position - query).norm_squared();
            if best.is_none_or(|(_, d)| dist_sq < d) {
                best = Some((point, dist_sq));
            }
        }
        best.map(|(point, _)| point)
    }

    /// Deviation (mm) of the analysis point closest to `query`.
    ///
    /// This is how arbitrary mesh vertices are colored from an analysis.
    #[must_use]
    pub fn deviation_at(&self, query: &Point3<f64>) -> Option<f64> {
        self.nearest_point(query).map(|p| p.deviation)
    }

    /// Points in a given band.
    pub fn points_with_severity(
        &self,
        severity: Severity,
    ) -> impl Iterator<Item = &DeviationPoint> + '_ {
        self.points.iter().filter(move |p| p.severity == severity)
    }
}
