//! Severity bands for deviation magnitudes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deviations at or above this magnitude (mm) are at least [`Severity::Warning`].
pub const WARNING_THRESHOLD_MM: f64 = 10.0;

/// Deviations at or above this magnitude (mm) are [`Severity::Critical`].
pub const CRITICAL_THRESHOLD_MM: f64 = 30.0;

/// Ordinal severity of a deviation.
///
/// Bands are closed below and open above:
///
/// | Band | Magnitude (mm) |
/// |------|----------------|
/// | `Ok` | `< 10` |
/// | `Warning` | `10 ..< 30` |
/// | `Critical` | `>= 30` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Within tolerance.
    Ok,
    /// Noticeable, needs review.
    Warning,
    /// Out of tolerance.
    Critical,
}

impl Severity {
    /// All bands in ascending order.
    pub const ALL: [Self; 3] = [Self::Ok, Self::Warning, Self::Critical];

    /// Lowercase label, as used in exported reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a deviation magnitude in millimeters.
///
/// Only the magnitude matters; the sign is ignored. NaN compares false against
/// both thresholds and lands in [`Severity::Critical`].
///
/// # Example
///
/// ```
/// use deviation_types::{classify_deviation, Severity};
///
/// assert_eq!(classify_deviation(9.999), Severity::Ok);
/// assert_eq!(classify_deviation(10.0), Severity::Warning);
/// assert_eq!(classify_deviation(30.0), Severity::Critical);
/// assert_eq!(classify_deviation(-15.0), Severity::Warning);
/// ```
#[must_use]
pub fn classify_deviation(deviation_mm: f64) -> Severity {
    let magnitude = deviation_mm.abs();
    if magnitude < WARNING_THRESHOLD_MM {
        Severity::Ok
    } else if magnitude < CRITICAL_THRESHOLD_MM {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify_deviation(0.0), Severity::Ok);
        assert_eq!(classify_deviation(9.999), Severity::Ok);
        assert_eq!(classify_deviation(10.0), Severity::Warning);
        assert_eq!(classify_deviation(29.999), Severity::Warning);
        assert_eq!(classify_deviation(30.0), Severity::Critical);
        assert_eq!(classify_deviation(5000.0), Severity::Critical);
    }

    #[test]
    fn sign_is_ignored() {
        assert_eq!(classify_deviation(-15.0), Severity::Warning);
        assert_eq!(classify_deviation(-9.0), Severity::Ok);
        assert_eq!(classify_deviation(-30.0), Severity::Critical);
    }

    #[test]
    fn nan_is_critical() {
        assert_eq!(classify_deviation(f64::NAN), Severity::Critical);
    }

    #[test]
    fn ordering_follows_bands() {
        assert!(Severity::Ok < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert_eq!(Severity::ALL.len(), 3);
    }

    #[test]
    fn labels() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Critical.label(), "critical");
    }
}
