//! Manually placed correspondence points.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What physical feature a correspondence marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CorrespondenceKind {
    /// Window corner or frame.
    Window,
    /// Door corner or frame.
    Door,
    /// Building or room corner.
    Corner,
    /// Anything else.
    #[default]
    Custom,
}

/// A physical feature located in the reference model and in the observed scan.
///
/// Either side may be unset while the user is still placing points. Only
/// complete correspondences take part in alignment.
///
/// # Example
///
/// ```
/// use deviation_types::{ReferenceCorrespondence, Point3};
///
/// let mut c = ReferenceCorrespondence::new("ne-window", "North-east window corner");
/// assert!(!c.is_complete());
///
/// c.reference = Some(Point3::new(1.0, 2.0, 3.0));
/// c.observed = Some(Point3::new(4.0, 2.0, 3.0));
/// assert!(c.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceCorrespondence {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Feature kind.
    pub kind: CorrespondenceKind,
    /// Position in the reference model.
    pub reference: Option<Point3<f64>>,
    /// Position in the observed model.
    pub observed: Option<Point3<f64>>,
}

impl ReferenceCorrespondence {
    /// Creates a correspondence with neither side placed.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a complete correspondence from two points.
    #[must_use]
    pub fn from_points(reference: Point3<f64>, observed: Point3<f64>) -> Self {
        Self {
            reference: Some(reference),
            observed: Some(observed),
            ..Self::default()
        }
    }

    /// Sets the feature kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: CorrespondenceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the reference-model position.
    #[must_use]
    pub const fn with_reference(mut self, point: Point3<f64>) -> Self {
        self.reference = Some(point);
        self
    }

    /// Sets the observed-model position.
    #[must_use]
    pub const fn with_observed(mut self, point: Point3<f64>) -> Self {
        self.observed = Some(point);
        self
    }

    /// Returns `true` when both positions are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.reference.is_some() && self.observed.is_some()
    }

    /// `(reference, observed)` if complete.
    #[must_use]
    pub fn pair(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        self.reference.zip(self.observed)
    }
}
