//! Per-element attribution of a finished analysis.
//!
//! Element regions come from external building metadata (IFC or similar).
//! Attribution is a separate stage: [`compare_models`](crate::compare_models)
//! never produces elements on its own.

use deviation_types::{
    Aabb, DeviationAnalysis, ElementDeviation, StatisticsAccumulator, classify_deviation,
    is_finite_point,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CompareError, CompareResult};

/// A named building element and the region of space it occupies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementRegion {
    /// Element identifier from the source metadata.
    pub id: u64,
    /// Human-readable name.
    pub name: String,
    /// Zone or area label.
    pub zone: String,
    /// World-space extent of the element (meters).
    pub bounds: Aabb,
}

impl ElementRegion {
    /// Creates a region.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, zone: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            id,
            name: name.into(),
            zone: zone.into(),
            bounds,
        }
    }
}

/// Summarizes the analysis points inside each element region.
///
/// An element's deviation is the mean over its points; its severity is the
/// band of that mean. A point inside several regions counts for each of them.
/// Regions that contain no analysis points are omitted. Output follows region
/// order.
///
/// # Errors
///
/// Returns [`CompareError::InvalidParameter`] if a region's bounds are empty
/// or not finite.
///
/// # Example
///
/// ```
/// use deviation_compare::{attribute_elements, ElementRegion};
/// use deviation_types::{Aabb, DeviationAnalysis, DeviationPoint, Point3};
///
/// let analysis = DeviationAnalysis::from_points(vec![
///     DeviationPoint::new(Point3::new(0.5, 0.5, 0.5), 8.0),
///     DeviationPoint::new(Point3::new(0.6, 0.5, 0.5), 16.0),
///     DeviationPoint::new(Point3::new(5.0, 0.0, 0.0), 50.0),
/// ]);
/// let column = ElementRegion::new(
///     7,
///     "Column C1",
///     "Level 1",
///     Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)),
/// );
///
/// let elements = attribute_elements(&analysis, &[column]).unwrap();
/// assert_eq!(elements[0].point_count, 2);
/// assert!((elements[0].deviation - 12.0).abs() < 1e-12);
/// ```
pub fn attribute_elements(
    analysis: &DeviationAnalysis,
    regions: &[ElementRegion],
) -> CompareResult<Vec<ElementDeviation>> {
    for region in regions {
        let bounds = &region.bounds;
        if bounds.is_empty() || !is_finite_point(&bounds.min) || !is_finite_point(&bounds.max) {
            return Err(CompareError::invalid_parameter(format!(
                "element {} ({}) has empty or non-finite bounds",
                region.id, region.name
            )));
        }
    }

    let elements = regions
        .iter()
        .filter_map(|region| {
            let mut acc = StatisticsAccumulator::new();
            for point in &analysis.points {
                if region.bounds.contains(&point.position) {
                    acc.push(point);
                }
            }

            let stats = acc.finish();
            (stats.total_points > 0).then(|| ElementDeviation {
                id: region.id,
                element: region.name.clone(),
                zone: region.zone.clone(),
                deviation: stats.avg_deviation,
                max_deviation: stats.max_deviation,
                point_count: stats.total_points,
                severity: classify_deviation(stats.avg_deviation),
            })
        })
        .collect();

    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use deviation_types::{DeviationPoint, Point3, Severity};

    fn unit_box(origin: Point3<f64>) -> Aabb {
        Aabb::new(origin, origin + nalgebra::Vector3::new(1.0, 1.0, 1.0))
    }

    fn analysis() -> DeviationAnalysis {
        DeviationAnalysis::from_points(vec![
            DeviationPoint::new(Point3::new(0.2, 0.2, 0.2), 4.0),
            DeviationPoint::new(Point3::new(0.8, 0.8, 0.8), 40.0),
            DeviationPoint::new(Point3::new(2.5, 0.5, 0.5), 12.0),
        ])
    }

    #[test]
    fn mean_and_max_per_region() {
        let regions = [
            ElementRegion::new(1, "Wall W1", "North", unit_box(Point3::origin())),
            ElementRegion::new(2, "Slab S1", "Roof", unit_box(Point3::new(2.0, 0.0, 0.0))),
        ];
        let elements = attribute_elements(&analysis(), &regions).unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].element, "Wall W1");
        assert_eq!(elements[0].point_count, 2);
        assert_relative_eq!(elements[0].deviation, 22.0);
        assert_relative_eq!(elements[0].max_deviation, 40.0);
        assert_eq!(elements[0].severity, Severity::Warning);

        assert_eq!(elements[1].zone, "Roof");
        assert_eq!(elements[1].point_count, 1);
        assert_eq!(elements[1].severity, Severity::Warning);
    }

    #[test]
    fn empty_regions_omitted() {
        let regions = [ElementRegion::new(
            3,
            "Door D1",
            "East",
            unit_box(Point3::new(10.0, 0.0, 0.0)),
        )];
        assert!(attribute_elements(&analysis(), &regions).unwrap().is_empty());
        assert!(attribute_elements(&DeviationAnalysis::empty(), &regions)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn overlapping_regions_share_points() {
        let regions = [
            ElementRegion::new(1, "A", "Z", unit_box(Point3::origin())),
            ElementRegion::new(2, "B", "Z", unit_box(Point3::new(0.5, 0.5, 0.5))),
        ];
        let elements = attribute_elements(&analysis(), &regions).unwrap();
        assert_eq!(elements[0].point_count, 2);
        assert_eq!(elements[1].point_count, 1);
    }

    #[test]
    fn invalid_bounds_rejected() {
        let empty = ElementRegion::new(1, "A", "Z", Aabb::empty());
        let err = attribute_elements(&analysis(), &[empty]).unwrap_err();
        assert!(err.is_invalid_argument());

        let infinite = ElementRegion::new(
            2,
            "B",
            "Z",
            Aabb::new(Point3::origin(), Point3::new(f64::INFINITY, 1.0, 1.0)),
        );
        assert!(attribute_elements(&analysis(), &[infinite]).is_err());
    }
}
