//! The deviation pipeline: downsample, nearest search, classify, aggregate.

use deviation_scene::{SceneNode, extract_points_detailed};
use deviation_types::{DeviationAnalysis, DeviationPoint, MM_PER_METER, PointSet};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::debug;

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink, ModelRole, TracingSink};
use crate::downsample::downsample_with;
use crate::nearest::ObservedIndex;
use crate::{CompareParams, CompareResult};

/// Computes the deviation of every reference point from the observed points.
///
/// Both sets are downsampled with `params.grid_size`. Each remaining reference
/// point gets the distance to its nearest observed point, in millimeters, and
/// a severity band. If either downsampled set is empty the result is
/// [`DeviationAnalysis::empty`].
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if the grid size is not positive and finite.
///
/// # Example
///
/// ```
/// use deviation_compare::{compute_deviation, CompareParams};
/// use deviation_types::{PointSet, Point3, Severity};
///
/// let reference = PointSet::from_positions([Point3::new(0.0, 0.0, 0.0)]);
/// let observed = PointSet::from_positions([Point3::new(0.0, 0.02, 0.0)]);
///
/// let analysis = compute_deviation(&reference, &observed, &CompareParams::default()).unwrap();
/// assert!((analysis.statistics.max_deviation - 20.0).abs() < 1e-9);
/// assert_eq!(analysis.points[0].severity, Severity::Warning);
/// ```
pub fn compute_deviation(
    reference: &PointSet,
    observed: &PointSet,
    params: &CompareParams,
) -> CompareResult<DeviationAnalysis> {
    compute_deviation_with_sink(reference, observed, params, &TracingSink)
}

/// Like [`compute_deviation`], reporting progress to `sink`.
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if the grid size is not positive and finite.
pub fn compute_deviation_with_sink(
    reference: &PointSet,
    observed: &PointSet,
    params: &CompareParams,
    sink: &dyn DiagnosticSink,
) -> CompareResult<DeviationAnalysis> {
    params.validate()?;

    let reference_sampled = downsample_with(reference, params.grid_size, params.downsample)?;
    sink.record(&DiagnosticEvent::Downsampled {
        role: ModelRole::Reference,
        before: reference.len(),
        after: reference_sampled.len(),
    });

    let observed_sampled = downsample_with(observed, params.grid_size, params.downsample)?;
    sink.record(&DiagnosticEvent::Downsampled {
        role: ModelRole::Observed,
        before: observed.len(),
        after: observed_sampled.len(),
    });

    if reference_sampled.is_empty() || observed_sampled.is_empty() {
        sink.record(&DiagnosticEvent::ComparisonSkipped {
            reference: reference_sampled.len(),
            observed: observed_sampled.len(),
        });
        return Ok(DeviationAnalysis::empty());
    }

    debug!(
        reference = reference_sampled.len(),
        observed = observed_sampled.len(),
        search = ?params.search,
        parallel = params.parallel,
        "Computing nearest distances"
    );

    let index = ObservedIndex::build(observed_sampled.as_slice(), params.search);
    let deviate = |position: &Point3<f64>| {
        DeviationPoint::new(*position, index.distance(position) * MM_PER_METER)
    };

    let points: Vec<DeviationPoint> = if params.parallel {
        reference_sampled.as_slice().par_iter().map(deviate).collect()
    } else {
        reference_sampled.iter().map(deviate).collect()
    };

    let analysis = DeviationAnalysis::from_points(points);
    sink.record(&DiagnosticEvent::ComparisonComplete {
        total: analysis.statistics.total_points,
        avg_deviation: analysis.statistics.avg_deviation,
        max_deviation: analysis.statistics.max_deviation,
    });

    Ok(analysis)
}

/// Compares two scene hierarchies.
///
/// Extracts world-space points from both, then runs [`compute_deviation`].
/// Scenes without geometry produce an empty analysis, not an error.
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if the grid size is not positive and finite, whatever the inputs.
///
/// # Example
///
/// ```
/// use deviation_compare::{compare_models, CompareParams};
/// use deviation_scene::SceneObject;
/// use nalgebra::{Point3, Vector3};
///
/// let design = SceneObject::mesh("wall", vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
/// let scan = design.clone().with_position(Vector3::new(0.0, 0.0, 0.05));
///
/// let analysis = compare_models(&design, &scan, &CompareParams::with_grid_size(0.1)).unwrap();
/// assert_eq!(analysis.statistics.total_points, 2);
/// assert_eq!(analysis.statistics.critical_count, 2); // 50 mm
/// ```
pub fn compare_models<R, O>(
    reference: &R,
    observed: &O,
    params: &CompareParams,
) -> CompareResult<DeviationAnalysis>
where
    R: SceneNode,
    O: SceneNode,
{
    compare_models_with_sink(reference, observed, params, &TracingSink)
}

/// Like [`compare_models`], reporting progress to `sink`.
///
/// # Errors
///
/// Returns [`CompareError::InvalidGridSize`](crate::CompareError::InvalidGridSize)
/// if the grid size is not positive and finite.
pub fn compare_models_with_sink<R, O>(
    reference: &R,
    observed: &O,
    params: &CompareParams,
    sink: &dyn DiagnosticSink,
) -> CompareResult<DeviationAnalysis>
where
    R: SceneNode,
    O: SceneNode,
{
    params.validate()?;

    let reference_points = extract(reference, ModelRole::Reference, sink);
    let observed_points = extract(observed, ModelRole::Observed, sink);

    compute_deviation_with_sink(&reference_points, &observed_points, params, sink)
}

fn extract<N: SceneNode>(node: &N, role: ModelRole, sink: &dyn DiagnosticSink) -> PointSet {
    let extraction = extract_points_detailed(node);
    sink.record(&DiagnosticEvent::PointsExtracted {
        role,
        count: extraction.points.len(),
        rejected: extraction.rejected(),
    });
    extraction.points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CompareError, DownsampleStrategy, NeighborSearch, NullSink};
    use approx::assert_relative_eq;
    use deviation_scene::SceneObject;
    use deviation_types::Severity;
    use nalgebra::Vector3;
    use std::cell::RefCell;

    fn grid(n: usize, spacing: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for i in 0..n {
            for j in 0..n {
                #[allow(clippy::cast_precision_loss)]
                points.push(Point3::new(i as f64 * spacing, 0.0, j as f64 * spacing));
            }
        }
        points
    }

    fn cube_corners(half: f64) -> Vec<Point3<f64>> {
        let mut corners = Vec::new();
        for &x in &[-half, half] {
            for &y in &[-half, half] {
                for &z in &[-half, half] {
                    corners.push(Point3::new(x, y, z));
                }
            }
        }
        corners
    }

    #[test]
    fn self_comparison_is_zero() {
        let model = SceneObject::mesh("m", grid(10, 0.5));
        let analysis = compare_models(&model, &model, &CompareParams::with_grid_size(0.1)).unwrap();

        assert_eq!(analysis.statistics.total_points, 100);
        assert_relative_eq!(analysis.statistics.max_deviation, 0.0);
        assert_eq!(analysis.statistics.ok_count, 100);
    }

    #[test]
    fn offset_cube_is_critical_everywhere() {
        let reference = SceneObject::mesh("design", cube_corners(5.0));
        let observed = SceneObject::mesh("scan", cube_corners(5.0))
            .with_position(Vector3::new(0.0, 0.0, 5.0));

        let analysis =
            compare_models(&reference, &observed, &CompareParams::with_grid_size(0.2)).unwrap();
        let stats = analysis.statistics;

        assert_eq!(stats.total_points, 8);
        assert_relative_eq!(stats.avg_deviation, 5000.0, epsilon = 1e-9);
        assert_relative_eq!(stats.max_deviation, 5000.0, epsilon = 1e-9);
        assert_eq!(stats.critical_count, stats.total_points);
        assert_eq!(stats.ok_count + stats.warning_count, 0);
    }

    #[test]
    fn empty_side_gives_zero_statistics() {
        let empty = SceneObject::group("empty");
        let model = SceneObject::mesh("m", grid(3, 1.0));
        let params = CompareParams::default();

        for analysis in [
            compare_models(&empty, &model, &params).unwrap(),
            compare_models(&model, &empty, &params).unwrap(),
            compare_models(&empty, &empty, &params).unwrap(),
        ] {
            assert!(analysis.is_empty());
            assert_eq!(analysis.statistics, Default::default());
            assert!(analysis.elements.is_empty());
        }
    }

    #[test]
    fn bad_grid_rejected_even_when_empty() {
        let empty = SceneObject::group("empty");
        let result = compare_models_with_sink(
            &empty,
            &empty,
            &CompareParams::with_grid_size(-1.0),
            &NullSink,
        );
        assert_eq!(result, Err(CompareError::InvalidGridSize { grid_size: -1.0 }));
    }

    #[test]
    fn parallel_matches_sequential() {
        let reference = PointSet::from_positions(grid(20, 0.3));
        let observed = PointSet::from_positions(
            grid(15, 0.41).into_iter().map(|p| p + Vector3::new(0.05, 0.02, 0.0)),
        );

        let parallel = CompareParams::with_grid_size(0.1);
        let sequential = parallel.parallel(false);
        assert_eq!(
            compute_deviation(&reference, &observed, &parallel).unwrap(),
            compute_deviation(&reference, &observed, &sequential).unwrap()
        );
    }

    #[test]
    fn kdtree_gives_same_deviations() {
        // Jitter keeps kiddo buckets from filling with equal coordinates
        let jitter = |i: usize| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64;
            Vector3::new(t * 1e-7, t * 2e-7, t * 3e-7)
        };
        let reference = PointSet::from_positions(
            grid(12, 0.25).into_iter().enumerate().map(|(i, p)| p + jitter(i)),
        );
        let observed = PointSet::from_positions(
            grid(12, 0.27)
                .into_iter()
                .enumerate()
                .map(|(i, p)| p + Vector3::new(0.0, 0.015, 0.0) + jitter(i + 1000)),
        );

        let brute = CompareParams::with_grid_size(0.05);
        let tree = brute.search(NeighborSearch::KdTree);
        let a = compute_deviation(&reference, &observed, &brute).unwrap();
        let b = compute_deviation(&reference, &observed, &tree).unwrap();

        assert_eq!(a.points.len(), b.points.len());
        for (p, q) in a.points.iter().zip(&b.points) {
            assert_eq!(p.position, q.position);
            assert_relative_eq!(p.deviation, q.deviation, epsilon = 1e-6);
        }
    }

    #[test]
    fn kdtree_on_planar_wall_matches_brute_force() {
        // 400 points at x = -5: more than a kiddo bucket can hold on one axis
        let wall: Vec<Point3<f64>> = grid(20, 0.2)
            .into_iter()
            .map(|p| Point3::new(-5.0, p.x, p.z))
            .collect();
        let design = SceneObject::mesh("wall", wall.clone());
        let scan = SceneObject::points("scan", wall).with_position(Vector3::new(0.0, 0.0, 0.01));

        let brute = CompareParams::with_grid_size(0.05);
        let tree = brute.search(NeighborSearch::KdTree);
        let expected = compare_models_with_sink(&design, &scan, &brute, &NullSink).unwrap();
        let actual = compare_models_with_sink(&design, &scan, &tree, &NullSink).unwrap();

        assert_eq!(actual.statistics.total_points, 400);
        assert_eq!(actual, expected);
    }

    #[test]
    fn coarse_grid_reduces_reference() {
        let reference = PointSet::from_positions(grid(10, 0.05));
        let observed = reference.clone();
        let analysis =
            compute_deviation(&reference, &observed, &CompareParams::with_grid_size(0.2)).unwrap();
        assert!(analysis.statistics.total_points < reference.len());
        // Keep-first on identical inputs keeps identical representatives
        assert_relative_eq!(analysis.statistics.max_deviation, 0.0);
    }

    #[test]
    fn centroid_strategy_is_selectable() {
        let reference = PointSet::from_positions([Point3::origin(), Point3::new(0.1, 0.0, 0.0)]);
        let observed = PointSet::from_positions([Point3::new(0.05, 0.0, 0.0)]);
        let params = CompareParams::with_grid_size(1.0).downsample(DownsampleStrategy::Centroid);

        let analysis = compute_deviation(&reference, &observed, &params).unwrap();
        assert_eq!(analysis.points.len(), 1);
        assert_relative_eq!(analysis.points[0].deviation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn sink_sees_pipeline_events() {
        let events = RefCell::new(Vec::new());
        let sink = |event: &DiagnosticEvent| events.borrow_mut().push(event.clone());

        let reference = SceneObject::mesh("m", vec![Point3::origin(), Point3::new(f64::NAN, 0.0, 0.0)]);
        let observed = SceneObject::points("p", vec![Point3::new(0.0, 0.0, 0.001)]);
        compare_models_with_sink(&reference, &observed, &CompareParams::default(), &sink).unwrap();

        let events = events.into_inner();
        assert_eq!(
            events[0],
            DiagnosticEvent::PointsExtracted {
                role: ModelRole::Reference,
                count: 1,
                rejected: 1
            }
        );
        assert!(matches!(
            events.last(),
            Some(DiagnosticEvent::ComparisonComplete { total: 1, .. })
        ));
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn skipped_comparison_is_reported() {
        let events = RefCell::new(Vec::new());
        let sink = |event: &DiagnosticEvent| events.borrow_mut().push(event.clone());

        compute_deviation_with_sink(
            &PointSet::new(),
            &PointSet::from_positions([Point3::origin()]),
            &CompareParams::default(),
            &sink,
        )
        .unwrap();

        assert!(events.into_inner().contains(&DiagnosticEvent::ComparisonSkipped {
            reference: 0,
            observed: 1
        }));
    }

    #[test]
    fn severity_bands_follow_distance() {
        let reference = PointSet::from_positions([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
        ]);
        let observed = PointSet::from_positions([
            Point3::new(0.0, 0.005, 0.0),
            Point3::new(10.0, 0.015, 0.0),
            Point3::new(20.0, 0.035, 0.0),
        ]);
        let analysis =
            compute_deviation(&reference, &observed, &CompareParams::with_grid_size(0.001))
                .unwrap();

        let severities: Vec<Severity> = analysis.points.iter().map(|p| p.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Ok, Severity::Warning, Severity::Critical]
        );
    }
}
