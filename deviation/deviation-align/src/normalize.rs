//! Unsupervised bounding-box normalization.

use deviation_scene::{SceneNode, extract_points};
use deviation_types::{Aabb, AlignmentResult, PointSet};
use nalgebra::Vector3;
use tracing::debug;

use crate::{AlignResult, NormalizeParams};

/// Computes the transform that normalizes a point set's bounding box.
///
/// Depending on `params`, the result moves the box center to the origin,
/// uniformly scales the longest edge to `target_size`, and lifts or drops the
/// box so its bottom sits at Y = 0. All enabled steps are folded into one
/// [`AlignmentResult`] mapping `p` to `scale * p + translation`. A box with
/// zero extent is not scaled. An empty set gives the identity.
///
/// # Errors
///
/// Returns [`AlignError::InvalidParameter`](crate::AlignError::InvalidParameter)
/// if `target_size` is not a positive finite number.
///
/// # Example
///
/// ```
/// use deviation_align::{normalize_points, NormalizeParams};
/// use deviation_types::{PointSet, Point3};
///
/// let points = PointSet::from_positions([Point3::new(10.0, 2.0, 10.0), Point3::new(14.0, 4.0, 12.0)]);
///
/// let result = normalize_points(&points, &NormalizeParams::center_only()).unwrap();
/// let moved = result.transform_point(&Point3::new(12.0, 3.0, 11.0));
/// assert!(moved.coords.norm() < 1e-12);
/// ```
pub fn normalize_points(points: &PointSet, params: &NormalizeParams) -> AlignResult<AlignmentResult> {
    params.validate()?;

    if points.is_empty() {
        debug!("No points to normalize");
        return Ok(AlignmentResult::identity());
    }

    Ok(normalize_bounds(&points.bounds(), params))
}

/// Normalizes a scene from the bounding box of its world-space vertices.
///
/// # Errors
///
/// Returns [`AlignError::InvalidParameter`](crate::AlignError::InvalidParameter)
/// if `target_size` is not a positive finite number.
pub fn normalize_model<N: SceneNode>(
    node: &N,
    params: &NormalizeParams,
) -> AlignResult<AlignmentResult> {
    normalize_points(&extract_points(node), params)
}

/// Translation that puts the lowest vertex of a scene at Y = 0.
///
/// Only the vertical component is set. A scene without geometry gives the
/// identity.
#[must_use]
pub fn align_to_ground<N: SceneNode>(node: &N) -> AlignmentResult {
    let bounds = extract_points(node).bounds();
    if bounds.is_empty() {
        return AlignmentResult::identity();
    }
    normalize_bounds(&bounds, &NormalizeParams::ground_only())
}

fn normalize_bounds(bounds: &Aabb, params: &NormalizeParams) -> AlignmentResult {
    let scale = params
        .target_size
        .map_or(1.0, |target| fit_scale(bounds, target));

    let mut translation = Vector3::zeros();
    if params.center {
        translation = -bounds.center().coords * scale;
    }
    if params.ground {
        translation.y = -bounds.min.y * scale;
    }

    debug!(
        extent = bounds.max_extent(),
        scale,
        tx = translation.x,
        ty = translation.y,
        tz = translation.z,
        "Normalized bounds"
    );

    AlignmentResult::from_scale_translation(scale, translation)
}

fn fit_scale(bounds: &Aabb, target: f64) -> f64 {
    let extent = bounds.max_extent();
    if extent > 0.0 { target / extent } else { 1.0 }
}
