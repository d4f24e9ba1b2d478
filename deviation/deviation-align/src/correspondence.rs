//! Alignment from manually placed correspondence points.
//!
//! One correspondence fixes a translation. Two fix a translation plus a
//! rotation about the vertical (+Y) axis; vertical offset is always a pure
//! translation and scale is never recovered.

use std::f64::consts::{PI, TAU};

use deviation_types::{AlignmentResult, ReferenceCorrespondence, is_finite_point};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AlignError, AlignResult};

/// Outcome of [`align_by_correspondences`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CorrespondenceAlignment {
    /// No complete correspondence; use bounding-box normalization instead.
    Insufficient {
        /// Complete correspondences found.
        complete: usize,
    },
    /// One complete correspondence: translation only.
    Translation(AlignmentResult),
    /// Two or more: translation plus rotation about +Y, from the first two.
    TranslationYaw(AlignmentResult),
}

impl CorrespondenceAlignment {
    /// The solved transform, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&AlignmentResult> {
        match self {
            Self::Insufficient { .. } => None,
            Self::Translation(result) | Self::TranslationYaw(result) => Some(result),
        }
    }

    /// Returns `true` if no transform could be solved.
    #[must_use]
    pub const fn is_insufficient(&self) -> bool {
        matches!(self, Self::Insufficient { .. })
    }
}

/// Heading of a vector's X-Z projection, in radians.
///
/// Measured so that a positive rotation about +Y increases it.
#[inline]
#[must_use]
pub fn horizontal_angle(v: &Vector3<f64>) -> f64 {
    (-v.z).atan2(v.x)
}

/// Solves the transform that moves the reference model onto the observed one.
///
/// Incomplete correspondences are skipped; the first two complete ones are
/// used and any further ones are ignored. The solver never falls back to
/// normalization on its own: with no complete correspondence it returns
/// [`CorrespondenceAlignment::Insufficient`].
///
/// # Errors
///
/// - [`AlignError::NonFiniteCorrespondence`] if a used point is not finite
/// - [`AlignError::DegenerateCorrespondence`] if the two used correspondences
///   coincide in the X-Z plane on either side, so no heading is defined
///
/// # Example
///
/// ```
/// use deviation_align::{align_by_correspondences, CorrespondenceAlignment};
/// use deviation_types::{ReferenceCorrespondence, Point3, Vector3};
///
/// let pairs = [ReferenceCorrespondence::from_points(
///     Point3::new(1.0, 2.0, 3.0),
///     Point3::new(4.0, 2.0, 3.0),
/// )];
///
/// let CorrespondenceAlignment::Translation(result) = align_by_correspondences(&pairs).unwrap() else {
///     panic!("one pair gives a translation");
/// };
/// assert_eq!(result.translation, Vector3::new(3.0, 0.0, 0.0));
/// ```
pub fn align_by_correspondences(
    correspondences: &[ReferenceCorrespondence],
) -> AlignResult<CorrespondenceAlignment> {
    let complete: Vec<(usize, Point3<f64>, Point3<f64>)> = correspondences
        .iter()
        .enumerate()
        .filter_map(|(index, c)| c.pair().map(|(r, o)| (index, r, o)))
        .collect();

    debug!(
        given = correspondences.len(),
        complete = complete.len(),
        "Solving correspondence alignment"
    );

    for &(index, reference, observed) in complete.iter().take(2) {
        if !is_finite_point(&reference) || !is_finite_point(&observed) {
            return Err(AlignError::NonFiniteCorrespondence { index });
        }
    }

    match complete.as_slice() {
        [] => Ok(CorrespondenceAlignment::Insufficient { complete: 0 }),
        [(_, reference, observed)] => {
            let result = AlignmentResult::from_translation(observed - reference);
            info!(
                tx = result.translation.x,
                ty = result.translation.y,
                tz = result.translation.z,
                "Aligned by one correspondence"
            );
            Ok(CorrespondenceAlignment::Translation(result))
        }
        [first, second, ..] => two_point(*first, *second).map(CorrespondenceAlignment::TranslationYaw),
    }
}

fn two_point(
    (_, ref1, obs1): (usize, Point3<f64>, Point3<f64>),
    (index, ref2, obs2): (usize, Point3<f64>, Point3<f64>),
) -> AlignResult<AlignmentResult> {
    let ref_vec = ref2 - ref1;
    let obs_vec = obs2 - obs1;

    if ref_vec.x.hypot(ref_vec.z) == 0.0 || obs_vec.x.hypot(obs_vec.z) == 0.0 {
        return Err(AlignError::DegenerateCorrespondence { index });
    }

    let theta = wrap_angle(horizontal_angle(&obs_vec) - horizontal_angle(&ref_vec));
    let rotation = UnitQuaternion::from_euler_angles(0.0, theta, 0.0);

    let mut translation = obs1 - rotation * ref1;
    translation.y = obs1.y - ref1.y;

    info!(
        theta_deg = theta.to_degrees(),
        tx = translation.x,
        ty = translation.y,
        tz = translation.z,
        "Aligned by two correspondences"
    );

    Ok(AlignmentResult::from_yaw_translation(theta, translation))
}

/// Wraps an angle into (-pi, pi].
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
