//! Alignment of a design model and an as-built capture.
//!
//! Two independent solvers bring the models into a common frame before
//! deviation analysis:
//! - **Correspondence alignment** - Translation from one manually placed
//!   feature pair; translation plus rotation about +Y from two
//! - **Normalization** - Bounding-box centering, fit-to-size scaling and
//!   ground snap, for when no correspondences exist
//!
//! Solvers are pure: they return an [`AlignmentResult`] and never touch the
//! scene. The owner applies it, for example with
//! [`SceneObject::apply_alignment`](deviation_scene::SceneObject::apply_alignment).
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero rendering dependencies.
//!
//! # Quick Start
//!
//! ```
//! use deviation_align::{align_models, ModelAlignment, NormalizeParams};
//! use deviation_scene::SceneObject;
//! use deviation_types::{ReferenceCorrespondence, Point3};
//!
//! let design = SceneObject::mesh("design", vec![Point3::new(0.0, 0.0, 0.0)]);
//! let scan = SceneObject::points("scan", vec![Point3::new(2.0, 0.0, 0.0)]);
//!
//! let pairs = [ReferenceCorrespondence::from_points(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0))];
//! let alignment = align_models(&design, &scan, Some(&pairs), &NormalizeParams::default()).unwrap();
//!
//! let ModelAlignment::Correspondence(outcome) = alignment else { unreachable!() };
//! let moved = outcome.result().unwrap().transform_point(&Point3::origin());
//! assert_eq!(moved, Point3::new(2.0, 0.0, 0.0));
//! ```
//!
//! # Conventions
//!
//! +Y is vertical. Rotations are right-handed about +Y and reported in
//! `AlignmentResult::rotation.y`. Correspondence results move the reference
//! model onto the observed model.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod correspondence;
mod error;
mod normalize;
mod params;

pub use correspondence::{CorrespondenceAlignment, align_by_correspondences, horizontal_angle};
pub use error::{AlignError, AlignResult};
pub use normalize::{align_to_ground, normalize_model, normalize_points};
pub use params::{DEFAULT_TARGET_SIZE, NormalizeParams};

use deviation_scene::SceneNode;
use deviation_types::{AlignmentResult, ReferenceCorrespondence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of [`align_models`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModelAlignment {
    /// Each model normalized on its own.
    Normalized {
        /// Transform for the reference model.
        reference: AlignmentResult,
        /// Transform for the observed model.
        observed: AlignmentResult,
    },
    /// Correspondence solve for the reference model, or why it did not apply.
    Correspondence(CorrespondenceAlignment),
}

/// Aligns two models.
///
/// With `correspondences`, runs [`align_by_correspondences`] and reports its
/// outcome as is, including
/// [`CorrespondenceAlignment::Insufficient`]; it never switches to
/// normalization behind the caller's back. Without them, normalizes both
/// models independently with `params`.
///
/// # Errors
///
/// Propagates [`AlignError`] from the chosen solver.
pub fn align_models<R, O>(
    reference: &R,
    observed: &O,
    correspondences: Option<&[ReferenceCorrespondence]>,
    params: &NormalizeParams,
) -> AlignResult<ModelAlignment>
where
    R: SceneNode,
    O: SceneNode,
{
    if let Some(correspondences) = correspondences {
        return align_by_correspondences(correspondences).map(ModelAlignment::Correspondence);
    }

    Ok(ModelAlignment::Normalized {
        reference: normalize_model(reference, params)?,
        observed: normalize_model(observed, params)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use deviation_scene::SceneObject;
    use deviation_types::Point3;
    use nalgebra::Vector3;

    #[test]
    fn normalizes_both_without_correspondences() {
        let reference = SceneObject::mesh(
            "r",
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0)],
        );
        let observed = SceneObject::mesh(
            "o",
            vec![Point3::new(10.0, 0.0, 0.0), Point3::new(30.0, 5.0, 5.0)],
        );

        let alignment =
            align_models(&reference, &observed, None, &NormalizeParams::default()).unwrap();
        let ModelAlignment::Normalized { reference, observed } = alignment else {
            panic!("expected normalization, got {alignment:?}");
        };
        assert_relative_eq!(reference.scale, 5.0);
        assert_relative_eq!(observed.scale, 0.5);
        assert_relative_eq!(observed.translation, Vector3::new(-10.0, -1.25, -1.25));
    }

    #[test]
    fn insufficient_correspondences_not_replaced() {
        let model = SceneObject::mesh("m", vec![Point3::origin()]);
        let alignment =
            align_models(&model, &model, Some(&[]), &NormalizeParams::default()).unwrap();
        assert_eq!(
            alignment,
            ModelAlignment::Correspondence(CorrespondenceAlignment::Insufficient { complete: 0 })
        );
    }

    #[test]
    fn invalid_params_surface() {
        let model = SceneObject::mesh("m", vec![Point3::origin()]);
        let params = NormalizeParams::default().with_target_size(Some(-1.0));
        assert!(align_models(&model, &model, None, &params).is_err());
    }
}
