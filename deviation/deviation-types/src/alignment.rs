//! Alignment transform returned by the solvers.

use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Translation, uniform scale and rotation to apply to a model.
///
/// The transformation is applied in the order: scale -> rotate -> translate.
/// `rotation` holds Euler angles in radians (roll about X, pitch about Y, yaw
/// about Z, as in [`UnitQuaternion::from_euler_angles`]). The solvers only ever
/// populate `rotation.y`, the rotation about the vertical axis.
///
/// Solvers return this value; the owner of the scene applies it.
///
/// # Example
///
/// ```
/// use deviation_types::{AlignmentResult, Point3, Vector3};
///
/// let result = AlignmentResult::from_translation(Vector3::new(3.0, 0.0, 0.0));
/// let moved = result.transform_point(&Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(moved, Point3::new(4.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignmentResult {
    /// Translation vector (meters).
    pub translation: Vector3<f64>,
    /// Uniform scale factor.
    pub scale: f64,
    /// Euler angles (radians).
    pub rotation: Vector3<f64>,
}

impl Default for AlignmentResult {
    fn default() -> Self {
        Self::identity()
    }
}

impl AlignmentResult {
    /// No translation, rotation or scaling.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            scale: 1.0,
            rotation: Vector3::zeros(),
        }
    }

    /// Translation only.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Rotation about the vertical (+Y) axis followed by a translation.
    #[must_use]
    pub fn from_yaw_translation(yaw: f64, translation: Vector3<f64>) -> Self {
        Self {
            translation,
            scale: 1.0,
            rotation: Vector3::new(0.0, yaw, 0.0),
        }
    }

    /// Uniform scale followed by a translation.
    #[must_use]
    pub fn from_scale_translation(scale: f64, translation: Vector3<f64>) -> Self {
        Self {
            translation,
            scale,
            rotation: Vector3::zeros(),
        }
    }

    /// Rotation about the vertical axis, in radians.
    #[inline]
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }

    /// The rotation as a unit quaternion.
    #[must_use]
    pub fn rotation_quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Transforms a point: scale, then rotate, then translate.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let rotated = self.rotation_quaternion() * (point.coords * self.scale);
        Point3::from(rotated + self.translation)
    }

    /// Composes this transform with another (self * other).
    ///
    /// The result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        let rotation = self.rotation_quaternion();
        let combined = rotation * other.rotation_quaternion();
        let (roll, pitch, yaw) = combined.euler_angles();
        Self {
            translation: self.translation + rotation * (other.translation * self.scale),
            scale: self.scale * other.scale,
            rotation: Vector3::new(roll, pitch, yaw),
        }
    }

    /// Converts to a 4x4 homogeneous transformation matrix.
    #[must_use]
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut mat = self.rotation_quaternion().to_homogeneous();
        mat.fixed_view_mut::<3, 3>(0, 0).scale_mut(self.scale);
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        mat
    }

    /// Returns true if this transform is approximately the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.rotation_quaternion().angle().abs() < epsilon
            && self.translation.norm() < epsilon
            && (self.scale - 1.0).abs() < epsilon
    }
}
