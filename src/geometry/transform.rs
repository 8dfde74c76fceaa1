use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use crate::data::Pose;

/// A rigid transform. Use `to_homogeneous()` for the 4x4 matrix.
pub type Transform = Isometry3<f64>;

/// Builds the sensor-to-world transform of `pose`.
///
/// The heading is normalized before use. A heading that was not unit-norm
/// to begin with is logged as a warning, since it usually means the pose
/// file is corrupt.
pub fn pose_to_transform(pose: &Pose) -> Transform {
    if !pose.is_normalized() {
        tracing::warn!(
            norm = pose.heading.norm(),
            "normalizing non-unit pose heading"
        );
    }

    let rotation = UnitQuaternion::from_quaternion(pose.heading.to_quaternion());
    let translation = Translation3::from(pose.position.to_vector());
    Isometry3::from_parts(translation, rotation)
}
