//! Sensor poses in world coordinates.

use nalgebra::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Tolerance on `|‖q‖ - 1|` below which a heading counts as unit-norm.
pub const UNIT_NORM_TOLERANCE: f64 = 1e-6;

/// A position in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// An orientation quaternion, scalar part first.
///
/// The heading is expected to be unit-norm but this is not enforced on
/// construction; see [`Heading::is_normalized`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Heading {
    #[inline]
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        self.to_quaternion().norm()
    }

    /// Returns true if the quaternion is unit-norm within [`UNIT_NORM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.norm() - 1.0).abs() <= UNIT_NORM_TOLERANCE
    }

    /// Converts to a nalgebra quaternion without normalizing.
    ///
    /// `Quaternion::new` takes the scalar part first, matching the file order.
    #[inline]
    pub fn to_quaternion(self) -> Quaternion<f64> {
        Quaternion::new(self.w, self.x, self.y, self.z)
    }
}

impl Default for Heading {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rigid pose of a sensor at one frame, as stored in `poses.json`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub heading: Heading,
}

impl Pose {
    pub fn new(position: Position, heading: Heading) -> Self {
        Self { position, heading }
    }

    /// A pose at the origin with identity rotation.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn is_normalized(&self) -> bool {
        self.heading.is_normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_devkit_pose_json() {
        let json = r#"{"position":{"x":1.5,"y":-2.0,"z":0.25},
                       "heading":{"w":0.7071067811865476,"x":0.0,"y":0.0,"z":0.7071067811865476}}"#;
        let pose: Pose = serde_json::from_str(json).expect("parse pose");
        assert_eq!(pose.position, Position::new(1.5, -2.0, 0.25));
        assert!((pose.heading.w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!(pose.is_normalized());
    }

    #[test]
    fn quaternion_keeps_scalar_first() {
        let q = Heading::new(0.1, 0.2, 0.3, 0.4).to_quaternion();
        assert_eq!(q.w, 0.1);
        assert_eq!(q.i, 0.2);
        assert_eq!(q.j, 0.3);
        assert_eq!(q.k, 0.4);
    }

    #[test]
    fn non_unit_heading_is_flagged() {
        let heading = Heading::new(2.0, 0.0, 0.0, 0.0);
        assert!(!heading.is_normalized());
        assert!((heading.norm() - 2.0).abs() < 1e-12);
    }
}
