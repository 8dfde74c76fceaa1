//! 3D cuboid annotations.

use serde::{Deserialize, Serialize};

use super::pose::Position;

/// Box extents in meters, along the cuboid's local axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width, left to right.
    pub x: f64,
    /// Length, front to back.
    pub y: f64,
    /// Height, bottom to top.
    pub z: f64,
}

impl Dimensions {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Label-dependent attributes. Cells that do not apply to a label are empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CuboidAttributes {
    /// `Parked`, `Stopped` or `Moving` (vehicles).
    pub object_motion: Option<String>,
    /// `With Rider` or `Without Rider`.
    pub rider_status: Option<String>,
    /// `Sitting`, `Lying`, `Walking` or `Standing`.
    pub pedestrian_behavior: Option<String>,
    /// `Adult` or `Child`.
    pub pedestrian_age: Option<String>,
}

/// One annotated object in one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CuboidRecord {
    /// Stable across frames for a tracked object.
    pub uuid: String,
    pub label: String,
    /// Rotation about z in radians. Zero points the length side along `+y`,
    /// positive values turn counter-clockwise.
    pub yaw: f64,
    /// True if the object does not move during the whole sequence.
    pub stationary: bool,
    /// Camera used to verify the cuboid, `-1` if none.
    pub camera_used: i32,
    /// Box center in world coordinates.
    pub position: Position,
    pub dimensions: Dimensions,
    pub attributes: CuboidAttributes,
    /// `0` or `1` for moving objects in the dual-LiDAR overlap, else `-1`.
    pub sensor_id: i32,
    /// `uuid` of the cuboid drawn for the same object from the other LiDAR.
    pub sibling_id: Option<String>,
}

impl CuboidRecord {
    /// Returns true if this cuboid belongs to a dual-LiDAR pair.
    pub fn has_sibling_sensor(&self) -> bool {
        self.sensor_id == 0 || self.sensor_id == 1
    }
}
