//! LiDAR point clouds.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::PandasetError;

/// One LiDAR return in world coordinates.
///
/// Column names follow the per-frame point tables: `x, y, z, i, t, d`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LidarPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Reflection intensity in `[0, 255]`.
    #[serde(rename = "i")]
    pub intensity: f64,
    /// Per-point capture timestamp.
    pub t: f64,
    /// `0` for the mechanical 360° LiDAR, `1` for the front-facing LiDAR,
    /// `-1` outside the overlap region.
    #[serde(rename = "d")]
    pub sensor_id: i32,
}

impl LidarPoint {
    #[inline]
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// All points of one frame, in file order.
///
/// Row order is the join key for per-point semantic labels and must never be
/// changed after decoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloudFrame {
    pub points: Vec<LidarPoint>,
}

impl PointCloudFrame {
    pub fn new(points: Vec<LidarPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LidarPoint> {
        self.points.iter()
    }

    /// World-frame positions, in row order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.points.iter().map(LidarPoint::position).collect()
    }

    /// Returns the rows kept by `selection`, preserving their relative order.
    pub fn filtered(&self, selection: SensorSelection) -> PointCloudFrame {
        PointCloudFrame {
            points: self
                .points
                .iter()
                .filter(|point| selection.matches(point.sensor_id))
                .copied()
                .collect(),
        }
    }
}

/// Which LiDAR unit's rows a [`Lidar`](crate::stream::Lidar) stream returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SensorSelection {
    /// Every row, unfiltered (`-1`).
    #[default]
    Both,
    /// Rows with `d == 0`.
    Mechanical,
    /// Rows with `d == 1`.
    FrontFacing,
}

impl SensorSelection {
    /// The numeric id used in the data files.
    pub fn id(self) -> i64 {
        match self {
            SensorSelection::Both => -1,
            SensorSelection::Mechanical => 0,
            SensorSelection::FrontFacing => 1,
        }
    }

    #[inline]
    pub fn matches(self, sensor_id: i32) -> bool {
        match self {
            SensorSelection::Both => true,
            SensorSelection::Mechanical => sensor_id == 0,
            SensorSelection::FrontFacing => sensor_id == 1,
        }
    }
}

impl TryFrom<i64> for SensorSelection {
    type Error = PandasetError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            -1 => Ok(SensorSelection::Both),
            0 => Ok(SensorSelection::Mechanical),
            1 => Ok(SensorSelection::FrontFacing),
            other => Err(PandasetError::InvalidSensorId(other)),
        }
    }
}
