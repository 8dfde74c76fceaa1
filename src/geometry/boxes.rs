use nalgebra::{Point3, Rotation3, Vector3};

use crate::data::CuboidRecord;

/// An oriented box given by its center, full extents and yaw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterBox {
    pub center: Point3<f64>,
    /// Full extents along the box's local x, y and z axes.
    pub extents: Vector3<f64>,
    /// Counter-clockwise rotation about z in radians.
    pub yaw: f64,
}

impl CenterBox {
    pub fn new(center: Point3<f64>, extents: Vector3<f64>, yaw: f64) -> Self {
        Self {
            center,
            extents,
            yaw,
        }
    }
}

impl From<&CuboidRecord> for CenterBox {
    fn from(cuboid: &CuboidRecord) -> Self {
        let position = cuboid.position;
        let dimensions = cuboid.dimensions;
        Self::new(
            Point3::new(position.x, position.y, position.z),
            Vector3::new(dimensions.x, dimensions.y, dimensions.z),
            cuboid.yaw,
        )
    }
}

/// Returns the eight corners of `center_box`.
///
/// The bottom face comes first, then the top face. Each face is ordered
/// `(+x, +y), (+x, -y), (-x, -y), (-x, +y)` in the box's local frame, before
/// the yaw rotation and the translation to the center are applied.
pub fn center_box_to_corners(center_box: &CenterBox) -> [Point3<f64>; 8] {
    let half = center_box.extents / 2.0;
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), center_box.yaw);

    let signs: [(f64, f64, f64); 8] = [
        (1.0, 1.0, -1.0),
        (1.0, -1.0, -1.0),
        (-1.0, -1.0, -1.0),
        (-1.0, 1.0, -1.0),
        (1.0, 1.0, 1.0),
        (1.0, -1.0, 1.0),
        (-1.0, -1.0, 1.0),
        (-1.0, 1.0, 1.0),
    ];

    signs.map(|(sx, sy, sz)| {
        let local = Vector3::new(sx * half.x, sy * half.y, sz * half.z);
        center_box.center + rotation * local
    })
}
