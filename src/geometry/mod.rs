//! Rigid transforms, LiDAR to camera projection and cuboid corners.
//!
//! Every function here is pure. Angles are in radians and transforms are
//! rigid: a rotation in SO(3) followed by a translation, never a scale.
//!
//! Coordinate frames:
//!
//! - **world**: the fixed frame that poses and point clouds are stored in
//! - **ego / sensor**: local to one sensor at one frame, related to world by
//!   that frame's [`Pose`](crate::data::Pose)
//! - **camera**: the sensor frame of a camera, `+z` looking forward
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use pandaset::data::{Heading, ImageSize, Intrinsics, Pose, Position};
//! use pandaset::geometry::project_lidar_to_camera;
//!
//! let camera = Pose::new(Position::new(0.0, 0.0, 0.0), Heading::identity());
//! let intrinsics = Intrinsics::new(1000.0, 1000.0, 500.0, 500.0);
//! let points = [Point3::new(0.0, 0.0, 1.0), Point3::new(0.0, 0.0, -1.0)];
//!
//! let projection =
//!     project_lidar_to_camera(&points, &camera, &intrinsics, ImageSize::new(1000, 1000), true);
//! assert_eq!(projection.retained_indices, vec![0]);
//! assert_eq!(projection.points_2d[0].x, 500.0);
//! ```

mod boxes;
mod projection;
mod transform;

pub use boxes::{center_box_to_corners, CenterBox};
pub use projection::{
    ego_points_to_world, lidar_points_to_ego, project_frame, project_lidar_to_camera, Projection,
};
pub use transform::{pose_to_transform, Transform};
