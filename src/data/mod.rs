//! Typed records for everything a PandaSet sequence stores on disk.
//!
//! The structs here are nominal versions of the devkit's JSON objects and
//! per-frame tables, so that geometry code and tests get field checking at
//! compile time. The `io_*` modules decode them from files.
//!
//! # Example
//!
//! ```
//! use pandaset::data::{Heading, Pose, Position};
//!
//! let pose = Pose::new(Position::new(1.0, 2.0, 0.5), Heading::identity());
//! assert!(pose.is_normalized());
//! ```

mod camera;
mod cuboid;
mod gps;
pub mod io_image;
pub mod io_json;
pub mod io_table;
mod points;
mod pose;
mod semseg;

pub use camera::{ImageFrame, ImageSize, Intrinsics};
pub use cuboid::{CuboidAttributes, CuboidRecord, Dimensions};
pub use gps::GpsRecord;
pub use points::{LidarPoint, PointCloudFrame, SensorSelection};
pub use pose::{Heading, Pose, Position, UNIT_NORM_TOLERANCE};
pub use semseg::{ClassMap, SemsegFrame};
