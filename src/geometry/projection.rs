use nalgebra::{Point2, Point3};

use super::transform::pose_to_transform;
use crate::data::{ImageSize, Intrinsics, Pose};
use crate::error::PandasetError;
use crate::stream::{Camera, Lidar};

/// Result of projecting world points into one camera image.
///
/// The three vectors have the same length. `retained_indices[n]` is the
/// position in the input slice of the point that produced `points_2d[n]`, so
/// per-point labels can be carried over to the projection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Projection {
    /// Pixel coordinates `(u, v)`.
    pub points_2d: Vec<Point2<f64>>,
    /// The same points in the camera frame.
    pub points_camera: Vec<Point3<f64>>,
    /// Strictly ascending indices into the input points.
    pub retained_indices: Vec<usize>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.retained_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained_indices.is_empty()
    }
}

/// Projects world-frame points into the image of a pinhole camera.
///
/// With `filter_outliers`, points with camera-frame `z <= 0` are dropped, and
/// so are points whose pixel coordinates are not strictly inside
/// `(0, width) x (0, height)`. Without it every point is kept, including
/// points behind the camera, whose pixel coordinates are meaningless.
pub fn project_lidar_to_camera(
    points_world: &[Point3<f64>],
    camera_pose: &Pose,
    intrinsics: &Intrinsics,
    image_size: ImageSize,
    filter_outliers: bool,
) -> Projection {
    let world_to_camera = pose_to_transform(camera_pose).inverse();
    let width = f64::from(image_size.width);
    let height = f64::from(image_size.height);

    let mut projection = Projection::default();
    for (index, point) in points_world.iter().enumerate() {
        let camera = world_to_camera.transform_point(point);
        if filter_outliers && camera.z <= 0.0 {
            continue;
        }

        let u = intrinsics.fx * camera.x / camera.z + intrinsics.cx;
        let v = intrinsics.fy * camera.y / camera.z + intrinsics.cy;
        let inside = u > 0.0 && u < width && v > 0.0 && v < height;
        if filter_outliers && !inside {
            continue;
        }

        projection.points_2d.push(Point2::new(u, v));
        projection.points_camera.push(camera);
        projection.retained_indices.push(index);
    }

    projection
}

/// Projects LiDAR frame `index` into `camera` at the same frame.
///
/// Uses the LiDAR's current sensor selection, the camera pose at `index`,
/// the camera intrinsics and the size of the camera's images. Both streams
/// must be loaded.
///
/// `retained_indices` index the filtered frame returned by
/// [`Lidar::frame`]. Semantic labels follow the unfiltered rows, so they only
/// line up with these indices while the selection is
/// [`SensorSelection::Both`](crate::data::SensorSelection::Both).
pub fn project_frame(
    lidar: &Lidar,
    camera: &Camera,
    index: usize,
    filter_outliers: bool,
) -> Result<Projection, PandasetError> {
    let points = lidar.frame(index)?.positions();
    let pose = camera.pose(index)?;
    let intrinsics = camera.intrinsics()?;
    let image_size = camera.image_size()?;

    Ok(project_lidar_to_camera(
        &points,
        pose,
        intrinsics,
        image_size,
        filter_outliers,
    ))
}

/// Moves world-frame points into the frame of the sensor at `lidar_pose`.
pub fn lidar_points_to_ego(points_world: &[Point3<f64>], lidar_pose: &Pose) -> Vec<Point3<f64>> {
    let world_to_ego = pose_to_transform(lidar_pose).inverse();
    points_world
        .iter()
        .map(|point| world_to_ego.transform_point(point))
        .collect()
}

/// Inverse of [`lidar_points_to_ego`].
pub fn ego_points_to_world(points_ego: &[Point3<f64>], lidar_pose: &Pose) -> Vec<Point3<f64>> {
    let ego_to_world = pose_to_transform(lidar_pose);
    points_ego
        .iter()
        .map(|point| ego_to_world.transform_point(point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Heading, Position};

    fn intrinsics() -> Intrinsics {
        Intrinsics::new(1000.0, 1000.0, 500.0, 500.0)
    }

    fn square() -> ImageSize {
        ImageSize::new(1000, 1000)
    }

    fn at_origin() -> Pose {
        Pose::identity()
    }

    #[test]
    fn principal_ray_hits_the_principal_point() {
        let projection = project_lidar_to_camera(
            &[Point3::new(0.0, 0.0, 1.0)],
            &at_origin(),
            &intrinsics(),
            square(),
            true,
        );
        assert_eq!(projection.points_2d, vec![Point2::new(500.0, 500.0)]);
        assert_eq!(projection.points_camera, vec![Point3::new(0.0, 0.0, 1.0)]);
        assert_eq!(projection.retained_indices, vec![0]);
    }

    #[test]
    fn points_on_or_behind_the_camera_plane() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, -2.0)];

        let filtered =
            project_lidar_to_camera(&points, &at_origin(), &intrinsics(), square(), true);
        assert!(filtered.is_empty());

        let unfiltered =
            project_lidar_to_camera(&points, &at_origin(), &intrinsics(), square(), false);
        assert_eq!(unfiltered.retained_indices, vec![0, 1]);
        assert_eq!(unfiltered.points_camera[1].z, -2.0);
    }

    #[test]
    fn image_bounds_are_open() {
        // u = 1000 * x + 500 at z = 1.
        let points = [
            Point3::new(0.5, 0.0, 1.0),   // u = 1000
            Point3::new(-0.5, 0.0, 1.0),  // u = 0
            Point3::new(0.0, 0.5, 1.0),   // v = 1000
            Point3::new(0.0, -0.5, 1.0),  // v = 0
            Point3::new(0.499, 0.0, 1.0), // just inside
        ];
        let projection =
            project_lidar_to_camera(&points, &at_origin(), &intrinsics(), square(), true);
        assert_eq!(projection.retained_indices, vec![4]);
    }

    #[test]
    fn camera_pose_is_inverted() {
        // Camera one meter behind the origin along world z.
        let camera = Pose::new(Position::new(0.0, 0.0, -1.0), Heading::identity());
        let projection = project_lidar_to_camera(
            &[Point3::origin()],
            &camera,
            &intrinsics(),
            square(),
            true,
        );
        assert_eq!(projection.points_camera, vec![Point3::new(0.0, 0.0, 1.0)]);
    }

    #[test]
    fn ego_round_trip() {
        let pose = Pose::new(
            Position::new(10.0, -3.0, 1.5),
            Heading::new(0.9238795325112867, 0.0, 0.0, 0.3826834323650898),
        );
        let world = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-7.0, 0.0, 0.25)];

        let ego = lidar_points_to_ego(&world, &pose);
        let back = ego_points_to_world(&ego, &pose);
        for (original, restored) in world.iter().zip(&back) {
            assert!((original - restored).norm() < 1e-9);
        }
    }

    #[test]
    fn sensor_position_is_the_ego_origin() {
        let pose = Pose::new(Position::new(4.0, 5.0, 6.0), Heading::identity());
        let ego = lidar_points_to_ego(&[Point3::new(4.0, 5.0, 6.0)], &pose);
        assert_eq!(ego, vec![Point3::origin()]);
    }
}
