#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

pub const CUBOID_HEADER: &str = "uuid,label,yaw,stationary,camera_used,position.x,position.y,position.z,dimensions.x,dimensions.y,dimensions.z,attributes.object_motion,attributes.rider_status,attributes.pedestrian_behavior,attributes.pedestrian_age,cuboids.sensor_id,cuboids.sibling_id";

pub fn write_file(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, body).expect("write file");
}

fn identity_poses(frames: usize) -> String {
    let pose = r#"{"position":{"x":0.0,"y":0.0,"z":0.0},"heading":{"w":1.0,"x":0.0,"y":0.0,"z":0.0}}"#;
    format!("[{}]", vec![pose; frames].join(","))
}

fn timestamps(frames: usize) -> String {
    let values: Vec<String> = (0..frames).map(|i| format!("{}.0", 1000 + i)).collect();
    format!("[{}]", values.join(","))
}

/// Builds one sequence folder on disk, one stream at a time.
pub struct SequenceBuilder {
    root: PathBuf,
}

impl SequenceBuilder {
    pub fn new(dataset_root: &Path, id: &str) -> Self {
        let root = dataset_root.join(id);
        fs::create_dir_all(&root).expect("create sequence dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// LiDAR frames of `points` rows each, alternating sensor ids 0 and 1,
    /// with poses and timestamps.
    pub fn lidar(self, frames: usize, points: usize) -> Self {
        let dir = self.root.join("lidar");
        for frame in 0..frames {
            let mut body = String::from("x,y,z,i,t,d\n");
            for row in 0..points {
                body.push_str(&format!("{row}.0,0.5,{frame}.0,10.0,0.0,{}\n", row % 2));
            }
            write_file(&dir.join(format!("{frame:02}.csv")), &body);
        }
        write_file(&dir.join("poses.json"), &identity_poses(frames));
        write_file(&dir.join("timestamps.json"), &timestamps(frames));
        self
    }

    /// A camera with `frames` blank images looking along world +z.
    pub fn camera(self, name: &str, frames: usize, width: u32, height: u32) -> Self {
        let dir = self.root.join("camera").join(name);
        fs::create_dir_all(&dir).expect("create camera dir");
        for frame in 0..frames {
            RgbImage::new(width, height)
                .save(dir.join(format!("{frame:02}.png")))
                .expect("save camera frame");
        }
        write_file(&dir.join("poses.json"), &identity_poses(frames));
        write_file(&dir.join("timestamps.json"), &timestamps(frames));
        write_file(
            &dir.join("intrinsics.json"),
            &format!(
                r#"{{"fx": 100.0, "fy": 100.0, "cx": {}, "cy": {}}}"#,
                f64::from(width) / 2.0,
                f64::from(height) / 2.0
            ),
        );
        self
    }

    pub fn meta(self, frames: usize) -> Self {
        let dir = self.root.join("meta");
        let gps: Vec<String> = (0..frames)
            .map(|i| {
                format!(r#"{{"lat":37.77,"long":-122.41,"height":10.0,"xvel":{i}.0,"yvel":0.0}}"#)
            })
            .collect();
        write_file(&dir.join("gps.json"), &format!("[{}]", gps.join(",")));
        write_file(&dir.join("timestamps.json"), &timestamps(frames));
        self
    }

    /// One car cuboid per frame.
    pub fn cuboids(self, frames: usize) -> Self {
        let dir = self.root.join("annotations").join("cuboids");
        for frame in 0..frames {
            write_file(
                &dir.join(format!("{frame:02}.csv")),
                &format!(
                    "{CUBOID_HEADER}\ncar-1,Car,0.0,False,0,{frame}.0,5.0,0.0,2.0,4.5,1.6,Moving,,,,-1,\n"
                ),
            );
        }
        self
    }

    /// Semantic labels with `points` rows per frame.
    pub fn semseg(self, frames: usize, points: usize) -> Self {
        let dir = self.root.join("annotations").join("semseg");
        for frame in 0..frames {
            let mut body = String::from("class\n");
            for row in 0..points {
                body.push_str(if row % 2 == 0 { "7\n" } else { "13\n" });
            }
            write_file(&dir.join(format!("{frame:02}.csv")), &body);
        }
        write_file(&dir.join("classes.json"), r#"{"7": "Road", "13": "Car"}"#);
        self
    }
}

/// A dataset with one fully populated, consistent sequence `001`.
pub fn complete_dataset() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    SequenceBuilder::new(temp.path(), "001")
        .lidar(3, 4)
        .camera("front_camera", 3, 64, 48)
        .camera("back_camera", 3, 64, 48)
        .meta(3)
        .cuboids(3)
        .semseg(3, 4);
    temp
}
