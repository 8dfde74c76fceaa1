//! One recording: every stream found under a sequence folder.
//!
//! Streams are classified by the trailing part of their folder name:
//!
//! | folder            | stream                                    |
//! |-------------------|-------------------------------------------|
//! | `*lidar`          | [`Lidar`]                                 |
//! | `*camera/<name>`  | one [`Camera`] per nested folder          |
//! | `*meta`           | GPS and timestamps from `gps.json` / `timestamps.json` |
//! | `*annotations/*cuboids` | [`Cuboids`]                         |
//! | `*annotations/*semseg`  | [`SemanticSegmentation`]            |
//!
//! A category that is not on disk leaves its field unset, and the cascading
//! [`Sequence::load`] and [`Sequence::unload`] skip it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data::GpsRecord;
use crate::directory::{basename, dir_name_ends_with, subdirectories};
use crate::error::PandasetError;
use crate::stream::{
    Camera, Cuboids, Lidar, MetaSeries, SemanticSegmentation, Stream, StreamKind,
};

/// All streams of one sequence, discovered but not loaded.
#[derive(Debug)]
pub struct Sequence {
    id: String,
    directory: PathBuf,
    lidar: Option<Lidar>,
    cameras: BTreeMap<String, Camera>,
    gps: Option<MetaSeries<GpsRecord>>,
    timestamps: Option<MetaSeries<f64>>,
    cuboids: Option<Cuboids>,
    semseg: Option<SemanticSegmentation>,
}

impl Sequence {
    /// Resolves the structure of the sequence at `directory`. Nothing is
    /// decoded.
    pub fn discover(directory: &Path) -> Result<Self, PandasetError> {
        let id = basename(directory)
            .ok_or_else(|| PandasetError::LayoutInvalid {
                path: directory.to_path_buf(),
                message: "sequence folder has no name".to_string(),
            })?
            .to_string();

        let mut sequence = Self {
            id,
            directory: directory.to_path_buf(),
            lidar: None,
            cameras: BTreeMap::new(),
            gps: None,
            timestamps: None,
            cuboids: None,
            semseg: None,
        };

        for dir in subdirectories(directory)? {
            if dir_name_ends_with(&dir, "lidar") {
                sequence.lidar = Some(Lidar::discover(&dir)?);
            } else if dir_name_ends_with(&dir, "camera") {
                for camera_dir in subdirectories(&dir)? {
                    let camera = Camera::discover(&camera_dir)?;
                    sequence.cameras.insert(camera.name().to_string(), camera);
                }
            } else if dir_name_ends_with(&dir, "meta") {
                sequence.gps = Some(MetaSeries::discover(StreamKind::Gps, &dir, "gps.json"))
                    .filter(MetaSeries::is_available);
                sequence.timestamps =
                    Some(MetaSeries::discover(StreamKind::Timestamps, &dir, "timestamps.json"))
                        .filter(MetaSeries::is_available);
            } else if dir_name_ends_with(&dir, "annotations") {
                for annotation_dir in subdirectories(&dir)? {
                    if dir_name_ends_with(&annotation_dir, "cuboids") {
                        sequence.cuboids = Some(Cuboids::discover(&annotation_dir)?);
                    } else if dir_name_ends_with(&annotation_dir, "semseg") {
                        sequence.semseg = Some(SemanticSegmentation::discover(&annotation_dir)?);
                    }
                }
            } else {
                tracing::debug!(sequence = %sequence.id, path = %dir.display(), "ignoring folder");
            }
        }

        tracing::debug!(
            sequence = %sequence.id,
            lidar = sequence.lidar.is_some(),
            cameras = sequence.cameras.len(),
            cuboids = sequence.cuboids.is_some(),
            semseg = sequence.semseg.is_some(),
            "discovered sequence"
        );

        Ok(sequence)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn lidar(&self) -> Option<&Lidar> {
        self.lidar.as_ref()
    }

    pub fn lidar_mut(&mut self) -> Option<&mut Lidar> {
        self.lidar.as_mut()
    }

    /// Cameras keyed by folder name.
    pub fn cameras(&self) -> &BTreeMap<String, Camera> {
        &self.cameras
    }

    pub fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.get(name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut Camera> {
        self.cameras.get_mut(name)
    }

    pub fn gps(&self) -> Option<&MetaSeries<GpsRecord>> {
        self.gps.as_ref()
    }

    pub fn timestamps(&self) -> Option<&MetaSeries<f64>> {
        self.timestamps.as_ref()
    }

    pub fn cuboids(&self) -> Option<&Cuboids> {
        self.cuboids.as_ref()
    }

    pub fn cuboids_mut(&mut self) -> Option<&mut Cuboids> {
        self.cuboids.as_mut()
    }

    pub fn semseg(&self) -> Option<&SemanticSegmentation> {
        self.semseg.as_ref()
    }

    pub fn semseg_mut(&mut self) -> Option<&mut SemanticSegmentation> {
        self.semseg.as_mut()
    }

    pub fn has_semseg(&self) -> bool {
        self.semseg.is_some()
    }

    /// Loads every present stream, then checks frame alignment.
    ///
    /// Streams load in the order lidar, cameras, gps, timestamps, cuboids,
    /// semseg. A failure stops the cascade: the failing stream is reset and
    /// streams loaded before it stay loaded.
    pub fn load(&mut self) -> Result<&mut Self, PandasetError> {
        self.load_lidar()?
            .load_cameras()?
            .load_gps()?
            .load_timestamps()?
            .load_cuboids()?
            .load_semseg()?;
        self.check_alignment()?;

        tracing::info!(
            sequence = %self.id,
            frames = self.lidar.as_ref().map(|lidar| lidar.frame_count()),
            cameras = self.cameras.len(),
            "loaded sequence"
        );
        Ok(self)
    }

    pub fn load_lidar(&mut self) -> Result<&mut Self, PandasetError> {
        if let Some(lidar) = self.lidar.as_mut() {
            lidar.load()?;
        }
        Ok(self)
    }

    pub fn load_cameras(&mut self) -> Result<&mut Self, PandasetError> {
        for camera in self.cameras.values_mut() {
            camera.load()?;
        }
        Ok(self)
    }

    pub fn load_gps(&mut self) -> Result<&mut Self, PandasetError> {
        if let Some(gps) = self.gps.as_mut() {
            gps.load()?;
        }
        Ok(self)
    }

    pub fn load_timestamps(&mut self) -> Result<&mut Self, PandasetError> {
        if let Some(timestamps) = self.timestamps.as_mut() {
            timestamps.load()?;
        }
        Ok(self)
    }

    pub fn load_cuboids(&mut self) -> Result<&mut Self, PandasetError> {
        if let Some(cuboids) = self.cuboids.as_mut() {
            cuboids.load()?;
        }
        Ok(self)
    }

    pub fn load_semseg(&mut self) -> Result<&mut Self, PandasetError> {
        if let Some(semseg) = self.semseg.as_mut() {
            semseg.load()?;
        }
        Ok(self)
    }

    /// Drops the payload of every stream. Structure is kept.
    pub fn unload(&mut self) -> &mut Self {
        self.unload_lidar()
            .unload_cameras()
            .unload_gps()
            .unload_timestamps()
            .unload_cuboids()
            .unload_semseg();
        tracing::info!(sequence = %self.id, "unloaded sequence");
        self
    }

    pub fn unload_lidar(&mut self) -> &mut Self {
        if let Some(lidar) = self.lidar.as_mut() {
            lidar.unload();
        }
        self
    }

    pub fn unload_cameras(&mut self) -> &mut Self {
        for camera in self.cameras.values_mut() {
            camera.unload();
        }
        self
    }

    pub fn unload_gps(&mut self) -> &mut Self {
        if let Some(gps) = self.gps.as_mut() {
            gps.unload();
        }
        self
    }

    pub fn unload_timestamps(&mut self) -> &mut Self {
        if let Some(timestamps) = self.timestamps.as_mut() {
            timestamps.unload();
        }
        self
    }

    pub fn unload_cuboids(&mut self) -> &mut Self {
        if let Some(cuboids) = self.cuboids.as_mut() {
            cuboids.unload();
        }
        self
    }

    pub fn unload_semseg(&mut self) -> &mut Self {
        if let Some(semseg) = self.semseg.as_mut() {
            semseg.unload();
        }
        self
    }

    /// Verifies that loaded streams agree with the LiDAR frame count.
    ///
    /// Checked: LiDAR poses and timestamps, cuboid and semseg frame counts,
    /// and the number of semseg labels in each frame against the number of
    /// raw LiDAR rows. Streams that are not loaded are skipped.
    pub fn check_alignment(&self) -> Result<(), PandasetError> {
        let Some(lidar) = self.lidar.as_ref().filter(|lidar| lidar.is_loaded()) else {
            return Ok(());
        };
        let frames = lidar.frame_count();

        if let Ok(poses) = lidar.poses() {
            expect_count("lidar poses", frames, poses.len())?;
        }
        if let Ok(timestamps) = lidar.timestamps() {
            expect_count("lidar timestamps", frames, timestamps.len())?;
        }

        if let Some(cuboids) = self.cuboids.as_ref().filter(|c| c.is_loaded()) {
            expect_count(cuboids.name(), frames, cuboids.frame_count())?;
        }

        if let Some(semseg) = self.semseg.as_ref().filter(|s| s.is_loaded()) {
            expect_count(semseg.name(), frames, semseg.frame_count())?;
            for index in 0..frames {
                let labels = semseg.get(index)?.len();
                let points = lidar.raw(index)?.len();
                expect_count(&format!("semseg frame {index}"), points, labels)?;
            }
        }

        Ok(())
    }
}

fn expect_count(stream: &str, expected: usize, found: usize) -> Result<(), PandasetError> {
    if expected == found {
        return Ok(());
    }
    Err(PandasetError::MisalignedFrameCount {
        stream: stream.to_string(),
        expected,
        found,
    })
}
