use std::borrow::Cow;
use std::path::Path;

use super::decoder::{FrameDecoder, PointTableDecoder};
use super::{load_all_or_reset, Companion, FrameSeries, Stream, StreamKind};
use crate::data::{PointCloudFrame, Pose, SensorSelection};
use crate::error::PandasetError;

/// LiDAR point clouds of one sequence, with the sensor pose track and frame
/// timestamps.
///
/// Points are in world coordinates. The selected sensor is applied when
/// frames are read, never when they are loaded: switching it re-filters the
/// resident frames without touching disk.
#[derive(Debug)]
pub struct Lidar {
    frames: FrameSeries<PointCloudFrame>,
    poses: Companion<Vec<Pose>>,
    timestamps: Companion<Vec<f64>>,
    selection: SensorSelection,
}

impl Lidar {
    /// Discovers `directory` using the CSV point table decoder.
    pub fn discover(directory: &Path) -> Result<Self, PandasetError> {
        Self::with_decoder(directory, PointTableDecoder)
    }

    /// Discovers `directory` with a custom per-frame decoder.
    pub fn with_decoder<D>(directory: &Path, decoder: D) -> Result<Self, PandasetError>
    where
        D: FrameDecoder<Frame = PointCloudFrame> + 'static,
    {
        let name = StreamKind::Lidar.as_str();
        Ok(Self {
            frames: FrameSeries::discover(name, directory, decoder)?,
            poses: Companion::discover(name, directory, "poses.json"),
            timestamps: Companion::discover(name, directory, "timestamps.json"),
            selection: SensorSelection::Both,
        })
    }

    /// Restricts subsequent reads to one LiDAR unit, or both.
    pub fn set_sensor(&mut self, selection: SensorSelection) {
        self.selection = selection;
    }

    pub fn sensor(&self) -> SensorSelection {
        self.selection
    }

    /// Frame `index` with the selected sensor filter applied.
    ///
    /// Borrows the resident frame when no filter is active.
    pub fn frame(&self, index: usize) -> Result<Cow<'_, PointCloudFrame>, PandasetError> {
        let raw = self.frames.get(index)?;
        Ok(match self.selection {
            SensorSelection::Both => Cow::Borrowed(raw),
            selection => Cow::Owned(raw.filtered(selection)),
        })
    }

    /// Frames `start..end` with the selected sensor filter applied.
    pub fn get_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<Vec<Cow<'_, PointCloudFrame>>, PandasetError> {
        let raw = self.frames.get_range(start, end)?;
        Ok(raw
            .iter()
            .map(|frame| match self.selection {
                SensorSelection::Both => Cow::Borrowed(frame),
                selection => Cow::Owned(frame.filtered(selection)),
            })
            .collect())
    }

    /// Frame `index` exactly as decoded, ignoring the sensor filter.
    ///
    /// This is the row order semantic segmentation labels refer to.
    pub fn raw(&self, index: usize) -> Result<&PointCloudFrame, PandasetError> {
        self.frames.get(index)
    }

    pub fn poses(&self) -> Result<&[Pose], PandasetError> {
        self.poses.get().map(Vec::as_slice)
    }

    pub fn pose(&self, index: usize) -> Result<&Pose, PandasetError> {
        self.poses.get_at(index)
    }

    pub fn timestamps(&self) -> Result<&[f64], PandasetError> {
        self.timestamps.get().map(Vec::as_slice)
    }

    pub fn series(&self) -> &FrameSeries<PointCloudFrame> {
        &self.frames
    }

    fn load_parts(&mut self) -> Result<(), PandasetError> {
        self.frames.load()?;
        self.poses.load()?;
        self.timestamps.load()?;
        Ok(())
    }
}

impl Stream for Lidar {
    type Frame<'a> = Cow<'a, PointCloudFrame>;

    fn kind(&self) -> StreamKind {
        StreamKind::Lidar
    }

    fn name(&self) -> &str {
        self.frames.name()
    }

    fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    fn load(&mut self) -> Result<(), PandasetError> {
        load_all_or_reset(self, Lidar::load_parts)
    }

    fn unload(&mut self) {
        self.frames.unload();
        self.poses.unload();
        self.timestamps.unload();
    }

    fn is_loaded(&self) -> bool {
        self.frames.is_loaded()
    }

    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError> {
        self.frame(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const POSES: &str = r#"[
        {"position":{"x":0,"y":0,"z":0},"heading":{"w":1,"x":0,"y":0,"z":0}},
        {"position":{"x":1,"y":0,"z":0},"heading":{"w":1,"x":0,"y":0,"z":0}}]"#;

    fn write_lidar(dir: &Path, with_companions: bool) {
        fs::create_dir_all(dir).expect("mkdir");
        fs::write(
            dir.join("00.csv"),
            "x,y,z,i,t,d\n1,0,0,1,0,0\n2,0,0,1,0,1\n3,0,0,1,0,-1\n4,0,0,1,0,0\n",
        )
        .expect("write frame 0");
        fs::write(dir.join("01.csv"), "x,y,z,i,t,d\n5,0,0,1,0,1\n").expect("write frame 1");
        if with_companions {
            fs::write(dir.join("poses.json"), POSES).expect("write poses");
            fs::write(dir.join("timestamps.json"), "[1.0, 1.1]").expect("write timestamps");
        }
    }

    fn xs(frame: &PointCloudFrame) -> Vec<f64> {
        frame.iter().map(|p| p.x).collect()
    }

    #[test]
    fn loads_frames_poses_and_timestamps() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_lidar(temp.path(), true);

        let mut lidar = Lidar::discover(temp.path()).expect("discover");
        assert_eq!(lidar.frame_count(), 2);
        assert!(matches!(lidar.poses(), Err(PandasetError::NotLoaded { .. })));

        lidar.load().expect("load");
        assert_eq!(lidar.poses().unwrap().len(), 2);
        assert_eq!(lidar.pose(1).unwrap().position.x, 1.0);
        assert_eq!(lidar.timestamps().unwrap(), &[1.0, 1.1]);
        assert_eq!(xs(&lidar.get(0).unwrap()), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sensor_filter_is_applied_at_read_time() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_lidar(temp.path(), true);
        let mut lidar = Lidar::discover(temp.path()).expect("discover");
        lidar.load().expect("load");

        lidar.set_sensor(SensorSelection::Mechanical);
        assert_eq!(xs(&lidar.get(0).unwrap()), vec![1.0, 4.0]);

        lidar.set_sensor(SensorSelection::FrontFacing);
        assert_eq!(xs(&lidar.get(0).unwrap()), vec![2.0]);
        let range = lidar.get_range(0, 2).unwrap();
        assert_eq!(xs(&range[1]), vec![5.0]);

        lidar.set_sensor(SensorSelection::Both);
        assert!(matches!(lidar.get(0).unwrap(), Cow::Borrowed(_)));
        assert_eq!(lidar.raw(0).unwrap().len(), 4);
    }

    #[test]
    fn missing_companions_fail_only_on_access() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_lidar(temp.path(), false);
        let mut lidar = Lidar::discover(temp.path()).expect("discover");

        lidar.load().expect("frames still load");
        assert!(matches!(
            lidar.poses(),
            Err(PandasetError::MissingCompanionFile { .. })
        ));
        assert!(matches!(
            lidar.timestamps(),
            Err(PandasetError::MissingCompanionFile { .. })
        ));
    }

    #[test]
    fn corrupt_poses_reset_the_whole_stream() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_lidar(temp.path(), true);
        fs::write(temp.path().join("poses.json"), "[{").expect("corrupt poses");

        let mut lidar = Lidar::discover(temp.path()).expect("discover");
        let err = lidar.load().expect_err("load should fail");
        assert!(err.is_decode_error());
        assert!(!lidar.is_loaded());
        assert!(matches!(lidar.get(0), Err(PandasetError::NotLoaded { .. })));
    }
}
