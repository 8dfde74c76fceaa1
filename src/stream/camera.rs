use std::path::Path;

use super::decoder::{FrameDecoder, ImageDecoder};
use super::{load_all_or_reset, Companion, FrameSeries, Stream, StreamKind};
use crate::data::io_image::read_image_size;
use crate::data::{ImageFrame, ImageSize, Intrinsics, Pose};
use crate::directory::basename;
use crate::error::PandasetError;

/// One camera of a sequence: image frames, pose track, timestamps and the
/// pinhole intrinsics.
#[derive(Debug)]
pub struct Camera {
    frames: FrameSeries<ImageFrame>,
    poses: Companion<Vec<Pose>>,
    timestamps: Companion<Vec<f64>>,
    intrinsics: Companion<Intrinsics>,
}

impl Camera {
    /// Discovers a camera folder. The camera is named after the folder, e.g.
    /// `front_camera`.
    pub fn discover(directory: &Path) -> Result<Self, PandasetError> {
        Self::with_decoder(directory, ImageDecoder)
    }

    pub fn with_decoder<D>(directory: &Path, decoder: D) -> Result<Self, PandasetError>
    where
        D: FrameDecoder<Frame = ImageFrame> + 'static,
    {
        let name = basename(directory)
            .ok_or_else(|| PandasetError::LayoutInvalid {
                path: directory.to_path_buf(),
                message: "camera folder has no name".to_string(),
            })?
            .to_string();

        Ok(Self {
            poses: Companion::discover(name.as_str(), directory, "poses.json"),
            timestamps: Companion::discover(name.as_str(), directory, "timestamps.json"),
            intrinsics: Companion::discover(name.as_str(), directory, "intrinsics.json"),
            frames: FrameSeries::discover(name, directory, decoder)?,
        })
    }

    pub fn get_range(&self, start: usize, end: usize) -> Result<&[ImageFrame], PandasetError> {
        self.frames.get_range(start, end)
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

    pub fn intrinsics(&self) -> Result<&Intrinsics, PandasetError> {
        self.intrinsics.get()
    }

    /// Width and height of the camera's frames, read from the first frame's
    /// header. Works without loading.
    pub fn image_size(&self) -> Result<ImageSize, PandasetError> {
        let first = self.frames.paths().first().ok_or(PandasetError::IndexOutOfRange {
            index: 0,
            len: 0,
        })?;
        read_image_size(first)
    }

    pub fn series(&self) -> &FrameSeries<ImageFrame> {
        &self.frames
    }

    fn load_parts(&mut self) -> Result<(), PandasetError> {
        self.frames.load()?;
        self.poses.load()?;
        self.timestamps.load()?;
        self.intrinsics.load()?;
        Ok(())
    }
}

impl Stream for Camera {
    type Frame<'a> = &'a ImageFrame;

    fn kind(&self) -> StreamKind {
        StreamKind::Camera
    }

    fn name(&self) -> &str {
        self.frames.name()
    }

    fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    fn load(&mut self) -> Result<(), PandasetError> {
        load_all_or_reset(self, Camera::load_parts)?;
        tracing::debug!(camera = self.name(), frames = self.frame_count(), "camera loaded");
        Ok(())
    }

    fn unload(&mut self) {
        self.frames.unload();
        self.poses.unload();
        self.timestamps.unload();
        self.intrinsics.unload();
    }

    fn is_loaded(&self) -> bool {
        self.frames.is_loaded()
    }

    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError> {
        self.frames.get(index)
    }
}
