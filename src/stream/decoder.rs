//! Per-file decoders injected into a [`FrameSeries`](super::FrameSeries).

use std::path::Path;

use crate::data::io_image::read_image;
use crate::data::io_table::{read_cuboid_table, read_point_table, read_semseg_table};
use crate::data::{CuboidRecord, ImageFrame, PointCloudFrame, SemsegFrame};
use crate::error::PandasetError;

/// Turns one backing file into one frame.
pub trait FrameDecoder: Send + Sync {
    type Frame;

    /// File extensions (without dot) that count as frames of this stream.
    fn extensions(&self) -> &[&'static str];

    fn decode(&self, path: &Path) -> Result<Self::Frame, PandasetError>;
}

/// Headered CSV point tables (`x, y, z, i, t, d`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PointTableDecoder;

impl FrameDecoder for PointTableDecoder {
    type Frame = PointCloudFrame;

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn decode(&self, path: &Path) -> Result<PointCloudFrame, PandasetError> {
        read_point_table(path)
    }
}

/// JPEG or PNG camera frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageDecoder;

impl FrameDecoder for ImageDecoder {
    type Frame = ImageFrame;

    fn extensions(&self) -> &[&'static str] {
        &["jpg", "jpeg", "png"]
    }

    fn decode(&self, path: &Path) -> Result<ImageFrame, PandasetError> {
        read_image(path)
    }
}

/// Headered CSV cuboid tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct CuboidTableDecoder;

impl FrameDecoder for CuboidTableDecoder {
    type Frame = Vec<CuboidRecord>;

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn decode(&self, path: &Path) -> Result<Vec<CuboidRecord>, PandasetError> {
        read_cuboid_table(path)
    }
}

/// Headered CSV class-id tables (`class`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SemsegTableDecoder;

impl FrameDecoder for SemsegTableDecoder {
    type Frame = SemsegFrame;

    fn extensions(&self) -> &[&'static str] {
        &["csv"]
    }

    fn decode(&self, path: &Path) -> Result<SemsegFrame, PandasetError> {
        read_semseg_table(path)
    }
}
