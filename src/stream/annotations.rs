use std::path::Path;

use super::decoder::{CuboidTableDecoder, SemsegTableDecoder};
use super::{load_all_or_reset, Companion, FrameSeries, Stream, StreamKind};
use crate::data::{ClassMap, CuboidRecord, SemsegFrame};
use crate::error::PandasetError;

/// Per-frame 3D cuboid annotations from `annotations/cuboids/`.
#[derive(Debug)]
pub struct Cuboids {
    frames: FrameSeries<Vec<CuboidRecord>>,
}

impl Cuboids {
    pub fn discover(directory: &Path) -> Result<Self, PandasetError> {
        Ok(Self {
            frames: FrameSeries::discover(
                StreamKind::Cuboids.as_str(),
                directory,
                CuboidTableDecoder,
            )?,
        })
    }

    pub fn get_range(
        &self,
        start: usize,
        end: usize,
    ) -> Result<&[Vec<CuboidRecord>], PandasetError> {
        self.frames.get_range(start, end)
    }

    pub fn series(&self) -> &FrameSeries<Vec<CuboidRecord>> {
        &self.frames
    }
}

impl Stream for Cuboids {
    type Frame<'a> = &'a [CuboidRecord];

    fn kind(&self) -> StreamKind {
        StreamKind::Cuboids
    }

    fn name(&self) -> &str {
        self.frames.name()
    }

    fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    fn load(&mut self) -> Result<(), PandasetError> {
        load_all_or_reset(self, |cuboids| cuboids.frames.load())
    }

    fn unload(&mut self) {
        self.frames.unload();
    }

    fn is_loaded(&self) -> bool {
        self.frames.is_loaded()
    }

    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError> {
        self.frames.get(index).map(Vec::as_slice)
    }
}

/// Per-point class labels from `annotations/semseg/`, with the sequence's
/// class map from `classes.json`.
#[derive(Debug)]
pub struct SemanticSegmentation {
    frames: FrameSeries<SemsegFrame>,
    classes: Companion<ClassMap>,
}

impl SemanticSegmentation {
    pub fn discover(directory: &Path) -> Result<Self, PandasetError> {
        let name = StreamKind::SemanticSegmentation.as_str();
        Ok(Self {
            frames: FrameSeries::discover(name, directory, SemsegTableDecoder)?,
            classes: Companion::discover(name, directory, "classes.json"),
        })
    }

    /// Class id to class name mapping.
    pub fn classes(&self) -> Result<&ClassMap, PandasetError> {
        self.classes.get()
    }

    pub fn get_range(&self, start: usize, end: usize) -> Result<&[SemsegFrame], PandasetError> {
        self.frames.get_range(start, end)
    }

    pub fn series(&self) -> &FrameSeries<SemsegFrame> {
        &self.frames
    }

    fn load_parts(&mut self) -> Result<(), PandasetError> {
        self.frames.load()?;
        self.classes.load()?;
        Ok(())
    }
}

impl Stream for SemanticSegmentation {
    type Frame<'a> = &'a SemsegFrame;

    fn kind(&self) -> StreamKind {
        StreamKind::SemanticSegmentation
    }

    fn name(&self) -> &str {
        self.frames.name()
    }

    fn frame_count(&self) -> usize {
        self.frames.frame_count()
    }

    fn load(&mut self) -> Result<(), PandasetError> {
        load_all_or_reset(self, SemanticSegmentation::load_parts)
    }

    fn unload(&mut self) {
        self.frames.unload();
        self.classes.unload();
    }

    fn is_loaded(&self) -> bool {
        self.frames.is_loaded()
    }

    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError> {
        self.frames.get(index)
    }
}
