use std::fmt;
use std::path::{Path, PathBuf};

use super::decoder::FrameDecoder;
use super::LoadState;
use crate::directory::files_with_extensions;
use crate::error::PandasetError;

/// An ordered, lazily decoded sequence of per-frame payloads.
///
/// Backed by the files of one folder whose extension matches the decoder,
/// sorted by file name. File names must sort in temporal order (zero-padded
/// frame numbers).
pub struct FrameSeries<T> {
    name: String,
    directory: PathBuf,
    paths: Vec<PathBuf>,
    decoder: Box<dyn FrameDecoder<Frame = T>>,
    state: LoadState<Vec<T>>,
}

impl<T> FrameSeries<T> {
    /// Resolves the structure of `directory` without decoding anything.
    ///
    /// A folder that does not exist yields an `Unavailable` series with zero
    /// frames rather than an error.
    pub fn discover<D>(
        name: impl Into<String>,
        directory: &Path,
        decoder: D,
    ) -> Result<Self, PandasetError>
    where
        D: FrameDecoder<Frame = T> + 'static,
    {
        let name = name.into();

        if !directory.is_dir() {
            tracing::debug!(stream = %name, path = %directory.display(), "frame folder missing");
            return Ok(Self {
                name,
                directory: directory.to_path_buf(),
                paths: Vec::new(),
                decoder: Box::new(decoder),
                state: LoadState::Unavailable(directory.to_path_buf()),
            });
        }

        let paths = files_with_extensions(directory, decoder.extensions())?;
        tracing::debug!(stream = %name, frames = paths.len(), "discovered frames");

        Ok(Self {
            name,
            directory: directory.to_path_buf(),
            paths,
            decoder: Box::new(decoder),
            state: LoadState::NotLoaded,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Backing files in frame order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn frame_count(&self) -> usize {
        self.paths.len()
    }

    pub fn state(&self) -> &LoadState<Vec<T>> {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Decodes every backing file in frame order.
    ///
    /// Loading an already loaded series decodes again. If any file fails to
    /// decode the series is left `NotLoaded`.
    pub fn load(&mut self) -> Result<(), PandasetError> {
        if self.state.is_unavailable() {
            return Err(self.unavailable());
        }

        self.state = LoadState::NotLoaded;

        let mut frames = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            frames.push(self.decoder.decode(path)?);
        }

        tracing::debug!(stream = %self.name, frames = frames.len(), "loaded frames");
        self.state = LoadState::Loaded(frames);
        Ok(())
    }

    /// Drops decoded frames. Structure is kept.
    pub fn unload(&mut self) {
        if self.state.is_loaded() {
            tracing::debug!(stream = %self.name, "unloaded frames");
        }
        self.state.release();
    }

    /// All decoded frames.
    pub fn frames(&self) -> Result<&[T], PandasetError> {
        match &self.state {
            LoadState::Loaded(frames) => Ok(frames),
            LoadState::NotLoaded => Err(PandasetError::NotLoaded {
                stream: self.name.clone(),
            }),
            LoadState::Unavailable(_) => Err(self.unavailable()),
        }
    }

    /// Returns frame `index`.
    pub fn get(&self, index: usize) -> Result<&T, PandasetError> {
        let frames = self.frames()?;
        frames.get(index).ok_or(PandasetError::IndexOutOfRange {
            index,
            len: frames.len(),
        })
    }

    /// Returns frames `start..end`.
    pub fn get_range(&self, start: usize, end: usize) -> Result<&[T], PandasetError> {
        let frames = self.frames()?;
        let len = frames.len();
        if end > len {
            return Err(PandasetError::IndexOutOfRange { index: end, len });
        }
        if start > end {
            return Err(PandasetError::IndexOutOfRange { index: start, len });
        }
        Ok(&frames[start..end])
    }

    fn unavailable(&self) -> PandasetError {
        PandasetError::Unavailable {
            stream: self.name.clone(),
            path: self.directory.clone(),
        }
    }
}

impl<T> fmt::Debug for FrameSeries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameSeries")
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("frames", &self.paths.len())
            .field("loaded", &self.state.is_loaded())
            .finish()
    }
}
