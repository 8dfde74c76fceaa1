use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::{LoadState, Stream, StreamKind};
use crate::data::io_json::read_json;
use crate::error::PandasetError;

/// A single JSON file that travels with a stream, such as `poses.json` or
/// `intrinsics.json`.
///
/// Whether the file exists is decided at discovery. A missing companion is
/// not an error until it is accessed, where it reports
/// [`PandasetError::MissingCompanionFile`].
#[derive(Clone, Debug)]
pub struct Companion<T> {
    stream: String,
    file_name: &'static str,
    state: LoadState<T>,
    path: PathBuf,
}

impl<T: DeserializeOwned> Companion<T> {
    pub fn discover(stream: impl Into<String>, directory: &Path, file_name: &'static str) -> Self {
        let path = directory.join(file_name);
        let state = if path.is_file() {
            LoadState::NotLoaded
        } else {
            LoadState::Unavailable(path.clone())
        };

        Self {
            stream: stream.into(),
            file_name,
            state,
            path,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.state.is_unavailable()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file. A companion that was absent at discovery stays
    /// unavailable and loading it is a no-op.
    pub fn load(&mut self) -> Result<(), PandasetError> {
        if self.state.is_unavailable() {
            return Ok(());
        }
        self.state = LoadState::NotLoaded;
        self.state = LoadState::Loaded(read_json(&self.path)?);
        Ok(())
    }

    pub fn unload(&mut self) {
        self.state.release();
    }

    pub fn get(&self) -> Result<&T, PandasetError> {
        match &self.state {
            LoadState::Loaded(value) => Ok(value),
            LoadState::NotLoaded => Err(PandasetError::NotLoaded {
                stream: self.stream.clone(),
            }),
            LoadState::Unavailable(_) => Err(PandasetError::MissingCompanionFile {
                stream: self.stream.clone(),
                file: self.file_name.to_string(),
            }),
        }
    }
}

impl<T: DeserializeOwned> Companion<Vec<T>> {
    /// Entry `index` of a per-frame array.
    pub fn get_at(&self, index: usize) -> Result<&T, PandasetError> {
        let values = self.get()?;
        values.get(index).ok_or(PandasetError::IndexOutOfRange {
            index,
            len: values.len(),
        })
    }

    /// Number of entries, available once loaded.
    pub fn len(&self) -> Result<usize, PandasetError> {
        self.get().map(Vec::len)
    }
}

/// A per-frame array stored as one JSON file, as in `meta/gps.json` and
/// `meta/timestamps.json`.
#[derive(Clone, Debug)]
pub struct MetaSeries<T> {
    kind: StreamKind,
    data: Companion<Vec<T>>,
}

impl<T: DeserializeOwned> MetaSeries<T> {
    pub fn discover(kind: StreamKind, directory: &Path, file_name: &'static str) -> Self {
        Self {
            kind,
            data: Companion::discover(kind.as_str(), directory, file_name),
        }
    }

    pub fn is_available(&self) -> bool {
        self.data.is_available()
    }

    /// All entries in frame order.
    pub fn values(&self) -> Result<&[T], PandasetError> {
        self.data.get().map(Vec::as_slice)
    }

    pub fn get_range(&self, start: usize, end: usize) -> Result<&[T], PandasetError> {
        let values = self.values()?;
        let len = values.len();
        if end > len {
            return Err(PandasetError::IndexOutOfRange { index: end, len });
        }
        if start > end {
            return Err(PandasetError::IndexOutOfRange { index: start, len });
        }
        Ok(&values[start..end])
    }
}

impl<T: DeserializeOwned> Stream for MetaSeries<T> {
    type Frame<'a>
        = &'a T
    where
        Self: 'a;

    fn kind(&self) -> StreamKind {
        self.kind
    }

    fn name(&self) -> &str {
        self.kind.as_str()
    }

    /// Entry count; zero until loaded since the file is a single document.
    fn frame_count(&self) -> usize {
        self.data.len().unwrap_or(0)
    }

    fn load(&mut self) -> Result<(), PandasetError> {
        self.data.load()?;
        tracing::debug!(stream = self.kind.as_str(), entries = self.frame_count(), "loaded meta");
        Ok(())
    }

    fn unload(&mut self) {
        self.data.unload();
    }

    fn is_loaded(&self) -> bool {
        self.data.is_loaded()
    }

    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError> {
        self.data.get_at(index)
    }
}
