//! Lazily loaded, frame-aligned streams.
//!
//! Every stream resolves its *structure* (which files exist) when it is
//! discovered and decodes its *payload* only on an explicit [`Stream::load`].
//! [`Stream::unload`] drops the payload and keeps the structure, so a stream
//! can be loaded again with identical content.
//!
//! Frame order is the ascending lexicographic order of the backing file
//! names. The frame index is the alignment key across streams.
//!
//! # Streams
//!
//! - [`Lidar`] and [`Camera`]: sensor frames plus a pose track and timestamps
//! - [`Cuboids`] and [`SemanticSegmentation`]: per-frame annotations
//! - [`MetaSeries`]: per-frame GPS fixes and timestamps from `meta/`
//!
//! `load` and `unload` take `&mut self`, so a stream can never be loaded and
//! unloaded concurrently. Distinct streams share no state and may be loaded
//! from different threads.

mod annotations;
mod camera;
mod companion;
pub mod decoder;
mod lidar;
mod series;

use std::fmt;
use std::path::PathBuf;

pub use annotations::{Cuboids, SemanticSegmentation};
pub use camera::Camera;
pub use companion::{Companion, MetaSeries};
pub use decoder::FrameDecoder;
pub use lidar::Lidar;
pub use series::FrameSeries;

use crate::error::PandasetError;

/// Load state of a stream's payload.
///
/// "Missing on disk" and "not loaded yet" are different states and are never
/// encoded with the same value.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    /// Structure is known, payload has not been decoded.
    NotLoaded,
    /// The backing file or folder did not exist at discovery time.
    Unavailable(PathBuf),
    /// Payload is resident.
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LoadState::Unavailable(_))
    }

    /// Moves a loaded payload back to `NotLoaded`; other states are kept.
    pub(crate) fn release(&mut self) {
        if self.is_loaded() {
            *self = LoadState::NotLoaded;
        }
    }
}

/// The closed set of stream variants in a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Lidar,
    Camera,
    Cuboids,
    SemanticSegmentation,
    Gps,
    Timestamps,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Lidar => "lidar",
            StreamKind::Camera => "camera",
            StreamKind::Cuboids => "cuboids",
            StreamKind::SemanticSegmentation => "semseg",
            StreamKind::Gps => "gps",
            StreamKind::Timestamps => "timestamps",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities shared by every frame-indexed stream.
pub trait Stream {
    /// What [`Stream::get`] hands out for one frame.
    type Frame<'a>
    where
        Self: 'a;

    fn kind(&self) -> StreamKind;

    /// Name used in errors and logs, e.g. `front_camera`.
    fn name(&self) -> &str;

    /// Number of frames, known once structure is resolved.
    fn frame_count(&self) -> usize;

    /// Decodes the payload. On error the stream is left unloaded.
    fn load(&mut self) -> Result<(), PandasetError>;

    /// Drops the payload, keeping structure.
    fn unload(&mut self);

    fn is_loaded(&self) -> bool;

    /// Returns frame `index`.
    fn get(&self, index: usize) -> Result<Self::Frame<'_>, PandasetError>;
}

/// Loads `stream`, resetting it if any part fails.
pub(crate) fn load_all_or_reset<S: Stream>(
    stream: &mut S,
    load: impl FnOnce(&mut S) -> Result<(), PandasetError>,
) -> Result<(), PandasetError> {
    let result = load(stream);
    if let Err(err) = &result {
        tracing::warn!(stream = stream.name(), error = %err, "load failed, stream reset");
        stream.unload();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_only_touches_loaded_state() {
        let mut loaded = LoadState::Loaded(vec![1, 2, 3]);
        loaded.release();
        assert_eq!(loaded, LoadState::NotLoaded);

        let mut missing: LoadState<Vec<i32>> = LoadState::Unavailable(PathBuf::from("poses.json"));
        missing.release();
        assert!(missing.is_unavailable());
    }

    #[test]
    fn stream_kind_names() {
        assert_eq!(StreamKind::SemanticSegmentation.to_string(), "semseg");
        assert_eq!(StreamKind::Lidar.as_str(), "lidar");
    }
}
