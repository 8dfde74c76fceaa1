use std::path::PathBuf;
use thiserror::Error;

/// The main error type for pandaset operations.
#[derive(Debug, Error)]
pub enum PandasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{stream} is not loaded; call load() first")]
    NotLoaded { stream: String },

    #[error("{stream} is unavailable: {} does not exist", path.display())]
    Unavailable { stream: String, path: PathBuf },

    #[error("{stream} has no companion file '{file}'")]
    MissingCompanionFile { stream: String, file: String },

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write report: {source}")]
    ReportWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse table {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Invalid dataset layout at {path}: {message}")]
    LayoutInvalid { path: PathBuf, message: String },

    #[error("Frame index {index} out of range for {len} frame(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown sequence '{0}'")]
    UnknownSequence(String),

    #[error("{stream} has {found} frame(s), expected {expected}")]
    MisalignedFrameCount {
        stream: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid sensor id {0} (expected -1, 0 or 1)")]
    InvalidSensorId(i64),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
    },
}

impl PandasetError {
    /// Returns true for errors raised while decoding a file's contents.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            PandasetError::JsonParse { .. }
                | PandasetError::CsvParse { .. }
                | PandasetError::ImageDecode { .. }
                | PandasetError::ImageDimensionRead { .. }
        )
    }
}
