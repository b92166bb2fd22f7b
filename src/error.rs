//! Errors raised by the I/O shell around the merge engine.
//!
//! The engine itself never fails; these cover reading OCR responses and
//! configuration files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrLinesError {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed OCR response JSON")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize configuration")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The text-detection service answered with an error object.
    #[error("text detection failed with code {code}: {message}")]
    Service { code: i64, message: String },

    /// The response document holds fewer entries than the requested index.
    #[error("response index {index} out of range ({available} responses)")]
    NoResponse { index: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, OcrLinesError>;

impl OcrLinesError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
