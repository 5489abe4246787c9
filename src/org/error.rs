//! Error types
//!
//! Classification itself never fails: anything unrecognised becomes text. The only fatal input
//! condition is a line that is not valid UTF-8. The remaining variants cover misuse of the
//! scanner, the producer task and the loading/formatting collaborators.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A line contained a byte sequence that is not UTF-8. `column` is the byte offset of the
    /// first offending byte within the line.
    #[error("invalid UTF-8 at {line}:{column}")]
    InvalidEncoding { line: usize, column: usize },

    #[error("scanner already finished; call reset() before feeding more input")]
    Finished,

    #[error("scan producer task failed: {0}")]
    ProducerFailed(String),
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}' (expected one of: text, json, yaml)")]
    Unknown(String),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
