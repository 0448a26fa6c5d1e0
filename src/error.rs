// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: not a number: {text:?}")]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("sample buffer has {found} values, expected {expected} (num_times * nbox^2)")]
    SizeMismatch { expected: usize, found: usize },

    #[error("no slice times found in {path}")]
    EmptyTimes { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("frame index {index} out of range ({count} frames)")]
    FrameIndex { index: usize, count: usize },

    #[error("plotting error: {0}")]
    Plot(String),

    #[error("video encoding failed: {0}")]
    Encoder(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SliceError>;

impl SliceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SliceError::Io {
            path: path.into(),
            source,
        }
    }
}
