use std::path::PathBuf;
use thiserror::Error;

use crate::model::WorkItemId;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("work item {id} not found")]
    NotFound { id: WorkItemId },

    #[error("failed to fetch work item {id}: {message}")]
    Transport { id: WorkItemId, message: String },

    #[error("failed to read records file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse records file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported records format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },
}

impl SourceError {
    pub fn not_found(id: WorkItemId) -> Self {
        Self::NotFound { id }
    }

    pub fn transport(id: WorkItemId, message: impl Into<String>) -> Self {
        Self::Transport {
            id,
            message: message.into(),
        }
    }

    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
