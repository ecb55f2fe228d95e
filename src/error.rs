//! Error types

use crate::document::RawContentError;
use thiserror::Error;

/// Failures talking to a key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available: {0}")]
    Unavailable(String),
    #[error("failed to read {key:?}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key:?}: {reason}")]
    Write { key: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Top-level error for editor operations
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored content is not a valid document: {0}")]
    Raw(#[from] RawContentError),
    #[error("invalid editor config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
