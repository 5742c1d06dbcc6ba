use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Unable to encode cache key: {0}")]
    KeyEncoding(#[from] serde_json::Error),

    #[error("File permissions error on {path}: {reason}")]
    FilePermissions { path: PathBuf, reason: String },

    #[error("Cache version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Cache entry holds {found}, read as {expected}")]
    TypeMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CacheError {
    pub(crate) fn permissions(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CacheError::FilePermissions {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
