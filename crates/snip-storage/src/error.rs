use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("log i/o failed: {0}")]
    Io(String),
    #[error("record serialization failed: {0}")]
    Serialization(String),
    #[error("malformed log entry at line {line}: {reason}")]
    Decode { line: usize, reason: String },
    #[error("log is closed")]
    Closed,
    #[error("log ends in an incomplete entry, replay it before appending")]
    NeedsRepair,
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
