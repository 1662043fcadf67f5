/// Storage-specific errors
use encore_core::EncoreError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key contains characters that cannot be mapped to a file name
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Error reported by a key-value facility
    #[error(transparent)]
    Facility(#[from] EncoreError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<StorageError> for EncoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Facility(inner) => inner,
            StorageError::Io(io) => EncoreError::Io(io),
            other => EncoreError::storage(other.to_string()),
        }
    }
}
