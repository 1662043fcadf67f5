/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `EncoreError`
pub type Result<T> = std::result::Result<T, EncoreError>;

/// Core error type for Encore
#[derive(Error, Debug)]
pub enum EncoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Audio facility errors (load, play, pause, seek, unload)
    #[error("Audio error: {0}")]
    Audio(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl EncoreError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_constructors_format_messages() {
        assert_eq!(
            EncoreError::audio("codec missing").to_string(),
            "Audio error: codec missing"
        );
        assert_eq!(
            EncoreError::storage("disk full").to_string(),
            "Storage error: disk full"
        );
    }

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let encore: EncoreError = err.into();
        assert!(matches!(encore, EncoreError::Serialization(_)));
    }
}
