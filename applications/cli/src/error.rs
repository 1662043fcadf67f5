/// CLI error types
use encore_playback::PlaybackError;
use encore_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read catalog {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog {path:?}: {source}")]
    CatalogFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Track {0} not found in catalog")]
    TrackNotFound(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
