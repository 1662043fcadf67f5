//! Error types for playback management

use crate::events::ErrorKind;
use encore_core::{EncoreError, TrackId};
use encore_storage::StorageError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Audio resource failed to load or start
    #[error("Failed to load track {track_id}: {source}")]
    ResourceAcquisition {
        track_id: TrackId,
        source: EncoreError,
    },

    /// Resource reported an error mid-playback
    #[error("Playback failed: {0}")]
    ResourcePlayback(String),

    /// Favorites could not be written
    #[error("Failed to persist favorites: {0}")]
    Persistence(#[from] StorageError),

    /// Intent cannot be carried out in the current state
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    /// A newer load started before this one completed
    #[error("Load superseded by a newer request")]
    Superseded,

    /// The player task has shut down
    #[error("Player has shut down")]
    PlayerClosed,
}

impl PlaybackError {
    pub fn invalid_intent(msg: impl Into<String>) -> Self {
        Self::InvalidIntent(msg.into())
    }

    /// Taxonomy bucket reported on the event channel
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ResourceAcquisition { .. } | Self::Superseded => ErrorKind::ResourceAcquisition,
            Self::ResourcePlayback(_) | Self::PlayerClosed => ErrorKind::ResourcePlayback,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::InvalidIntent(_) => ErrorKind::InvalidIntent,
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
