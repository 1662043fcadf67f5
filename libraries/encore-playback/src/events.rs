//! Player Events
//!
//! Event-based communication for UI synchronization.
//! Every event is emitted from the controller task, so subscribers see them in
//! the order the transitions were applied. Status updates from a superseded
//! audio resource never produce events.

use crate::types::PlaybackState;
use encore_core::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback state changed (idle, loading, playing, paused)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track became the active one
    TrackChanged {
        /// The new (current) track
        track: Track,
        /// Its position in the queue
        index: usize,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position/duration reported by the active resource
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, once known
        duration_ms: Option<u64>,
    },

    /// Active track reached its natural end
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
        /// Current index
        index: Option<usize>,
    },

    /// A track was added to or removed from favorites
    FavoritesChanged {
        /// Affected track
        track_id: TrackId,
        /// Membership after the change
        is_favorite: bool,
        /// Favorites count after the change
        count: usize,
    },

    /// Error recovered inside the player
    Error {
        /// Taxonomy bucket
        kind: ErrorKind,
        /// Error message
        message: String,
    },
}

/// Error taxonomy reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Audio resource failed to load or start
    ResourceAcquisition,
    /// Resource failed mid-playback
    ResourcePlayback,
    /// Storage read or write failed
    Persistence,
    /// Intent rejected
    InvalidIntent,
}
