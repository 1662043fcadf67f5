//! Core types for playback management

use encore_core::types::Track;
use encore_storage::FAVORITES_KEY;
use serde::{Deserialize, Serialize};

/// What the user asked to play
///
/// A standalone track gets a one-track queue. A track picked from a listing
/// replaces the queue with that listing; the slot at `index` is what plays.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayRequest {
    /// Play a single track with no surrounding context
    Single(Track),

    /// Play the track at `index` within `tracks`
    InQueue { tracks: Vec<Track>, index: usize },
}

impl PlayRequest {
    /// Map the optional-parameter call shape used by list screens
    ///
    /// A non-empty `queue` becomes `InQueue` (index defaults to 0); anything
    /// else becomes `Single(track)`.
    pub fn from_context(track: Track, queue: Option<Vec<Track>>, index: Option<usize>) -> Self {
        match queue {
            Some(tracks) if !tracks.is_empty() => Self::InQueue {
                tracks,
                index: index.unwrap_or(0),
            },
            _ => Self::Single(track),
        }
    }
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No active track
    Idle,

    /// Acquiring an audio resource
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Configuration for the player controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Storage key holding the favorites blob (default: "favoriteTracks")
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// Pending intents before callers wait for room (default: 32)
    #[serde(default = "default_command_buffer")]
    pub command_buffer: usize,

    /// Events a slow subscriber may fall behind before it lags (default: 64)
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_favorites_key() -> String {
    FAVORITES_KEY.to_string()
}

fn default_command_buffer() -> usize {
    32
}

fn default_event_buffer() -> usize {
    64
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            favorites_key: default_favorites_key(),
            command_buffer: default_command_buffer(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// Read-only view of the player, published after every transition
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub state: PlaybackState,
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub queue_len: usize,
    pub current_index: Option<usize>,
    pub favorites: Vec<Track>,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            current_track: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: 0,
            queue_len: 0,
            current_index: None,
            favorites: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::TrackId;

    fn track(id: u64) -> Track {
        Track::new(TrackId::new(id), format!("Track {id}"), format!("https://cdn/{id}.mp3"))
    }

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.favorites_key, "favoriteTracks");
        assert_eq!(config.command_buffer, 32);
        assert_eq!(config.event_buffer, 64);
    }

    #[test]
    fn from_context_with_queue() {
        let request = PlayRequest::from_context(track(2), Some(vec![track(1), track(2)]), Some(1));
        assert_eq!(
            request,
            PlayRequest::InQueue {
                tracks: vec![track(1), track(2)],
                index: 1
            }
        );
    }

    #[test]
    fn from_context_defaults_index_to_zero() {
        let request = PlayRequest::from_context(track(1), Some(vec![track(1), track(2)]), None);
        assert!(matches!(request, PlayRequest::InQueue { index: 0, .. }));
    }

    #[test]
    fn from_context_without_queue_is_single() {
        assert_eq!(
            PlayRequest::from_context(track(7), None, Some(3)),
            PlayRequest::Single(track(7))
        );
        assert_eq!(
            PlayRequest::from_context(track(7), Some(vec![]), Some(3)),
            PlayRequest::Single(track(7))
        );
    }
}
