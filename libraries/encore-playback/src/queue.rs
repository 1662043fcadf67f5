//! Play queue
//!
//! Ordered tracks plus one current position. Navigation wraps in both
//! directions; there is no end-of-queue stop state.
//!
//! ```text
//! [A, B, C]   current = 2
//! next     -> current = 0 (A)
//! previous -> current = 2 (C)
//! ```

use crate::error::{PlaybackError, Result};
use encore_core::types::Track;

/// Play queue with wraparound navigation
///
/// Invariant: `current` is `Some(i)` with `i < tracks.len()` whenever the
/// queue is non-empty, and `None` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a single track
    pub fn set_single(&mut self, track: Track) {
        self.tracks = vec![track];
        self.current = Some(0);
    }

    /// Replace the queue wholesale, positioned at `index`
    ///
    /// Rejects an empty listing or an out-of-range index and leaves the
    /// existing queue untouched.
    pub fn replace(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::invalid_intent("cannot play from an empty queue"));
        }
        if index >= tracks.len() {
            return Err(PlaybackError::invalid_intent(format!(
                "index {} out of bounds for queue of {}",
                index,
                tracks.len()
            )));
        }

        self.tracks = tracks;
        self.current = Some(index);
        Ok(())
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Index `next` would move to
    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        self.current.map(|i| (i + 1) % len)
    }

    /// Index `previous` would move to
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        self.current.map(|i| if i == 0 { len - 1 } else { i - 1 })
    }

    /// Move to the next track, wrapping to the start
    pub fn advance(&mut self) -> Option<&Track> {
        self.current = Some(self.next_index()?);
        self.current()
    }

    /// Move to the previous track, wrapping to the end
    pub fn retreat(&mut self) -> Option<&Track> {
        self.current = Some(self.previous_index()?);
        self.current()
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
