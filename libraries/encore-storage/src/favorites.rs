//! Favorites store
//!
//! Owns the set of favorited tracks. The whole set is serialized and written
//! under a single key after every mutation (last write wins). The in-memory
//! set is the source of truth for the running session: a failed write is
//! reported but never rolls the mutation back.

use crate::error::StorageError;
use encore_core::types::{Track, TrackId};
use encore_core::KeyValueStore;
use std::collections::HashSet;
use std::sync::Arc;

/// Default storage key for the favorites blob
pub const FAVORITES_KEY: &str = "favoriteTracks";

/// Result of a favorites mutation
#[derive(Debug)]
pub struct ToggleOutcome {
    /// Whether the track is a favorite after the mutation
    pub is_favorite: bool,

    /// Set when the mutation could not be written to storage
    pub persist_error: Option<StorageError>,
}

impl ToggleOutcome {
    pub fn persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// Favorited tracks, keyed by id, kept in insertion order
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    tracks: Vec<Track>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("key", &self.key)
            .field("tracks", &self.tracks.len())
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Create an empty store without reading storage
    pub fn empty(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            tracks: Vec::new(),
        }
    }

    /// Load the persisted set
    ///
    /// Never fails: a missing blob, a read error, or a blob that does not
    /// deserialize all start from an empty set.
    pub async fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut favorites = Self::empty(store, key);

        let blob = match favorites.store.get(&favorites.key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!(key = %favorites.key, "No persisted favorites, starting empty");
                return favorites;
            }
            Err(e) => {
                tracing::warn!(key = %favorites.key, error = %e, "Failed to read favorites, starting empty");
                return favorites;
            }
        };

        match serde_json::from_str::<Vec<Track>>(&blob) {
            Ok(tracks) => {
                let mut seen = HashSet::new();
                favorites.tracks = tracks
                    .into_iter()
                    .filter(|t| seen.insert(t.id))
                    .collect();
                tracing::info!(count = favorites.tracks.len(), "Loaded favorites");
            }
            Err(e) => {
                tracing::warn!(key = %favorites.key, error = %e, "Corrupted favorites blob, starting empty");
            }
        }

        favorites
    }

    /// Favorited tracks in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Membership test by id
    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Membership test for a track (by id)
    pub fn is_favorite(&self, track: &Track) -> bool {
        self.contains(track.id)
    }

    /// Add the track if absent, remove it if present, then persist
    pub async fn toggle(&mut self, track: &Track) -> ToggleOutcome {
        let is_favorite = if let Some(pos) = self.position(track.id) {
            self.tracks.remove(pos);
            false
        } else {
            self.tracks.push(track.clone());
            true
        };

        tracing::debug!(track_id = %track.id, is_favorite, "Toggled favorite");
        ToggleOutcome {
            is_favorite,
            persist_error: self.persist().await.err(),
        }
    }

    /// Remove by id, then persist
    ///
    /// Returns `None` (and writes nothing) when the id is not a favorite.
    pub async fn remove(&mut self, id: TrackId) -> Option<ToggleOutcome> {
        let pos = self.position(id)?;
        self.tracks.remove(pos);

        tracing::debug!(track_id = %id, "Removed favorite");
        Some(ToggleOutcome {
            is_favorite: false,
            persist_error: self.persist().await.err(),
        })
    }

    /// Write the full set under the store key
    pub async fn persist(&self) -> crate::Result<()> {
        let blob = serde_json::to_string(&self.tracks)?;
        if let Err(e) = self.store.set(&self.key, &blob).await {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist favorites");
            return Err(e.into());
        }
        Ok(())
    }

    fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }
}
