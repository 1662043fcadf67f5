//! Encore Storage
//!
//! Durable storage for Encore.
//!
//! This crate provides:
//! - `FileKeyValueStore`: one JSON blob per key under a data directory
//! - `MemoryKeyValueStore`: process-local store for tests and ephemeral runs
//! - `FavoritesStore`: the user's favorited tracks, persisted in full on every change
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::types::{Track, TrackId};
//! use encore_storage::{FavoritesStore, FileKeyValueStore, FAVORITES_KEY};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileKeyValueStore::new("./data");
//! store.initialize().await?;
//!
//! let mut favorites = FavoritesStore::load(Arc::new(store), FAVORITES_KEY).await;
//! let track = Track::new(TrackId::new(1), "Song", "https://cdn.example/1.mp3");
//!
//! let outcome = favorites.toggle(&track).await;
//! assert!(outcome.is_favorite);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod favorites;
pub mod file;
pub mod memory;

pub use error::{Result, StorageError};
pub use favorites::{FavoritesStore, ToggleOutcome, FAVORITES_KEY};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
