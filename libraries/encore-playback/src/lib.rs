//! Encore - Playback Management
//!
//! Platform-agnostic playback orchestration for Encore.
//!
//! This crate provides:
//! - Play queue with wraparound next/previous
//! - Single-resource playback sessions (release before acquire, stale-load guard)
//! - Auto-advance when the active track finishes
//! - Favorites toggling, persisted in full on every change
//! - Ordered event stream and snapshot accessors for UI shells
//!
//! # Architecture
//!
//! `encore-playback` never decodes audio. Platform code supplies an
//! [`AudioBackend`](encore_core::AudioBackend) and a
//! [`KeyValueStore`](encore_core::KeyValueStore); the player decides which
//! resource is loaded and when transitions happen.
//!
//! All state lives in one controller task. Callers hold a cloneable
//! [`PlayerHandle`]; intents are queued and applied strictly one at a time, so
//! rapid repeated taps never leave two resources loaded.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::types::{Track, TrackId};
//! use encore_playback::{PlayRequest, PlayerConfig, PlayerController, SimulatedBackend};
//! use encore_storage::MemoryKeyValueStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> encore_playback::Result<()> {
//! let player = PlayerController::spawn(
//!     Arc::new(SimulatedBackend::new()),
//!     Arc::new(MemoryKeyValueStore::new()),
//!     PlayerConfig::default(),
//! )
//! .await;
//!
//! let tracks = vec![
//!     Track::new(TrackId::new(1), "One", "https://cdn.example/1.mp3"),
//!     Track::new(TrackId::new(2), "Two", "https://cdn.example/2.mp3"),
//! ];
//! player.play(PlayRequest::InQueue { tracks, index: 0 }).await?;
//! player.play_next().await?;
//! player.toggle_favorite(None).await?;
//!
//! assert_eq!(player.current_track().map(|t| t.id), Some(TrackId::new(2)));
//! player.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
pub mod events;
mod queue;
pub mod session;
pub mod simulated;
pub mod types;

// Public exports
pub use controller::{PlayerController, PlayerHandle};
pub use error::{PlaybackError, Result};
pub use events::{ErrorKind, PlayerEvent};
pub use queue::Queue;
pub use session::{LoadTicket, SessionId, SessionManager, StatusOutcome};
pub use simulated::SimulatedBackend;
pub use types::{PlayRequest, PlaybackState, PlayerConfig, PlayerSnapshot};
