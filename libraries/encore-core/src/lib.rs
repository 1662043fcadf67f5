//! Encore Core
//!
//! Platform-agnostic core types, traits, and error handling for Encore.
//!
//! This crate provides the building blocks shared by the storage and playback
//! crates and by every application shell (CLI, mobile bridge, tests).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `ArtistRef`, `AlbumRef`, `TrackId`
//! - **Facility Traits**: `AudioBackend`, `AudioResource`, `KeyValueStore`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{AlbumRef, ArtistRef, Track, TrackId};
//!
//! let track = Track::new(TrackId::new(3135556), "Harder, Better, Faster, Stronger", "https://cdn.example/preview.mp3")
//!     .with_artist(ArtistRef::new(27, "Daft Punk"))
//!     .with_album(AlbumRef::new(302127, "Discovery", "https://cdn.example/cover.jpg"));
//!
//! assert_eq!(track.id, TrackId::new(3135556));
//! assert_eq!(track.artist.name, "Daft Punk");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EncoreError, Result};
pub use traits::{AudioBackend, AudioResource, KeyValueStore, ResourceStatus, StatusCallback};
pub use types::{AlbumRef, ArtistRef, Track, TrackId};
