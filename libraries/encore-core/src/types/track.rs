/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Artist reference embedded in a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Catalog artist identifier
    pub id: u64,

    /// Artist display name
    pub name: String,
}

impl ArtistRef {
    /// Create a new artist reference
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Album reference embedded in a track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Catalog album identifier
    pub id: u64,

    /// Album title
    pub title: String,

    /// Cover image URI
    pub cover: String,
}

impl AlbumRef {
    /// Create a new album reference
    pub fn new(id: u64, title: impl Into<String>, cover: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover: cover.into(),
        }
    }
}

/// Playable catalog item
///
/// Immutable once fetched. Field names follow the catalog JSON payload so
/// search results and persisted favorites deserialize without a mapping layer;
/// unknown catalog fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// URI of the 30-second preview audio
    pub preview: String,

    /// Performing artist
    #[serde(default)]
    pub artist: ArtistRef,

    /// Album the track belongs to
    #[serde(default)]
    pub album: AlbumRef,
}

impl Track {
    /// Create a new track with empty artist and album references
    pub fn new(id: TrackId, title: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            preview: preview.into(),
            artist: ArtistRef::default(),
            album: AlbumRef::default(),
        }
    }

    /// Set the artist reference
    #[must_use]
    pub fn with_artist(mut self, artist: ArtistRef) -> Self {
        self.artist = artist;
        self
    }

    /// Set the album reference
    #[must_use]
    pub fn with_album(mut self, album: AlbumRef) -> Self {
        self.album = album;
        self
    }

    /// Identity comparison (by id only)
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_payload() {
        let json = r#"{
            "id": 3135556,
            "readable": true,
            "title": "Harder, Better, Faster, Stronger",
            "duration": 224,
            "preview": "https://cdn.example/preview.mp3",
            "artist": { "id": 27, "name": "Daft Punk", "type": "artist" },
            "album": { "id": 302127, "title": "Discovery", "cover": "https://cdn.example/cover.jpg" }
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, TrackId::new(3135556));
        assert_eq!(track.artist.name, "Daft Punk");
        assert_eq!(track.album.title, "Discovery");
        assert_eq!(track.preview, "https://cdn.example/preview.mp3");
    }

    #[test]
    fn identity_ignores_metadata() {
        let a = Track::new(TrackId::new(1), "Original", "https://a");
        let b = Track::new(TrackId::new(1), "Remaster", "https://b");
        let c = Track::new(TrackId::new(2), "Original", "https://a");

        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn missing_artist_and_album_default() {
        let track: Track =
            serde_json::from_str(r#"{"id": 5, "title": "Bare", "preview": "https://p"}"#).unwrap();
        assert_eq!(track.artist, ArtistRef::default());
        assert_eq!(track.album, AlbumRef::default());
    }
}
