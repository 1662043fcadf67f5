/// Track catalog files
///
/// A catalog is a JSON array of tracks in the shape the catalog API returns
/// (`id`, `title`, `preview`, `artist`, `album`).
use crate::error::{CliError, Result};
use encore_core::types::{Track, TrackId};
use std::path::Path;

/// Read every track from a catalog file
pub async fn load(path: &Path) -> Result<Vec<Track>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

    let tracks: Vec<Track> =
        serde_json::from_str(&raw).map_err(|source| CliError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), count = tracks.len(), "Loaded catalog");
    Ok(tracks)
}

/// Look a track up by id
pub fn find(tracks: &[Track], id: u64) -> Result<&Track> {
    let id = TrackId::new(id);
    tracks
        .iter()
        .find(|t| t.id == id)
        .ok_or(CliError::TrackNotFound(id.get()))
}
