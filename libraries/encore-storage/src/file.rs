//! File-backed key-value store
//!
//! Each key maps to `<root>/<key>.json`. Writes land in a sibling temp file,
//! are synced to disk, and are renamed into place, so readers see either the
//! old blob or the new one.

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use encore_core::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// `KeyValueStore` persisting one JSON file per key
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the data directory
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, &path).await?;
        tracing::trace!(key, bytes = value.len(), "Wrote storage blob");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> encore_core::Result<Option<String>> {
        Ok(self.read(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> encore_core::Result<()> {
        Ok(self.write(key, value).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_keys() {
        let store = FileKeyValueStore::new("/tmp/encore");
        assert!(store.path_for("favoriteTracks").is_ok());
        assert!(store.path_for("ui.theme").is_ok());

        for bad in ["", "../escape", "a/b", ".hidden", "spa ce"] {
            assert!(
                matches!(store.path_for(bad), Err(StorageError::InvalidKey(_))),
                "key {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn key_maps_to_json_file() {
        let store = FileKeyValueStore::new("/data");
        assert_eq!(
            store.path_for("favoriteTracks").unwrap(),
            PathBuf::from("/data/favoriteTracks.json")
        );
    }
}
