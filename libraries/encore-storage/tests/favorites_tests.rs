/// Favorites store tests
/// Covers startup recovery, persistence, and the toggle invariants
use encore_core::types::{AlbumRef, ArtistRef, Track, TrackId};
use encore_storage::{FavoritesStore, FileKeyValueStore, MemoryKeyValueStore, FAVORITES_KEY};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::sync::Arc;
use tempfile::TempDir;

fn create_test_track(id: u64) -> Track {
    Track::new(TrackId::new(id), format!("Track {id}"), format!("https://cdn.example/{id}.mp3"))
        .with_artist(ArtistRef::new(100 + id, "Test Artist"))
        .with_album(AlbumRef::new(200 + id, "Test Album", "https://cdn.example/cover.jpg"))
}

#[tokio::test]
async fn test_corrupted_blob_starts_empty() {
    let mem = MemoryKeyValueStore::new();
    mem.insert_raw(FAVORITES_KEY, "{not json at all");

    let favorites = FavoritesStore::load(Arc::new(mem), FAVORITES_KEY).await;
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_wrong_shape_blob_starts_empty() {
    let mem = MemoryKeyValueStore::new();
    mem.insert_raw(FAVORITES_KEY, r#"{"id": 1}"#);

    let favorites = FavoritesStore::load(Arc::new(mem), FAVORITES_KEY).await;
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_read_failure_starts_empty() {
    let mem = MemoryKeyValueStore::new();
    mem.fail_reads(true);

    let favorites = FavoritesStore::load(Arc::new(mem), FAVORITES_KEY).await;
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn test_write_failure_keeps_in_memory_change() {
    let mem = MemoryKeyValueStore::new();
    let mut favorites = FavoritesStore::load(Arc::new(mem.clone()), FAVORITES_KEY).await;

    mem.fail_writes(true);
    let outcome = favorites.toggle(&create_test_track(1)).await;

    assert!(outcome.is_favorite);
    assert!(!outcome.persisted());
    assert!(favorites.contains(TrackId::new(1)));
    assert_eq!(mem.raw(FAVORITES_KEY), None);

    // Next successful write carries the full set, including the earlier change
    mem.fail_writes(false);
    favorites.toggle(&create_test_track(2)).await;

    let reloaded = FavoritesStore::load(Arc::new(mem), FAVORITES_KEY).await;
    assert_eq!(reloaded.len(), 2);
}

#[tokio::test]
async fn test_favorites_survive_restart_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKeyValueStore::new(temp_dir.path());
    store.initialize().await.unwrap();

    {
        let mut favorites = FavoritesStore::load(Arc::new(store.clone()), FAVORITES_KEY).await;
        favorites.toggle(&create_test_track(10)).await;
        favorites.toggle(&create_test_track(11)).await;
        favorites.toggle(&create_test_track(12)).await;
        favorites.remove(TrackId::new(11)).await;
    }

    let favorites = FavoritesStore::load(Arc::new(store), FAVORITES_KEY).await;
    let ids: Vec<u64> = favorites.tracks().iter().map(|t| t.id.get()).collect();
    assert_eq!(ids, vec![10, 12]);
    assert_eq!(favorites.tracks()[0].album.title, "Test Album");
}

proptest! {
    /// Property: toggling the same track twice restores the original membership
    #[test]
    fn toggle_twice_is_identity(
        initial in prop::collection::hash_set(1u64..50, 0..20),
        target in 1u64..50
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let mut favorites =
                FavoritesStore::empty(Arc::new(MemoryKeyValueStore::new()), FAVORITES_KEY);
            for id in &initial {
                favorites.toggle(&create_test_track(*id)).await;
            }
            let before: Vec<u64> = favorites.tracks().iter().map(|t| t.id.get()).collect();

            favorites.toggle(&create_test_track(target)).await;
            favorites.toggle(&create_test_track(target)).await;

            let mut after: Vec<u64> = favorites.tracks().iter().map(|t| t.id.get()).collect();
            let mut expected = before;
            after.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(after, expected);
            Ok::<(), TestCaseError>(())
        })?;
    }

    /// Property: no sequence of toggles produces duplicate ids
    #[test]
    fn toggles_never_duplicate(ids in prop::collection::vec(1u64..10, 0..60)) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let mut favorites =
                FavoritesStore::empty(Arc::new(MemoryKeyValueStore::new()), FAVORITES_KEY);
            for id in ids {
                favorites.toggle(&create_test_track(id)).await;
            }
            let mut seen = std::collections::HashSet::new();
            for track in favorites.tracks() {
                prop_assert!(seen.insert(track.id), "duplicate id {}", track.id);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
