/// Subcommand implementations
use crate::catalog;
use crate::config::AppConfig;
use crate::error::Result;
use encore_core::types::{Track, TrackId};
use encore_playback::{PlayRequest, PlayerController, PlayerEvent, SimulatedBackend};
use encore_storage::{FavoritesStore, FileKeyValueStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

async fn open_store(config: &AppConfig) -> Result<FileKeyValueStore> {
    let store = FileKeyValueStore::new(&config.storage.data_dir);
    store.initialize().await?;
    Ok(store)
}

async fn open_favorites(config: &AppConfig) -> Result<FavoritesStore> {
    let store = open_store(config).await?;
    Ok(FavoritesStore::load(Arc::new(store), config.player.favorites_key.clone()).await)
}

/// Play a catalog from `index` for `seconds`, then shut the player down
pub async fn play(config: &AppConfig, catalog_path: &Path, index: usize, seconds: u64) -> Result<()> {
    let tracks = catalog::load(catalog_path).await?;
    let store = open_store(config).await?;

    let player = PlayerController::spawn(
        Arc::new(SimulatedBackend::new()),
        Arc::new(store),
        config.player.clone(),
    )
    .await;

    let mut events = player.subscribe();
    let logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event log fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(tracks = tracks.len(), index, seconds, "Starting playback");
    player.play(PlayRequest::InQueue { tracks, index }).await?;

    tokio::select! {
        () = tokio::time::sleep(Duration::from_secs(seconds)) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Interrupted");
        }
    }

    let snapshot = player.snapshot();
    player.shutdown().await?;
    // Logger drains what is left once the last sender is gone
    drop(player);
    if let Err(e) = logger.await {
        tracing::warn!(error = %e, "Event logger failed");
    }

    if let Some(track) = snapshot.current_track {
        println!(
            "Stopped at {} ({}/{} ms)",
            describe(&track),
            snapshot.position_ms,
            snapshot.duration_ms
        );
    }
    Ok(())
}

/// Print every favorite in insertion order
pub async fn favorites_list(config: &AppConfig) -> Result<()> {
    let favorites = open_favorites(config).await?;

    if favorites.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }

    println!("Favorites:");
    for track in favorites.tracks() {
        println!("  {} - {}", track.id, describe(track));
    }
    Ok(())
}

/// Toggle the catalog track with `id`
pub async fn favorites_toggle(config: &AppConfig, catalog_path: &Path, id: u64) -> Result<()> {
    let tracks = catalog::load(catalog_path).await?;
    let track = catalog::find(&tracks, id)?;
    let mut favorites = open_favorites(config).await?;

    let outcome = favorites.toggle(track).await;
    if let Some(e) = outcome.persist_error {
        return Err(e.into());
    }

    if outcome.is_favorite {
        println!("Added {} to favorites", describe(track));
    } else {
        println!("Removed {} from favorites", describe(track));
    }
    Ok(())
}

/// Remove a favorite by id
pub async fn favorites_remove(config: &AppConfig, id: u64) -> Result<()> {
    let mut favorites = open_favorites(config).await?;

    match favorites.remove(TrackId::new(id)).await {
        Some(outcome) => {
            if let Some(e) = outcome.persist_error {
                return Err(e.into());
            }
            println!("Removed {id} from favorites");
        }
        None => println!("Track {id} is not a favorite"),
    }
    Ok(())
}

fn describe(track: &Track) -> String {
    if track.artist.name.is_empty() {
        track.title.clone()
    } else {
        format!("{} by {}", track.title, track.artist.name)
    }
}

fn log_event(event: &PlayerEvent) {
    match event {
        PlayerEvent::TrackChanged { track, index, .. } => {
            tracing::info!(index, "Now playing {}", describe(track));
        }
        PlayerEvent::StateChanged { state } => tracing::debug!(?state, "State changed"),
        PlayerEvent::PositionUpdate {
            position_ms,
            duration_ms,
        } => tracing::trace!(position_ms, ?duration_ms, "Position"),
        PlayerEvent::TrackFinished { track_id } => tracing::debug!(%track_id, "Track finished"),
        PlayerEvent::QueueChanged { length, index } => {
            tracing::debug!(length, ?index, "Queue replaced");
        }
        PlayerEvent::FavoritesChanged {
            track_id,
            is_favorite,
            count,
        } => tracing::info!(%track_id, is_favorite, count, "Favorites changed"),
        PlayerEvent::Error { kind, message } => tracing::error!(?kind, "{}", message),
    }
}
