//! Player controller
//!
//! A single tokio task owns the queue, the playback session, and the
//! favorites store. Intents arrive over an mpsc channel and are applied one at
//! a time, so no two resource-mutating sections can interleave. Resource
//! status updates arrive on a second channel tagged with their session.

use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::queue::Queue;
use crate::session::{SessionId, SessionManager, StatusOutcome, TaggedStatus};
use crate::types::{PlayRequest, PlaybackState, PlayerConfig, PlayerSnapshot};
use encore_core::types::{Track, TrackId};
use encore_core::{AudioBackend, KeyValueStore, ResourceStatus};
use encore_storage::{FavoritesStore, ToggleOutcome};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

type Reply<T> = oneshot::Sender<Result<T>>;

enum Command {
    Play {
        request: PlayRequest,
        reply: Reply<()>,
    },
    TogglePlayPause {
        reply: Reply<()>,
    },
    Next {
        reply: Reply<()>,
    },
    Previous {
        reply: Reply<()>,
    },
    Seek {
        position_ms: u64,
        reply: Reply<()>,
    },
    ToggleFavorite {
        track: Option<Track>,
        reply: Reply<bool>,
    },
    RemoveFavorite {
        id: TrackId,
        reply: Reply<bool>,
    },
    Shutdown {
        reply: Reply<()>,
    },
}

/// Actor owning all playback state
pub struct PlayerController {
    queue: Queue,
    session: SessionManager,
    favorites: FavoritesStore,
    state: PlaybackState,
    commands: mpsc::Receiver<Command>,
    statuses: mpsc::UnboundedReceiver<TaggedStatus>,
    events: broadcast::Sender<PlayerEvent>,
    snapshot: watch::Sender<PlayerSnapshot>,
}

impl PlayerController {
    /// Load favorites, start the controller task, and return its handle
    ///
    /// Must be called from within a tokio runtime.
    pub async fn spawn(
        backend: Arc<dyn AudioBackend>,
        store: Arc<dyn KeyValueStore>,
        config: PlayerConfig,
    ) -> PlayerHandle {
        let favorites = FavoritesStore::load(store, config.favorites_key.clone()).await;

        let (command_tx, commands) = mpsc::channel(config.command_buffer.max(1));
        let (status_tx, statuses) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        let (snapshot, snapshot_rx) = watch::channel(PlayerSnapshot {
            favorites: favorites.tracks().to_vec(),
            ..PlayerSnapshot::default()
        });

        let controller = Self {
            queue: Queue::new(),
            session: SessionManager::new(backend, status_tx),
            favorites,
            state: PlaybackState::Idle,
            commands,
            statuses,
            events: events.clone(),
            snapshot,
        };
        tokio::spawn(controller.run());

        PlayerHandle {
            commands: command_tx,
            events,
            snapshot: snapshot_rx,
        }
    }

    async fn run(mut self) {
        tracing::debug!("Player controller started");

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("All player handles dropped");
                        break;
                    };
                    if self.handle_command(command).await.is_break() {
                        return;
                    }
                }
                Some((id, status)) = self.statuses.recv() => {
                    self.handle_status(id, status).await;
                }
            }
        }

        self.teardown().await;
    }

    async fn handle_command(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Play { request, reply } => {
                let result = self.play(request).await;
                self.reply(reply, result);
            }
            Command::TogglePlayPause { reply } => {
                self.toggle_play_pause().await;
                self.reply(reply, Ok(()));
            }
            Command::Next { reply } => {
                self.skip(true).await;
                self.reply(reply, Ok(()));
            }
            Command::Previous { reply } => {
                self.skip(false).await;
                self.reply(reply, Ok(()));
            }
            Command::Seek { position_ms, reply } => {
                self.seek(position_ms).await;
                self.reply(reply, Ok(()));
            }
            Command::ToggleFavorite { track, reply } => {
                let result = self.toggle_favorite(track).await;
                self.reply(reply, result);
            }
            Command::RemoveFavorite { id, reply } => {
                let result = self.remove_favorite(id).await;
                self.reply(reply, Ok(result));
            }
            Command::Shutdown { reply } => {
                self.teardown().await;
                self.reply(reply, Ok(()));
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Publish the snapshot, then answer the caller
    fn reply<T>(&self, reply: Reply<T>, result: Result<T>) {
        self.publish();
        // Caller may have given up waiting
        let _ = reply.send(result);
    }

    async fn play(&mut self, request: PlayRequest) -> Result<()> {
        match request {
            PlayRequest::Single(track) => self.queue.set_single(track),
            PlayRequest::InQueue { tracks, index } => self.queue.replace(tracks, index)?,
        }

        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
            index: self.queue.current_index(),
        });
        self.load_current().await;
        Ok(())
    }

    async fn skip(&mut self, forward: bool) {
        let moved = if forward {
            self.queue.advance().is_some()
        } else {
            self.queue.retreat().is_some()
        };
        if !moved {
            tracing::debug!("Queue empty, ignoring skip");
            return;
        }
        self.load_current().await;
    }

    /// Load whatever track sits at the queue's current index
    async fn load_current(&mut self) {
        let (Some(track), Some(index)) = (self.queue.current().cloned(), self.queue.current_index())
        else {
            return;
        };
        let previous_track_id = self.session.track().map(|t| t.id);

        self.set_state(PlaybackState::Loading);
        match self.session.load(&track).await {
            Ok(_) => {
                self.emit(PlayerEvent::TrackChanged {
                    track,
                    index,
                    previous_track_id,
                });
                self.set_state(PlaybackState::Playing);
            }
            Err(PlaybackError::Superseded) => {}
            Err(e) => {
                tracing::error!(track_id = %track.id, error = %e, "Failed to start track");
                self.report(&e);
                self.set_state(PlaybackState::Idle);
            }
        }
    }

    async fn toggle_play_pause(&mut self) {
        let result = if self.session.is_playing() {
            self.session.pause().await.map(|held| (held, PlaybackState::Paused))
        } else {
            self.session.resume().await.map(|held| (held, PlaybackState::Playing))
        };

        match result {
            Ok((true, state)) => self.set_state(state),
            Ok((false, _)) => tracing::debug!("No active session, ignoring play/pause"),
            Err(e) => self.fail_session(e).await,
        }
    }

    async fn seek(&mut self, position_ms: u64) {
        match self.session.seek(position_ms).await {
            Ok(true) => self.emit(PlayerEvent::PositionUpdate {
                position_ms,
                duration_ms: self.session.duration_ms(),
            }),
            Ok(false) => tracing::debug!("No active session, ignoring seek"),
            Err(e) => self.fail_session(e).await,
        }
    }

    async fn toggle_favorite(&mut self, track: Option<Track>) -> Result<bool> {
        let track = track
            .or_else(|| self.session.track().cloned())
            .ok_or_else(|| PlaybackError::invalid_intent("no track to favorite"))?;

        let outcome = self.favorites.toggle(&track).await;
        Ok(self.favorites_changed(track.id, outcome))
    }

    async fn remove_favorite(&mut self, id: TrackId) -> bool {
        match self.favorites.remove(id).await {
            Some(outcome) => {
                self.favorites_changed(id, outcome);
                true
            }
            None => false,
        }
    }

    fn favorites_changed(&self, track_id: TrackId, outcome: ToggleOutcome) -> bool {
        self.emit(PlayerEvent::FavoritesChanged {
            track_id,
            is_favorite: outcome.is_favorite,
            count: self.favorites.len(),
        });
        if let Some(e) = outcome.persist_error {
            self.report(&PlaybackError::Persistence(e));
        }
        outcome.is_favorite
    }

    async fn handle_status(&mut self, id: SessionId, status: ResourceStatus) {
        match self.session.apply_status(id, &status) {
            StatusOutcome::Stale => return,
            StatusOutcome::Progress {
                position_ms,
                duration_ms,
            } => self.emit(PlayerEvent::PositionUpdate {
                position_ms,
                duration_ms,
            }),
            StatusOutcome::Finished => {
                if let Some(track) = self.session.track() {
                    tracing::debug!(track_id = %track.id, "Track finished, advancing");
                    let track_id = track.id;
                    self.emit(PlayerEvent::TrackFinished { track_id });
                }
                self.skip(true).await;
            }
            StatusOutcome::Failed(message) => {
                self.fail_session(PlaybackError::ResourcePlayback(message)).await;
            }
        }
        self.publish();
    }

    /// Drop the active session after a resource error
    async fn fail_session(&mut self, error: PlaybackError) {
        tracing::error!(error = %error, "Playback failed, stopping");
        self.session.release().await;
        self.report(&error);
        self.set_state(PlaybackState::Idle);
    }

    async fn teardown(&mut self) {
        if self.session.release().await {
            tracing::info!("Released audio resource on shutdown");
        }
        self.set_state(PlaybackState::Idle);
        self.publish();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn report(&self, error: &PlaybackError) {
        self.emit(PlayerEvent::Error {
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    fn emit(&self, event: PlayerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn publish(&self) {
        self.snapshot.send_replace(PlayerSnapshot {
            state: self.state,
            current_track: self.session.track().cloned(),
            is_playing: self.session.is_playing(),
            position_ms: self.session.position_ms(),
            duration_ms: self.session.duration_ms().unwrap_or(0),
            queue_len: self.queue.len(),
            current_index: self.queue.current_index(),
            favorites: self.favorites.tracks().to_vec(),
        });
    }
}

/// Cloneable handle to a running player
///
/// Intents wait until the controller has applied them. Accessors read the
/// latest published snapshot and never wait.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<PlayerEvent>,
    snapshot: watch::Receiver<PlayerSnapshot>,
}

impl PlayerHandle {
    /// Replace the queue and start playing
    ///
    /// # Errors
    /// `InvalidIntent` for an empty queue or out-of-range index
    pub async fn play(&self, request: PlayRequest) -> Result<()> {
        self.request(|reply| Command::Play { request, reply }).await
    }

    /// Pause when playing, resume when paused; no-op without a session
    pub async fn toggle_play_pause(&self) -> Result<()> {
        self.request(|reply| Command::TogglePlayPause { reply }).await
    }

    /// Advance with wraparound; no-op on an empty queue
    pub async fn play_next(&self) -> Result<()> {
        self.request(|reply| Command::Next { reply }).await
    }

    /// Step back with wraparound; no-op on an empty queue
    pub async fn play_previous(&self) -> Result<()> {
        self.request(|reply| Command::Previous { reply }).await
    }

    pub async fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.request(|reply| Command::Seek { position_ms, reply }).await
    }

    /// Toggle `track`, or the current track when `None`
    ///
    /// Returns whether the track is a favorite afterwards. A failed write is
    /// reported as an event, not returned here.
    ///
    /// # Errors
    /// `InvalidIntent` when `track` is `None` and nothing is playing
    pub async fn toggle_favorite(&self, track: Option<Track>) -> Result<bool> {
        self.request(|reply| Command::ToggleFavorite { track, reply }).await
    }

    /// Remove a favorite by id; `false` when it was not one
    pub async fn remove_favorite(&self, id: TrackId) -> Result<bool> {
        self.request(|reply| Command::RemoveFavorite { id, reply }).await
    }

    /// Release the audio resource and stop the controller
    ///
    /// Intents sent afterwards fail with `PlayerClosed`.
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to player events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Receiver notified on every published snapshot
    pub fn watch(&self) -> watch::Receiver<PlayerSnapshot> {
        self.snapshot.clone()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn current_track(&self) -> Option<Track> {
        self.snapshot.borrow().current_track.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.snapshot.borrow().is_playing
    }

    pub fn position_ms(&self) -> u64 {
        self.snapshot.borrow().position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.snapshot.borrow().duration_ms
    }

    pub fn favorites(&self) -> Vec<Track> {
        self.snapshot.borrow().favorites.clone()
    }

    pub fn is_favorite(&self, id: TrackId) -> bool {
        self.snapshot.borrow().favorites.iter().any(|t| t.id == id)
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| PlaybackError::PlayerClosed)?;
        response.await.map_err(|_| PlaybackError::PlayerClosed)?
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("closed", &self.commands.is_closed())
            .finish_non_exhaustive()
    }
}
