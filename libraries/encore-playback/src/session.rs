//! Playback session manager
//!
//! Owns the single live audio resource. Every load releases the previous
//! resource before acquiring the next one, and every status update is tagged
//! with the session that produced it so updates from a superseded resource
//! can be dropped.

use crate::error::{PlaybackError, Result};
use encore_core::types::Track;
use encore_core::{AudioBackend, AudioResource, ResourceStatus, StatusCallback};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifies one acquired resource for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Status update tagged with its session
pub type TaggedStatus = (SessionId, ResourceStatus);

/// Claim on the next session slot
///
/// Only the most recently issued ticket may install its resource.
#[derive(Debug)]
#[must_use]
pub struct LoadTicket {
    id: SessionId,
}

impl LoadTicket {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

/// What a status update meant for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Update from a resource that is no longer active
    Stale,
    /// Position/duration refreshed
    Progress {
        position_ms: u64,
        duration_ms: Option<u64>,
    },
    /// Active resource reached its natural end
    Finished,
    /// Active resource failed mid-playback
    Failed(String),
}

struct ActiveSession {
    id: SessionId,
    track: Track,
    resource: Box<dyn AudioResource>,
    is_playing: bool,
    position_ms: u64,
    duration_ms: Option<u64>,
}

/// Single-resource session manager
pub struct SessionManager {
    backend: Arc<dyn AudioBackend>,
    status_tx: mpsc::UnboundedSender<TaggedStatus>,
    active: Option<ActiveSession>,
    pending: Option<SessionId>,
    next_id: u64,
}

impl SessionManager {
    /// Create a manager forwarding resource status into `status_tx`
    pub fn new(
        backend: Arc<dyn AudioBackend>,
        status_tx: mpsc::UnboundedSender<TaggedStatus>,
    ) -> Self {
        Self {
            backend,
            status_tx,
            active: None,
            pending: None,
            next_id: 1,
        }
    }

    /// Release the current resource, acquire one for `track`, and start it
    ///
    /// On failure no session is active afterwards.
    pub async fn load(&mut self, track: &Track) -> Result<SessionId> {
        let ticket = self.begin_load().await;

        tracing::info!(track_id = %track.id, session = %ticket.id, "Loading preview");
        let callback = self.callback_for(ticket.id);
        let acquired = self.backend.load(&track.preview, callback).await;
        self.finish_load(ticket, track.clone(), acquired).await
    }

    /// Release the active resource and issue a ticket for the next load,
    /// superseding any load in flight
    pub async fn begin_load(&mut self) -> LoadTicket {
        self.release().await;

        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.pending = Some(id);
        LoadTicket { id }
    }

    /// Status callback that tags updates with `id`
    pub fn callback_for(&self, id: SessionId) -> StatusCallback {
        let tx = self.status_tx.clone();
        Arc::new(move |status: ResourceStatus| {
            // Receiver gone means the player shut down
            let _ = tx.send((id, status));
        })
    }

    /// Install the result of a load started with `ticket`
    ///
    /// A result for a superseded ticket is reported as `Superseded` whether or
    /// not its acquisition succeeded; a resource it did acquire is unloaded
    /// immediately.
    pub async fn finish_load(
        &mut self,
        ticket: LoadTicket,
        track: Track,
        acquired: encore_core::Result<Box<dyn AudioResource>>,
    ) -> Result<SessionId> {
        if self.pending != Some(ticket.id) {
            tracing::debug!(session = %ticket.id, track_id = %track.id, "Discarding superseded load");
            if let Ok(mut resource) = acquired {
                Self::unload(ticket.id, resource.as_mut()).await;
            }
            return Err(PlaybackError::Superseded);
        }
        self.pending = None;

        // begin_load released the previous resource and only the newest
        // ticket installs, so nothing is active here
        let mut resource = acquired.map_err(|source| PlaybackError::ResourceAcquisition {
            track_id: track.id,
            source,
        })?;

        if let Err(source) = resource.play().await {
            Self::unload(ticket.id, resource.as_mut()).await;
            return Err(PlaybackError::ResourceAcquisition {
                track_id: track.id,
                source,
            });
        }

        self.active = Some(ActiveSession {
            id: ticket.id,
            track,
            resource,
            is_playing: true,
            position_ms: 0,
            duration_ms: None,
        });
        Ok(ticket.id)
    }

    /// Pause the active resource; `false` when nothing is loaded
    pub async fn pause(&mut self) -> Result<bool> {
        let Some(session) = self.active.as_mut() else {
            return Ok(false);
        };
        session
            .resource
            .pause()
            .await
            .map_err(|e| PlaybackError::ResourcePlayback(e.to_string()))?;
        session.is_playing = false;
        Ok(true)
    }

    /// Resume the active resource; `false` when nothing is loaded
    pub async fn resume(&mut self) -> Result<bool> {
        let Some(session) = self.active.as_mut() else {
            return Ok(false);
        };
        session
            .resource
            .play()
            .await
            .map_err(|e| PlaybackError::ResourcePlayback(e.to_string()))?;
        session.is_playing = true;
        Ok(true)
    }

    /// Seek the active resource; `false` when nothing is loaded
    ///
    /// The cached position is updated without waiting for the resource to
    /// confirm it.
    pub async fn seek(&mut self, position_ms: u64) -> Result<bool> {
        let Some(session) = self.active.as_mut() else {
            return Ok(false);
        };
        session
            .resource
            .seek(position_ms)
            .await
            .map_err(|e| PlaybackError::ResourcePlayback(e.to_string()))?;
        session.position_ms = position_ms;
        Ok(true)
    }

    /// Unload the active resource, if any; `true` when one was released
    pub async fn release(&mut self) -> bool {
        match self.active.take() {
            Some(mut session) => {
                Self::unload(session.id, session.resource.as_mut()).await;
                true
            }
            None => false,
        }
    }

    /// Fold a tagged status update into the cached session state
    pub fn apply_status(&mut self, id: SessionId, status: &ResourceStatus) -> StatusOutcome {
        let Some(session) = self.active.as_mut().filter(|s| s.id == id) else {
            tracing::trace!(session = %id, "Ignoring status from inactive session");
            return StatusOutcome::Stale;
        };

        if let Some(message) = &status.error {
            return StatusOutcome::Failed(message.clone());
        }

        session.position_ms = status.position_ms;
        if status.duration_ms.is_some() {
            session.duration_ms = status.duration_ms;
        }

        if status.did_just_finish {
            session.is_playing = false;
            return StatusOutcome::Finished;
        }

        StatusOutcome::Progress {
            position_ms: session.position_ms,
            duration_ms: session.duration_ms,
        }
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active.as_ref().map(|s| s.id)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn track(&self) -> Option<&Track> {
        self.active.as_ref().map(|s| &s.track)
    }

    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(|s| s.is_playing)
    }

    pub fn position_ms(&self) -> u64 {
        self.active.as_ref().map_or(0, |s| s.position_ms)
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.active.as_ref().and_then(|s| s.duration_ms)
    }

    async fn unload(id: SessionId, resource: &mut dyn AudioResource) {
        if let Err(e) = resource.unload().await {
            tracing::warn!(session = %id, error = %e, "Failed to unload audio resource");
        } else {
            tracing::debug!(session = %id, "Released audio resource");
        }
    }
}
