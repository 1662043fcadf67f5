/// Facility traits for Encore
///
/// The core never decodes audio or touches a disk itself. Platforms provide
/// these facilities and the playback crate orchestrates them.
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Status pushed by an audio resource on its own schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceStatus {
    /// Current playback position in milliseconds
    pub position_ms: u64,

    /// Total duration in milliseconds (unknown until the resource reports it)
    pub duration_ms: Option<u64>,

    /// Whether the resource is currently producing sound
    pub is_playing: bool,

    /// Set once, when the resource reached its natural end
    pub did_just_finish: bool,

    /// Error reported mid-playback
    pub error: Option<String>,
}

impl ResourceStatus {
    /// Periodic progress update
    pub fn progress(position_ms: u64, duration_ms: Option<u64>, is_playing: bool) -> Self {
        Self {
            position_ms,
            duration_ms,
            is_playing,
            ..Self::default()
        }
    }

    /// Natural end of the resource
    pub fn finished(duration_ms: u64) -> Self {
        Self {
            position_ms: duration_ms,
            duration_ms: Some(duration_ms),
            is_playing: false,
            did_just_finish: true,
            error: None,
        }
    }

    /// Mid-playback failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Push-style status callback handed to the audio facility on load
pub type StatusCallback = Arc<dyn Fn(ResourceStatus) + Send + Sync>;

/// Audio-playback facility
///
/// Given a URI, asynchronously yields a controllable resource. The facility
/// reports status through `on_status` for as long as the resource lives.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Acquire a resource bound to `uri`
    ///
    /// # Errors
    /// Returns an error if the resource cannot be fetched or opened
    async fn load(&self, uri: &str, on_status: StatusCallback) -> Result<Box<dyn AudioResource>>;
}

/// A single loaded audio resource
///
/// Holding one of these holds a native audio handle. Callers must invoke
/// `unload` exactly once before dropping it.
#[async_trait]
pub trait AudioResource: Send {
    /// Start or resume output
    async fn play(&mut self) -> Result<()>;

    /// Pause output, keeping position
    async fn pause(&mut self) -> Result<()>;

    /// Relocate the playback cursor (clamping is the resource's job)
    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Release the native handle
    async fn unload(&mut self) -> Result<()>;
}

/// Durable key-value storage facility
///
/// Values are whole serialized blobs; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_status_sits_at_end() {
        let status = ResourceStatus::finished(30_000);
        assert!(status.did_just_finish);
        assert!(!status.is_playing);
        assert_eq!(status.position_ms, 30_000);
        assert_eq!(status.duration_ms, Some(30_000));
    }

    #[test]
    fn failed_status_carries_message_only() {
        let status = ResourceStatus::failed("stream reset");
        assert_eq!(status.error.as_deref(), Some("stream reset"));
        assert!(!status.did_just_finish);
        assert_eq!(status.duration_ms, None);
    }
}
