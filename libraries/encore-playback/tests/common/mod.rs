//! Shared helpers for player integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use encore_core::types::{Track, TrackId};
use encore_core::{AudioBackend, AudioResource, EncoreError, ResourceStatus, StatusCallback};
use encore_playback::{PlayerConfig, PlayerController, PlayerEvent, PlayerHandle};
use encore_storage::MemoryKeyValueStore;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};

pub fn track(id: u64) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Track {id}"),
        format!("https://cdn.example/{id}.mp3"),
    )
}

pub fn tracks(ids: &[u64]) -> Vec<Track> {
    ids.iter().copied().map(track).collect()
}

#[derive(Default)]
struct FakeState {
    callbacks: Vec<StatusCallback>,
    uris: Vec<String>,
    unloads: Vec<usize>,
    seeks: Vec<u64>,
    failing: HashSet<String>,
}

/// Scripted audio backend: tests fire status updates and failures by hand
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every load of `uri` fail
    pub fn fail_uri(&self, uri: &str) {
        self.state.lock().unwrap().failing.insert(uri.to_string());
    }

    /// Push a status update from the `index`-th loaded resource
    pub fn emit(&self, index: usize, status: ResourceStatus) {
        let callback = Arc::clone(&self.state.lock().unwrap().callbacks[index]);
        callback(status);
    }

    pub fn load_count(&self) -> usize {
        self.state.lock().unwrap().uris.len()
    }

    pub fn uri(&self, index: usize) -> String {
        self.state.lock().unwrap().uris[index].clone()
    }

    pub fn unload_count(&self, index: usize) -> usize {
        self.state.lock().unwrap().unloads[index]
    }

    /// Resources loaded and never unloaded
    pub fn live_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .unloads
            .iter()
            .filter(|&&n| n == 0)
            .count()
    }

    pub fn seeks(&self) -> Vec<u64> {
        self.state.lock().unwrap().seeks.clone()
    }
}

#[async_trait]
impl AudioBackend for FakeBackend {
    async fn load(
        &self,
        uri: &str,
        on_status: StatusCallback,
    ) -> encore_core::Result<Box<dyn AudioResource>> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(uri) {
            return Err(EncoreError::audio(format!("cannot open {uri}")));
        }

        state.callbacks.push(on_status);
        state.uris.push(uri.to_string());
        state.unloads.push(0);
        Ok(Box::new(FakeResource {
            index: state.uris.len() - 1,
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeResource {
    index: usize,
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl AudioResource for FakeResource {
    async fn play(&mut self) -> encore_core::Result<()> {
        Ok(())
    }

    async fn pause(&mut self) -> encore_core::Result<()> {
        Ok(())
    }

    async fn seek(&mut self, position_ms: u64) -> encore_core::Result<()> {
        self.state.lock().unwrap().seeks.push(position_ms);
        Ok(())
    }

    async fn unload(&mut self) -> encore_core::Result<()> {
        self.state.lock().unwrap().unloads[self.index] += 1;
        Ok(())
    }
}

pub async fn spawn_player(backend: &FakeBackend, store: &MemoryKeyValueStore) -> PlayerHandle {
    PlayerController::spawn(
        Arc::new(backend.clone()),
        Arc::new(store.clone()),
        PlayerConfig::default(),
    )
    .await
}

/// Receive events until one matches `pred`
pub async fn wait_for<F>(rx: &mut broadcast::Receiver<PlayerEvent>, mut pred: F) -> PlayerEvent
where
    F: FnMut(&PlayerEvent) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match rx.recv().await {
                Ok(event) if pred(&event) => return event,
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => panic!("event channel closed"),
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

/// Receive events until one matches `pred`, returning everything seen
pub async fn collect_until<F>(
    rx: &mut broadcast::Receiver<PlayerEvent>,
    mut pred: F,
) -> Vec<PlayerEvent>
where
    F: FnMut(&PlayerEvent) -> bool,
{
    let mut seen = Vec::new();
    wait_for(rx, |event| {
        seen.push(event.clone());
        pred(event)
    })
    .await;
    seen
}
