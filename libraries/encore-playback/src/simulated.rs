//! Clock-driven audio backend
//!
//! Stands in for a platform audio facility. Nothing is decoded: each resource
//! advances a position counter on a tokio interval while playing, reports
//! progress through its status callback, and signals the end once.

use async_trait::async_trait;
use encore_core::{AudioBackend, AudioResource, EncoreError, ResourceStatus, StatusCallback};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Length of a catalog preview
pub const PREVIEW_DURATION_MS: u64 = 30_000;

const DEFAULT_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct Counters {
    loads: AtomicUsize,
    unloads: AtomicUsize,
    live: AtomicUsize,
}

/// Backend producing [`SimulatedResource`]s
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    duration_ms: u64,
    tick: Duration,
    counters: Arc<Counters>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self {
            duration_ms: PREVIEW_DURATION_MS,
            tick: DEFAULT_TICK,
            counters: Arc::default(),
        }
    }

    /// Length every resource reports
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Interval between progress reports
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn load_count(&self) -> usize {
        self.counters.loads.load(Ordering::SeqCst)
    }

    pub fn unload_count(&self) -> usize {
        self.counters.unloads.load(Ordering::SeqCst)
    }

    /// Resources loaded and not yet unloaded
    pub fn live_count(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioBackend for SimulatedBackend {
    async fn load(
        &self,
        uri: &str,
        on_status: StatusCallback,
    ) -> encore_core::Result<Box<dyn AudioResource>> {
        if uri.trim().is_empty() {
            return Err(EncoreError::audio("track has no preview URI"));
        }

        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(uri, "Simulated resource loaded");

        Ok(Box::new(SimulatedResource::start(
            self.duration_ms,
            self.tick,
            on_status,
            Arc::clone(&self.counters),
        )))
    }
}

#[derive(Debug, Default)]
struct Clock {
    position_ms: AtomicU64,
    playing: AtomicBool,
}

/// One simulated resource; its clock task stops on unload or drop
#[derive(Debug)]
pub struct SimulatedResource {
    duration_ms: u64,
    clock: Arc<Clock>,
    ticker: Option<JoinHandle<()>>,
    counters: Arc<Counters>,
}

impl SimulatedResource {
    fn start(
        duration_ms: u64,
        tick: Duration,
        on_status: StatusCallback,
        counters: Arc<Counters>,
    ) -> Self {
        let clock = Arc::new(Clock::default());
        let ticker = tokio::spawn(run_clock(duration_ms, tick, Arc::clone(&clock), on_status));
        Self {
            duration_ms,
            clock,
            ticker: Some(ticker),
            counters,
        }
    }

    fn ensure_loaded(&self) -> encore_core::Result<()> {
        if self.ticker.is_none() {
            return Err(EncoreError::audio("resource already unloaded"));
        }
        Ok(())
    }
}

async fn run_clock(duration_ms: u64, tick: Duration, clock: Arc<Clock>, on_status: StatusCallback) {
    let step = u64::try_from(tick.as_millis()).unwrap_or(u64::MAX).max(1);
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        if !clock.playing.load(Ordering::SeqCst) {
            continue;
        }

        let position = clock
            .position_ms
            .load(Ordering::SeqCst)
            .saturating_add(step)
            .min(duration_ms);
        clock.position_ms.store(position, Ordering::SeqCst);

        if position >= duration_ms {
            clock.playing.store(false, Ordering::SeqCst);
            on_status(ResourceStatus::finished(duration_ms));
            break;
        }
        on_status(ResourceStatus::progress(position, Some(duration_ms), true));
    }
}

#[async_trait]
impl AudioResource for SimulatedResource {
    async fn play(&mut self) -> encore_core::Result<()> {
        self.ensure_loaded()?;
        self.clock.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&mut self) -> encore_core::Result<()> {
        self.ensure_loaded()?;
        self.clock.playing.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn seek(&mut self, position_ms: u64) -> encore_core::Result<()> {
        self.ensure_loaded()?;
        self.clock
            .position_ms
            .store(position_ms.min(self.duration_ms), Ordering::SeqCst);
        Ok(())
    }

    async fn unload(&mut self) -> encore_core::Result<()> {
        let ticker = self
            .ticker
            .take()
            .ok_or_else(|| EncoreError::audio("resource already unloaded"))?;
        ticker.abort();
        self.counters.unloads.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for SimulatedResource {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            tracing::warn!("Simulated resource dropped without unload");
            ticker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (StatusCallback, Arc<Mutex<Vec<ResourceStatus>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: StatusCallback = Arc::new(move |status| sink.lock().unwrap().push(status));
        (callback, seen)
    }

    #[tokio::test]
    async fn empty_uri_fails_to_load() {
        let backend = SimulatedBackend::new();
        let (callback, _) = recorder();

        let result = backend.load("  ", callback).await;
        assert!(matches!(result, Err(EncoreError::Audio(_))));
        assert_eq!(backend.load_count(), 0);
        assert_eq!(backend.live_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reports_progress_then_finishes_once() {
        let backend = SimulatedBackend::new()
            .with_duration(1_000)
            .with_tick(Duration::from_millis(250));
        let (callback, seen) = recorder();

        let mut resource = backend.load("https://cdn/1.mp3", callback).await.unwrap();
        resource.play().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let seen = seen.lock().unwrap().clone();
        let positions: Vec<u64> = seen.iter().map(|s| s.position_ms).collect();
        assert_eq!(positions, vec![250, 500, 750, 1_000]);
        assert_eq!(seen.iter().filter(|s| s.did_just_finish).count(), 1);
        assert!(seen.last().unwrap().did_just_finish);

        resource.unload().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn paused_resource_stays_put() {
        let backend = SimulatedBackend::new().with_tick(Duration::from_millis(100));
        let (callback, seen) = recorder();

        let mut resource = backend.load("https://cdn/1.mp3", callback).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(seen.lock().unwrap().is_empty());

        resource.unload().await.unwrap();
    }

    #[tokio::test]
    async fn unload_counts_once() {
        let backend = SimulatedBackend::new();
        let (callback, _) = recorder();

        let mut resource = backend.load("https://cdn/1.mp3", callback).await.unwrap();
        assert_eq!(backend.live_count(), 1);

        resource.unload().await.unwrap();
        assert!(resource.unload().await.is_err());
        assert!(resource.play().await.is_err());
        assert_eq!(backend.unload_count(), 1);
        assert_eq!(backend.live_count(), 0);
    }
}
