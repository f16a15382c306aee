// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Periodic probing of one protocol class with safe restart and teardown
//!
//! Every run of the refresh loop is tagged with a generation. Restarting or
//! stopping bumps the generation under the snapshot lock, so a round that
//! completes afterwards finds a stale tag and is dropped instead of being
//! published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::prober::BatchProber;
use super::strategy::ProbeStrategy;
use super::types::{ProbeRound, ProtocolClass};
use crate::registry::EndpointDescriptor;

/// Fixed refresh cadence
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub refresh_interval: Duration,
    /// Overrides the strategy's own per-request timeout
    pub probe_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: REFRESH_INTERVAL,
            probe_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Active,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("Scheduler for {0} has been stopped")]
    Stopped(ProtocolClass),
}

/// Published state, shared with the refresh task
struct Published {
    generation: AtomicU64,
    rounds_published: AtomicU64,
    snapshot: RwLock<Option<Arc<ProbeRound>>>,
}

impl Published {
    /// Replace the snapshot if `generation` is still current
    async fn publish(&self, generation: u64, round: ProbeRound) -> bool {
        let mut snapshot = self.snapshot.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        *snapshot = Some(Arc::new(round));
        self.rounds_published.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Invalidate in-flight rounds, optionally clearing the snapshot
    async fn advance(&self, clear: bool) -> u64 {
        let mut snapshot = self.snapshot.write().await;
        if clear {
            *snapshot = None;
        }
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

struct Control {
    state: SchedulerState,
    endpoints: Vec<EndpointDescriptor>,
    cancel: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl Control {
    fn disarm(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        // Outstanding requests are abandoned in place
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Refresh loop for one protocol class
pub struct ProbeScheduler {
    strategy: Arc<dyn ProbeStrategy>,
    prober: BatchProber,
    config: SchedulerConfig,
    published: Arc<Published>,
    control: Mutex<Control>,
}

impl ProbeScheduler {
    pub fn new(strategy: Arc<dyn ProbeStrategy>) -> Self {
        Self::with_config(strategy, SchedulerConfig::default())
    }

    pub fn with_config(strategy: Arc<dyn ProbeStrategy>, config: SchedulerConfig) -> Self {
        Self {
            strategy,
            prober: BatchProber::new(),
            config,
            published: Arc::new(Published {
                generation: AtomicU64::new(0),
                rounds_published: AtomicU64::new(0),
                snapshot: RwLock::new(None),
            }),
            control: Mutex::new(Control {
                state: SchedulerState::Idle,
                endpoints: Vec::new(),
                cancel: None,
                task: None,
            }),
        }
    }

    pub fn class(&self) -> ProtocolClass {
        self.strategy.class()
    }

    /// Supply the currently relevant endpoint set.
    ///
    /// A non-empty set different from the current one (re)starts the loop:
    /// the snapshot is cleared, round 0 runs immediately and later rounds
    /// follow on the refresh interval. An empty set returns to idle. The
    /// same set again is a no-op.
    pub async fn update(&self, endpoints: Vec<EndpointDescriptor>) -> Result<(), SchedulerError> {
        let mut control = self.control.lock().await;
        let class = self.class();

        match control.state {
            SchedulerState::Stopped => return Err(SchedulerError::Stopped(class)),
            SchedulerState::Active if control.endpoints == endpoints => {
                debug!(class = %class, "Endpoint set unchanged, keeping schedule");
                return Ok(());
            }
            SchedulerState::Idle if endpoints.is_empty() => return Ok(()),
            _ => {}
        }

        control.disarm();
        let generation = self.published.advance(true).await;

        if endpoints.is_empty() {
            control.state = SchedulerState::Idle;
            control.endpoints.clear();
            info!(class = %class, generation, "No endpoints, scheduler idle");
            return Ok(());
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(refresh_loop(
            self.strategy.clone(),
            self.prober,
            endpoints.clone(),
            self.round_timeout(),
            self.config.refresh_interval,
            self.published.clone(),
            generation,
            cancel.clone(),
        ));

        info!(class = %class, generation, endpoints = endpoints.len(), "Scheduler started");

        control.state = SchedulerState::Active;
        control.endpoints = endpoints;
        control.cancel = Some(cancel);
        control.task = Some(task);
        Ok(())
    }

    /// Tear down. Terminal: nothing is published afterwards and the timer
    /// never fires again. The last snapshot stays readable.
    pub async fn stop(&self) {
        let mut control = self.control.lock().await;
        if control.state == SchedulerState::Stopped {
            return;
        }
        control.disarm();
        let generation = self.published.advance(false).await;
        control.state = SchedulerState::Stopped;
        info!(class = %self.class(), generation, "Scheduler stopped");
    }

    pub async fn state(&self) -> SchedulerState {
        self.control.lock().await.state
    }

    /// Latest published round
    pub async fn snapshot(&self) -> Option<Arc<ProbeRound>> {
        self.published.snapshot.read().await.clone()
    }

    pub fn generation(&self) -> u64 {
        self.published.generation.load(Ordering::SeqCst)
    }

    pub fn rounds_published(&self) -> u64 {
        self.published.rounds_published.load(Ordering::SeqCst)
    }

    fn round_timeout(&self) -> Duration {
        self.config
            .probe_timeout
            .unwrap_or_else(|| self.strategy.default_timeout())
    }
}

impl Drop for ProbeScheduler {
    fn drop(&mut self) {
        self.control.get_mut().disarm();
    }
}

struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[allow(clippy::too_many_arguments)]
async fn refresh_loop(
    strategy: Arc<dyn ProbeStrategy>,
    prober: BatchProber,
    endpoints: Vec<EndpointDescriptor>,
    probe_timeout: Duration,
    refresh_interval: Duration,
    published: Arc<Published>,
    generation: u64,
    cancel: CancellationToken,
) {
    let class = strategy.class();
    let endpoints = Arc::new(endpoints);
    let mut ticker = interval(refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately: round 0
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let round = tokio::spawn({
            let strategy = strategy.clone();
            let endpoints = endpoints.clone();
            async move {
                prober
                    .run_round(&endpoints, strategy.as_ref(), probe_timeout)
                    .await
            }
        });
        // Dropped with this task when the loop is aborted
        let _guard = AbortOnDrop(round.abort_handle());

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = round => result,
        };

        match result {
            Ok(round) => {
                if published.publish(generation, round).await {
                    debug!(class = %class, generation, "Published probe round");
                } else {
                    debug!(class = %class, generation, "Discarded stale probe round");
                    break;
                }
            }
            // Keep the previous snapshot on screen
            Err(e) => warn!(class = %class, generation, "Probe round failed, no update this tick: {}", e),
        }

        if !strategy.is_live() {
            break;
        }
    }

    debug!(class = %class, generation, "Refresh loop exited");
}
