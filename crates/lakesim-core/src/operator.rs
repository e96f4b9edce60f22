//! Live controls for a running lake.
//!
//! One [`OperatorState`] is shared by the run loop and the observer's
//! operator endpoints. Flags and the tick interval are atomics so a handler
//! can flip them while the loop is mid-tick; only the end reason sits behind
//! a lock because it is written once.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};

use crate::config::SimulationBoundsConfig;

/// Smallest tick interval the operator may set.
pub const MIN_TICK_INTERVAL_MS: u64 = 1;

/// Why a run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEndReason {
    /// `max_ticks` generations ran.
    MaxTicksReached,
    /// `max_real_time_seconds` elapsed.
    MaxRealTimeReached,
    /// Stopped through the operator API.
    OperatorStop,
    /// Every fish is gone.
    Extinction,
}

/// Pause, stop, speed, and run limits shared across tasks.
#[derive(Debug)]
pub struct OperatorState {
    paused: AtomicBool,
    /// Wakes a paused loop on resume or stop.
    wake: Notify,
    stop: AtomicBool,
    interval_ms: AtomicU64,
    started_at: DateTime<Utc>,
    limits: SimulationBoundsConfig,
    end_reason: Mutex<Option<SimulationEndReason>>,
}

impl OperatorState {
    /// Controls for a run with the given starting interval and limits.
    ///
    /// An initial interval of 0 runs ticks back to back; only
    /// [`OperatorState::set_tick_interval_ms`] enforces
    /// [`MIN_TICK_INTERVAL_MS`].
    pub fn new(tick_interval_ms: u64, limits: &SimulationBoundsConfig) -> Self {
        Self {
            paused: AtomicBool::new(false),
            wake: Notify::new(),
            stop: AtomicBool::new(false),
            interval_ms: AtomicU64::new(tick_interval_ms),
            started_at: Utc::now(),
            limits: limits.clone(),
            end_reason: Mutex::new(None),
        }
    }

    // -----------------------------------------------------------------------
    // Pause and stop
    // -----------------------------------------------------------------------

    /// Whether the loop is held between ticks.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Hold the loop before its next tick.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Release a paused loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.wake.notify_one();
    }

    /// Block while paused. A stop request ends the wait too, so a paused
    /// lake can still shut down.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.wake.notified().await;
        }
    }

    /// Ask the loop to finish after the current tick.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    /// Whether a stop is pending.
    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Store why the run finished.
    pub async fn set_end_reason(&self, reason: SimulationEndReason) {
        *self.end_reason.lock().await = Some(reason);
    }

    /// Why the run finished, or `None` while it is still going.
    pub async fn end_reason(&self) -> Option<SimulationEndReason> {
        *self.end_reason.lock().await
    }

    // -----------------------------------------------------------------------
    // Speed
    // -----------------------------------------------------------------------

    /// Sleep between ticks, in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::Acquire)
    }

    /// Swap in a new interval and return the old one. Values under
    /// [`MIN_TICK_INTERVAL_MS`] are refused with `None`.
    pub fn set_tick_interval_ms(&self, ms: u64) -> Option<u64> {
        (ms >= MIN_TICK_INTERVAL_MS).then(|| self.interval_ms.swap(ms, Ordering::AcqRel))
    }

    // -----------------------------------------------------------------------
    // Limits
    // -----------------------------------------------------------------------

    /// `true` once `tick` reaches a non-zero `max_ticks`.
    pub const fn tick_limit_reached(&self, tick: u64) -> bool {
        self.limits.max_ticks > 0 && tick >= self.limits.max_ticks
    }

    /// `true` once a non-zero `max_real_time_seconds` has elapsed.
    pub fn time_limit_reached(&self) -> bool {
        let limit = self.limits.max_real_time_seconds;
        limit > 0 && self.elapsed_seconds() >= limit
    }

    /// Whether an empty lake ends the run.
    pub const fn stop_on_extinction(&self) -> bool {
        self.limits.stop_on_extinction
    }

    /// When the controls were created.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Whole seconds since [`OperatorState::started_at`], 0 if the wall
    /// clock went backwards.
    pub fn elapsed_seconds(&self) -> u64 {
        let seconds = Utc::now().signed_duration_since(self.started_at).num_seconds();
        u64::try_from(seconds).unwrap_or(0)
    }

    /// Configured tick limit, 0 for none.
    pub const fn max_ticks(&self) -> u64 {
        self.limits.max_ticks
    }

    /// Configured wall-clock limit in seconds, 0 for none.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.limits.max_real_time_seconds
    }

    /// Status report for the lake at `tick` with `fish_alive` fish.
    pub async fn status(&self, tick: u64, fish_alive: u32) -> SimulationStatus {
        SimulationStatus {
            tick,
            paused: self.is_paused(),
            stop_requested: self.is_stop_requested(),
            tick_interval_ms: self.tick_interval_ms(),
            elapsed_seconds: self.elapsed_seconds(),
            max_ticks: self.max_ticks(),
            max_real_time_seconds: self.max_real_time_seconds(),
            fish_alive,
            end_reason: self.end_reason().await,
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

/// Body of `GET /api/operator/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStatus {
    /// Latest completed generation.
    pub tick: u64,
    /// Held between ticks.
    pub paused: bool,
    /// Stop pending.
    pub stop_requested: bool,
    /// Sleep between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Seconds since start.
    pub elapsed_seconds: u64,
    /// Tick limit, 0 for none.
    pub max_ticks: u64,
    /// Wall-clock limit, 0 for none.
    pub max_real_time_seconds: u64,
    /// Fish in the lake.
    pub fish_alive: u32,
    /// Set once the run has finished.
    pub end_reason: Option<SimulationEndReason>,
    /// RFC 3339 start time.
    pub started_at: String,
}
