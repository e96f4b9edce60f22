//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for tick summaries and an
//! in-memory copy of the latest lake state that the REST endpoints serve.

use std::sync::Arc;

use lakesim_core::history::TimeSeries;
use lakesim_core::operator::OperatorState;
use lakesim_core::runner::StepOutcome;
use lakesim_types::{DayPhase, FishId, LakeSnapshot, Season, SeasonCounters};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for tick summaries.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// Most recent time-series points kept for `GET /api/series`.
///
/// The full history lives in the lake and goes to the shutdown summary.
/// Clients that poll with `?since=N` only ever need the tail.
pub const SERIES_WINDOW: usize = 1_000;

/// JSON-serializable tick summary pushed over the `WebSocket`.
///
/// A lightweight projection of [`lakesim_core::tick::TickSummary`] plus
/// the fisherman's catch for that tick.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickBroadcast {
    /// The tick number.
    pub tick: u64,
    /// Current season.
    pub season: Season,
    /// Day or night.
    pub phase: DayPhase,
    /// Fish alive after the tick, including any catch.
    pub fish_alive: u32,
    /// Plants alive after the tick.
    pub plants_alive: u32,
    /// Shared food pool.
    pub food_amount: f64,
    /// Shared oxygen pool.
    pub oxygen_level: f64,
    /// Fish born this tick.
    pub births: u32,
    /// Fish starved this tick.
    pub deaths: u32,
    /// Fish the fisherman caught this tick, if any.
    pub caught: Option<FishId>,
}

impl TickBroadcast {
    /// Project one step. `fish_alive` is the count after the catch, which
    /// the lake summary taken before the fisherman cannot know.
    pub fn from_step(outcome: &StepOutcome, fish_alive: u32) -> Self {
        let summary = &outcome.summary;
        Self {
            tick: summary.tick,
            season: summary.season,
            phase: summary.phase,
            fish_alive,
            plants_alive: summary.plants_alive,
            food_amount: summary.food_amount,
            oxygen_level: summary.oxygen_level,
            births: summary.births,
            deaths: summary.deaths,
            caught: outcome.catch.map(|record| record.fish_id),
        }
    }
}

/// In-memory snapshot of the simulation state served by REST endpoints.
///
/// Updated each tick by the engine. All reads are served from this
/// snapshot so the observer never blocks the tick loop.
#[derive(Debug, Clone, Default)]
pub struct SimulationSnapshot {
    /// The latest lake snapshot, absent until the first tick completes.
    pub lake: Option<LakeSnapshot>,
    /// Lifetime birth and catch counts per season.
    pub seasons: SeasonCounters,
    /// The last [`SERIES_WINDOW`] time-series points.
    pub series: TimeSeries,
    /// Current tick number.
    pub current_tick: u64,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
/// The broadcast sender is used to push tick summaries to all
/// connected `WebSocket` clients. The snapshot is a read-write
/// lock protecting the copied lake state.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for tick summary messages.
    pub tx: broadcast::Sender<TickBroadcast>,
    /// The current simulation snapshot (updated each tick).
    pub snapshot: Arc<RwLock<SimulationSnapshot>>,
    /// Shared operator control state (present when the simulation is running).
    pub operator_state: Option<Arc<OperatorState>>,
}

impl AppState {
    /// Create a new application state with an empty snapshot.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: Arc::new(RwLock::new(SimulationSnapshot::default())),
            operator_state: None,
        }
    }

    /// Create a new application state with operator control state attached.
    pub fn with_operator(operator: Arc<OperatorState>) -> Self {
        Self {
            operator_state: Some(operator),
            ..Self::new()
        }
    }

    /// Subscribe to the tick broadcast channel.
    ///
    /// Returns a receiver that will yield [`TickBroadcast`] messages
    /// for every tick the engine publishes.
    pub fn subscribe(&self) -> broadcast::Receiver<TickBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a tick summary to all connected clients.
    ///
    /// Returns the number of receivers that received the message.
    /// Returns 0 if no clients are connected (this is not an error).
    pub fn broadcast(&self, summary: &TickBroadcast) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no WebSocket clients are connected.
        self.tx.send(summary.clone()).unwrap_or(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_without_receivers_is_zero() {
        let state = AppState::new();
        let summary = TickBroadcast {
            tick: 1,
            season: Season::Spring,
            phase: DayPhase::Day,
            fish_alive: 3,
            plants_alive: 2,
            food_amount: 10.0,
            oxygen_level: 99.0,
            births: 0,
            deaths: 0,
            caught: None,
        };
        assert_eq!(state.broadcast(&summary), 0);

        let mut rx = state.subscribe();
        assert_eq!(state.broadcast(&summary), 1);
        assert_eq!(rx.try_recv().unwrap(), summary);
    }
}
