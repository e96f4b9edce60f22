//! Tick callback that updates the Observer API state.
//!
//! After each tick, this callback broadcasts a [`TickBroadcast`] to all
//! connected `WebSocket` clients and refreshes the in-memory
//! [`SimulationSnapshot`](lakesim_observer::state::SimulationSnapshot).

use std::sync::Arc;

use lakesim_core::runner::{Simulation, StepOutcome, TickCallback};
use lakesim_observer::state::{AppState, SERIES_WINDOW, TickBroadcast};
use tracing::debug;

/// Callback that bridges the run loop to the Observer API.
pub struct ObserverCallback {
    state: Arc<AppState>,
    series_window: usize,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self::with_series_window(state, SERIES_WINDOW)
    }

    /// Like [`ObserverCallback::new`], keeping at most `series_window`
    /// series points in the observer snapshot.
    pub const fn with_series_window(state: Arc<AppState>, series_window: usize) -> Self {
        Self {
            state,
            series_window,
        }
    }
}

impl TickCallback for ObserverCallback {
    fn on_tick(&mut self, outcome: &StepOutcome, simulation: &Simulation) {
        let lake = simulation.lake();
        let broadcast = TickBroadcast::from_step(outcome, lake.fish_count());

        let receivers = self.state.broadcast(&broadcast);
        debug!(tick = broadcast.tick, receivers, "Tick broadcast sent");

        // try_write so the run loop never waits on a REST reader; a skipped
        // tick is caught up on the next one.
        if let Ok(mut snap) = self.state.snapshot.try_write() {
            snap.current_tick = lake.tick();
            snap.lake = Some(simulation.snapshot());
            snap.seasons = lake.season_counters().clone();

            let last_seen = snap.series.last().map(|point| point.tick);
            let fresh = last_seen.map_or(lake.time_series().points(), |tick| {
                lake.time_series().since(tick)
            });
            for point in fresh {
                snap.series.push(*point);
            }
            snap.series.retain_last(self.series_window);
        } else {
            debug!(tick = broadcast.tick, "Snapshot busy, skipping update");
        }
    }
}
