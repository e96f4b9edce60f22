//! Simulation loop runner with operator controls.
//!
//! [`Simulation`] bundles the lake, the optional fisherman, and the seeded
//! random source; [`Simulation::step`] is one external tick (lake update,
//! then one catch attempt). [`run_simulation`] is the top-level async loop
//! around it, with support for:
//!
//! - **Bounded simulation**: stop after `max_ticks` or `max_real_time_seconds`
//! - **Pause/resume**: operator can halt and continue the loop
//! - **Variable tick speed**: tick interval adjustable at runtime
//! - **Extinction**: stop when the last fish is gone (configurable)
//! - **Operator stop**: immediate clean stop via REST API

use std::sync::Arc;

use lakesim_types::LakeSnapshot;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::fisherman::{CatchRecord, Fisherman};
use crate::history::TickLog;
use crate::lake::Lake;
use crate::operator::{OperatorState, SimulationEndReason};
use crate::tick::TickSummary;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The external tick log rejected a point.
    #[error("tick log write failed at tick {tick}: {source}")]
    TickLog {
        /// Tick whose point could not be written.
        tick: u64,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// What happened during one external tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// The lake update's summary.
    pub summary: TickSummary,
    /// The fisherman's catch, if any.
    pub catch: Option<CatchRecord>,
}

/// The lake, its predator, and the random source that drives both.
#[derive(Debug, Clone)]
pub struct Simulation {
    lake: Lake,
    fisherman: Option<Fisherman>,
    rng: StdRng,
}

impl Simulation {
    /// Bundle a populated lake with an optional fisherman and an rng
    /// already used for spawning.
    pub const fn new(lake: Lake, fisherman: Option<Fisherman>, rng: StdRng) -> Self {
        Self {
            lake,
            fisherman,
            rng,
        }
    }

    /// Bundle a populated lake with an optional fisherman and a fresh rng
    /// seeded from `seed`.
    pub fn with_seed(lake: Lake, fisherman: Option<Fisherman>, seed: u64) -> Self {
        Self::new(lake, fisherman, StdRng::seed_from_u64(seed))
    }

    /// Run one external tick: the lake update, then one catch attempt.
    pub fn step(&mut self) -> StepOutcome {
        let summary = self.lake.update(&mut self.rng);
        let catch = self
            .fisherman
            .as_ref()
            .and_then(|fisherman| fisherman.attempt_catch(&mut self.lake, &mut self.rng));
        StepOutcome { summary, catch }
    }

    /// The lake.
    pub const fn lake(&self) -> &Lake {
        &self.lake
    }

    /// The fisherman, if one is attached.
    pub const fn fisherman(&self) -> Option<&Fisherman> {
        self.fisherman.as_ref()
    }

    /// Lake snapshot with the fisherman's capture area filled in.
    pub fn snapshot(&self) -> LakeSnapshot {
        let mut snapshot = self.lake.snapshot();
        snapshot.capture_area = self.fisherman.as_ref().map(|f| f.area().to_rect());
        snapshot
    }
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last step outcome, if any tick completed.
    pub final_outcome: Option<StepOutcome>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to update the observer snapshot,
/// broadcast tick summaries, etc.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, outcome: &StepOutcome, simulation: &Simulation);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _outcome: &StepOutcome, _simulation: &Simulation) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// After every step the newest time-series point is forwarded to
/// `tick_log` (if given) and the callback runs.
///
/// # Errors
///
/// Returns [`RunnerError::TickLog`] if the tick log fails to record.
pub async fn run_simulation(
    simulation: &mut Simulation,
    operator: &Arc<OperatorState>,
    callback: &mut dyn TickCallback,
    mut tick_log: Option<&mut dyn TickLog>,
) -> Result<SimulationResult, RunnerError> {
    let mut last_outcome: Option<StepOutcome> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = operator.max_ticks(),
        max_real_time_seconds = operator.max_real_time_seconds(),
        tick_interval_ms = operator.tick_interval_ms(),
        fish = simulation.lake().fish_count(),
        plants = simulation.lake().plant_count(),
        "Simulation starting"
    );

    let end_reason = loop {
        // --- Check pause ---
        if operator.is_paused() {
            info!("Simulation paused, waiting for resume...");
            operator.wait_if_paused().await;
            info!("Simulation resumed");
        }

        // --- Check stop request (before tick) ---
        if operator.is_stop_requested() {
            info!("Operator stop requested");
            break SimulationEndReason::OperatorStop;
        }

        // --- Check time limit (before tick) ---
        if operator.time_limit_reached() {
            info!(
                max_seconds = operator.max_real_time_seconds(),
                elapsed = operator.elapsed_seconds(),
                "Real-time limit reached"
            );
            break SimulationEndReason::MaxRealTimeReached;
        }

        // --- Execute tick ---
        let outcome = simulation.step();
        let tick = outcome.summary.tick;
        total_ticks = total_ticks.saturating_add(1);

        // --- Forward to the tick log ---
        if let Some(log) = tick_log.as_deref_mut()
            && let Some(point) = simulation.lake().time_series().last()
        {
            log.record(point)
                .map_err(|source| RunnerError::TickLog { tick, source })?;
        }

        // --- Notify callback ---
        callback.on_tick(&outcome, simulation);
        last_outcome = Some(outcome);

        // --- Check extinction ---
        if operator.stop_on_extinction() && simulation.lake().is_extinct() {
            info!(tick, "All fish gone -- extinction");
            break SimulationEndReason::Extinction;
        }

        // --- Check tick limit (after tick) ---
        if operator.tick_limit_reached(tick) {
            info!(tick, max_ticks = operator.max_ticks(), "Tick limit reached");
            break SimulationEndReason::MaxTicksReached;
        }

        // --- Sleep for tick interval ---
        let interval_ms = operator.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    };

    if let Some(log) = tick_log.as_deref_mut() {
        log.flush()
            .map_err(|source| RunnerError::TickLog {
                tick: simulation.lake().tick(),
                source,
            })?;
    }

    operator.set_end_reason(end_reason).await;
    Ok(SimulationResult {
        end_reason,
        final_outcome: last_outcome,
        total_ticks,
    })
}

/// Log the simulation end sequence.
///
/// This should be called after [`run_simulation`] returns. The HTTP server
/// should remain running after this returns.
pub fn log_simulation_end(result: &SimulationResult, simulation: &Simulation) {
    let counters = simulation.lake().season_counters();
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = simulation.lake().tick(),
        fish_alive = simulation.lake().fish_count(),
        total_born = counters.total_born(),
        total_caught = counters.total_caught(),
        "Simulation ended"
    );

    if let Some(ref outcome) = result.final_outcome {
        let summary = &outcome.summary;
        info!(
            tick = summary.tick,
            fish_alive = summary.fish_alive,
            plants_alive = summary.plants_alive,
            food = summary.food_amount,
            oxygen = summary.oxygen_level,
            season = %summary.season,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
