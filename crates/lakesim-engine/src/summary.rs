//! Shutdown summary written as `summary.json`.
//!
//! The summary is the input for offline chart generation: season-keyed
//! births and catches plus the complete fish, food, and oxygen series.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lakesim_core::operator::SimulationEndReason;
use lakesim_core::runner::{Simulation, SimulationResult};
use lakesim_types::{SeasonCounters, TimeSeriesPoint};
use serde::Serialize;

use crate::error::EngineError;

/// Summary file name.
pub const SUMMARY_FILE: &str = "summary.json";

/// Everything a chart generator needs from a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Why the run ended.
    pub end_reason: SimulationEndReason,
    /// Ticks executed by this run.
    pub total_ticks: u64,
    /// Generation counter at shutdown.
    pub final_tick: u64,
    /// Seed the run was started with.
    pub seed: u64,
    /// Wall-clock start.
    pub started_at: DateTime<Utc>,
    /// Wall-clock end.
    pub finished_at: DateTime<Utc>,
    /// Fish alive at shutdown.
    pub fish_alive: u32,
    /// Fish ever created, initial population included.
    pub total_fish_spawned: u64,
    /// Births and catches per season.
    pub seasons: SeasonCounters,
    /// Per-tick fish, food, and oxygen.
    pub series: Vec<TimeSeriesPoint>,
}

impl RunSummary {
    /// Collect the summary of a finished run.
    pub fn collect(
        result: &SimulationResult,
        simulation: &Simulation,
        seed: u64,
        started_at: DateTime<Utc>,
    ) -> Self {
        let lake = simulation.lake();
        Self {
            end_reason: result.end_reason,
            total_ticks: result.total_ticks,
            final_tick: lake.tick(),
            seed,
            started_at,
            finished_at: Utc::now(),
            fish_alive: lake.fish_count(),
            total_fish_spawned: lake.total_fish_spawned(),
            seasons: lake.season_counters().clone(),
            series: lake.time_series().points().to_vec(),
        }
    }

    /// Write the summary as pretty JSON into `dir` and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Output`] if the file cannot be written, or
    /// [`EngineError::Summary`] if serialization fails.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, EngineError> {
        let path = dir.join(SUMMARY_FILE);
        let file = File::create(&path).map_err(|e| EngineError::output(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| EngineError::output(&path, e))?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lakesim_core::config::SimulationConfig;

    use super::*;
    use crate::spawner::build_simulation;

    fn finished_run(ticks: u64) -> (SimulationResult, Simulation) {
        let mut sim = build_simulation(&SimulationConfig::default()).unwrap();
        let mut final_outcome = None;
        for _ in 0..ticks {
            final_outcome = Some(sim.step());
        }
        let result = SimulationResult {
            end_reason: SimulationEndReason::MaxTicksReached,
            final_outcome,
            total_ticks: ticks,
        };
        (result, sim)
    }

    #[test]
    fn collects_series_and_counters() {
        let (result, sim) = finished_run(20);
        let summary = RunSummary::collect(&result, &sim, 42, Utc::now());

        assert_eq!(summary.total_ticks, 20);
        assert_eq!(summary.final_tick, 20);
        assert_eq!(summary.series.len(), 20);
        assert_eq!(summary.fish_alive, sim.lake().fish_count());
        assert!(summary.total_fish_spawned >= 10);
        assert!(summary.finished_at >= summary.started_at);
    }

    #[test]
    fn writes_json_file() {
        let dir = std::env::temp_dir().join(format!("lakesim-summary-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (result, sim) = finished_run(3);

        let path = RunSummary::collect(&result, &sim, 42, Utc::now())
            .write(&dir)
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["end_reason"], "MaxTicksReached");
        assert_eq!(json["seed"], 42);
        assert_eq!(json["series"].as_array().unwrap().len(), 3);
        assert_eq!(json["seasons"].as_object().unwrap().len(), 4);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
