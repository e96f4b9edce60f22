//! Engine binary for the lake simulation.
//!
//! This is the main entry point that wires together configuration, the
//! populated lake, the CSV logs, the observer, and operator controls, then
//! runs the simulation loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `lakesim-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Validate configuration
//! 4. Recreate the output directory
//! 5. Populate the lake
//! 6. Create operator state from simulation bounds
//! 7. Start the Observer API server
//! 8. Open the CSV logs
//! 9. Run the simulation loop
//! 10. Write the shutdown summary

mod csv_log;
mod error;
mod observer_callback;
mod spawner;
mod summary;

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use lakesim_core::config::{LoggingConfig, SimulationConfig};
use lakesim_core::history::TickLog;
use lakesim_core::operator::OperatorState;
use lakesim_core::runner::{self, NoOpCallback, TickCallback};
use lakesim_observer::server::ServerConfig;
use lakesim_observer::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::csv_log::CsvTickLog;
use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;
use crate::summary::RunSummary;

/// Configuration file looked up in the working directory.
const CONFIG_FILE: &str = "lakesim-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("lakesim-engine starting");
    if !from_file {
        info!(path = CONFIG_FILE, "Config file not found, using defaults");
    }

    // 3. Validate.
    config.validate()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        width = config.world.width,
        height = config.world.height,
        tick_interval_ms = config.world.tick_interval_ms,
        season_length = config.time.season_length,
        "Configuration loaded"
    );

    // 4. Output directory.
    let output_dir = Path::new(&config.output.dir);
    if config.output.csv_enabled || config.output.summary_enabled {
        csv_log::prepare_output_dir(output_dir)?;
        info!(dir = %output_dir.display(), "Output directory ready");
    }

    // 5. Populate the lake.
    let mut simulation = spawner::build_simulation(&config)?;

    // 6. Create operator state.
    let operator = Arc::new(OperatorState::new(
        config.world.tick_interval_ms,
        &config.simulation,
    ));
    let started_at = Utc::now();

    // 7. Start Observer API server.
    let mut callback: Box<dyn TickCallback> = Box::new(NoOpCallback);
    let observer_handle = if config.observer.enabled {
        let app_state = Arc::new(AppState::with_operator(Arc::clone(&operator)));
        let server = ServerConfig {
            host: config.observer.host.clone(),
            port: config.observer.port,
        };
        let handle = lakesim_observer::startup::spawn_observer(server, Arc::clone(&app_state))
            .map_err(|e| EngineError::Observer {
                message: format!("{e}"),
            })?;
        callback = Box::new(ObserverCallback::new(app_state));
        Some(handle)
    } else {
        info!("Observer disabled");
        None
    };

    // 8. Open CSV logs.
    let mut csv = if config.output.csv_enabled {
        Some(CsvTickLog::create(output_dir)?)
    } else {
        None
    };
    let tick_log = csv.as_mut().map(|log| log as &mut dyn TickLog);

    // 9. Run the simulation.
    let result =
        runner::run_simulation(&mut simulation, &operator, callback.as_mut(), tick_log).await?;
    runner::log_simulation_end(&result, &simulation);

    // 10. Shutdown summary.
    if config.output.summary_enabled {
        let path = RunSummary::collect(&result, &simulation, config.world.seed, started_at)
            .write(output_dir)?;
        info!(path = %path.display(), "Run summary written");
    }

    if let Some(handle) = observer_handle {
        handle.abort();
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "lakesim-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from [`CONFIG_FILE`].
///
/// Returns the configuration and whether it came from the file. Runs
/// before logging is up, so the caller reports the fallback.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        Ok((SimulationConfig::from_file(config_path)?, true))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
