//! Configuration loading and typed config structures for the lake simulation.
//!
//! The canonical configuration lives in `lakesim-config.yaml` in the working
//! directory. This module defines strongly-typed structs that mirror the
//! YAML structure, a loader, environment overrides, and the validation pass
//! that stands between user input and the lake. Every field has a default
//! matching the classic setup: 10 fish, 20 plants, 500 food, an 800x600
//! lake, a 5% fisherman working `(200, 150, 400, 350)`, reproduction every
//! 10 ticks, and 50-tick seasons.

use std::path::Path;

use lakesim_world::{CaptureArea, LakeBounds, WorldError, check_probability};
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A field holds a value the simulation cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// Geometry or probability rejected by the world crate.
    #[error("invalid world geometry: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `lakesim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, dimensions, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Starting population and breeding cadence.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Season timing.
    #[serde(default)]
    pub time: TimeConfig,

    /// The fisherman's odds and reach.
    #[serde(default)]
    pub fisherman: FishermanConfig,

    /// Run boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Log and summary output.
    #[serde(default)]
    pub output: OutputConfig,

    /// Observer HTTP surface.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `LAKESIM_SEED` overrides `world.seed`
    /// - `LAKESIM_OUTPUT_DIR` overrides `output.dir`
    /// - `LAKESIM_OBSERVER_PORT` overrides `observer.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `LAKESIM_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable numeric
    /// values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(seed) = lookup("LAKESIM_SEED").and_then(|v| v.trim().parse().ok()) {
            self.world.seed = seed;
        }
        if let Some(dir) = lookup("LAKESIM_OUTPUT_DIR") {
            self.output.dir = dir;
        }
        if let Some(port) = lookup("LAKESIM_OBSERVER_PORT").and_then(|v| v.trim().parse().ok()) {
            self.observer.port = port;
        }
    }

    /// Reject values the lake cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field,
    /// or [`ConfigError::World`] for bad geometry or probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        self.capture_area()?;
        check_probability(self.fisherman.probability)?;

        if self.population.initial_fish == 0 {
            return Err(invalid("population.initial_fish", "must be at least 1"));
        }
        if self.population.initial_fish_energy == 0 {
            return Err(invalid("population.initial_fish_energy", "must be at least 1"));
        }
        if self.population.initial_plants == 0 {
            return Err(invalid("population.initial_plants", "must be at least 1"));
        }
        if !self.population.initial_food.is_finite() || self.population.initial_food < 0.0 {
            return Err(invalid(
                "population.initial_food",
                "must be finite and not negative",
            ));
        }
        if self.population.reproduction_interval == 0 {
            return Err(invalid("population.reproduction_interval", "must be at least 1"));
        }
        if self.time.season_length == 0 {
            return Err(invalid("time.season_length", "must be at least 1"));
        }
        if self.world.tick_interval_ms == 0 {
            return Err(invalid("world.tick_interval_ms", "must be at least 1"));
        }

        let area = &self.fisherman.area;
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(invalid("fisherman.area", "width and height must be positive"));
        }
        if area.x < 0.0
            || area.y < 0.0
            || area.x + area.width > self.world.width
            || area.y + area.height > self.world.height
        {
            return Err(invalid("fisherman.area", "must lie inside the lake"));
        }

        Ok(())
    }

    /// World rectangle built from `world.width` and `world.height`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] for non-positive or non-finite sizes.
    pub fn bounds(&self) -> Result<LakeBounds, ConfigError> {
        Ok(LakeBounds::new(self.world.width, self.world.height)?)
    }

    /// Capture area built from the fisherman's `(x, y, width, height)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] for a degenerate rectangle.
    pub fn capture_area(&self) -> Result<CaptureArea, ConfigError> {
        let area = &self.fisherman.area;
        Ok(CaptureArea::from_origin_size(
            area.x,
            area.y,
            area.width,
            area.height,
        )?)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Lake width.
    #[serde(default = "default_width")]
    pub width: f64,

    /// Lake height.
    #[serde(default = "default_height")]
    pub height: f64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            width: default_width(),
            height: default_height(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Starting population configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Fish spawned at simulation start.
    #[serde(default = "default_initial_fish")]
    pub initial_fish: u32,

    /// Energy each starting fish begins with.
    #[serde(default = "default_initial_fish_energy")]
    pub initial_fish_energy: u32,

    /// Plants placed at simulation start.
    #[serde(default = "default_initial_plants")]
    pub initial_plants: u32,

    /// Starting size of the shared food pool.
    #[serde(default = "default_initial_food")]
    pub initial_food: f64,

    /// Reproduction is attempted on ticks divisible by this.
    #[serde(default = "default_reproduction_interval")]
    pub reproduction_interval: u64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_fish: default_initial_fish(),
            initial_fish_energy: default_initial_fish_energy(),
            initial_plants: default_initial_plants(),
            initial_food: default_initial_food(),
            reproduction_interval: default_reproduction_interval(),
        }
    }
}

/// Season timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Number of ticks in one season.
    #[serde(default = "default_season_length")]
    pub season_length: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            season_length: default_season_length(),
        }
    }
}

/// The fisherman's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishermanConfig {
    /// Chance per tick that a catch is attempted.
    #[serde(default = "default_catch_probability")]
    pub probability: f64,

    /// Capture rectangle as origin plus size.
    #[serde(default)]
    pub area: AreaConfig,
}

impl Default for FishermanConfig {
    fn default() -> Self {
        Self {
            probability: default_catch_probability(),
            area: AreaConfig::default(),
        }
    }
}

/// Rectangle given as its top-left corner and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConfig {
    /// Left edge.
    #[serde(default = "default_area_x")]
    pub x: f64,
    /// Top edge.
    #[serde(default = "default_area_y")]
    pub y: f64,
    /// Width.
    #[serde(default = "default_area_width")]
    pub width: f64,
    /// Height.
    #[serde(default = "default_area_height")]
    pub height: f64,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            x: default_area_x(),
            y: default_area_y(),
            width: default_area_width(),
            height: default_area_height(),
        }
    }
}

/// Simulation boundary configuration.
///
/// Controls when the simulation ends. A value of 0 for `max_ticks` or
/// `max_real_time_seconds` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum number of ticks before the simulation stops (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before the simulation stops (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Whether to stop when the last fish is gone.
    #[serde(default = "default_true")]
    pub stop_on_extinction: bool,
}

impl Default for SimulationBoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            max_real_time_seconds: 0,
            stop_on_extinction: true,
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for CSV logs and the run summary. Recreated at start.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Whether to write the per-tick CSV logs.
    #[serde(default = "default_true")]
    pub csv_enabled: bool,

    /// Whether to write `summary.json` at shutdown.
    #[serde(default = "default_true")]
    pub summary_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            csv_enabled: true,
            summary_enabled: true,
        }
    }
}

/// Observer server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Whether to start the observer.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Lake".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_width() -> f64 {
    800.0
}

const fn default_height() -> f64 {
    600.0
}

const fn default_tick_interval_ms() -> u64 {
    16
}

const fn default_initial_fish() -> u32 {
    10
}

const fn default_initial_fish_energy() -> u32 {
    100
}

const fn default_initial_plants() -> u32 {
    20
}

const fn default_initial_food() -> f64 {
    500.0
}

const fn default_reproduction_interval() -> u64 {
    10
}

const fn default_season_length() -> u64 {
    50
}

const fn default_catch_probability() -> f64 {
    0.05
}

const fn default_area_x() -> f64 {
    200.0
}

const fn default_area_y() -> f64 {
    150.0
}

const fn default_area_width() -> f64 {
    400.0
}

const fn default_area_height() -> f64 {
    350.0
}

fn default_output_dir() -> String {
    "analyze".to_owned()
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
