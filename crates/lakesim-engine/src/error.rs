//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup, the run, and shutdown output.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lakesim_core::config::ConfigError,
    },

    /// The lake could not be constructed.
    #[error("lake error: {source}")]
    Lake {
        /// The underlying lake error.
        #[from]
        source: lakesim_core::lake::LakeError,
    },

    /// Geometry or probability rejected while building the simulation.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: lakesim_world::WorldError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: lakesim_core::runner::RunnerError,
    },

    /// Reading or writing under the output directory failed.
    #[error("output error at {}: {source}", path.display())]
    Output {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The run summary could not be serialized.
    #[error("summary error: {source}")]
    Summary {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Observer API server failed to start.
    #[error("observer error: {message}")]
    Observer {
        /// Description of the observer failure.
        message: String,
    },
}

impl EngineError {
    /// Wrap an I/O error with the path it concerns.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}
