//! Lake state, tick cycle, fisherman, and run loop for the lake simulation.
//!
//! This crate owns the per-tick pipeline that drives the ecosystem:
//! clock, respiration, plant turnover, production, fish movement and
//! feeding, reproduction, marker aging, and the oxygen floor.
//!
//! # Modules
//!
//! - [`clock`] -- Tick counter with season and day/night derivation.
//! - [`config`] -- Configuration loading from `lakesim-config.yaml` into
//!   strongly-typed structs.
//! - [`fisherman`] -- Probabilistic predator working a capture rectangle.
//! - [`history`] -- Per-tick time series and the [`TickLog`] sink trait.
//! - [`lake`] -- The [`Lake`] aggregate: populations, pools, markers,
//!   counters.
//! - [`operator`] -- Pause/resume/stop/speed control shared with the API.
//! - [`runner`] -- [`Simulation`] and the async run loop.
//! - [`tick`] -- The per-tick update pipeline.
//!
//! [`TickLog`]: history::TickLog
//! [`Lake`]: lake::Lake
//! [`Simulation`]: runner::Simulation

pub mod clock;
pub mod config;
pub mod fisherman;
pub mod history;
pub mod lake;
pub mod operator;
pub mod runner;
pub mod tick;

#[cfg(test)]
mod test_support;
