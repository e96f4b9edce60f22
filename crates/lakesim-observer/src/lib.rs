//! Observer API server for the lake simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/ticks`) for real-time tick summary
//!   streaming via [`tokio::sync::broadcast`]
//! - **REST endpoints** for renderers and plotters (lake snapshot, stats,
//!   season tallies, time series)
//! - **Operator REST endpoints** for runtime control (pause, resume,
//!   speed, status, stop)
//! - **Minimal HTML status page** (`GET /`) showing current tick, season,
//!   fish, food, and oxygen
//!
//! # Architecture
//!
//! The observer reads from an in-memory [`SimulationSnapshot`] that is
//! updated each tick by the engine. REST reads never touch the live lake,
//! so the observer never blocks the tick loop. `WebSocket` clients receive
//! tick summaries via a broadcast channel with automatic lag handling.
//!
//! [`SimulationSnapshot`]: state::SimulationSnapshot

pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, SimulationSnapshot, TickBroadcast};
