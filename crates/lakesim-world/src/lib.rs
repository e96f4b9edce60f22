//! Geometry, plants, and seasonal parameters for the lake simulation.
//!
//! This crate models the passive parts of the lake: the world rectangle
//! agents are confined to, the fisherman's capture zone, the plants that
//! feed the shared food pool, and the fixed per-season rate table.
//!
//! # Modules
//!
//! - [`area`] -- [`LakeBounds`] clamping and random placement, the inclusive
//!   [`CaptureArea`], probability validation.
//! - [`error`] -- Error types for geometry construction.
//! - [`plant`] -- [`Plant`] with its per-tick food accumulator.
//! - [`season`] -- [`SeasonProfile`] rates per season, day and night oxygen.

pub mod area;
pub mod error;
pub mod plant;
pub mod season;

// Re-export primary types at crate root.
pub use area::{CaptureArea, LakeBounds, check_probability};
pub use error::WorldError;
pub use plant::Plant;
pub use season::{NIGHT_OXYGEN_RATE, SeasonProfile};
