//! Fish agents and their steering model for the lake simulation.
//!
//! This crate holds the logic that operates on a single fish: its energy
//! and wander-target lifecycle, the five flocking and seeking forces, and
//! the per-tick movement step. It sits between `lakesim-types` (vector math
//! and views) and `lakesim-core` (which owns the population and the shared
//! resource pools).
//!
//! # Modules
//!
//! - [`fish`] -- [`Fish`] state, speed and force limits, energy lifecycle
//! - [`movement`] -- [`move_fish`], one tick of movement for one fish
//! - [`steering`] -- Separation, alignment, cohesion, seek-food, seek-target

pub mod fish;
pub mod movement;
pub mod steering;

pub use fish::{Fish, MAX_FORCE, MAX_SPEED, OFFSPRING_ENERGY};
pub use movement::move_fish;
pub use steering::{SteeringForces, compute_forces};
