//! Stationary plants that feed the lake's shared food pool.
//!
//! A plant's presence is what earns the shared pool its seasonal per-tick
//! increment. Each plant also carries its own food accumulator that grows
//! by [`FOOD_PER_TICK`] every tick. Nothing consumes the accumulator; it is
//! reported in snapshots only.

use lakesim_types::{PlantView, Vec2};

/// Accumulator value for a newly created plant.
pub const INITIAL_FOOD: f64 = 10.0;

/// Growth of a plant's own accumulator per tick.
pub const FOOD_PER_TICK: f64 = 0.5;

/// A stationary food source.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    position: Vec2,
    food_amount: f64,
}

impl Plant {
    /// Create a plant at `position` with the initial accumulator.
    pub const fn new(position: Vec2) -> Self {
        Self {
            position,
            food_amount: INITIAL_FOOD,
        }
    }

    /// Fixed position.
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current accumulator value.
    pub const fn food_amount(&self) -> f64 {
        self.food_amount
    }

    /// Grow the accumulator by one tick's worth.
    pub fn generate_food(&mut self) {
        self.food_amount += FOOD_PER_TICK;
    }

    /// Read-only render view.
    pub const fn view(&self) -> PlantView {
        PlantView {
            position: self.position,
            food_amount: self.food_amount,
        }
    }
}
