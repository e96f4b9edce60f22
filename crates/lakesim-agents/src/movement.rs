//! One movement tick for a single fish.
//!
//! Movement needs to read the whole population (for neighbor forces) while
//! mutating one member of it. [`move_fish`] splits the tick into three
//! phases so the borrows never overlap:
//!
//! 1. Mutable: pay the energy cost, advance the wander-target countdown.
//! 2. Shared: compute steering forces against the full slice.
//! 3. Mutable: integrate the acceleration and clamp to the world.

use lakesim_types::Vec2;
use lakesim_world::LakeBounds;
use rand::Rng;

use crate::fish::Fish;
use crate::steering::compute_forces;

/// Advance `population[index]` by one tick.
///
/// A fish with no energy left is marked dead and does not move. Other fish
/// in the slice are never modified. An out-of-range `index` is a no-op.
pub fn move_fish(
    population: &mut [Fish],
    index: usize,
    food: &[Vec2],
    bounds: &LakeBounds,
    rng: &mut impl Rng,
) {
    // 1. Energy and wander target
    let Some(fish) = population.get_mut(index) else {
        return;
    };
    if !fish.is_alive() {
        fish.die();
        return;
    }
    fish.begin_tick(bounds, rng);

    // 2. Steering against the current population
    let acceleration = compute_forces(population, index, food).combined();

    // 3. Kinematics
    if let Some(fish) = population.get_mut(index) {
        fish.integrate(acceleration, bounds);
    }
}
