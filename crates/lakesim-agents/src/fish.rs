//! Fish state and per-tick lifecycle.
//!
//! A fish owns its kinematics (position, velocity), its energy, and a
//! wander target it heads for between meals. The target is replaced with a
//! fresh random point every 30 to 90 ticks.
//!
//! A fish is alive while its energy is above zero. Every movement tick
//! costs one unit of energy; eating adds energy back. Once energy reaches
//! zero the fish is inert and the lake removes it at the end of the tick.

use core::ops::RangeInclusive;

use lakesim_types::{FishId, FishView, Vec2};
use lakesim_world::LakeBounds;
use rand::Rng;

/// Maximum velocity magnitude, shared by every fish.
pub const MAX_SPEED: f64 = 2.0;

/// Maximum magnitude of any single steering force.
pub const MAX_FORCE: f64 = 0.1;

/// Range the wander-target countdown is drawn from, in ticks.
pub const RETARGET_TICKS: RangeInclusive<u32> = 30..=90;

/// Energy given to a fish born through reproduction.
pub const OFFSPRING_ENERGY: u32 = 50;

/// Energy spent per movement tick.
pub const MOVE_COST: u32 = 1;

/// A single fish.
#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    id: FishId,
    energy: u32,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    retarget_countdown: u32,
}

impl Fish {
    /// Create a fish with fully specified state.
    pub const fn new(
        id: FishId,
        energy: u32,
        position: Vec2,
        velocity: Vec2,
        target: Vec2,
        retarget_countdown: u32,
    ) -> Self {
        Self {
            id,
            energy,
            position,
            velocity,
            target,
            retarget_countdown,
        }
    }

    /// Create a fish at `position` with a random unit heading and a random
    /// wander target.
    ///
    /// Draw order: velocity x, velocity y, retarget countdown, target x,
    /// target y.
    pub fn spawn(
        id: FishId,
        energy: u32,
        position: Vec2,
        bounds: &LakeBounds,
        rng: &mut impl Rng,
    ) -> Self {
        let vx = rng.random_range(-1.0..=1.0);
        let vy = rng.random_range(-1.0..=1.0);
        let velocity = Vec2::new(vx, vy).normalize_or_zero();
        let retarget_countdown = rng.random_range(RETARGET_TICKS);
        let target = bounds.random_point(rng);
        Self::new(id, energy, position, velocity, target, retarget_countdown)
    }

    /// Stable identifier.
    pub const fn id(&self) -> FishId {
        self.id
    }

    /// Remaining energy.
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Current position.
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity.
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current wander target.
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Ticks left before the wander target is replaced.
    pub const fn retarget_countdown(&self) -> u32 {
        self.retarget_countdown
    }

    /// Whether the fish still has energy.
    pub const fn is_alive(&self) -> bool {
        self.energy > 0
    }

    /// Add `food` units of energy.
    pub const fn eat(&mut self, food: u32) {
        self.energy = self.energy.saturating_add(food);
    }

    /// Mark the fish as dead.
    pub const fn die(&mut self) {
        self.energy = 0;
    }

    /// Read-only render view.
    pub const fn view(&self) -> FishView {
        FishView {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            energy: self.energy,
        }
    }

    /// Pay the movement cost and advance the wander-target countdown,
    /// drawing a new target and countdown when it runs out.
    pub(crate) fn begin_tick(&mut self, bounds: &LakeBounds, rng: &mut impl Rng) {
        self.energy = self.energy.saturating_sub(MOVE_COST);
        self.retarget_countdown = self.retarget_countdown.saturating_sub(1);
        if self.retarget_countdown == 0 {
            self.target = bounds.random_point(rng);
            self.retarget_countdown = rng.random_range(RETARGET_TICKS);
            tracing::trace!(
                fish_id = %self.id,
                target_x = self.target.x,
                target_y = self.target.y,
                "fish picked a new wander target"
            );
        }
    }

    /// Apply an acceleration: speed-limit the velocity, then move and clamp
    /// onto the world rectangle.
    pub(crate) fn integrate(&mut self, acceleration: Vec2, bounds: &LakeBounds) {
        self.velocity = (self.velocity + acceleration).clamp_length(MAX_SPEED);
        self.position = bounds.clamp(self.position + self.velocity);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn bounds() -> LakeBounds {
        LakeBounds::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn spawn_draws_unit_heading_and_valid_target() {
        let mut rng = SmallRng::seed_from_u64(3);
        for i in 0..200 {
            let fish = Fish::spawn(FishId::from_raw(i), 100, Vec2::new(10.0, 10.0), &bounds(), &mut rng);
            assert!(fish.velocity().length() <= 1.0 + 1e-9);
            assert!(bounds().contains(fish.target()));
            assert!(RETARGET_TICKS.contains(&fish.retarget_countdown()));
            assert_eq!(fish.energy(), 100);
        }
    }

    #[test]
    fn spawn_is_deterministic_for_a_seed() {
        let mut a = SmallRng::seed_from_u64(11);
        let mut b = SmallRng::seed_from_u64(11);
        let fa = Fish::spawn(FishId::from_raw(0), 100, Vec2::ZERO, &bounds(), &mut a);
        let fb = Fish::spawn(FishId::from_raw(0), 100, Vec2::ZERO, &bounds(), &mut b);
        assert_eq!(fa, fb);
    }

    #[test]
    fn begin_tick_costs_one_energy() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut fish = Fish::new(FishId::from_raw(0), 5, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, 40);
        fish.begin_tick(&bounds(), &mut rng);
        assert_eq!(fish.energy(), 4);
        assert_eq!(fish.retarget_countdown(), 39);
        assert_eq!(fish.target(), Vec2::ZERO);
    }

    #[test]
    fn countdown_expiry_redraws_target() {
        let mut rng = SmallRng::seed_from_u64(1);
        let far = Vec2::new(-100.0, -100.0);
        let mut fish = Fish::new(FishId::from_raw(0), 5, Vec2::ZERO, Vec2::ZERO, far, 1);
        fish.begin_tick(&bounds(), &mut rng);
        assert!(bounds().contains(fish.target()));
        assert!(RETARGET_TICKS.contains(&fish.retarget_countdown()));
    }

    #[test]
    fn integrate_clamps_speed_and_position() {
        let mut fish = Fish::new(
            FishId::from_raw(0),
            5,
            Vec2::new(799.5, 1.0),
            Vec2::new(2.0, -2.0),
            Vec2::ZERO,
            40,
        );
        fish.integrate(Vec2::new(1.0, 0.0), &bounds());
        assert!(fish.velocity().length() <= MAX_SPEED + 1e-9);
        assert!((fish.position().x - 800.0).abs() < f64::EPSILON);
        assert!(fish.position().y.abs() < f64::EPSILON);
    }

    #[test]
    fn eat_and_die() {
        let mut fish = Fish::new(FishId::from_raw(0), 1, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, 40);
        fish.eat(2);
        assert_eq!(fish.energy(), 3);
        fish.die();
        assert!(!fish.is_alive());
        assert_eq!(fish.view().energy, 0);
    }
}
