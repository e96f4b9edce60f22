//! Flocking and seeking forces.
//!
//! Each tick a fish combines five bounded forces into one acceleration:
//!
//! | force        | weight | source                                    |
//! |--------------|-------:|-------------------------------------------|
//! | separation   | 1.5    | live fish closer than 20 units            |
//! | alignment    | 1.0    | mean velocity of live fish within 50      |
//! | cohesion     | 1.0    | seek toward mean position within 50       |
//! | seek food    | 2.0    | seek toward the nearest plant             |
//! | seek target  | 2.0    | seek toward the fish's wander target      |
//!
//! Every individual force is clamped to [`MAX_FORCE`]. The weighted sum is
//! not clamped; the velocity limit is applied when the fish integrates.
//!
//! A neighbor must be strictly farther than zero and strictly closer than
//! the radius, so a fish sitting exactly on top of another ignores it. A
//! force with no contributing neighbors is exactly [`Vec2::ZERO`].

use lakesim_types::Vec2;

use crate::fish::{Fish, MAX_FORCE, MAX_SPEED};

/// Radius within which nearby fish push each other apart.
pub const SEPARATION_RADIUS: f64 = 20.0;

/// Radius for alignment and cohesion neighbors.
pub const NEIGHBOR_RADIUS: f64 = 50.0;

/// Weight of the separation force.
pub const SEPARATION_WEIGHT: f64 = 1.5;
/// Weight of the alignment force.
pub const ALIGNMENT_WEIGHT: f64 = 1.0;
/// Weight of the cohesion force.
pub const COHESION_WEIGHT: f64 = 1.0;
/// Weight of the seek-food force.
pub const SEEK_FOOD_WEIGHT: f64 = 2.0;
/// Weight of the seek-target force.
pub const SEEK_TARGET_WEIGHT: f64 = 2.0;

/// The five unweighted forces acting on one fish for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    /// Push away from crowding neighbors.
    pub separation: Vec2,
    /// Turn toward the neighbors' mean heading.
    pub alignment: Vec2,
    /// Pull toward the neighbors' centroid.
    pub cohesion: Vec2,
    /// Pull toward the nearest plant.
    pub seek_food: Vec2,
    /// Pull toward the wander target.
    pub seek_target: Vec2,
}

impl SteeringForces {
    /// Weighted sum of all five forces.
    pub fn combined(&self) -> Vec2 {
        self.separation * SEPARATION_WEIGHT
            + self.alignment * ALIGNMENT_WEIGHT
            + self.cohesion * COHESION_WEIGHT
            + self.seek_food * SEEK_FOOD_WEIGHT
            + self.seek_target * SEEK_TARGET_WEIGHT
    }
}

/// Compute the forces on `population[index]`.
///
/// The fish at `index` is excluded from its own neighbor set by position in
/// the slice, never by value, and fish that have already run out of energy
/// this tick are ignored. Returns all-zero forces if `index` is out of
/// range.
pub fn compute_forces(population: &[Fish], index: usize, food: &[Vec2]) -> SteeringForces {
    let Some(fish) = population.get(index) else {
        return SteeringForces::default();
    };

    let neighbors = || {
        population
            .iter()
            .enumerate()
            .filter(move |(i, other)| *i != index && other.is_alive())
            .map(|(_, other)| other)
    };

    SteeringForces {
        separation: separation(fish, neighbors()),
        alignment: alignment(fish, neighbors()),
        cohesion: cohesion(fish, neighbors()),
        seek_food: seek_food(fish, food),
        seek_target: seek(fish, fish.target()),
    }
}

/// Steer toward `target` at full speed, clamped to [`MAX_FORCE`].
///
/// A target at the fish's own position yields a desired velocity of zero,
/// so the fish brakes rather than producing `NaN`.
pub fn seek(fish: &Fish, target: Vec2) -> Vec2 {
    let desired = (target - fish.position()).normalize_or_zero().scale(MAX_SPEED);
    (desired - fish.velocity()).clamp_length(MAX_FORCE)
}

/// Repulsion from neighbors closer than [`SEPARATION_RADIUS`], weighted by
/// inverse distance.
pub fn separation<'a>(fish: &Fish, others: impl IntoIterator<Item = &'a Fish>) -> Vec2 {
    let position = fish.position();
    let mut sum = Vec2::ZERO;
    let mut count: u32 = 0;

    for other in others {
        let distance = position.distance(other.position());
        if distance > 0.0 && distance < SEPARATION_RADIUS {
            sum += (position - other.position()).normalize_or_zero() / distance;
            count = count.saturating_add(1);
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    (sum / f64::from(count))
        .normalize()
        .map_or(Vec2::ZERO, |heading| {
            (heading.scale(MAX_SPEED) - fish.velocity()).clamp_length(MAX_FORCE)
        })
}

/// Turn toward the mean velocity of neighbors within [`NEIGHBOR_RADIUS`].
pub fn alignment<'a>(fish: &Fish, others: impl IntoIterator<Item = &'a Fish>) -> Vec2 {
    let Some((sum, count)) = sum_within(fish, others, NEIGHBOR_RADIUS, Fish::velocity) else {
        return Vec2::ZERO;
    };

    let desired = (sum / f64::from(count)).normalize_or_zero().scale(MAX_SPEED);
    (desired - fish.velocity()).clamp_length(MAX_FORCE)
}

/// Seek the centroid of neighbors within [`NEIGHBOR_RADIUS`].
pub fn cohesion<'a>(fish: &Fish, others: impl IntoIterator<Item = &'a Fish>) -> Vec2 {
    let Some((sum, count)) = sum_within(fish, others, NEIGHBOR_RADIUS, Fish::position) else {
        return Vec2::ZERO;
    };

    seek(fish, sum / f64::from(count))
}

/// Seek the nearest food position. Ties go to the earliest entry.
pub fn seek_food(fish: &Fish, food: &[Vec2]) -> Vec2 {
    nearest(fish.position(), food).map_or(Vec2::ZERO, |target| seek(fish, target))
}

/// Nearest point to `from`, first minimum wins.
pub fn nearest(from: Vec2, points: &[Vec2]) -> Option<Vec2> {
    let mut best: Option<(Vec2, f64)> = None;
    for point in points {
        let distance = from.distance(*point);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((*point, distance)),
        }
    }
    best.map(|(point, _)| point)
}

/// Sum `field` over neighbors strictly within `radius`, returning the sum
/// and the neighbor count, or `None` when there are no neighbors.
fn sum_within<'a>(
    fish: &Fish,
    others: impl IntoIterator<Item = &'a Fish>,
    radius: f64,
    field: fn(&Fish) -> Vec2,
) -> Option<(Vec2, u32)> {
    let position = fish.position();
    let mut sum = Vec2::ZERO;
    let mut count: u32 = 0;

    for other in others {
        let distance = position.distance(other.position());
        if distance > 0.0 && distance < radius {
            sum += field(other);
            count = count.saturating_add(1);
        }
    }

    (count > 0).then_some((sum, count))
}
