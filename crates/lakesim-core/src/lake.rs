//! The lake aggregate: populations, shared pools, and season counters.
//!
//! [`Lake`] exclusively owns every mutable collection in the simulation.
//! Fish never touch the food or oxygen pools directly; the lake feeds them
//! during its update. The per-tick algorithm lives in [`crate::tick`]; this
//! module holds construction, accessors, and the read-only views handed to
//! renderers and loggers.
//!
//! Fish identifiers come from a monotonic counter, so an id is never reused
//! even after the fish that held it dies or is caught.

use lakesim_agents::Fish;
use lakesim_types::{
    CatchMarker, FishId, LakeSnapshot, LakeStats, Season, SeasonCounters, Vec2,
};
use lakesim_world::{LakeBounds, Plant};
use rand::Rng;

use crate::clock::{ClockError, LakeClock};
use crate::history::TimeSeries;

/// Oxygen level of a freshly created lake.
pub const INITIAL_OXYGEN: f64 = 100.0;

/// Ticks a catch marker stays visible.
pub const MARKER_TICKS: u32 = 30;

/// Errors that can occur when building a lake.
#[derive(Debug, thiserror::Error)]
pub enum LakeError {
    /// The season clock could not be built.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// Reproduction interval must be at least one tick.
    #[error("reproduction interval must be at least 1")]
    InvalidReproductionInterval,

    /// A pool was given a negative or non-finite starting value.
    #[error("invalid starting {pool}: {value}")]
    InvalidPool {
        /// Which pool.
        pool: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Closed aquatic ecosystem.
#[derive(Debug, Clone)]
pub struct Lake {
    pub(crate) bounds: LakeBounds,
    pub(crate) clock: LakeClock,
    pub(crate) reproduction_interval: u64,
    pub(crate) fish: Vec<Fish>,
    pub(crate) plants: Vec<Plant>,
    pub(crate) food_amount: f64,
    pub(crate) oxygen_level: f64,
    pub(crate) markers: Vec<CatchMarker>,
    pub(crate) counters: SeasonCounters,
    pub(crate) series: TimeSeries,
    next_fish_id: u64,
}

impl Lake {
    /// Create an empty lake with [`INITIAL_OXYGEN`] and the given food pool.
    ///
    /// # Errors
    ///
    /// Returns [`LakeError`] for a zero season length or reproduction
    /// interval, or a negative food pool.
    pub fn new(
        bounds: LakeBounds,
        season_length: u64,
        reproduction_interval: u64,
        initial_food: f64,
    ) -> Result<Self, LakeError> {
        let clock = LakeClock::new(season_length)?;
        if reproduction_interval == 0 {
            return Err(LakeError::InvalidReproductionInterval);
        }
        if !initial_food.is_finite() || initial_food < 0.0 {
            return Err(LakeError::InvalidPool {
                pool: "food",
                value: initial_food,
            });
        }

        Ok(Self {
            bounds,
            clock,
            reproduction_interval,
            fish: Vec::new(),
            plants: Vec::new(),
            food_amount: initial_food,
            oxygen_level: INITIAL_OXYGEN,
            markers: Vec::new(),
            counters: SeasonCounters::new(),
            series: TimeSeries::new(),
            next_fish_id: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Population management
    // -----------------------------------------------------------------------

    /// Reserve the next unused fish id.
    pub const fn issue_fish_id(&mut self) -> FishId {
        let id = FishId::from_raw(self.next_fish_id);
        self.next_fish_id = self.next_fish_id.saturating_add(1);
        id
    }

    /// Spawn a fish at `position` with a fresh id, random heading, and
    /// random wander target. Returns the new id.
    pub fn spawn_fish(&mut self, position: Vec2, energy: u32, rng: &mut impl Rng) -> FishId {
        let id = self.issue_fish_id();
        let fish = Fish::spawn(id, energy, self.bounds.clamp(position), &self.bounds, rng);
        self.fish.push(fish);
        id
    }

    /// Append an already built fish. The id counter moves past its id.
    pub fn add_fish(&mut self, fish: Fish) {
        let next = fish.id().into_inner().saturating_add(1);
        self.next_fish_id = self.next_fish_id.max(next);
        self.fish.push(fish);
    }

    /// Append a plant.
    pub fn add_plant(&mut self, plant: Plant) {
        self.plants.push(plant);
    }

    /// Remove and return the fish at `index` in population order.
    pub fn remove_fish(&mut self, index: usize) -> Option<Fish> {
        (index < self.fish.len()).then(|| self.fish.remove(index))
    }

    /// Leave a catch marker at `position` and count the catch against the
    /// current season. Returns that season.
    pub fn record_catch(&mut self, position: Vec2) -> Season {
        let season = self.clock.season();
        self.markers.push(CatchMarker {
            position,
            remaining_ticks: MARKER_TICKS,
        });
        self.counters.record_catch(season);
        season
    }

    /// Overwrite the food pool, clamped at zero.
    pub const fn set_food_amount(&mut self, amount: f64) {
        self.food_amount = amount.max(0.0);
    }

    /// Overwrite the oxygen pool, clamped at zero.
    pub const fn set_oxygen_level(&mut self, level: f64) {
        self.oxygen_level = level.max(0.0);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// World rectangle.
    pub const fn bounds(&self) -> &LakeBounds {
        &self.bounds
    }

    /// Season clock.
    pub const fn clock(&self) -> &LakeClock {
        &self.clock
    }

    /// Current generation.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Current season.
    pub fn season(&self) -> Season {
        self.clock.season()
    }

    /// Configured reproduction interval.
    pub const fn reproduction_interval(&self) -> u64 {
        self.reproduction_interval
    }

    /// Live fish in population order.
    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    /// Live plants in collection order.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Shared food pool.
    pub const fn food_amount(&self) -> f64 {
        self.food_amount
    }

    /// Shared oxygen pool.
    pub const fn oxygen_level(&self) -> f64 {
        self.oxygen_level
    }

    /// Active catch markers, oldest first.
    pub fn markers(&self) -> &[CatchMarker] {
        &self.markers
    }

    /// Lifetime births and catches per season.
    pub const fn season_counters(&self) -> &SeasonCounters {
        &self.counters
    }

    /// Every tick's fish, food, and oxygen values so far.
    pub const fn time_series(&self) -> &TimeSeries {
        &self.series
    }

    /// Live fish count, saturating at `u32::MAX`.
    pub fn fish_count(&self) -> u32 {
        u32::try_from(self.fish.len()).unwrap_or(u32::MAX)
    }

    /// Live plant count, saturating at `u32::MAX`.
    pub fn plant_count(&self) -> u32 {
        u32::try_from(self.plants.len()).unwrap_or(u32::MAX)
    }

    /// Number of fish ids issued so far, births and initial spawns alike.
    pub const fn total_fish_spawned(&self) -> u64 {
        self.next_fish_id
    }

    /// Whether every fish is gone.
    pub fn is_extinct(&self) -> bool {
        self.fish.is_empty()
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Headline numbers: fish count, food, oxygen, season.
    pub fn stats(&self) -> LakeStats {
        LakeStats {
            fish_count: self.fish_count(),
            food_amount: self.food_amount,
            oxygen_level: self.oxygen_level,
            season: self.clock.season(),
        }
    }

    /// Complete read-only view for renderers. `capture_area` is left empty;
    /// the run loop fills it in when a fisherman is attached.
    pub fn snapshot(&self) -> LakeSnapshot {
        LakeSnapshot {
            tick: self.clock.tick(),
            width: self.bounds.width(),
            height: self.bounds.height(),
            season: self.clock.season(),
            phase: self.clock.day_phase(),
            fish: self.fish.iter().map(Fish::view).collect(),
            plants: self.plants.iter().map(Plant::view).collect(),
            markers: self.markers.clone(),
            capture_area: None,
            stats: self.stats(),
        }
    }
}

/// Count as a float multiplier for per-entity rates.
pub(crate) fn count_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}
