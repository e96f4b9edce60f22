//! Read-only records the core hands to its external consumers.
//!
//! Renderers receive a [`LakeSnapshot`] each tick, loggers receive one
//! [`TimeSeriesPoint`] per tick, and the shutdown summarizer receives the
//! season-keyed [`SeasonCounters`] plus the full time series. None of these
//! records are ever fed back into the simulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DayPhase, Season};
use crate::ids::FishId;
use crate::vector::Vec2;

// ---------------------------------------------------------------------------
// Entity views
// ---------------------------------------------------------------------------

/// Render view of a single live fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FishView {
    /// Fish identifier.
    pub id: FishId,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Remaining energy.
    pub energy: u32,
}

/// Render view of a single plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantView {
    /// Fixed plant position.
    pub position: Vec2,
    /// The plant's own food accumulator.
    pub food_amount: f64,
}

/// Transient marker left where the fisherman caught a fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CatchMarker {
    /// Position of the fish when it was caught.
    pub position: Vec2,
    /// Ticks until the marker disappears.
    pub remaining_ticks: u32,
}

/// Inclusive rectangle `x1 <= x <= x2`, `y1 <= y <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Rect {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

// ---------------------------------------------------------------------------
// Stats and snapshots
// ---------------------------------------------------------------------------

/// Headline numbers shown alongside the rendered lake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LakeStats {
    /// Live fish count.
    pub fish_count: u32,
    /// Shared food pool.
    pub food_amount: f64,
    /// Shared oxygen pool.
    pub oxygen_level: f64,
    /// Current season.
    pub season: Season,
}

/// Complete read-only view of the lake after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LakeSnapshot {
    /// Generation counter at the time of the snapshot.
    pub tick: u64,
    /// World width.
    pub width: f64,
    /// World height.
    pub height: f64,
    /// Current season.
    pub season: Season,
    /// Day or night half of the current season.
    pub phase: DayPhase,
    /// Live fish in population order.
    pub fish: Vec<FishView>,
    /// Live plants in collection order.
    pub plants: Vec<PlantView>,
    /// Active catch markers, oldest first.
    pub markers: Vec<CatchMarker>,
    /// The fisherman's capture rectangle, if a fisherman is attached.
    pub capture_area: Option<Rect>,
    /// Headline stats.
    pub stats: LakeStats,
}

/// One tick's entry in the logged time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TimeSeriesPoint {
    /// Generation counter.
    pub tick: u64,
    /// Live fish count at the end of the tick.
    pub fish_count: u32,
    /// Food pool at the end of the tick.
    pub food_amount: f64,
    /// Oxygen pool at the end of the tick.
    pub oxygen_level: f64,
}

// ---------------------------------------------------------------------------
// Season tallies
// ---------------------------------------------------------------------------

/// Births and catches accumulated while a season was active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeasonTally {
    /// Fish born.
    pub born: u64,
    /// Fish caught.
    pub caught: u64,
}

/// Lifetime birth and catch counts keyed by season.
///
/// All four seasons are present from construction, so consumers never see a
/// missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SeasonCounters(BTreeMap<Season, SeasonTally>);

impl SeasonCounters {
    /// Create counters with every season at zero.
    pub fn new() -> Self {
        Self(
            Season::ALL
                .iter()
                .map(|season| (*season, SeasonTally::default()))
                .collect(),
        )
    }

    /// Add `count` births to `season`.
    pub fn record_births(&mut self, season: Season, count: u64) {
        let tally = self.0.entry(season).or_default();
        tally.born = tally.born.saturating_add(count);
    }

    /// Add one catch to `season`.
    pub fn record_catch(&mut self, season: Season) {
        let tally = self.0.entry(season).or_default();
        tally.caught = tally.caught.saturating_add(1);
    }

    /// Tally for one season.
    pub fn get(&self, season: Season) -> SeasonTally {
        self.0.get(&season).copied().unwrap_or_default()
    }

    /// Births across all seasons.
    pub fn total_born(&self) -> u64 {
        self.0
            .values()
            .fold(0_u64, |acc, tally| acc.saturating_add(tally.born))
    }

    /// Catches across all seasons.
    pub fn total_caught(&self) -> u64 {
        self.0
            .values()
            .fold(0_u64, |acc, tally| acc.saturating_add(tally.caught))
    }

    /// Iterate tallies in season order.
    pub fn iter(&self) -> impl Iterator<Item = (Season, SeasonTally)> + '_ {
        self.0.iter().map(|(season, tally)| (*season, *tally))
    }
}

impl Default for SeasonCounters {
    fn default() -> Self {
        Self::new()
    }
}
