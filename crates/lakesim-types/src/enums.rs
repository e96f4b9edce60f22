//! Enumeration types for the lake simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// A season in the lake's annual cycle.
///
/// Seasons rotate every configured season length in ticks, in declaration
/// order, and modulate reproduction, food generation, and oxygen rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Mild growth, moderate breeding.
    Spring,
    /// Peak food and oxygen, highest breeding chance.
    Summer,
    /// Declining growth.
    Fall,
    /// Scarce food, weak daylight oxygen, plant die-off.
    Winter,
}

impl Season {
    /// All seasons in cycle order.
    pub const ALL: [Self; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    /// Season at `index` in the cycle, wrapping modulo 4.
    pub const fn from_index(index: u64) -> Self {
        match index % 4 {
            0 => Self::Spring,
            1 => Self::Summer,
            2 => Self::Fall,
            _ => Self::Winter,
        }
    }

    /// Human-readable season name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl core::fmt::Display for Season {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Day / night
// ---------------------------------------------------------------------------

/// Half of a season: plants produce oxygen by day and consume it at night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DayPhase {
    /// First half of the season.
    Day,
    /// Second half of the season.
    Night,
}

impl DayPhase {
    /// Whether this is the daylight half.
    pub const fn is_day(self) -> bool {
        matches!(self, Self::Day)
    }
}
