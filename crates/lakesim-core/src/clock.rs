//! Lake clock and season tracking.
//!
//! The clock is the single source of truth for temporal state. It holds
//! the generation counter and the configured season length; the season and
//! the day/night phase are always derived from those two numbers and never
//! stored independently.
//!
//! - season index = `(tick / season_length) % 4`
//! - day iff `tick % season_length < season_length / 2` (integer halving)

use lakesim_types::{DayPhase, Season};

/// Errors that can occur when building a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Invalid time configuration (e.g. zero season length).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Generation counter plus season length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LakeClock {
    /// Current generation (0 before the first update).
    tick: u64,

    /// Number of ticks per season.
    season_length: u64,
}

impl LakeClock {
    /// Create a clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `season_length` is 0.
    pub fn new(season_length: u64) -> Result<Self, ClockError> {
        Self::from_parts(0, season_length)
    }

    /// Create a clock at an arbitrary tick (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `season_length` is 0.
    pub fn from_parts(tick: u64, season_length: u64) -> Result<Self, ClockError> {
        if season_length == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "season_length must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            tick,
            season_length,
        })
    }

    /// Advance by one tick and return the new tick. Saturates at `u64::MAX`.
    pub const fn advance(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Configured season length in ticks.
    pub const fn season_length(&self) -> u64 {
        self.season_length
    }

    /// Current season.
    pub fn season(&self) -> Season {
        // season_length >= 1 by construction.
        let index = self.tick.checked_div(self.season_length).unwrap_or(0);
        Season::from_index(index)
    }

    /// Tick offset within the current season (0-based).
    pub fn tick_within_season(&self) -> u64 {
        self.tick.checked_rem(self.season_length).unwrap_or(0)
    }

    /// Day for the first half of every season, night for the rest.
    ///
    /// With an odd season length the day half is the shorter one, and a
    /// season length of 1 is permanently night.
    pub fn day_phase(&self) -> DayPhase {
        let half = self.season_length.checked_div(2).unwrap_or(0);
        if self.tick_within_season() < half {
            DayPhase::Day
        } else {
            DayPhase::Night
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_season_length_is_rejected() {
        assert!(LakeClock::new(0).is_err());
    }

    #[test]
    fn clock_starts_at_zero_and_advances() {
        let mut clock = LakeClock::new(50).unwrap();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn advance_saturates() {
        let mut clock = LakeClock::from_parts(u64::MAX, 50).unwrap();
        assert_eq!(clock.advance(), u64::MAX);
    }

    #[test]
    fn seasons_cycle_every_season_length() {
        let cases = [
            (0, Season::Spring),
            (49, Season::Spring),
            (50, Season::Summer),
            (100, Season::Fall),
            (150, Season::Winter),
            (199, Season::Winter),
            (200, Season::Spring),
        ];
        for (tick, expected) in cases {
            let clock = LakeClock::from_parts(tick, 50).unwrap();
            assert_eq!(clock.season(), expected, "tick {tick}");
        }
    }

    #[test]
    fn day_is_first_half_of_season() {
        let day = LakeClock::from_parts(24, 50).unwrap();
        let night = LakeClock::from_parts(25, 50).unwrap();
        let next_day = LakeClock::from_parts(50, 50).unwrap();
        assert_eq!(day.day_phase(), DayPhase::Day);
        assert_eq!(night.day_phase(), DayPhase::Night);
        assert_eq!(next_day.day_phase(), DayPhase::Day);
    }

    #[test]
    fn odd_season_length_halves_down() {
        // 5 / 2 = 2: ticks 0 and 1 are day, 2..=4 are night.
        let phases: Vec<DayPhase> = (0..5)
            .map(|t| LakeClock::from_parts(t, 5).unwrap().day_phase())
            .collect();
        assert_eq!(
            phases,
            vec![
                DayPhase::Day,
                DayPhase::Day,
                DayPhase::Night,
                DayPhase::Night,
                DayPhase::Night
            ]
        );
        assert_eq!(LakeClock::from_parts(0, 1).unwrap().day_phase(), DayPhase::Night);
    }

    #[test]
    fn tick_within_season_wraps() {
        assert_eq!(LakeClock::from_parts(10, 50).unwrap().tick_within_season(), 10);
        assert_eq!(LakeClock::from_parts(60, 50).unwrap().tick_within_season(), 10);
    }
}
