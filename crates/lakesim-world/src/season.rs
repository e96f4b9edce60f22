//! Per-season parameters for the lake ecosystem.
//!
//! Every tick the lake looks up the active season's [`SeasonProfile`] and
//! uses it to drive fish reproduction, food and oxygen generation, and the
//! plant population's stochastic growth and die-off.
//!
//! | Season | fish repro | food rate | day O2 | plant repro | plant die |
//! |--------|-----------:|----------:|-------:|------------:|----------:|
//! | Spring | 0.04       | 1.0       | 0.2    | 0.003       | 0.0001    |
//! | Summer | 0.05       | 1.2       | 0.3    | 0.005       | 0.002     |
//! | Fall   | 0.03       | 0.8       | 0.1    | 0.002       | 0.0005    |
//! | Winter | 0.02       | 0.5       | 0.05   | 0.001       | 0.008     |
//!
//! At night every plant contributes [`NIGHT_OXYGEN_RATE`] regardless of
//! season.

use lakesim_types::{DayPhase, Season};

/// Oxygen contributed by each plant during the night half of a season.
pub const NIGHT_OXYGEN_RATE: f64 = -0.1;

/// Fixed rates for one season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonProfile {
    /// Per-fish chance of triggering a birth on a reproduction tick.
    pub reproduction_chance: f64,
    /// Food added to the shared pool per plant per tick.
    pub food_rate: f64,
    /// Oxygen added to the shared pool per plant per daylight tick.
    pub day_oxygen_rate: f64,
    /// Per-plant chance of seeding a new plant each tick.
    pub plant_reproduce_chance: f64,
    /// Per-plant chance of dying each tick.
    pub plant_die_chance: f64,
}

impl SeasonProfile {
    /// Return the fixed rates for the given season.
    pub const fn for_season(season: Season) -> Self {
        match season {
            Season::Spring => Self {
                reproduction_chance: 0.04,
                food_rate: 1.0,
                day_oxygen_rate: 0.2,
                plant_reproduce_chance: 0.003,
                plant_die_chance: 0.0001,
            },
            Season::Summer => Self {
                reproduction_chance: 0.05,
                food_rate: 1.2,
                day_oxygen_rate: 0.3,
                plant_reproduce_chance: 0.005,
                plant_die_chance: 0.002,
            },
            Season::Fall => Self {
                reproduction_chance: 0.03,
                food_rate: 0.8,
                day_oxygen_rate: 0.1,
                plant_reproduce_chance: 0.002,
                plant_die_chance: 0.0005,
            },
            Season::Winter => Self {
                reproduction_chance: 0.02,
                food_rate: 0.5,
                day_oxygen_rate: 0.05,
                plant_reproduce_chance: 0.001,
                plant_die_chance: 0.008,
            },
        }
    }

    /// Signed oxygen contribution per plant for the given half of the season.
    pub const fn oxygen_rate(&self, phase: DayPhase) -> f64 {
        match phase {
            DayPhase::Day => self.day_oxygen_rate,
            DayPhase::Night => NIGHT_OXYGEN_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn summer_is_the_most_productive_season() {
        let summer = SeasonProfile::for_season(Season::Summer);
        for season in Season::ALL {
            let profile = SeasonProfile::for_season(season);
            assert!(profile.food_rate <= summer.food_rate);
            assert!(profile.reproduction_chance <= summer.reproduction_chance);
        }
    }

    #[test]
    fn night_oxygen_is_negative_in_every_season() {
        for season in Season::ALL {
            let profile = SeasonProfile::for_season(season);
            assert!(close(profile.oxygen_rate(DayPhase::Night), -0.1));
            assert!(profile.oxygen_rate(DayPhase::Day) > 0.0);
        }
    }

    #[test]
    fn spring_rates_match_table() {
        let spring = SeasonProfile::for_season(Season::Spring);
        assert!(close(spring.reproduction_chance, 0.04));
        assert!(close(spring.food_rate, 1.0));
        assert!(close(spring.oxygen_rate(DayPhase::Day), 0.2));
        assert!(close(spring.plant_reproduce_chance, 0.003));
        assert!(close(spring.plant_die_chance, 0.0001));
    }

    #[test]
    fn winter_kills_plants_fastest() {
        let winter = SeasonProfile::for_season(Season::Winter);
        for season in Season::ALL {
            assert!(SeasonProfile::for_season(season).plant_die_chance <= winter.plant_die_chance);
        }
    }
}
