//! The fisherman: a probabilistic predator working a fixed rectangle.
//!
//! Once per external tick the fisherman rolls against its probability. On
//! a hit it picks one fish uniformly among those standing inside its
//! capture area (edges included), pulls it out of the lake, leaves a
//! 30-tick marker where it was, and counts the catch against the current
//! season. The fisherman keeps no state between ticks.

use lakesim_types::{FishId, Season, Vec2};
use lakesim_world::{CaptureArea, WorldError, check_probability};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::info;

use crate::lake::Lake;

/// A fish the fisherman removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatchRecord {
    /// The caught fish.
    pub fish_id: FishId,
    /// Where it was caught.
    pub position: Vec2,
    /// Season of the catch.
    pub season: Season,
}

/// Probabilistic predator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fisherman {
    probability: f64,
    area: CaptureArea,
}

impl Fisherman {
    /// Create a fisherman.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidProbability`] if `probability` is not in
    /// `[0, 1]`.
    pub fn new(probability: f64, area: CaptureArea) -> Result<Self, WorldError> {
        Ok(Self {
            probability: check_probability(probability)?,
            area,
        })
    }

    /// Chance per tick of attempting a catch.
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// The capture rectangle.
    pub const fn area(&self) -> &CaptureArea {
        &self.area
    }

    /// Try to catch one fish.
    ///
    /// Draw order: the probability roll, then (only if fish are in range)
    /// the choice among them.
    pub fn attempt_catch(&self, lake: &mut Lake, rng: &mut impl Rng) -> Option<CatchRecord> {
        if rng.random::<f64>() >= self.probability {
            return None;
        }

        let in_range: Vec<usize> = lake
            .fish()
            .iter()
            .enumerate()
            .filter(|(_, fish)| self.area.contains(fish.position()))
            .map(|(index, _)| index)
            .collect();

        let index = *in_range.choose(rng)?;
        let fish = lake.remove_fish(index)?;
        let position = fish.position();
        let season = lake.record_catch(position);

        info!(
            tick = lake.tick(),
            fish_id = %fish.id(),
            x = position.x,
            y = position.y,
            %season,
            "Fisherman caught fish"
        );

        Some(CatchRecord {
            fish_id: fish.id(),
            position,
            season,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lakesim_agents::Fish;
    use lakesim_world::LakeBounds;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::lake::MARKER_TICKS;
    use crate::test_support::ScriptedRng;

    fn lake_with(positions: &[(f64, f64)]) -> Lake {
        let mut lake =
            Lake::new(LakeBounds::new(800.0, 600.0).unwrap(), 50, 10, 0.0).unwrap();
        for (i, (x, y)) in (0_u64..).zip(positions) {
            lake.add_fish(Fish::new(
                FishId::from_raw(i),
                100,
                Vec2::new(*x, *y),
                Vec2::ZERO,
                Vec2::ZERO,
                40,
            ));
        }
        lake
    }

    fn fisherman(probability: f64) -> Fisherman {
        let area = CaptureArea::from_origin_size(200.0, 150.0, 400.0, 350.0).unwrap();
        Fisherman::new(probability, area).unwrap()
    }

    #[test]
    fn rejects_bad_probability() {
        let area = CaptureArea::from_origin_size(0.0, 0.0, 1.0, 1.0).unwrap();
        assert!(Fisherman::new(1.2, area).is_err());
    }

    #[test]
    fn failed_roll_is_a_no_op() {
        let mut lake = lake_with(&[(300.0, 300.0)]);
        let mut rng = ScriptedRng::new(&[ScriptedRng::HALF]);
        assert!(fisherman(0.05).attempt_catch(&mut lake, &mut rng).is_none());
        assert_eq!(lake.fish().len(), 1);
        assert!(lake.markers().is_empty());
    }

    #[test]
    fn nothing_in_range_is_a_no_op() {
        let mut lake = lake_with(&[(10.0, 10.0), (790.0, 590.0)]);
        let mut rng = ScriptedRng::new(&[0]);
        assert!(fisherman(1.0).attempt_catch(&mut lake, &mut rng).is_none());
        assert_eq!(lake.fish().len(), 2);
    }

    #[test]
    fn catches_exactly_one_fish_inside_area() {
        let mut lake = lake_with(&[(10.0, 10.0), (200.0, 150.0), (600.0, 500.0), (700.0, 10.0)]);
        let mut rng = SmallRng::seed_from_u64(8);

        let record = fisherman(1.0).attempt_catch(&mut lake, &mut rng).unwrap();

        assert!(record.fish_id == FishId::from_raw(1) || record.fish_id == FishId::from_raw(2));
        assert_eq!(lake.fish().len(), 3);
        assert!(lake.fish().iter().all(|f| f.id() != record.fish_id));
        assert_eq!(record.season, Season::Spring);

        let marker = lake.markers().first().unwrap();
        assert_eq!(marker.position, record.position);
        assert_eq!(marker.remaining_ticks, MARKER_TICKS);
        assert_eq!(lake.season_counters().get(Season::Spring).caught, 1);
    }

    #[test]
    fn never_takes_fish_outside_area() {
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..200 {
            let mut lake = lake_with(&[(100.0, 100.0), (400.0, 300.0), (650.0, 520.0)]);
            if let Some(record) = fisherman(1.0).attempt_catch(&mut lake, &mut rng) {
                assert_eq!(record.fish_id, FishId::from_raw(1));
            }
        }
    }
}
