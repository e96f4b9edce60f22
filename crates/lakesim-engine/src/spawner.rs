//! Initial population for a fresh lake.
//!
//! Builds the [`Simulation`] the engine runs: an empty lake sized from the
//! configuration, `initial_fish` fish at uniformly random positions, then
//! `initial_plants` plants at uniformly random positions, plus the
//! fisherman. Every draw comes from one `StdRng` seeded with
//! `world.seed`, which the simulation then keeps for the run, so a seed
//! reproduces the whole run.

use lakesim_core::config::SimulationConfig;
use lakesim_core::fisherman::Fisherman;
use lakesim_core::lake::Lake;
use lakesim_core::runner::Simulation;
use lakesim_world::Plant;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::error::EngineError;

/// Build the starting simulation from a validated configuration.
///
/// Draw order per fish: position x, position y, then the fish's own
/// creation draws. Plants follow, two draws each.
///
/// # Errors
///
/// Returns [`EngineError::Config`] for bad geometry, [`EngineError::Lake`]
/// for a bad season length or reproduction interval, and
/// [`EngineError::World`] for a bad fisherman probability.
pub fn build_simulation(config: &SimulationConfig) -> Result<Simulation, EngineError> {
    let bounds = config.bounds()?;
    let population = &config.population;
    let mut rng = StdRng::seed_from_u64(config.world.seed);

    let mut lake = Lake::new(
        bounds,
        config.time.season_length,
        population.reproduction_interval,
        population.initial_food,
    )?;

    // -----------------------------------------------------------------------
    // Fish
    // -----------------------------------------------------------------------
    for _ in 0..population.initial_fish {
        let position = lake.bounds().random_point(&mut rng);
        lake.spawn_fish(position, population.initial_fish_energy, &mut rng);
    }

    // -----------------------------------------------------------------------
    // Plants
    // -----------------------------------------------------------------------
    for _ in 0..population.initial_plants {
        let position = lake.bounds().random_point(&mut rng);
        lake.add_plant(Plant::new(position));
    }

    let fisherman = Fisherman::new(config.fisherman.probability, config.capture_area()?)?;

    info!(
        seed = config.world.seed,
        fish = lake.fish_count(),
        plants = lake.plant_count(),
        food = lake.food_amount(),
        oxygen = lake.oxygen_level(),
        fisherman_probability = fisherman.probability(),
        "Lake populated"
    );

    Ok(Simulation::new(lake, Some(fisherman), rng))
}
