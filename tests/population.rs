//! Long-run population dynamics: the stable boundary condition must keep
//! the item mix balanced, and the scarce one must leave it unconstrained
//! while respecting the population cap.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vivarium::{BoundaryCondition, Brain, Kind, SimConfig, World, ACTIONS};

struct SeededRandomBrain {
    rng: ChaCha8Rng,
}

impl Brain for SeededRandomBrain {
    fn decide(&mut self, _state: &[f64]) -> usize {
        self.rng.gen_range(0..ACTIONS)
    }
    fn learn(&mut self, _reward: f64) {}
    fn set_training_mode(&mut self, _enabled: bool) {}
}

fn random_world(condition: BoundaryCondition, seed: u64) -> World {
    let mut config = SimConfig::default();
    config.world.boundary_condition = condition;
    config.world.seed = seed;
    World::new(config, |_| {
        Box::new(SeededRandomBrain {
            rng: ChaCha8Rng::seed_from_u64(42),
        })
    })
    .expect("world")
}

fn item_a_ratio(world: &World) -> f64 {
    let total = world.items().len();
    if total == 0 {
        return 0.5;
    }
    let item_a = world
        .items()
        .iter()
        .filter(|i| i.body.kind == Kind::ItemA)
        .count();
    item_a as f64 / total as f64
}

#[test]
fn test_stable_condition_keeps_item_mix_balanced() {
    let mut world = random_world(BoundaryCondition::Stable, 0);

    // Let turnover churn the initial population, then sample the mix over
    // the back half of the run.
    let mut samples = Vec::new();
    for tick in 0..5000u64 {
        world.tick();
        if tick >= 3000 && tick % 50 == 0 {
            samples.push(item_a_ratio(&world));
        }
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    assert!(
        (0.25..=0.75).contains(&mean),
        "stable spawning let the mean item A ratio drift to {mean}"
    );
    assert!(
        samples.iter().all(|r| (0.1..=0.9).contains(r)),
        "a sampled ratio left the plausible band: {samples:?}"
    );
    assert!(!world.items().is_empty(), "population collapsed");
}

#[test]
fn test_scarce_condition_runs_within_population_cap() {
    let mut world = random_world(BoundaryCondition::Scarce, 1);
    let cap = world.config().world.max_items;

    for _ in 0..2000 {
        world.tick();
        assert!(world.items().len() <= cap);
    }
    assert!(!world.items().is_empty());
}

#[test]
fn test_consumption_shows_up_in_metrics_over_a_long_run() {
    let mut world = random_world(BoundaryCondition::Stable, 2);
    for _ in 0..3000 {
        world.tick();
    }
    // Random walkers in a 600x600 arena with 50 drifting items will
    // stumble into food well within a few thousand ticks.
    assert!(world.metrics().counter("items_consumed") > 0);
    assert_eq!(world.metrics().tick_count(), 3000);
}
