//! The arena: owns every entity, drives the six-phase tick pipeline and
//! resolves consumption.
//!
//! The pipeline is single-threaded and order-sensitive: agent list order is
//! the collision tie-break, and the observation pass runs at the *end* of a
//! tick so every decision is made from the state observed before the
//! agent's own action, a deliberate one-tick perception lag that keeps
//! reward attribution consistent.

use crate::agent::{self, Agent};
use crate::brain::Brain;
use crate::config::SimConfig;
use crate::entity::Wall;
use crate::error::SimError;
use crate::geometry::Vec2;
use crate::item::{Item, ItemSpawner};
use crate::metrics::Metrics;
use crate::sensor::SenseContext;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Builds a brain for an agent whose state vector has the given length.
pub type BrainFactory = Box<dyn FnMut(usize) -> Box<dyn Brain>>;

pub struct World {
    config: SimConfig,
    clock: u64,
    walls: Vec<Wall>,
    agents: Vec<Agent>,
    items: Vec<Item>,
    spawner: ItemSpawner,
    rng: ChaCha8Rng,
    brain_factory: BrainFactory,
    metrics: Metrics,
}

impl World {
    /// Creates and populates an arena. The factory is retained so that
    /// [`World::reset`] can rebuild agents with the same parameters.
    pub fn new<F>(config: SimConfig, brain_factory: F) -> anyhow::Result<Self>
    where
        F: FnMut(usize) -> Box<dyn Brain> + 'static,
    {
        config.validate()?;

        let spawner = ItemSpawner::new(
            config.world.width,
            config.world.height,
            config.world.spawn_margin,
            config.world.boundary_condition,
        );
        let rng = ChaCha8Rng::seed_from_u64(config.world.seed);

        let mut world = Self {
            config,
            clock: 0,
            walls: Vec::new(),
            agents: Vec::new(),
            items: Vec::new(),
            spawner,
            rng,
            brain_factory: Box::new(brain_factory),
            metrics: Metrics::new(),
        };
        world.init();
        Ok(world)
    }

    fn init(&mut self) {
        self.clock = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.world.seed);
        self.walls = Self::boundary_walls(self.config.world.width, self.config.world.height);
        self.agents.clear();
        self.items.clear();

        for index in 0..self.config.world.max_agents {
            self.spawn_agent(index);
        }
        for _ in 0..self.config.world.max_items {
            let item = self
                .spawner
                .create(&self.items, &self.config.items, &mut self.rng);
            self.items.push(item);
        }

        tracing::debug!(
            agents = self.agents.len(),
            items = self.items.len(),
            seed = self.config.world.seed,
            "Arena initialized"
        );

        self.observe_for_next_decision();
    }

    fn boundary_walls(width: f64, height: f64) -> Vec<Wall> {
        vec![
            Wall::new(0.0, 0.0, width, 0.0),
            Wall::new(width, 0.0, width, height),
            Wall::new(width, height, 0.0, height),
            Wall::new(0.0, height, 0.0, 0.0),
        ]
    }

    /// Agents alternate sensor rigs in creation order: ray rigs on even
    /// indices, field rigs on odd.
    fn spawn_agent(&mut self, index: usize) {
        let margin = self.config.world.spawn_margin;
        let x = self.rng.gen_range(margin..self.config.world.width - margin);
        let y = self.rng.gen_range(margin..self.config.world.height - margin);

        let sensors = if index % 2 == 0 {
            agent::lidar_rig(&self.config.sensors)
        } else {
            agent::radar_rig(&self.config.sensors)
        };
        let state_len = sensors.state_len() + 2;
        let brain = (self.brain_factory)(state_len);

        self.agents.push(Agent::new(
            Vec2::new(x, y),
            self.config.agents.size,
            sensors,
            brain,
        ));
    }

    /// Advances the simulation by one tick: age/reset, decide (from the
    /// previous tick's observations), act, item phase, learn, then observe
    /// for the next tick.
    pub fn tick(&mut self) {
        let started = Instant::now();
        self.clock += 1;

        self.prepare_world_objects();
        self.make_decisions();
        self.act_on_decisions();
        self.tick_all_items();
        self.learn_from_decisions();
        self.observe_for_next_decision();

        self.metrics
            .record_tick(started.elapsed(), self.agents.len(), self.items.len());
    }

    fn prepare_world_objects(&mut self) {
        for item in &mut self.items {
            item.body.increase_age();
        }
        for agent in &mut self.agents {
            agent.body.increase_age();
            agent.reset();
        }
    }

    fn make_decisions(&mut self) {
        for agent in &mut self.agents {
            agent.decide();
        }
    }

    fn act_on_decisions(&mut self) {
        let width = self.config.world.width;
        let height = self.config.world.height;
        for agent in &mut self.agents {
            agent.act(width, height, &self.config.agents);
        }
    }

    /// Item phase: consumption (first agent in list order wins, exclusive),
    /// drift, aging death, compaction if anything died, then a chance to
    /// spawn a replacement while under the cap.
    fn tick_all_items(&mut self) {
        let Self {
            config,
            clock,
            agents,
            items,
            spawner,
            rng,
            metrics,
            ..
        } = self;
        let width = config.world.width;
        let height = config.world.height;

        let mut any_died = false;
        for item in items.iter_mut() {
            for agent in agents.iter_mut() {
                if agent.process_collision(item, &config.values) {
                    item.mark_dead();
                    any_died = true;
                    metrics.increment_counter("items_consumed");
                    tracing::trace!(
                        clock = *clock,
                        item = %item.body.id,
                        agent = %agent.body.id,
                        "Item consumed"
                    );
                    break;
                }
            }

            item.advance(width, height);

            if item.is_alive() && item.should_die_of_age(*clock, &config.items, rng) {
                item.mark_dead();
                any_died = true;
                metrics.increment_counter("items_aged_out");
            }
        }

        if any_died {
            items.retain(Item::is_alive);
        }

        if items.len() < config.world.max_items && rng.gen::<f64>() < config.items.spawn_chance {
            let item = spawner.create(items, &config.items, rng);
            items.push(item);
        }
    }

    fn learn_from_decisions(&mut self) {
        for agent in &mut self.agents {
            agent.learn(&self.config.values);
        }
    }

    /// Observation pass for the *next* tick: every sensor reads the
    /// post-move world, so decisions always lag perception by one tick.
    fn observe_for_next_decision(&mut self) {
        let Self {
            config,
            walls,
            agents,
            items,
            ..
        } = self;

        let views: Vec<_> = agents.iter().map(|a| a.body.clone()).collect();
        let ctx = SenseContext {
            width: config.world.width,
            height: config.world.height,
            walls,
            items,
            agents: &views,
        };
        for agent in agents.iter_mut() {
            agent.observe(&ctx);
        }
    }

    /// Full reinitialization with the same parameters, reseeding the RNG.
    pub fn reset(&mut self) {
        self.init();
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn width(&self) -> f64 {
        self.config.world.width
    }

    pub fn height(&self) -> f64 {
        self.config.world.height
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Places an item into the arena, for scripted scenarios.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Removes every live item.
    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn switch_training_mode(&mut self, enabled: bool) {
        for agent in &mut self.agents {
            agent.set_training_mode(enabled);
        }
    }

    /// Sets the population-mix mode; unknown names fail fast.
    pub fn set_boundary_condition(&mut self, condition: &str) -> Result<(), SimError> {
        self.spawner.set_boundary_condition(condition.parse()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::BoundaryCondition;

    /// Deterministic no-op brain for pipeline tests.
    struct IdleBrain;

    impl Brain for IdleBrain {
        fn decide(&mut self, _state: &[f64]) -> usize {
            0
        }
        fn learn(&mut self, _reward: f64) {}
        fn set_training_mode(&mut self, _enabled: bool) {}
    }

    fn idle_world(config: SimConfig) -> World {
        World::new(config, |_| Box::new(IdleBrain)).expect("world construction")
    }

    #[test]
    fn test_world_spawns_to_configured_population() {
        let world = idle_world(SimConfig::default());
        assert_eq!(world.agents().len(), 2);
        assert_eq!(world.items().len(), 50);
        assert_eq!(world.walls().len(), 4);
        assert_eq!(world.clock(), 0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = SimConfig::default();
        config.world.max_agents = 0;
        assert!(World::new(config, |_| Box::new(IdleBrain)).is_err());
    }

    #[test]
    fn test_clock_advances_per_tick() {
        let mut world = idle_world(SimConfig::default());
        world.tick();
        world.tick();
        assert_eq!(world.clock(), 2);
        assert_eq!(world.metrics().tick_count(), 2);
    }

    #[test]
    fn test_ages_increase_each_tick() {
        let mut world = idle_world(SimConfig::default());
        world.tick();
        assert!(world.agents().iter().all(|a| a.body.age == 1));
        // Items spawned during the tick are younger; the initial ones aged.
        assert!(world.items().iter().any(|i| i.body.age == 1));
    }

    #[test]
    fn test_item_population_stays_at_or_under_cap() {
        let mut world = idle_world(SimConfig::default());
        for _ in 0..500 {
            world.tick();
            assert!(world.items().len() <= world.config().world.max_items);
        }
    }

    #[test]
    fn test_set_boundary_condition_rejects_unknown() {
        let mut world = idle_world(SimConfig::default());
        assert!(world.set_boundary_condition("stable").is_ok());
        assert!(matches!(
            world.set_boundary_condition("abundant"),
            Err(SimError::InvalidBoundaryCondition(_))
        ));
        // The valid setting survives the failed call.
        assert_eq!(
            world.spawner.boundary_condition(),
            BoundaryCondition::Stable
        );
    }

    #[test]
    fn test_walls_trace_the_arena_perimeter() {
        let world = idle_world(SimConfig::default());
        let walls = world.walls();
        assert_eq!(walls[0].p1, Vec2::new(0.0, 0.0));
        assert_eq!(walls[0].p2, Vec2::new(600.0, 0.0));
        assert_eq!(walls[2].p1, Vec2::new(600.0, 600.0));
    }
}
