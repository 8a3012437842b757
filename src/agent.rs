//! Agents: a body, a sensor rig and an external brain, orchestrated
//! through the observe -> decide -> act -> learn cycle each tick.

use crate::brain::Brain;
use crate::config::{AgentConfig, SensorConfig, ValueTable};
use crate::entity::{Body, Kind};
use crate::geometry::Vec2;
use crate::item::Item;
use crate::sensor::{Lidar, Radar, SenseContext, Sensor, SensorArray};

pub struct Agent {
    pub body: Body,
    pub sensors: SensorArray,
    brain: Box<dyn Brain>,
    action_index: usize,

    consumption_reward: f64,
    sensory_reward: f64,
    total_reward: f64,
}

impl Agent {
    pub fn new(location: Vec2, size: f64, sensors: SensorArray, brain: Box<dyn Brain>) -> Self {
        Self {
            body: Body::new(Kind::Agent, size, location, Vec2::ZERO),
            sensors,
            brain,
            action_index: 0,
            consumption_reward: 0.0,
            sensory_reward: 0.0,
            total_reward: 0.0,
        }
    }

    /// Zeroes the per-tick reward accumulators and rolls the sensor
    /// counters over. Runs exactly once per tick, before sensing results
    /// are consumed.
    pub fn reset(&mut self) {
        self.total_reward = 0.0;
        self.consumption_reward = 0.0;
        self.sensory_reward = 0.0;
        self.sensors.reset_tick();
    }

    pub fn set_training_mode(&mut self, enabled: bool) {
        self.brain.set_training_mode(enabled);
    }

    /// Loads learned state into the brain; failures propagate.
    pub fn load_brain(&mut self, state: &serde_json::Value) -> anyhow::Result<()> {
        self.brain.load(state)
    }

    /// Runs every sensor against the current world state.
    pub fn observe(&mut self, ctx: &SenseContext) {
        let Self { body, sensors, .. } = self;
        sensors.process(ctx, body);
    }

    /// Builds the full state vector (sensory state plus proprioception)
    /// and asks the brain for an action.
    pub fn decide(&mut self) {
        let mut state = self.sensors.state_vector();
        state.push(self.body.velocity.x);
        state.push(self.body.velocity.y);
        self.action_index = self.brain.decide(&state);
    }

    /// Applies the chosen impulse, damps and integrates the velocity, and
    /// stops dead on arena-boundary contact (inelastic, unlike items).
    pub fn act(&mut self, width: f64, height: f64, config: &AgentConfig) {
        match self.action_index {
            0 => self.body.velocity.x -= config.impulse,
            1 => self.body.velocity.x += config.impulse,
            2 => self.body.velocity.y -= config.impulse,
            3 => self.body.velocity.y += config.impulse,
            _ => {}
        }

        self.body.velocity.scale(config.velocity_damping);
        self.body.location.x += self.body.velocity.x;
        self.body.location.y += self.body.velocity.y;

        self.clamp_to_arena(width, height);
    }

    fn clamp_to_arena(&mut self, width: f64, height: f64) {
        if self.body.location.x < 1.0 {
            self.body.location.x = 1.0;
            self.body.velocity = Vec2::ZERO;
        } else if self.body.location.x > width - 1.0 {
            self.body.location.x = width - 1.0;
            self.body.velocity = Vec2::ZERO;
        }
        if self.body.location.y < 1.0 {
            self.body.location.y = 1.0;
            self.body.velocity = Vec2::ZERO;
        } else if self.body.location.y > height - 1.0 {
            self.body.location.y = height - 1.0;
            self.body.velocity = Vec2::ZERO;
        }
    }

    /// Consumption check: collision with an item credits the item's value
    /// and bumps the per-category counter. Returns whether it consumed.
    pub fn process_collision(&mut self, item: &Item, values: &ValueTable) -> bool {
        let distance = self.body.location.distance_to(item.body.location);
        if distance >= self.body.size + item.body.size {
            return false;
        }
        self.consumption_reward += values.get(item.body.kind);
        match item.body.kind {
            Kind::ItemA => self.sensors.item_a_collisions_per_tick += 1,
            Kind::ItemB => self.sensors.item_b_collisions_per_tick += 1,
            _ => {}
        }
        true
    }

    /// Total reward = consumption + sensory; forwarded to the brain. Both
    /// accumulators are transient and reset at the next tick.
    pub fn learn(&mut self, values: &ValueTable) {
        self.sensory_reward = self.sensors.reward(&self.body, values);
        self.total_reward = self.consumption_reward + self.sensory_reward;
        self.brain.learn(self.total_reward);
    }

    pub fn action_index(&self) -> usize {
        self.action_index
    }

    pub fn consumption_reward(&self) -> f64 {
        self.consumption_reward
    }

    pub fn sensory_reward(&self) -> f64 {
        self.sensory_reward
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }
}

/// Full-circle ray rig: `lidar_count` rays spread evenly over 2π.
pub fn lidar_rig(config: &SensorConfig) -> SensorArray {
    let count = config.lidar_count;
    let sensors = (0..count)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / count as f64;
            Sensor::Lidar(Lidar::new(angle, config.lidar_range))
        })
        .collect();
    SensorArray::new(sensors)
}

/// Square grid of radar fields centered on the owner, sized so the grid
/// covers the same area as a circle of the reference range.
pub fn radar_rig(config: &SensorConfig) -> SensorArray {
    let per_row = config.radar_grid;
    let half_span = (config.radar_reference_range.powi(2) * std::f64::consts::PI).sqrt() / 2.0;
    let side = half_span * 2.0 / per_row as f64;

    let mut sensors = Vec::with_capacity(per_row * per_row);
    for row in 0..per_row {
        for col in 0..per_row {
            let x_offset = -(side * per_row as f64 / 2.0) + side * col as f64;
            let y_offset = -(side * per_row as f64 / 2.0) + side * row as f64;
            sensors.push(Sensor::Radar(Radar::new(side, x_offset, y_offset)));
        }
    }
    SensorArray::new(sensors)
}
