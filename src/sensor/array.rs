//! The sensor array: an ordered rig of sensors exposed to the brain as a
//! fixed-length state vector, plus the shaped sensory rewards and the
//! per-tick consumption counters.

use crate::config::ValueTable;
use crate::entity::{Body, Kind};
use crate::sensor::{SenseContext, Sensor, STATES_PER_SENSOR};

#[derive(Debug, Clone, Default)]
pub struct SensorArray {
    sensors: Vec<Sensor>,

    pub total_item_a_collisions: u64,
    pub total_item_b_collisions: u64,

    pub item_a_collisions_per_tick: u64,
    pub item_b_collisions_per_tick: u64,
    pub wall_detection_reward_per_tick: f64,
    pub agent_detection_reward_per_tick: f64,
}

impl SensorArray {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self {
            sensors,
            ..Self::default()
        }
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Length of the sensory part of the state vector.
    pub fn state_len(&self) -> usize {
        self.sensors.len() * STATES_PER_SENSOR
    }

    /// Runs every sensor against the current world state.
    pub fn process(&mut self, ctx: &SenseContext, owner: &Body) {
        for sensor in &mut self.sensors {
            sensor.sense(ctx, owner);
        }
    }

    /// Fixed-length state encoding: per sensor, slots 0..=3 default to 1.0
    /// (absence marker) with the detected category's slot overwritten by the
    /// normalized proximity, and slots 4..=5 carrying the sensed velocity.
    pub fn state_vector(&self) -> Vec<f64> {
        let mut state = vec![0.0; self.state_len()];
        for (i, sensor) in self.sensors.iter().enumerate() {
            let detection = sensor.detection();
            let base = i * STATES_PER_SENSOR;
            state[base] = 1.0;
            state[base + 1] = 1.0;
            state[base + 2] = 1.0;
            state[base + 3] = 1.0;
            state[base + 4] = detection.velocity.x;
            state[base + 5] = detection.velocity.y;
            if let Some(kind) = detection.kind {
                state[base + kind.index()] = detection.proximity / sensor.max_range();
            }
        }
        state
    }

    /// Rolls per-tick collision counters into the running totals and zeroes
    /// every per-tick accumulator. Must run exactly once per world tick.
    pub fn reset_tick(&mut self) {
        self.total_item_a_collisions += self.item_a_collisions_per_tick;
        self.total_item_b_collisions += self.item_b_collisions_per_tick;

        self.item_a_collisions_per_tick = 0;
        self.item_b_collisions_per_tick = 0;
        self.wall_detection_reward_per_tick = 0.0;
        self.agent_detection_reward_per_tick = 0.0;
    }

    /// Aggregate sensory reward over all sensors, normalized by sensor
    /// count. Walls penalize with a quadratic falloff (the penalty sharpens
    /// close up), other agents with a linear one; items carry no sensory
    /// reward, only consumption reward.
    pub fn reward(&mut self, owner: &Body, values: &ValueTable) -> f64 {
        let mut current = 0.0;
        for i in 0..self.sensors.len() {
            current += self.sensed_object_reward(i, owner, values);
        }
        current
    }

    fn sensed_object_reward(&mut self, index: usize, owner: &Body, values: &ValueTable) -> f64 {
        let sensor = &self.sensors[index];
        let detection = sensor.detection();
        match detection.kind {
            Some(Kind::Wall) => {
                let reward = Self::wall_reward(
                    detection.proximity,
                    sensor.max_range(),
                    owner.size,
                    values.get(Kind::Wall),
                ) / self.sensors.len() as f64;
                self.wall_detection_reward_per_tick += reward;
                reward
            }
            Some(Kind::Agent) => {
                let reward = Self::agent_reward(
                    detection.proximity,
                    sensor.max_range(),
                    owner.size,
                    values.get(Kind::Agent),
                ) / self.sensors.len() as f64;
                self.agent_detection_reward_per_tick += reward;
                reward
            }
            _ => 0.0,
        }
    }

    fn wall_reward(proximity: f64, max_range: f64, owner_size: f64, value: f64) -> f64 {
        let proximity = proximity - owner_size;
        if proximity <= 0.0 {
            value
        } else {
            value * ((max_range - proximity) / max_range).powi(2)
        }
    }

    fn agent_reward(proximity: f64, max_range: f64, owner_size: f64, value: f64) -> f64 {
        let proximity = proximity - owner_size * 2.0;
        if proximity <= 0.0 {
            value
        } else {
            value * (max_range - proximity) / max_range
        }
    }
}
