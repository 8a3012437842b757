//! Simulation configuration: sectioned, serde-backed, loadable from TOML.
//!
//! The category value table the original kept as process-wide mutable state
//! lives here as [`ValueTable`] and is threaded by reference to everything
//! that scores detections or consumption.

use crate::entity::Kind;
use crate::error::SimError;
use crate::item::BoundaryCondition;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub max_agents: usize,
    pub max_items: usize,
    /// Margin kept free of spawns along every arena edge.
    pub spawn_margin: f64,
    pub seed: u64,
    pub boundary_condition: BoundaryCondition,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ItemConfig {
    pub size: f64,
    /// Initial velocity components are drawn uniformly from [-max_speed, max_speed).
    pub max_speed: f64,
    /// Age beyond which the probabilistic death check applies.
    pub max_age: u64,
    /// Death is only evaluated on ticks divisible by this interval.
    pub death_check_interval: u64,
    pub death_chance: f64,
    /// Chance per tick of spawning a replacement while under the cap.
    pub spawn_chance: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AgentConfig {
    pub size: f64,
    /// Impulse applied per action along the chosen axis.
    pub impulse: f64,
    /// Velocity damping applied every tick regardless of action.
    pub velocity_damping: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SensorConfig {
    /// Rays per lidar rig, spread evenly over the full circle.
    pub lidar_count: usize,
    pub lidar_range: f64,
    /// Radar rigs are square grids of grid x grid fields.
    pub radar_grid: usize,
    /// The radar grid covers the same area as a circle of this radius.
    pub radar_reference_range: f64,
}

/// Category -> reward value lookup. Defaults reproduce `[-1, 1, -1, -1]`:
/// walls and other agents are aversive, item A is the only nourishing kind.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ValueTable {
    pub wall: f64,
    pub item_a: f64,
    pub item_b: f64,
    pub agent: f64,
}

impl ValueTable {
    pub fn get(&self, kind: Kind) -> f64 {
        match kind {
            Kind::Wall => self.wall,
            Kind::ItemA => self.item_a,
            Kind::ItemB => self.item_b,
            Kind::Agent => self.agent,
        }
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self {
            wall: -1.0,
            item_a: 1.0,
            item_b: -1.0,
            agent: -1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub items: ItemConfig,
    pub agents: AgentConfig,
    pub sensors: SensorConfig,
    pub values: ValueTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 600.0,
                height: 600.0,
                max_agents: 2,
                max_items: 50,
                spawn_margin: 20.0,
                seed: 0,
                boundary_condition: BoundaryCondition::Stable,
            },
            items: ItemConfig {
                size: 10.0,
                max_speed: 2.5,
                max_age: 5000,
                death_check_interval: 100,
                death_chance: 0.1,
                spawn_chance: 0.25,
            },
            agents: AgentConfig {
                size: 10.0,
                impulse: 1.0,
                velocity_damping: 0.95,
            },
            sensors: SensorConfig {
                lidar_count: 25,
                lidar_range: 95.0,
                radar_grid: 5,
                radar_reference_range: 95.0,
            },
            values: ValueTable::default(),
        }
    }
}

impl SimConfig {
    /// Loads a configuration from a TOML file. Missing or malformed files
    /// are hard errors; use `SimConfig::default()` for programmatic setup.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config: SimConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects arenas the simulation cannot run in.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.world.width.is_finite() || !self.world.height.is_finite() {
            return Err(SimError::InvalidConfig(
                "arena dimensions must be finite".into(),
            ));
        }
        if self.world.width <= 2.0 * self.world.spawn_margin
            || self.world.height <= 2.0 * self.world.spawn_margin
        {
            return Err(SimError::InvalidConfig(format!(
                "arena {}x{} leaves no interior inside the {} spawn margin",
                self.world.width, self.world.height, self.world.spawn_margin
            )));
        }
        if self.world.max_agents == 0 {
            return Err(SimError::InvalidConfig("max_agents must be at least 1".into()));
        }
        if self.sensors.lidar_count == 0 || self.sensors.radar_grid == 0 {
            return Err(SimError::InvalidConfig(
                "sensor rigs need at least one sensor".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.items.death_chance)
            || !(0.0..=1.0).contains(&self.items.spawn_chance)
        {
            return Err(SimError::InvalidConfig(
                "item probabilities must lie in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_value_table_matches_legacy() {
        let values = ValueTable::default();
        assert_eq!(values.get(Kind::Wall), -1.0);
        assert_eq!(values.get(Kind::ItemA), 1.0);
        assert_eq!(values.get(Kind::ItemB), -1.0);
        assert_eq!(values.get(Kind::Agent), -1.0);
    }

    #[test]
    fn test_validate_rejects_degenerate_arena() {
        let mut config = SimConfig::default();
        config.world.width = 30.0;
        assert!(config.validate().is_err(), "30 wide with margin 20 has no interior");
    }

    #[test]
    fn test_validate_rejects_out_of_range_probability() {
        let mut config = SimConfig::default();
        config.items.death_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = SimConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let back: SimConfig = toml::from_str(&text).expect("parse");
        assert_eq!(back.world.max_items, config.world.max_items);
        assert_eq!(back.values.item_a, config.values.item_a);
    }
}
