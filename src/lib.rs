//! # Vivarium
//!
//! A deterministic 2D sensing and foraging arena for reinforcement-learning
//! agents.
//!
//! The crate is the simulation and sensing engine only:
//! - Per-tick world update with a fixed six-phase pipeline
//! - Ray-cast (Lidar) and rectangular-field (Radar) sensor models
//! - Collision/consumption resolution with deterministic ordering
//! - Reward shaping that turns geometric state into scalar feedback
//!
//! The decision/learning component is an external collaborator behind the
//! [`Brain`] trait: the arena supplies a state vector per tick, receives a
//! discrete action, and forwards the shaped reward.
//!
//! ## Example
//!
//! ```
//! use vivarium::{Brain, SimConfig, World};
//!
//! /// A brain that always pushes +x.
//! struct Drifter;
//!
//! impl Brain for Drifter {
//!     fn decide(&mut self, _state: &[f64]) -> usize { 1 }
//!     fn learn(&mut self, _reward: f64) {}
//!     fn set_training_mode(&mut self, _enabled: bool) {}
//! }
//!
//! let mut world = World::new(SimConfig::default(), |_| Box::new(Drifter)).unwrap();
//! world.tick();
//! assert_eq!(world.clock(), 1);
//! ```

/// Agent orchestration and sensor rig construction
pub mod agent;
/// The external decision/learning contract
pub mod brain;
/// Serde-backed simulation configuration
pub mod config;
/// Simulated bodies and boundary walls
pub mod entity;
/// Library error types
pub mod error;
/// 2D vector math and segment/projection geometry
pub mod geometry;
/// Consumable items and the population spawner
pub mod item;
/// Tick metrics and logging setup
pub mod metrics;
/// Geometric sensors and the sensory state encoding
pub mod sensor;
/// The arena and its tick pipeline
pub mod world;

pub use agent::Agent;
pub use brain::{Brain, ACTIONS};
pub use config::{SimConfig, ValueTable};
pub use entity::{Body, Kind, Wall};
pub use error::SimError;
pub use geometry::Vec2;
pub use item::{BoundaryCondition, Item, ItemSpawner};
pub use metrics::{init_logging, Metrics};
pub use sensor::{Detection, SenseContext, Sensor, SensorArray};
pub use world::World;
