//! Geometric sensing: the per-tick detection record, the read-only world
//! view handed to sensors, and the two sensor variants.
//!
//! The variants share nothing beyond the sense-and-report contract, so they
//! are a tagged enum rather than a trait object.

pub mod array;
pub mod lidar;
pub mod radar;

pub use array::SensorArray;
pub use lidar::Lidar;
pub use radar::Radar;

use crate::entity::{Body, Kind, Wall};
use crate::geometry::Vec2;
use crate::item::Item;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of state-vector slots per sensor: four one-of-k category slots
/// plus the sensed velocity components.
pub const STATES_PER_SENSOR: usize = 6;

/// Read-only view of the arena for one sensing pass.
///
/// Agent bodies are snapshots taken before the pass so that sensing never
/// aliases the agent being updated.
pub struct SenseContext<'a> {
    pub width: f64,
    pub height: f64,
    pub walls: &'a [Wall],
    pub items: &'a [Item],
    pub agents: &'a [Body],
}

/// The nearest object a sensor currently perceives. Recreated fresh on
/// every sensing pass; `kind: None` means nothing was detected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub id: Option<Uuid>,
    pub kind: Option<Kind>,
    pub velocity: Vec2,
    pub proximity: f64,
}

impl Default for Detection {
    fn default() -> Self {
        Self {
            id: None,
            kind: None,
            velocity: Vec2::ZERO,
            proximity: f64::INFINITY,
        }
    }
}

impl Detection {
    /// First write always accepts; later writes only when strictly closer.
    pub fn improves(&self, proximity: f64) -> bool {
        self.kind.is_none() || proximity < self.proximity
    }

    pub fn record_body(&mut self, body: &Body, proximity: f64) {
        self.id = Some(body.id);
        self.kind = Some(body.kind);
        self.velocity = body.velocity;
        self.proximity = proximity;
    }

    /// Walls are static and anonymous: no id, zero velocity.
    pub fn record_wall(&mut self, proximity: f64) {
        self.id = None;
        self.kind = Some(Kind::Wall);
        self.velocity = Vec2::ZERO;
        self.proximity = proximity;
    }
}

/// The two sensor variants behind one sense-and-report surface.
#[derive(Debug, Clone)]
pub enum Sensor {
    Lidar(Lidar),
    Radar(Radar),
}

impl Sensor {
    /// Runs one sensing pass against the world, replacing the detection.
    pub fn sense(&mut self, ctx: &SenseContext, owner: &Body) {
        match self {
            Sensor::Lidar(lidar) => lidar.sense(ctx, owner),
            Sensor::Radar(radar) => radar.sense(ctx, owner),
        }
    }

    pub fn detection(&self) -> &Detection {
        match self {
            Sensor::Lidar(lidar) => &lidar.detection,
            Sensor::Radar(radar) => &radar.detection,
        }
    }

    /// Normalization range for proximities reported by this sensor.
    pub fn max_range(&self) -> f64 {
        match self {
            Sensor::Lidar(lidar) => lidar.max_range,
            Sensor::Radar(radar) => radar.max_range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection_improves_on_anything() {
        let detection = Detection::default();
        assert!(detection.improves(f64::MAX / 2.0));
    }

    #[test]
    fn test_detection_replacement_is_strict() {
        let mut detection = Detection::default();
        detection.record_wall(10.0);
        assert!(!detection.improves(10.0), "equal proximity must not replace");
        assert!(detection.improves(9.9));
    }
}
