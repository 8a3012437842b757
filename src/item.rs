//! Consumable items: bounded lifetime, boundary-reflecting drift, and the
//! spawner that keeps the population mix in check.

use crate::config::ItemConfig;
use crate::entity::{Body, Kind};
use crate::error::SimError;
use crate::geometry::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Population-mix control mode for item spawning.
///
/// `Scarce` picks item kinds uniformly; `Stable` biases spawns toward
/// whichever kind is under-represented, producing a self-correcting mix
/// without a fixed target ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    Scarce,
    Stable,
}

impl FromStr for BoundaryCondition {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scarce" => Ok(BoundaryCondition::Scarce),
            "stable" => Ok(BoundaryCondition::Stable),
            other => Err(SimError::InvalidBoundaryCondition(other.to_string())),
        }
    }
}

/// A consumable drifting through the arena until eaten or aged out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub body: Body,
    alive: bool,
}

impl Item {
    pub fn new<R: Rng>(x: f64, y: f64, kind: Kind, config: &ItemConfig, rng: &mut R) -> Self {
        debug_assert!(matches!(kind, Kind::ItemA | Kind::ItemB));
        let velocity = Vec2::new(
            rng.gen_range(-config.max_speed..config.max_speed),
            rng.gen_range(-config.max_speed..config.max_speed),
        );
        Self {
            body: Body::new(kind, config.size, Vec2::new(x, y), velocity),
            alive: true,
        }
    }

    /// Integrates one tick of drift, reflecting inelastically off the arena
    /// bounds: position clamps to [1, dim - 1] and the velocity component
    /// flips sign.
    pub fn advance(&mut self, width: f64, height: f64) {
        self.body.location.x += self.body.velocity.x;
        self.body.location.y += self.body.velocity.y;

        if self.body.location.x < 1.0 {
            self.body.location.x = 1.0;
            self.body.velocity.x *= -1.0;
        } else if self.body.location.x > width - 1.0 {
            self.body.location.x = width - 1.0;
            self.body.velocity.x *= -1.0;
        }
        if self.body.location.y < 1.0 {
            self.body.location.y = 1.0;
            self.body.velocity.y *= -1.0;
        } else if self.body.location.y > height - 1.0 {
            self.body.location.y = height - 1.0;
            self.body.velocity.y *= -1.0;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn mark_dead(&mut self) {
        self.alive = false;
    }

    /// Probabilistic aging death: only once the item is past its maximum
    /// age, only on checking ticks, and then with `death_chance`.
    pub fn should_die_of_age<R: Rng>(&self, clock: u64, config: &ItemConfig, rng: &mut R) -> bool {
        self.body.age > config.max_age
            && clock % config.death_check_interval == 0
            && rng.gen::<f64>() < config.death_chance
    }
}

/// Creates items at random interior positions, optionally biasing the kind
/// choice to stabilize the population ratio.
#[derive(Debug, Clone)]
pub struct ItemSpawner {
    width: f64,
    height: f64,
    margin: f64,
    condition: BoundaryCondition,
}

impl ItemSpawner {
    pub fn new(width: f64, height: f64, margin: f64, condition: BoundaryCondition) -> Self {
        Self {
            width,
            height,
            margin,
            condition,
        }
    }

    pub fn set_boundary_condition(&mut self, condition: BoundaryCondition) {
        self.condition = condition;
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.condition
    }

    /// Creates one item, taking the current boundary condition and live
    /// population into account for the kind choice.
    pub fn create<R: Rng>(&self, existing: &[Item], config: &ItemConfig, rng: &mut R) -> Item {
        let kind = self.determine_kind(existing, rng);
        let x = rng.gen_range(self.margin..self.width - self.margin);
        let y = rng.gen_range(self.margin..self.height - self.margin);
        Item::new(x, y, kind, config, rng)
    }

    fn determine_kind<R: Rng>(&self, existing: &[Item], rng: &mut R) -> Kind {
        match self.condition {
            BoundaryCondition::Scarce => random_kind(rng),
            BoundaryCondition::Stable => {
                if existing.is_empty() {
                    // No ratio to stabilize against yet.
                    return random_kind(rng);
                }
                let item_a_count = existing
                    .iter()
                    .filter(|item| item.body.kind == Kind::ItemA)
                    .count();
                let item_a_ratio = item_a_count as f64 / existing.len() as f64;
                self.kind_toward_balance(item_a_ratio, rng)
            }
        }
    }

    /// Forces the minority kind while its ratio sits below a threshold drawn
    /// fresh from [0.25, 0.5) for each comparison; otherwise falls back to a
    /// uniform pick. The moving threshold trades determinism for a smoother
    /// approach to balance than a fixed target ratio would give.
    fn kind_toward_balance<R: Rng>(&self, item_a_ratio: f64, rng: &mut R) -> Kind {
        if item_a_ratio < rng.gen_range(0.25..0.5) {
            Kind::ItemA
        } else if 1.0 - item_a_ratio < rng.gen_range(0.25..0.5) {
            Kind::ItemB
        } else {
            random_kind(rng)
        }
    }
}

fn random_kind<R: Rng>(rng: &mut R) -> Kind {
    if rng.gen_bool(0.5) {
        Kind::ItemA
    } else {
        Kind::ItemB
    }
}
