//! Simulated bodies: the shared record for anything that occupies the arena,
//! plus the static boundary walls.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tag for every simulated object. The index doubles as the slot
/// used for one-of-k state encoding and for value-table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Wall,
    ItemA,
    ItemB,
    Agent,
}

impl Kind {
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        match self {
            Kind::Wall => 0,
            Kind::ItemA => 1,
            Kind::ItemB => 2,
            Kind::Agent => 3,
        }
    }
}

/// The mobile-entity record: identity, category, collision radius, position,
/// velocity and age. Walls are not bodies; they are static segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: Uuid,
    pub kind: Kind,
    pub size: f64,
    pub location: Vec2,
    pub velocity: Vec2,
    pub age: u64,
}

impl Body {
    pub fn new(kind: Kind, size: f64, location: Vec2, velocity: Vec2) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            size,
            location,
            velocity,
            age: 0,
        }
    }

    pub fn increase_age(&mut self) {
        self.age += 1;
    }
}

/// A static boundary segment (category [`Kind::Wall`], zero size and
/// velocity). Represented by its two endpoints rather than a point location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Wall {
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        Self {
            p1: Vec2::new(p1x, p1y),
            p2: Vec2::new(p2x, p2y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_are_stable() {
        assert_eq!(Kind::Wall.index(), 0);
        assert_eq!(Kind::ItemA.index(), 1);
        assert_eq!(Kind::ItemB.index(), 2);
        assert_eq!(Kind::Agent.index(), 3);
    }

    #[test]
    fn test_body_age_increments() {
        let mut body = Body::new(Kind::Agent, 10.0, Vec2::new(5.0, 5.0), Vec2::ZERO);
        assert_eq!(body.age, 0);
        body.increase_age();
        body.increase_age();
        assert_eq!(body.age, 2);
    }

    #[test]
    fn test_bodies_have_unique_ids() {
        let a = Body::new(Kind::ItemA, 10.0, Vec2::ZERO, Vec2::ZERO);
        let b = Body::new(Kind::ItemA, 10.0, Vec2::ZERO, Vec2::ZERO);
        assert_ne!(a.id, b.id);
    }
}
