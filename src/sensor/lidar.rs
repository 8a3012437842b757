//! Ray-cast sensor: a fixed-angle ray of fixed maximum range anchored at
//! the owner, reporting the nearest wall, item or other agent along it.

use crate::entity::Body;
use crate::geometry::{self, Vec2};
use crate::sensor::{Detection, SenseContext};

#[derive(Debug, Clone)]
pub struct Lidar {
    pub angle: f64,
    pub max_range: f64,
    pub detection: Detection,
}

impl Lidar {
    pub fn new(angle: f64, max_range: f64) -> Self {
        Self {
            angle,
            max_range,
            detection: Detection::default(),
        }
    }

    pub fn sense(&mut self, ctx: &SenseContext, owner: &Body) {
        self.detection = Detection::default();
        let end_of_range = self.end_of_range(owner.location);

        self.check_walls(ctx, owner, end_of_range);
        self.check_items(ctx, owner, end_of_range);
        self.check_agents(ctx, owner, end_of_range);
    }

    fn end_of_range(&self, origin: Vec2) -> Vec2 {
        Vec2::new(
            origin.x + self.max_range * self.angle.sin(),
            origin.y + self.max_range * self.angle.cos(),
        )
    }

    fn check_walls(&mut self, ctx: &SenseContext, owner: &Body, end_of_range: Vec2) {
        for wall in ctx.walls {
            if let Some(t) = geometry::line_intersect(owner.location, end_of_range, wall.p1, wall.p2)
            {
                // Relative parameter along the ray to absolute proximity.
                let proximity = t * self.max_range;
                if self.detection.improves(proximity) {
                    self.detection.record_wall(proximity);
                }
            }
        }
    }

    fn check_items(&mut self, ctx: &SenseContext, owner: &Body, end_of_range: Vec2) {
        for item in ctx.items {
            self.check_body(&item.body, owner, end_of_range);
        }
    }

    fn check_agents(&mut self, ctx: &SenseContext, owner: &Body, end_of_range: Vec2) {
        for agent in ctx.agents {
            // Self-exclusion by identity, not by category.
            if agent.id != owner.id {
                self.check_body(agent, owner, end_of_range);
            }
        }
    }

    fn check_body(&mut self, body: &Body, owner: &Body, end_of_range: Vec2) {
        let orthogonal =
            geometry::line_point_orthogonal_distance(owner.location, end_of_range, body.location);
        if body.size < orthogonal {
            return;
        }
        let proximity =
            geometry::projection_proximity(owner.location, end_of_range, body.location);
        if proximity < 0.0 || proximity > self.max_range {
            return;
        }
        if self.detection.improves(proximity) {
            self.detection.record_body(body, proximity);
        }
    }
}
