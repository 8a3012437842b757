//! Field-of-view sensor: an axis-aligned square field offset from the
//! owner, clipped against the arena bounds. The field shrinks continuously
//! as the owner approaches or overhangs a boundary instead of disappearing,
//! and a clipped field reads as a wall detection.

use crate::entity::Body;
use crate::geometry::{self, Vec2};
use crate::sensor::{Detection, SenseContext};

#[derive(Debug, Clone)]
pub struct Radar {
    /// Nominal side length of the square field.
    pub side: f64,
    /// Field corner offset from the owner location.
    pub x_offset: f64,
    pub y_offset: f64,
    /// Owner-to-far-corner distance, used to normalize proximities.
    pub max_range: f64,
    pub detection: Detection,
}

impl Radar {
    pub fn new(side: f64, x_offset: f64, y_offset: f64) -> Self {
        // The far corner depends on which quadrant the field sits in
        // relative to the owner.
        let far_x = if x_offset < 0.0 { x_offset } else { x_offset + side };
        let far_y = if y_offset < 0.0 { y_offset } else { y_offset + side };
        let max_range = Vec2::ZERO.distance_to(Vec2::new(far_x, far_y));

        Self {
            side,
            x_offset,
            y_offset,
            max_range,
            detection: Detection::default(),
        }
    }

    pub fn sense(&mut self, ctx: &SenseContext, owner: &Body) {
        self.detection = Detection::default();

        let (corner, width, height) = self.clipped_frame(ctx.width, ctx.height, owner.location);

        self.check_wall_fold(owner, corner, width, height);

        if width == 0.0 && height == 0.0 {
            return;
        }
        for item in ctx.items {
            self.check_body(&item.body, owner, corner, width, height);
        }
        for agent in ctx.agents {
            if agent.id != owner.id {
                self.check_body(agent, owner, corner, width, height);
            }
        }
    }

    /// Current top-left corner and effective dimensions of the field.
    ///
    /// The corner is the owner location plus the offset, clamped into the
    /// arena. Each dimension is zero once the far edge has crossed the near
    /// arena edge, shrinks to the corner-to-arena-edge distance when the far
    /// edge overhangs, and stays nominal otherwise. A far edge exactly on
    /// the arena edge keeps the nominal size.
    pub fn clipped_frame(&self, arena_width: f64, arena_height: f64, owner: Vec2) -> (Vec2, f64, f64) {
        let corner_x = if self.x_offset <= 0.0 {
            (owner.x + self.x_offset).max(0.0)
        } else {
            (owner.x + self.x_offset).min(arena_width)
        };
        let corner_y = if self.y_offset <= 0.0 {
            (owner.y + self.y_offset).max(0.0)
        } else {
            (owner.y + self.y_offset).min(arena_height)
        };

        let right_x = owner.x + self.x_offset + self.side;
        let bottom_y = owner.y + self.y_offset + self.side;

        let width = clip_dimension(self.side, corner_x, right_x, owner.x, arena_width);
        let height = clip_dimension(self.side, corner_y, bottom_y, owner.y, arena_height);

        (Vec2::new(corner_x, corner_y), width, height)
    }

    /// A field clipped below its nominal size is folded against a wall:
    /// report a wall detection at the distance from the owner to the
    /// (possibly degenerate) field center, capping half-extents at side/2.
    fn check_wall_fold(&mut self, owner: &Body, corner: Vec2, width: f64, height: f64) {
        if width < self.side || height < self.side {
            let half_width = width.min(self.side / 2.0);
            let half_height = height.min(self.side / 2.0);
            let center = Vec2::new(corner.x + half_width, corner.y + half_height);
            self.detection.record_wall(center.distance_to(owner.location));
        }
    }

    fn check_body(&mut self, body: &Body, owner: &Body, corner: Vec2, width: f64, height: f64) {
        let delta_x = body.location.x - corner.x;
        let delta_y = body.location.y - corner.y;

        if inside_axis(delta_x, body.size, width) && inside_axis(delta_y, body.size, height) {
            let proximity = geometry::distance(body.location, owner.location) - body.size;
            if self.detection.improves(proximity) {
                self.detection.record_body(body, proximity);
            }
        }
    }
}

/// Effective field dimension along one axis.
fn clip_dimension(side: f64, corner: f64, far_edge: f64, owner: f64, arena_edge: f64) -> f64 {
    if far_edge <= 0.0 {
        // Whole field past the near arena edge.
        0.0
    } else if corner <= 0.0 {
        // Corner clamped at the near edge; what survives is up to far_edge.
        far_edge
    } else if far_edge <= owner {
        // Field entirely on the near side of the owner, fully inside.
        side
    } else if corner >= arena_edge {
        0.0
    } else if far_edge >= arena_edge {
        arena_edge - corner
    } else {
        side
    }
}

/// Half-open membership: an object of radius `size` at `delta` from the
/// field corner overlaps the field on this axis.
fn inside_axis(delta: f64, size: f64, dimension: f64) -> bool {
    (delta < 0.0 && -delta <= size) || (delta > 0.0 && delta - size <= dimension)
}
