//! Collision detection and response for axis-aligned squares
//!
//! Two checks: squares against the four arena walls (clamp and reflect), and
//! square against square (strict overlap, touching edges do not count).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Arena, Entity};

/// One of the four arena walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_square(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Strict interior overlap. Boxes sharing only an edge or corner are apart.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Clamp `entity` inside `arena` and reflect its velocity off every wall it
/// touches.
///
/// All four walls are checked independently, so a square in a corner is
/// clamped and reflected on both axes in the same call. Touching a wall
/// counts as contact. Returns the walls whose contact reversed a velocity
/// component; a square sliding along a wall is clamped but not reported.
pub fn bounce_off_walls(entity: &mut Entity, arena: &Arena) -> Vec<Wall> {
    let mut hits = Vec::new();

    if entity.pos.x <= arena.left() {
        entity.pos.x = arena.left();
        if reflect(&mut entity.vel.x) {
            hits.push(Wall::Left);
        }
    }
    if entity.pos.x + entity.size >= arena.right() {
        entity.pos.x = arena.right() - entity.size;
        if reflect(&mut entity.vel.x) {
            hits.push(Wall::Right);
        }
    }
    if entity.pos.y <= arena.bottom() {
        entity.pos.y = arena.bottom();
        if reflect(&mut entity.vel.y) {
            hits.push(Wall::Bottom);
        }
    }
    if entity.pos.y + entity.size >= arena.top() {
        entity.pos.y = arena.top() - entity.size;
        if reflect(&mut entity.vel.y) {
            hits.push(Wall::Top);
        }
    }

    hits
}

/// Negate a velocity component; false if it was zero
#[inline]
fn reflect(v: &mut f32) -> bool {
    if *v == 0.0 {
        return false;
    }
    *v = -*v;
    true
}
