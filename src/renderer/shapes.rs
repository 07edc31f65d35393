//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in arena coordinates.

use glam::Vec2;

use super::vertex::{Palette, Vertex};
use crate::consts::BORDER_WIDTH;
use crate::sim::{Arena, ArenaSimulation, Entity};

/// Vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Vertices for a rectangle outline, `width` thick, centered on the edges
pub fn rect_outline(min: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = width / 2.0;
    let max = min + size;
    let mut vertices = Vec::with_capacity(24);

    // Bottom and top bars span the full width including corners
    vertices.extend(rect(
        Vec2::new(min.x - half, min.y - half),
        Vec2::new(size.x + width, width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x - half, max.y - half),
        Vec2::new(size.x + width, width),
        color,
    ));
    // Side bars fill the gap between them
    vertices.extend(rect(
        Vec2::new(min.x - half, min.y + half),
        Vec2::new(width, size.y - width),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(max.x - half, min.y + half),
        Vec2::new(width, size.y - width),
        color,
    ));

    vertices
}

/// Arena border
pub fn arena_border(arena: &Arena, color: [f32; 4]) -> Vec<Vertex> {
    rect_outline(arena.origin, arena.size, BORDER_WIDTH, color)
}

/// A player or enemy square
pub fn entity(entity: &Entity, color: [f32; 4]) -> Vec<Vertex> {
    rect(entity.pos, Vec2::splat(entity.size), color)
}

/// Full frame: border, then player, then enemy on top
pub fn scene(sim: &ArenaSimulation, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = arena_border(sim.arena(), palette.border);
    vertices.extend(entity(sim.player(), palette.player));
    vertices.extend(entity(sim.enemy(), palette.enemy));
    vertices
}
