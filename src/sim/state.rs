//! Arena, entities and round state
//!
//! Positions are the bottom-left corner of each square, y grows upward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Wall};
use crate::consts::*;

/// Axis-aligned play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Bottom-left corner
    pub origin: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Same origin, new size (window resize)
    pub fn resized(&self, width: f32, height: f32) -> Self {
        Self::new(self.origin.x, self.origin.y, width, height)
    }

    /// Whether a square of `size` at `pos` lies entirely inside
    pub fn contains_square(&self, pos: Vec2, size: f32) -> bool {
        pos.x >= self.left()
            && pos.y >= self.bottom()
            && pos.x + size <= self.right()
            && pos.y + size <= self.top()
    }
}

/// Movement command issued by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Velocity the player gets for this command
    pub fn velocity(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-PLAYER_SPEED, 0.0),
            Direction::Right => Vec2::new(PLAYER_SPEED, 0.0),
            Direction::Up => Vec2::new(0.0, PLAYER_SPEED),
            Direction::Down => Vec2::new(0.0, -PLAYER_SPEED),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Up => "Up",
            Direction::Down => "Down",
        }
    }
}

/// Which of the two squares an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Body {
    Player,
    Enemy,
}

/// A moving square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Entity {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: ENTITY_SIZE,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_square(self.pos, self.size)
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A square touched a wall and had its velocity reflected
    WallBounce { body: Body, wall: Wall },
    /// Player and enemy overlapped; queued once per round
    RoundOver,
}

/// Complete simulation state: arena, both squares and the round flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaSimulation {
    pub(crate) arena: Arena,
    pub(crate) player: Entity,
    pub(crate) enemy: Entity,
    pub(crate) over: bool,
    /// Ticks advanced in the current round
    pub(crate) time_ticks: u64,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl Default for ArenaSimulation {
    fn default() -> Self {
        Self::new(Arena::default())
    }
}

impl ArenaSimulation {
    /// Create a simulation with a fresh round inside `arena`
    pub fn new(arena: Arena) -> Self {
        let mut sim = Self {
            arena,
            player: Entity::new(Vec2::ZERO, Vec2::ZERO),
            enemy: Entity::new(Vec2::ZERO, Vec2::ZERO),
            over: false,
            time_ticks: 0,
            events: Vec::new(),
        };
        sim.reset_round();
        sim
    }

    /// Put both squares back at their start positions and clear the round flag
    pub fn reset_round(&mut self) {
        let origin = self.arena.origin;
        self.player = Entity::new(origin + Vec2::from(PLAYER_START), Vec2::ZERO);
        self.enemy = Entity::new(
            origin + Vec2::from(ENEMY_START),
            Vec2::from(ENEMY_START_VEL),
        );
        self.over = false;
        self.time_ticks = 0;
        self.events.clear();
    }

    /// Overwrite the player's velocity; no diagonal motion
    pub fn set_player_velocity(&mut self, direction: Direction) {
        self.player.vel = direction.velocity();
    }

    /// Replace the arena bounds. Squares are pulled back inside on the next tick.
    pub fn resize_arena(&mut self, arena: Arena) {
        self.arena = arena;
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn enemy(&self) -> &Entity {
        &self.enemy
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_start_state() {
        let sim = ArenaSimulation::new(Arena::new(0.0, 0.0, 300.0, 300.0));
        assert_eq!(sim.player().pos, Vec2::new(50.0, 50.0));
        assert_eq!(sim.player().vel, Vec2::ZERO);
        assert_eq!(sim.enemy().pos, Vec2::new(200.0, 200.0));
        assert_eq!(sim.enemy().vel, Vec2::new(4.0, 4.0));
        assert_eq!(sim.player().size, 40.0);
        assert!(!sim.is_over());
    }

    #[test]
    fn test_start_positions_follow_arena_origin() {
        let sim = ArenaSimulation::new(Arena::new(10.0, 20.0, 300.0, 300.0));
        assert_eq!(sim.player().pos, Vec2::new(60.0, 70.0));
        assert_eq!(sim.enemy().pos, Vec2::new(210.0, 220.0));
    }

    #[test]
    fn test_set_player_velocity_overwrites() {
        let mut sim = ArenaSimulation::default();
        sim.set_player_velocity(Direction::Left);
        assert_eq!(sim.player().vel, Vec2::new(-5.0, 0.0));
        sim.set_player_velocity(Direction::Up);
        assert_eq!(sim.player().vel, Vec2::new(0.0, 5.0));
        sim.set_player_velocity(Direction::Down);
        assert_eq!(sim.player().vel, Vec2::new(0.0, -5.0));
        sim.set_player_velocity(Direction::Right);
        assert_eq!(sim.player().vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_commands_are_axis_aligned() {
        for direction in Direction::ALL {
            let v = direction.velocity();
            assert!(v.x == 0.0 || v.y == 0.0, "{} is diagonal", direction.as_str());
            assert_eq!(v.length(), PLAYER_SPEED);
        }
    }

    #[test]
    fn test_reset_round_restores_everything() {
        let mut sim = ArenaSimulation::new(Arena::new(0.0, 0.0, 300.0, 300.0));
        sim.player = Entity::new(Vec2::new(123.0, 7.0), Vec2::new(0.0, -5.0));
        sim.enemy.vel = Vec2::new(-4.0, 4.0);
        sim.over = true;
        sim.time_ticks = 99;
        sim.events.push(GameEvent::RoundOver);

        sim.reset_round();

        assert_eq!(sim.player().pos, Vec2::new(50.0, 50.0));
        assert_eq!(sim.player().vel, Vec2::ZERO);
        assert_eq!(sim.enemy().pos, Vec2::new(200.0, 200.0));
        assert_eq!(sim.enemy().vel, Vec2::new(4.0, 4.0));
        assert!(!sim.is_over());
        assert_eq!(sim.time_ticks(), 0);
        assert_eq!(sim.drain_events().count(), 0);
    }

    #[test]
    fn test_arena_edges() {
        let arena = Arena::new(10.0, 20.0, 300.0, 200.0);
        assert_eq!(arena.left(), 10.0);
        assert_eq!(arena.right(), 310.0);
        assert_eq!(arena.bottom(), 20.0);
        assert_eq!(arena.top(), 220.0);
        assert!(arena.contains_square(Vec2::new(10.0, 20.0), 40.0));
        assert!(arena.contains_square(Vec2::new(270.0, 180.0), 40.0));
        assert!(!arena.contains_square(Vec2::new(271.0, 180.0), 40.0));
    }

    #[test]
    fn test_resize_keeps_origin() {
        let arena = Arena::new(5.0, 5.0, 100.0, 100.0).resized(640.0, 480.0);
        assert_eq!(arena.origin, Vec2::new(5.0, 5.0));
        assert_eq!(arena.size, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_state_serializes() {
        let sim = ArenaSimulation::default();
        let json = serde_json::to_string(&sim).expect("serialize");
        let back: ArenaSimulation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.player(), sim.player());
        assert_eq!(back.enemy(), sim.enemy());
    }
}
