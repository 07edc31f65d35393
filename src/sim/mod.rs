//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` is one unit step; cadence belongs to the caller
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use clock::FixedTimestep;
pub use collision::{Aabb, Wall, bounce_off_walls};
pub use state::{Arena, ArenaSimulation, Body, Direction, Entity, GameEvent};
pub use tick::{TickInput, tick};
