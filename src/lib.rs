//! Hack Dodge - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, wall bounce, collision)
//! - `app`: Screen navigation and the fixed-rate driver around the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player-facing configuration

pub mod app;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Screen};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Side length of the player and enemy squares
    pub const ENTITY_SIZE: f32 = 40.0;
    /// Player speed along the commanded axis (units/tick)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Start positions (bottom-left corner, relative to the arena origin)
    pub const PLAYER_START: (f32, f32) = (50.0, 50.0);
    pub const ENEMY_START: (f32, f32) = (200.0, 200.0);
    /// Enemy start velocity (units/tick)
    pub const ENEMY_START_VEL: (f32, f32) = (4.0, 4.0);

    /// Default arena size
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 320.0;
    /// Smallest arena that holds both start positions
    pub const MIN_ARENA_WIDTH: f32 = ENEMY_START.0 + ENTITY_SIZE;
    pub const MIN_ARENA_HEIGHT: f32 = ENEMY_START.1 + ENTITY_SIZE;
    /// Border line width used by the renderers
    pub const BORDER_WIDTH: f32 = 2.0;
}
