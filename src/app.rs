//! Screen navigation around the simulation
//!
//! The simulation only knows about the arena and the two squares. Which
//! screen is showing, the clock and pending input live here, and every
//! frontend drives the game through this type.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_ARENA_HEIGHT, MIN_ARENA_WIDTH};
use crate::settings::Settings;
use crate::sim::{
    Arena, ArenaSimulation, Direction, FixedTimestep, GameEvent, TickInput, tick,
};

/// User-facing strings
pub mod text {
    pub const TITLE: &str = "Mini Hacker Game";
    pub const START: &str = "Start";
    pub const EXIT: &str = "Exit";
    pub const GAME_OVER: &str = "YOU'VE BEEN HACKED";
    pub const BACK_TO_MENU: &str = "Back to Menu";
}

/// Which screen the frontend should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title with Start / Exit
    Menu,
    /// Arena and direction controls
    Playing,
    /// Round lost, offer the way back to the menu
    GameOver,
}

/// Application state shared by the frontends
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    screen: Screen,
    sim: ArenaSimulation,
    clock: FixedTimestep,
    input: TickInput,
    should_exit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let arena = Arena::new(0.0, 0.0, settings.arena_width, settings.arena_height);
        let clock = FixedTimestep::new(settings.tick_rate_hz);
        Self {
            settings,
            screen: Screen::Menu,
            sim: ArenaSimulation::new(arena),
            clock,
            input: TickInput::default(),
            should_exit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn sim(&self) -> &ArenaSimulation {
        &self.sim
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Begin a fresh round (Start button)
    pub fn start_game(&mut self) {
        if self.screen == Screen::Playing {
            return;
        }
        self.sim.reset_round();
        self.clock.reset();
        self.input = TickInput::default();
        self.screen = Screen::Playing;
        log::info!("Round started");
    }

    /// Leave the game-over screen (Back to Menu button)
    pub fn back_to_menu(&mut self) {
        if self.screen != Screen::Menu {
            self.screen = Screen::Menu;
            log::debug!("Back to menu");
        }
    }

    /// Exit button; frontends stop their loop when they see it
    pub fn request_exit(&mut self) {
        log::info!("Exit requested");
        self.should_exit = true;
    }

    /// Direction button or key. Applied on the next tick; ignored off the
    /// game screen.
    pub fn command(&mut self, direction: Direction) {
        if self.screen == Screen::Playing {
            log::debug!("Move {}", direction.as_str());
            self.input.direction = Some(direction);
        }
    }

    /// Window resized: keep the origin, take the new size. Never shrinks
    /// below the smallest arena that holds both start positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        let width = width.max(MIN_ARENA_WIDTH);
        let height = height.max(MIN_ARENA_HEIGHT);
        let arena = self.sim.arena().resized(width, height);
        self.sim.resize_arena(arena);
        log::debug!("Arena resized to {}x{}", width, height);
    }

    pub fn toggle_fps(&mut self) {
        self.settings.show_fps = !self.settings.show_fps;
        self.settings.save();
    }

    /// Feed a frame's elapsed time; runs whatever ticks are due.
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if self.screen != Screen::Playing {
            return 0;
        }
        let due = self.clock.advance(frame_dt);
        self.run_ticks(due)
    }

    /// Run up to `count` ticks, stopping early if the round ends
    pub fn run_ticks(&mut self, count: u32) -> u32 {
        let mut ran = 0;
        while ran < count && self.screen == Screen::Playing {
            let input = self.input.clone();
            tick(&mut self.sim, &input);
            ran += 1;

            // Clear one-shot inputs after processing
            self.input.direction = None;

            let events: Vec<GameEvent> = self.sim.drain_events().collect();
            for event in events {
                match event {
                    GameEvent::RoundOver => {
                        log::info!("Game over after {} ticks", self.sim.time_ticks());
                        self.screen = Screen::GameOver;
                    }
                    GameEvent::WallBounce { body, wall } => {
                        log::trace!("{:?} bounced off {:?} wall", body, wall);
                    }
                }
            }
        }
        ran
    }
}
