//! Frame time to fixed ticks
//!
//! Frontends run at whatever rate their event loop gives them; the
//! simulation only ever sees whole ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_HZ};

/// Accumulates frame time and hands out whole ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    step: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_HZ)
    }
}

impl FixedTimestep {
    /// A clock ticking `hz` times per second (0 is treated as 1)
    pub fn new(hz: u32) -> Self {
        Self {
            step: 1.0 / hz.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return the number of ticks now due
    ///
    /// Long frames are clamped and at most `MAX_SUBSTEPS` ticks are returned;
    /// time beyond that is dropped so a stalled frame never replays a burst.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_step() {
        let mut clock = FixedTimestep::new(60);
        // Slightly more than one step to stay clear of float rounding
        assert_eq!(clock.advance(1.0 / 60.0 + 1e-4), 1);
        assert_eq!(clock.advance(0.005), 0);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut clock = FixedTimestep::new(10);
        assert_eq!(clock.advance(0.06), 0);
        assert_eq!(clock.advance(0.06), 1);
        assert_eq!(clock.advance(0.07), 0);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FixedTimestep::new(1000);
        // 0.1 s clamp would allow 100 ticks; substep cap wins
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_negative_frame_ignored() {
        let mut clock = FixedTimestep::new(60);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(1.0 / 60.0 + 1e-4), 1);
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedTimestep::new(10);
        clock.advance(0.09);
        clock.reset();
        assert_eq!(clock.advance(0.05), 0);
    }

    #[test]
    fn test_zero_hz_does_not_divide_by_zero() {
        let clock = FixedTimestep::new(0);
        assert_eq!(clock.step(), 1.0);
    }
}
