//! Fixed-timestep frame clock
//!
//! Converts elapsed wall time into a whole number of simulation ticks. The
//! simulation itself never sees wall time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame the accumulator will absorb (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Feed `elapsed` seconds of wall time; returns how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        // Spiral of death: drop whatever could not be caught up
        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!("frame clock dropped {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }

        ticks
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }
}
