//! The player-controlled actor
//!
//! Integration is per tick: velocity accumulates gravity, then position
//! accumulates velocity. The actor never clamps itself; leaving the playfield
//! is detected by the state machine after each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::geometry::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; x stays fixed for the whole round
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, negative is up)
    pub vel: f32,
    pub size: Vec2,
    gravity: f32,
    jump_impulse: f32,
}

impl Actor {
    /// Spawn at the configured x, mid-screen, at rest
    pub fn spawn(config: &SimConfig) -> Self {
        Self {
            pos: Vec2::new(config.actor_x, config.actor_start_y()),
            vel: 0.0,
            size: Vec2::new(config.actor_width, config.actor_height),
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
        }
    }

    /// Replace the current velocity with the jump impulse
    pub fn jump(&mut self) {
        self.vel = self.jump_impulse;
    }

    /// Advance one tick
    pub fn step(&mut self) {
        self.vel += self.gravity;
        self.pos.y += self.vel;
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    /// True while the top edge is inside `[0, screen_height - height]`
    pub fn within_playfield(&self, screen_height: f32) -> bool {
        self.pos.y >= 0.0 && self.pos.y <= screen_height - self.size.y
    }
}
