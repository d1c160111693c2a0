//! Simulation configuration
//!
//! Every geometric and physical constant the core uses comes from here, so the
//! simulation can run at any resolution. Defaults mirror `crate::consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Visual/geometric variant of the obstacle stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleTheme {
    /// Tiled barrier columns; scoring happens once the actor clears the column
    #[default]
    Barrier,
    /// Asteroid clusters with a symbol floating mid-gap; touching the symbol scores
    AsteroidCluster,
}

/// Configuration rejected at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error(
        "gap height {gap_height} leaves no room for both barriers \
         (screen height {screen_height}, margin {margin})"
    )]
    DegenerateGap {
        gap_height: f32,
        screen_height: f32,
        margin: f32,
    },

    #[error("actor height {actor_height} does not fit a screen of height {screen_height}")]
    ActorTooTall {
        actor_height: f32,
        screen_height: f32,
    },

    #[error("gap symbol of size {symbol_size} does not fit a gap of height {gap_height}")]
    SymbolTooLarge { symbol_size: f32, gap_height: f32 },

    #[error("hit threshold must be at least 1")]
    ZeroHitThreshold,

    #[error(
        "obstacle spacing {spacing} on a screen {screen_width} wide needs more than \
         {max} obstacles"
    )]
    TooManyObstacles {
        spacing: f32,
        screen_width: f32,
        max: usize,
    },
}

/// Geometry, physics and rule constants for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    pub obstacle_spacing: f32,
    pub scroll_speed: f32,
    pub symbol_size: f32,
    pub hit_threshold: u32,
    pub theme: ObstacleTheme,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            obstacle_width: OBSTACLE_WIDTH,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            obstacle_spacing: OBSTACLE_SPACING,
            scroll_speed: SCROLL_SPEED,
            symbol_size: SYMBOL_SIZE,
            hit_threshold: HIT_THRESHOLD,
            theme: ObstacleTheme::Barrier,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject configurations the simulation cannot run faithfully
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_x", self.actor_x),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("gap_margin", self.gap_margin),
            ("obstacle_spacing", self.obstacle_spacing),
            ("scroll_speed", self.scroll_speed),
            ("symbol_size", self.symbol_size),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("obstacle_spacing", self.obstacle_spacing),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.gap_margin < 0.0 {
            return Err(ConfigError::Negative {
                field: "gap_margin",
                value: self.gap_margin,
            });
        }

        if self.gap_height >= self.screen_height - 2.0 * self.gap_margin {
            return Err(ConfigError::DegenerateGap {
                gap_height: self.gap_height,
                screen_height: self.screen_height,
                margin: self.gap_margin,
            });
        }

        if self.actor_height >= self.screen_height {
            return Err(ConfigError::ActorTooTall {
                actor_height: self.actor_height,
                screen_height: self.screen_height,
            });
        }

        if self.theme == ObstacleTheme::AsteroidCluster {
            if self.symbol_size <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field: "symbol_size",
                    value: self.symbol_size,
                });
            }
            if self.symbol_size > self.gap_height {
                return Err(ConfigError::SymbolTooLarge {
                    symbol_size: self.symbol_size,
                    gap_height: self.gap_height,
                });
            }
        }

        if self.hit_threshold == 0 {
            return Err(ConfigError::ZeroHitThreshold);
        }

        if self.screen_width / self.obstacle_spacing > MAX_OBSTACLES as f32 {
            return Err(ConfigError::TooManyObstacles {
                spacing: self.obstacle_spacing,
                screen_width: self.screen_width,
                max: MAX_OBSTACLES,
            });
        }

        Ok(())
    }

    /// Number of obstacles kept alive: max(3, screen_width / spacing)
    pub fn obstacle_count(&self) -> usize {
        let fit = (self.screen_width / self.obstacle_spacing).floor() as usize;
        fit.max(MIN_OBSTACLES)
    }

    /// Lowest and highest allowed `gap_top_y`
    pub fn gap_top_range(&self) -> (f32, f32) {
        (
            self.gap_margin,
            self.screen_height - self.gap_height - self.gap_margin,
        )
    }

    /// Starting height of the actor (integer mid-screen row)
    pub fn actor_start_y(&self) -> f32 {
        (self.screen_height / 2.0).floor()
    }

    /// Largest y the actor may occupy before leaving the playfield
    pub fn actor_max_y(&self) -> f32 {
        self.screen_height - self.actor_height
    }
}
