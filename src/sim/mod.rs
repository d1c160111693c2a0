//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per fixed tick, no variable timestep
//! - Seeded RNG only
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering, audio or file dependencies

pub mod actor;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod obstacle;
pub mod replay;
pub mod state;
pub mod stream;
pub mod tick;

pub use actor::Actor;
pub use collision::{Contact, resolve_contacts};
pub use config::{ConfigError, ObstacleTheme, SimConfig};
pub use geometry::Rect;
pub use obstacle::{BarrierSprite, Obstacle};
pub use replay::{InputTape, ReplayOutcome, replay};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState, Scoreboard};
pub use stream::ObstacleStream;
pub use tick::{TickInput, autopilot_wants_jump, tick};
