//! Dark Skies - a side-scrolling obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle stream, collisions, game state)
//! - `content`: Trivia deck shown when the player hits an obstacle
//! - `flags`: Feature-flag snapshot resolved once per round
//! - `settings`: Player audio preferences
//! - `audio`: Maps game events to sound effects
//! - `driver`: Fixed-timestep frame clock

pub mod audio;
pub mod content;
pub mod driver;
pub mod flags;
pub mod settings;
pub mod sim;

pub use content::{ContentError, Difficulty, TriviaDeck, TriviaItem};
pub use flags::{FlagSnapshot, FlagSource, StaticFlags};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (half the width of the galaxy backdrop)
    pub const SCREEN_WIDTH: f32 = 1740.0;
    pub const SCREEN_HEIGHT: f32 = 999.0;

    /// Actor defaults - x never changes during a round
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 136.0;
    pub const ACTOR_HEIGHT: f32 = 96.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a jump (pixels/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -6.5;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const GAP_HEIGHT: f32 = 250.0;
    /// Minimum barrier height above and below the gap
    pub const GAP_MARGIN: f32 = 50.0;
    /// Horizontal distance between initial obstacles
    pub const OBSTACLE_SPACING: f32 = 500.0;
    /// Leftward scroll (pixels/tick)
    pub const SCROLL_SPEED: f32 = 3.0;
    /// Lower bound on the number of live obstacles
    pub const MIN_OBSTACLES: usize = 3;
    /// Upper bound on the number of live obstacles
    pub const MAX_OBSTACLES: usize = 64;
    /// Side length of the mid-gap symbol (asteroid cluster theme)
    pub const SYMBOL_SIZE: f32 = 48.0;

    /// Hits that end the round
    pub const HIT_THRESHOLD: u32 = 10;
}
