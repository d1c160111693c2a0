//! Input tapes and replay
//!
//! A tape is the config, the seed and the input of every tick. Replaying it
//! through `tick` must reproduce the same trajectory and outcome every time.

use serde::{Deserialize, Serialize};

use super::config::{ConfigError, SimConfig};
use super::state::{GamePhase, GameState, Scoreboard};
use super::tick::{TickInput, tick};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTape {
    /// Simulation config the run used (defaults when absent)
    #[serde(default)]
    pub config: SimConfig,
    pub seed: u64,
    /// Trivia items available while recording
    #[serde(default)]
    pub trivia_pool: usize,
    pub frames: Vec<TickInput>,
}

impl InputTape {
    pub fn new(config: SimConfig, seed: u64, trivia_pool: usize) -> Self {
        Self {
            config,
            seed,
            trivia_pool,
            frames: Vec::new(),
        }
    }

    pub fn record(&mut self, input: TickInput) {
        self.frames.push(input);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Result of replaying a tape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Actor y after every replayed frame
    pub trajectory: Vec<f32>,
    pub board: Scoreboard,
    pub phase: GamePhase,
    /// Frames consumed before the tape ended or quit was requested
    pub frames: usize,
    pub rounds: u32,
}

/// Replay `tape` from a fresh game built with the tape's own config
pub fn replay(tape: &InputTape) -> Result<ReplayOutcome, ConfigError> {
    let mut state =
        GameState::new(tape.config.clone(), tape.seed)?.with_trivia_pool(tape.trivia_pool);
    let mut trajectory = Vec::with_capacity(tape.frames.len());
    let mut frames = 0;

    for input in &tape.frames {
        if input.quit {
            break;
        }
        tick(&mut state, input);
        trajectory.push(state.actor.pos.y);
        frames += 1;
    }

    Ok(ReplayOutcome {
        trajectory,
        board: state.board,
        phase: state.phase,
        frames,
        rounds: state.round,
    })
}
