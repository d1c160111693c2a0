//! Game state and round lifecycle
//!
//! Everything a round needs lives in one `GameState` that `tick` mutates by
//! reference. Nothing is global.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::config::{ConfigError, SimConfig};
use super::stream::ObstacleStream;

/// Stream id for the trivia picker, kept apart from obstacle gaps
const TRIVIA_STREAM: u64 = 0x7421_a5b1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A trivia card is up; the world is frozen until it is acknowledged
    Paused,
    /// Round ended; only a restart leaves this phase
    GameOver,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The actor left the top or bottom of the playfield
    OutOfBounds,
    /// The hit counter reached the configured threshold
    HitLimit,
}

/// Events for the audio/visual layer, in the order they happened within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Hit { obstacle_id: u32, hit_count: u32 },
    Score { obstacle_id: u32, score: u32 },
    /// Show trivia item `index` from the content provider
    TriviaRequested { index: usize },
    /// A trivia card was dismissed
    TriviaDismissed,
    GameOver { reason: GameOverReason },
    Restart,
}

/// Round counters; both only ever grow within a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub hit_count: u32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG
    rng: Pcg32,
    /// Trivia selection RNG
    trivia_rng: Pcg32,
    /// Number of trivia items the content provider can serve
    pub trivia_pool: usize,
    /// Simulation tick counter (Playing ticks only)
    pub time_ticks: u64,
    /// Rounds started, including the current one
    pub round: u32,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    pub board: Scoreboard,
    pub actor: Actor,
    pub stream: ObstacleStream,
    /// Trivia cards waiting to be acknowledged, front is on screen
    pub modal_queue: VecDeque<usize>,
}

impl GameState {
    /// Create a new game with the given seed, failing fast on bad config
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let trivia_rng = Pcg32::new(seed, TRIVIA_STREAM);
        let stream = ObstacleStream::new(&config, &mut rng)?;
        let actor = Actor::spawn(&config);

        log::debug!(
            "new game: seed={} obstacles={} theme={:?}",
            seed,
            stream.len(),
            config.theme
        );

        Ok(Self {
            config,
            seed,
            rng,
            trivia_rng,
            trivia_pool: 0,
            time_ticks: 0,
            round: 1,
            phase: GamePhase::Playing,
            game_over_reason: None,
            board: Scoreboard::default(),
            actor,
            stream,
            modal_queue: VecDeque::new(),
        })
    }

    /// Let hits pause for trivia drawn from `pool` items (0 disables the pause)
    pub fn with_trivia_pool(mut self, pool: usize) -> Self {
        self.trivia_pool = pool;
        self
    }

    /// Start a fresh round: new actor, new obstacles, zeroed counters.
    /// The RNG continues, so restarts stay reproducible from the seed.
    pub fn restart(&mut self) {
        self.actor = Actor::spawn(&self.config);
        self.stream.reset(&mut self.rng);
        self.board = Scoreboard::default();
        self.modal_queue.clear();
        self.game_over_reason = None;
        self.phase = GamePhase::Playing;
        self.round += 1;
        log::debug!("round {} started", self.round);
    }

    /// Scroll the stream one tick using the gap RNG
    pub(crate) fn advance_stream(&mut self) -> usize {
        self.stream.advance(&mut self.rng)
    }

    /// Queue one uniformly chosen trivia item; `None` when nothing can be shown
    pub(crate) fn request_trivia(&mut self) -> Option<usize> {
        if self.trivia_pool == 0 {
            return None;
        }
        let index = self.trivia_rng.random_range(0..self.trivia_pool);
        self.modal_queue.push_back(index);
        Some(index)
    }

    /// Dismiss the card on screen; resumes play once the queue is empty
    pub(crate) fn acknowledge_modal(&mut self) {
        self.modal_queue.pop_front();
        if self.modal_queue.is_empty() && self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// End the round; cards still waiting are dropped with it
    pub(crate) fn end_round(&mut self, reason: GameOverReason) {
        self.modal_queue.clear();
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        log::debug!(
            "round {} over ({:?}): score={} hits={}",
            self.round,
            reason,
            self.board.score,
            self.board.hit_count
        );
    }

    /// Trivia item currently on screen
    pub fn current_modal(&self) -> Option<usize> {
        self.modal_queue.front().copied()
    }
}
