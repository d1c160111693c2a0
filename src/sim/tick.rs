//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a
//! Playing tick the order is fixed: actor, obstacle stream, contacts, then
//! phase transitions.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, resolve_contacts};
use super::state::{GameEvent, GameOverReason, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump pressed this tick
    pub jump: bool,
    /// Restart pressed this tick (only honored after game over)
    pub restart: bool,
    /// Quit requested; the tick does nothing and the loop should stop
    pub quit: bool,
    /// Any other key or button, used to dismiss trivia cards
    pub acknowledge: bool,
    /// Idle/demo mode - autopilot presses jump
    pub idle_mode: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    /// True for any event that dismisses a trivia card
    pub fn any_key(&self) -> bool {
        self.jump || self.restart || self.acknowledge
    }
}

/// Autopilot: jump when the actor is about to sink below the next gap
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let actor = &state.actor;
    let config = &state.config;

    let (gap_top, gap_bottom) = match state.stream.next_ahead_of(actor.pos.x) {
        Some(obstacle) => (obstacle.gap_top_y, obstacle.gap_bottom_y()),
        None => (0.0, config.screen_height),
    };

    // Aim the bottom edge a quarter of the spare room above the gap floor
    let spare = (gap_bottom - gap_top - actor.size.y).max(0.0);
    let floor = gap_bottom - spare / 4.0;

    let next_vel = actor.vel + config.gravity;
    let next_bottom = actor.pos.y + actor.size.y + next_vel;

    actor.vel >= 0.0 && next_bottom > floor
}

/// Advance the game state by one fixed tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        return events;
    }

    // Paused and GameOver only drain input
    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
                events.push(GameEvent::Restart);
            }
            return events;
        }
        GamePhase::Paused => {
            if input.any_key() {
                state.acknowledge_modal();
                events.push(GameEvent::TriviaDismissed);
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    let jump = input.jump || (input.idle_mode && autopilot_wants_jump(state));

    state.time_ticks += 1;

    // Actor
    if jump {
        state.actor.jump();
        events.push(GameEvent::Jump);
    }
    state.actor.step();

    // Obstacle stream
    state.advance_stream();

    // Contacts
    let theme = state.stream.theme();
    let mut hit_count = state.board.hit_count;
    let mut score = state.board.score;
    let contacts = resolve_contacts(
        &state.actor,
        &mut state.stream.obstacles,
        theme,
        &mut state.board,
    );
    for contact in contacts {
        match contact {
            Contact::Hit { obstacle_id } => {
                hit_count += 1;
                events.push(GameEvent::Hit {
                    obstacle_id,
                    hit_count,
                });
                // The hit that ends the round goes straight to game over
                if hit_count < state.config.hit_threshold {
                    if let Some(index) = state.request_trivia() {
                        events.push(GameEvent::TriviaRequested { index });
                    }
                }
            }
            Contact::Score { obstacle_id } => {
                score += 1;
                events.push(GameEvent::Score { obstacle_id, score });
            }
        }
    }

    // Transitions
    let reason = if state.board.hit_count >= state.config.hit_threshold {
        Some(GameOverReason::HitLimit)
    } else if !state.actor.within_playfield(state.config.screen_height) {
        Some(GameOverReason::OutOfBounds)
    } else {
        None
    };

    if let Some(reason) = reason {
        state.end_round(reason);
        events.push(GameEvent::GameOver { reason });
    } else if !state.modal_queue.is_empty() {
        state.phase = GamePhase::Paused;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::SimConfig;

    /// Park the actor inside the top barrier of the leftmost obstacle
    fn force_hit(state: &mut GameState) {
        let obstacle = &mut state.stream.obstacles[0];
        obstacle.x = state.actor.pos.x + 10.0;
        obstacle.gap_top_y = state.config.gap_top_range().1;
        state.actor.pos.y = 300.0;
        state.actor.vel = 0.0;
    }

    #[test]
    fn test_first_tick_applies_gravity() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.actor.pos.y, 499.25);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.stream.obstacles[0].x, 867.0);
    }

    #[test]
    fn test_jump_event() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        let events = tick(&mut state, &TickInput::jump());
        assert_eq!(events, vec![GameEvent::Jump]);
        assert_eq!(state.actor.vel, -6.25);
    }

    #[test]
    fn test_hit_without_trivia_keeps_playing() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        force_hit(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::Hit {
                obstacle_id: 1,
                hit_count: 1
            }]
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_hit_pauses_until_acknowledged() {
        let mut state = GameState::new(SimConfig::default(), 12345)
            .expect("valid config")
            .with_trivia_pool(5);
        force_hit(&mut state);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], GameEvent::TriviaRequested { index } if index < 5));
        assert_eq!(state.phase, GamePhase::Paused);

        // Frozen: idle ticks and jumps change nothing
        let frozen_y = state.actor.pos.y;
        let frozen_x = state.stream.obstacles[0].x;
        assert!(tick(&mut state, &TickInput::default()).is_empty());
        assert_eq!(state.actor.pos.y, frozen_y);
        assert_eq!(state.stream.obstacles[0].x, frozen_x);

        // Any key dismisses the card; the jump itself is swallowed
        let events = tick(&mut state, &TickInput::jump());
        assert_eq!(events, vec![GameEvent::TriviaDismissed]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.pos.y, frozen_y);
        assert_eq!(state.actor.vel, 0.25);
    }

    #[test]
    fn test_final_hit_leaves_no_card_behind() {
        let config = SimConfig {
            hit_threshold: 2,
            ..Default::default()
        };
        let mut state = GameState::new(config, 12345)
            .expect("valid config")
            .with_trivia_pool(5);

        force_hit(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &TickInput::jump());
        assert_eq!(state.phase, GamePhase::Playing);

        // Second barrier pair takes the threshold hit
        state.stream.obstacles.swap(0, 1);
        force_hit(&mut state);
        let events = tick(&mut state, &TickInput::default());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TriviaRequested { .. })));
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                reason: GameOverReason::HitLimit
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.current_modal(), None);
    }

    #[test]
    fn test_out_of_bounds_ends_round() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        state.actor.pos.y = state.config.actor_max_y();

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                reason: GameOverReason::OutOfBounds
            }]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::OutOfBounds));
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        state.actor.pos.y = -1.0;
        tick(&mut state, &TickInput::jump());
        assert_eq!(state.phase, GamePhase::GameOver);

        let snapshot = (state.actor.clone(), state.stream.clone(), state.time_ticks);
        for _ in 0..10 {
            assert!(tick(&mut state, &TickInput::jump()).is_empty());
        }
        assert_eq!(snapshot, (state.actor.clone(), state.stream.clone(), state.time_ticks));
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        tick(&mut state, &TickInput::restart());
        assert_eq!(state.round, 1);

        state.actor.pos.y = -1.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let events = tick(&mut state, &TickInput::restart());
        assert_eq!(events, vec![GameEvent::Restart]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_quit_does_nothing() {
        let mut state = GameState::new(SimConfig::default(), 12345).expect("valid config");
        let input = TickInput {
            quit: true,
            jump: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.actor.vel, 0.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(SimConfig::default(), 99999).expect("valid config");
        let mut state2 = GameState::new(SimConfig::default(), 99999).expect("valid config");

        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for i in 0..2_000 {
            let input = if i % 97 == 0 { TickInput::jump() } else { idle };
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.actor, state2.actor);
        assert_eq!(state1.stream, state2.stream);
        assert_eq!(state1.board, state2.board);
    }

    #[test]
    fn test_autopilot_jumps_when_sinking() {
        let mut state = GameState::new(SimConfig::default(), 1).expect("valid config");
        let gap_bottom = state.stream.obstacles[0].gap_bottom_y();

        state.actor.vel = 1.0;
        state.actor.pos.y = gap_bottom - state.actor.size.y;
        assert!(autopilot_wants_jump(&state));

        // Rising actors are left alone
        state.actor.vel = -3.0;
        assert!(!autopilot_wants_jump(&state));

        // Comfortably high in the gap
        state.actor.vel = 0.0;
        state.actor.pos.y = state.stream.obstacles[0].gap_top_y;
        assert!(!autopilot_wants_jump(&state));
    }
}
