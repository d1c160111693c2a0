//! Collision and scoring resolution
//!
//! Each obstacle carries two one-shot flags. A contact is reported only on
//! the tick its flag flips, so an obstacle adds at most one hit and at most
//! one point over its lifetime no matter how long the actor overlaps it.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::config::ObstacleTheme;
use super::obstacle::Obstacle;
use super::state::Scoreboard;

/// A one-shot event produced by resolving the actor against an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Hit { obstacle_id: u32 },
    Score { obstacle_id: u32 },
}

/// Whether the actor has earned the point for `obstacle` under `theme`
fn pass_condition(actor: &Actor, obstacle: &Obstacle, theme: ObstacleTheme) -> bool {
    match theme {
        ObstacleTheme::Barrier => obstacle.passed(actor.pos.x),
        ObstacleTheme::AsteroidCluster => actor.bounds().intersects(&obstacle.symbol_rect()),
    }
}

/// Check the actor against every obstacle, flip one-shot flags and update the
/// board. Contacts are returned in obstacle order, hit before score.
pub fn resolve_contacts(
    actor: &Actor,
    obstacles: &mut [Obstacle],
    theme: ObstacleTheme,
    board: &mut Scoreboard,
) -> Vec<Contact> {
    let bounds = actor.bounds();
    let mut contacts = Vec::new();

    for obstacle in obstacles.iter_mut() {
        if !obstacle.hit && obstacle.collides(&bounds) {
            obstacle.hit = true;
            board.hit_count += 1;
            contacts.push(Contact::Hit {
                obstacle_id: obstacle.id,
            });
        }

        if !obstacle.scored && pass_condition(actor, obstacle, theme) {
            obstacle.scored = true;
            board.score += 1;
            contacts.push(Contact::Score {
                obstacle_id: obstacle.id,
            });
        }
    }

    contacts
}
