//! Terminal-state evaluation

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, SessionStatus};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Lost,
    Won,
}

/// Check for a terminal condition. Loss is checked before win.
pub fn evaluate(state: &GameState) -> Option<Outcome> {
    if state.player.lives == 0 || state.swarm.has_reached(state.player.pos.y) {
        Some(Outcome::Lost)
    } else if state.swarm.is_cleared() {
        Some(Outcome::Won)
    } else {
        None
    }
}

/// Move a playing session into its terminal status
pub fn conclude(state: &mut GameState, outcome: Outcome) {
    if state.status != SessionStatus::Playing {
        return;
    }

    let score = state.score;
    match outcome {
        Outcome::Lost => {
            log::info!(
                "Game over at frame {}: score {}, lives {}",
                state.frame,
                score,
                state.player.lives
            );
            state.status = SessionStatus::GameOver;
            state.events.push(GameEvent::SessionLost { score });
        }
        Outcome::Won => {
            log::info!("Swarm destroyed at frame {}: score {}", state.frame, score);
            state.status = SessionStatus::Won;
            state.events.push(GameEvent::SessionWon { score });
        }
    }
}
