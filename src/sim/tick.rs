//! Per-frame simulation step
//!
//! Sequencing only; each stage lives in its own module.

use super::input::{TickInput, resolve};
use super::state::{GameState, SessionStatus};
use super::{collision, feedback, movement, session, swarm, weapon};

/// Advance the game by one display frame.
///
/// `now_ms` is a monotonic clock reading used for fire and dash cadence;
/// everything else counts frames.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    state.events.clear();

    // Outside PLAYING only the visual tail keeps running
    if state.status != SessionStatus::Playing {
        feedback::tick_hit_flash(state);
        feedback::update(state);
        return;
    }

    state.frame += 1;
    let intent = resolve(input, state.player.fire_held_last);

    weapon::update_overdrive(state, &intent);
    movement::update_ship(state, &intent, now_ms);
    weapon::fire(state, &intent, now_ms);

    swarm::march(state);
    swarm::invader_fire(state);

    feedback::tick_hit_flash(state);
    collision::resolve(state);
    feedback::update(state);

    if let Some(outcome) = session::evaluate(state) {
        session::conclude(state, outcome);
    }

    log::trace!(
        "frame {}: {} live, {} bullets, {} particles",
        state.frame,
        state.swarm.live_count(),
        state.bullets.len(),
        state.particles.len()
    );
}
