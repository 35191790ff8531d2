//! Ship movement and dash

use super::feedback::{self, Burst};
use super::input::Intent;
use super::state::{GameEvent, GameState, ParticleColor};

/// Apply dash and steering, then clamp to the play field
pub fn update_ship(state: &mut GameState, intent: &Intent, now_ms: f64) {
    let tuning = &state.tuning.player;
    let dash_distance = tuning.dash_distance;
    let dash_cooldown = tuning.dash_cooldown_ms;
    let dash_particles = state.tuning.feedback.dash_particles;
    let speed = if state.player.is_overdrive() {
        tuning.speed * tuning.overdrive_speed_mult
    } else {
        tuning.speed
    };

    if intent.dash && state.dash_gate.try_take(now_ms, dash_cooldown) {
        state.player.pos.x += intent.steer * dash_distance;
        state.player.clamp();
        log::debug!("Dash to x={:.1}", state.player.pos.x);
        state.events.push(GameEvent::Dash);
        let center = state.player.center();
        feedback::explode(
            state,
            Burst {
                pos: center,
                color: ParticleColor::Cyan,
                count: dash_particles,
                shake: 0.0,
            },
        );
    }

    state.player.pos.x += intent.steer * speed;
    state.player.clamp();
}
