//! Visual feedback: particle bursts, screen shake, hit flash
//!
//! Nothing in here feeds back into gameplay. Presentation reads the results
//! through the snapshot.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Particle, ParticleColor};

/// A burst request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub pos: Vec2,
    pub color: ParticleColor,
    pub count: usize,
    /// Added to screen shake (0 for routine hits)
    pub shake: f32,
}

/// Spawn a particle burst and record the explosion event
pub fn explode(state: &mut GameState, burst: Burst) {
    let speed = state.tuning.feedback.particle_speed;
    for _ in 0..burst.count {
        let vx = (state.rng.random::<f32>() - 0.5) * 2.0 * speed;
        let vy = (state.rng.random::<f32>() - 0.5) * 2.0 * speed;
        state.particles.push(Particle {
            pos: burst.pos,
            vel: Vec2::new(vx, vy),
            life: 1.0,
            color: burst.color,
        });
    }

    // Drop the oldest when over the cap
    let max = state.tuning.feedback.max_particles;
    if state.particles.len() > max {
        let excess = state.particles.len() - max;
        state.particles.drain(..excess);
    }

    if burst.shake > 0.0 {
        state.shake = (state.shake + burst.shake).min(1.0);
    }

    state.events.push(GameEvent::Explosion {
        pos: burst.pos,
        color: burst.color,
        particles: burst.count,
    });
}

/// Count down the hit flash. Runs before collisions so a flash started this
/// frame is visible for its full length.
pub fn tick_hit_flash(state: &mut GameState) {
    state.player.hit_flash.tick();
}

/// Advance particles and shake by one frame
pub fn update(state: &mut GameState) {
    let decay = state.tuning.feedback.particle_decay;
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life -= decay;
    }
    state.particles.retain(|p| p.life > 0.0);

    state.shake *= state.tuning.feedback.shake_decay;
    if state.shake < 0.01 {
        state.shake = 0.0;
    }
}
