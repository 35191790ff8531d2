//! Read-only view of a frame for presentation
//!
//! Built by value from the game state; never feeds back into the simulation.

use glam::Vec2;
use serde::Serialize;

use super::state::{BulletOrigin, GameEvent, GameState, InvaderTier, SessionStatus};
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub lives: u8,
    pub energy: f32,
    pub charge: f32,
    pub overdrive: bool,
    pub overdrive_frames: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvaderView {
    pub pos: Vec2,
    pub size: Vec2,
    pub tier: InvaderTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub size: Vec2,
    pub origin: BulletOrigin,
    pub mega: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    /// Opacity (remaining life)
    pub alpha: f32,
    pub rgb: u32,
}

/// Everything presentation needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub status: SessionStatus,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub frame: u64,
    pub player: PlayerView,
    /// Live invaders only
    pub invaders: Vec<InvaderView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub shake: f32,
    pub hit_flash: bool,
    pub events: Vec<GameEvent>,
}

/// Build a snapshot of the current state with presentation settings applied
pub fn build_snapshot(state: &GameState, settings: &Settings) -> FrameSnapshot {
    let player = &state.player;
    let player_rect = player.rect();

    // Newest particles win when presentation caps the count
    let cap = settings.max_particles();
    let skip = state.particles.len().saturating_sub(cap);

    FrameSnapshot {
        status: state.status,
        score: state.score,
        lives: player.lives,
        level: state.level,
        frame: state.frame,
        player: PlayerView {
            pos: player_rect.pos,
            size: player_rect.size,
            lives: player.lives,
            energy: player.energy,
            charge: player.charge,
            overdrive: player.is_overdrive(),
            overdrive_frames: player.overdrive.remaining(),
        },
        invaders: state
            .swarm
            .live()
            .map(|inv| {
                let rect = inv.rect();
                InvaderView {
                    pos: rect.pos,
                    size: rect.size,
                    tier: inv.tier,
                }
            })
            .collect(),
        bullets: state
            .bullets
            .iter()
            .map(|b| BulletView {
                pos: b.pos,
                size: b.size,
                origin: b.origin,
                mega: b.mega,
            })
            .collect(),
        particles: state
            .particles
            .iter()
            .skip(skip)
            .map(|p| ParticleView {
                pos: p.pos,
                alpha: p.life.clamp(0.0, 1.0),
                rgb: p.color.rgb(),
            })
            .collect(),
        shake: if settings.effective_screen_shake() {
            state.shake
        } else {
            0.0
        },
        hit_flash: settings.effective_hit_flash() && player.hit_flash.is_active(),
        events: state.events.clone(),
    }
}
