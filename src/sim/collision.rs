//! Collision detection and damage resolution
//!
//! Everything in the field is an axis-aligned box. Bullets are integrated
//! first, then tested: player bullets against live invaders in grid order,
//! invader bullets against the ship.

use glam::Vec2;

use super::feedback::{self, Burst};
use super::state::{BulletOrigin, GameEvent, GameState, ParticleColor};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x
            && a_max.x > other.pos.x
            && self.pos.y < b_max.y
            && a_max.y > other.pos.y
    }
}

/// Integrate bullets and apply hits for one frame
pub fn resolve(state: &mut GameState) {
    let mut bursts: Vec<Burst> = Vec::new();

    let GameState {
        bullets,
        swarm,
        player,
        score,
        events,
        tuning,
        ..
    } = state;

    bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel;
        let rect = bullet.rect();

        match bullet.origin {
            BulletOrigin::Player => {
                // Single pass in grid order; a piercing bullet keeps going
                for invader in swarm.invaders.iter_mut().filter(|i| i.alive) {
                    if !rect.overlaps(&invader.rect()) {
                        continue;
                    }

                    invader.alive = false;
                    let points = invader.tier.points();
                    *score += points;
                    let pos = invader.center();
                    events.push(GameEvent::InvaderKilled {
                        tier: invader.tier,
                        points,
                        pos,
                        mega: bullet.mega,
                    });
                    bursts.push(Burst {
                        pos,
                        color: if bullet.mega {
                            ParticleColor::Pink
                        } else {
                            ParticleColor::Cyan
                        },
                        count: tuning.feedback.explosion_particles,
                        shake: if bullet.mega {
                            tuning.feedback.shake_mega_kill
                        } else {
                            0.0
                        },
                    });

                    if !bullet.mega {
                        return false;
                    }
                }
            }
            BulletOrigin::Invader => {
                if player.lives > 0 && rect.overlaps(&player.rect()) {
                    player.lives -= 1;
                    player.hit_flash.start(tuning.player.hit_flash_frames);
                    log::debug!("Player hit, {} lives left", player.lives);
                    events.push(GameEvent::PlayerHit {
                        lives: player.lives,
                    });
                    bursts.push(Burst {
                        pos: player.center(),
                        color: ParticleColor::Red,
                        count: tuning.feedback.player_hit_particles,
                        shake: tuning.feedback.shake_player_hit,
                    });
                    return false;
                }
            }
        }

        bullet.in_bounds()
    });

    for burst in bursts {
        feedback::explode(state, burst);
    }
}
