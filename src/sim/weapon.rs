//! Weapon system
//!
//! Two resources drive the ship's guns. Charge builds while fire is held
//! and pays out a piercing mega shot on release. Energy refills slowly and
//! is spent all at once to open an overdrive window of triple shots.

use super::feedback::{self, Burst};
use super::input::Intent;
use super::state::{Bullet, GameEvent, GameState, ParticleColor, ShotKind};
use crate::consts::METER_MAX;

/// Overdrive countdown, activation and energy regeneration
pub fn update_overdrive(state: &mut GameState, intent: &Intent) {
    let player = &mut state.player;

    if player.overdrive.is_active() {
        if player.overdrive.tick() {
            log::debug!("Overdrive ended");
            state.events.push(GameEvent::OverdriveEnded);
        }
    } else if intent.overdrive && player.energy >= METER_MAX {
        player.overdrive.start(state.tuning.player.overdrive_frames);
        player.energy = 0.0;
        log::debug!(
            "Overdrive engaged for {} frames",
            state.tuning.player.overdrive_frames
        );
        state.events.push(GameEvent::OverdriveStarted);

        let burst = Burst {
            pos: state.player.center(),
            color: ParticleColor::Pink,
            count: state.tuning.feedback.overdrive_particles,
            shake: state.tuning.feedback.shake_overdrive,
        };
        feedback::explode(state, burst);
    }

    let player = &mut state.player;
    if !player.is_overdrive() && player.energy < METER_MAX {
        player.energy = (player.energy + state.tuning.player.energy_regen).min(METER_MAX);
    }
}

/// Fire bullets for this frame and track charge
pub fn fire(state: &mut GameState, intent: &Intent, now_ms: f64) {
    let weapon = state.tuning.weapon.clone();
    let muzzle_x = state.player.muzzle_x();
    let muzzle_y = state.player.pos.y;

    if intent.fire_held {
        if state.player.is_overdrive() {
            if state
                .fire_gate
                .try_take(now_ms, weapon.overdrive_fire_cooldown_ms)
            {
                let drift = weapon.spread_angle * weapon.bullet_speed;
                state.bullets.extend([
                    Bullet::player(muzzle_x, muzzle_y, weapon.bullet_speed, 0.0, false),
                    Bullet::player(
                        muzzle_x - weapon.spread_offset,
                        muzzle_y,
                        weapon.bullet_speed,
                        -drift,
                        false,
                    ),
                    Bullet::player(
                        muzzle_x + weapon.spread_offset,
                        muzzle_y,
                        weapon.bullet_speed,
                        drift,
                        false,
                    ),
                ]);
                state.events.push(GameEvent::ShotFired {
                    kind: ShotKind::Triple,
                });
            }
        } else {
            if state.fire_gate.try_take(now_ms, weapon.fire_cooldown_ms) {
                state.bullets.push(Bullet::player(
                    muzzle_x,
                    muzzle_y,
                    weapon.bullet_speed,
                    0.0,
                    false,
                ));
                state.events.push(GameEvent::ShotFired {
                    kind: ShotKind::Standard,
                });
            }
            state.player.charge = (state.player.charge + weapon.charge_rate).min(METER_MAX);
        }
    }

    if intent.fire_released {
        if state.player.charge >= METER_MAX {
            state.bullets.push(Bullet::player(
                muzzle_x,
                muzzle_y,
                weapon.bullet_speed,
                0.0,
                true,
            ));
            state.fire_gate.stamp(now_ms);
            log::debug!("Mega shot released");
            state.events.push(GameEvent::ShotFired {
                kind: ShotKind::Mega,
            });
        }
        state.player.charge = 0.0;
    }

    state.player.fire_held_last = intent.fire_held;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{TickInput, resolve};
    use crate::sim::state::SessionCommand;

    fn playing() -> GameState {
        let mut state = GameState::new(5);
        state.apply(SessionCommand::Start);
        state
    }

    fn step(state: &mut GameState, input: TickInput, now_ms: f64) {
        let intent = resolve(&input, state.player.fire_held_last);
        update_overdrive(state, &intent);
        fire(state, &intent, now_ms);
    }

    const FIRE: TickInput = TickInput {
        left: false,
        right: false,
        fire: true,
        dash: false,
        overdrive: false,
    };
    const OVERDRIVE: TickInput = TickInput {
        left: false,
        right: false,
        fire: false,
        dash: false,
        overdrive: true,
    };

    #[test]
    fn test_single_press_fires_once() {
        let mut state = playing();
        step(&mut state, FIRE, 0.0);
        assert_eq!(state.bullets.len(), 1);
        assert!(!state.bullets[0].mega);
        assert!(state.bullets[0].vel.y < 0.0);
        assert_eq!(state.player.charge, 2.0);
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut state = playing();
        step(&mut state, FIRE, 0.0);
        step(&mut state, FIRE, 200.0);
        assert_eq!(state.bullets.len(), 1);
        step(&mut state, FIRE, 400.0);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_release_below_full_charge_resets() {
        let mut state = playing();
        for i in 0..10 {
            step(&mut state, FIRE, i as f64);
        }
        assert_eq!(state.player.charge, 20.0);
        step(&mut state, TickInput::default(), 10.0);
        assert_eq!(state.player.charge, 0.0);
        assert!(state.bullets.iter().all(|b| !b.mega));
    }

    #[test]
    fn test_full_charge_release_fires_one_mega() {
        let mut state = playing();
        for i in 0..60 {
            step(&mut state, FIRE, i as f64 * 10.0);
        }
        assert_eq!(state.player.charge, METER_MAX);

        step(&mut state, TickInput::default(), 600.0);
        assert_eq!(state.bullets.iter().filter(|b| b.mega).count(), 1);
        assert_eq!(state.player.charge, 0.0);

        // No second mega on the following idle frame
        step(&mut state, TickInput::default(), 610.0);
        assert_eq!(state.bullets.iter().filter(|b| b.mega).count(), 1);
    }

    #[test]
    fn test_overdrive_needs_full_energy() {
        let mut state = playing();
        state.player.energy = 50.0;
        step(&mut state, OVERDRIVE, 0.0);
        assert!(!state.player.is_overdrive());
        assert!((state.player.energy - 50.3).abs() < 1e-4);
    }

    #[test]
    fn test_overdrive_lifecycle() {
        let mut state = playing();
        step(&mut state, OVERDRIVE, 0.0);
        assert!(state.player.is_overdrive());
        assert_eq!(state.player.energy, 0.0);
        assert_eq!(state.player.overdrive.remaining(), 300);
        assert!(state.events.contains(&GameEvent::OverdriveStarted));
        assert!(state.shake > 0.0);
        assert_eq!(state.particles.len(), 20);

        for _ in 0..299 {
            step(&mut state, TickInput::default(), 0.0);
        }
        assert!(state.player.is_overdrive());
        assert_eq!(state.player.energy, 0.0);

        state.events.clear();
        step(&mut state, TickInput::default(), 0.0);
        assert!(!state.player.is_overdrive());
        assert!(state.events.contains(&GameEvent::OverdriveEnded));
        // Regeneration resumes on the frame overdrive ends
        assert!(state.player.energy > 0.0);
    }

    #[test]
    fn test_overdrive_fires_triple() {
        let mut state = playing();
        state.player.overdrive.start(100);
        state.player.energy = 0.0;
        step(&mut state, FIRE, 0.0);
        assert_eq!(state.bullets.len(), 3);
        let muzzle = state.player.muzzle_x();
        let centers: Vec<f32> = state.bullets.iter().map(|b| b.rect().center().x).collect();
        assert_eq!(centers, vec![muzzle, muzzle - 15.0, muzzle + 15.0]);
        assert!(state.bullets[1].vel.x < 0.0 && state.bullets[2].vel.x > 0.0);
        // No charge in overdrive
        assert_eq!(state.player.charge, 0.0);

        step(&mut state, FIRE, 100.0);
        assert_eq!(state.bullets.len(), 3);
        step(&mut state, FIRE, 120.0);
        assert_eq!(state.bullets.len(), 6);
    }
}
