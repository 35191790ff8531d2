//! Swarm controller
//!
//! The whole grid marches in lockstep. Any live invader touching a side
//! margin flips the shared direction, drops every live invader one step
//! and speeds the march up.

use rand::Rng;

use super::state::{Bullet, GameEvent, GameState};
use crate::consts::*;

/// Move the swarm one frame. Returns true if it reversed.
pub fn march(state: &mut GameState) -> bool {
    let tuning = &state.tuning.swarm;
    let swarm = &mut state.swarm;
    let dx = swarm.direction * swarm.speed;

    let mut edge_reached = false;
    for invader in swarm.invaders.iter_mut().filter(|i| i.alive) {
        invader.pos.x += dx;
        if invader.pos.x + INVADER_WIDTH > PLAY_WIDTH - tuning.edge_margin
            || invader.pos.x < tuning.edge_margin
        {
            edge_reached = true;
        }
    }

    if edge_reached {
        swarm.direction = -swarm.direction;
        for invader in swarm.invaders.iter_mut().filter(|i| i.alive) {
            invader.pos.y += tuning.row_descent;
        }
        // Never slows down, even if tuning was edited mid-session
        swarm.speed = (swarm.speed + tuning.speed_step)
            .min(tuning.max_speed)
            .max(swarm.speed);

        log::debug!(
            "Swarm reversed: direction={}, speed={:.2}",
            swarm.direction,
            swarm.speed
        );
        let speed = swarm.speed;
        state.events.push(GameEvent::SwarmReversed { speed });
    }

    edge_reached
}

/// With a small chance per frame, one random live invader fires downward
pub fn invader_fire(state: &mut GameState) {
    if state.rng.random::<f64>() >= state.tuning.swarm.fire_chance {
        return;
    }

    let live: Vec<usize> = state
        .swarm
        .invaders
        .iter()
        .enumerate()
        .filter(|(_, i)| i.alive)
        .map(|(idx, _)| idx)
        .collect();
    if live.is_empty() {
        return;
    }

    let shooter = &state.swarm.invaders[live[state.rng.random_range(0..live.len())]];
    let muzzle = glam::Vec2::new(
        shooter.pos.x + INVADER_WIDTH / 2.0,
        shooter.pos.y + INVADER_HEIGHT,
    );
    log::trace!("Invader ({}, {}) fired", shooter.row, shooter.col);

    state.bullets.push(Bullet::invader(
        muzzle.x,
        muzzle.y,
        state.tuning.weapon.invader_bullet_speed,
    ));
    state.events.push(GameEvent::InvaderFired { pos: muzzle });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BulletOrigin, SessionCommand};

    fn playing() -> GameState {
        let mut state = GameState::new(9);
        state.apply(SessionCommand::Start);
        state
    }

    #[test]
    fn test_lockstep_march() {
        let mut state = playing();
        let before: Vec<f32> = state.swarm.invaders.iter().map(|i| i.pos.x).collect();
        assert!(!march(&mut state));
        for (inv, x) in state.swarm.invaders.iter().zip(before) {
            assert_eq!(inv.pos.x, x + 1.0);
        }
    }

    #[test]
    fn test_widest_valid_grid_starts_inside_margins() {
        let tuning = crate::Tuning::from_json(r#"{ "swarm": { "cols": 17 } }"#).unwrap();
        let mut state = GameState::with_tuning(9, tuning);
        state.apply(SessionCommand::Start);
        assert!(!march(&mut state));
        assert_eq!(state.swarm.direction, 1.0);
    }

    #[test]
    fn test_dead_invaders_do_not_move() {
        let mut state = playing();
        state.swarm.invaders[3].alive = false;
        let pos = state.swarm.invaders[3].pos;
        march(&mut state);
        assert_eq!(state.swarm.invaders[3].pos, pos);
    }

    #[test]
    fn test_reversal_descends_and_speeds_up() {
        let mut state = playing();
        let start_y = state.swarm.invaders[0].pos.y;
        let mut frames = 0;
        while !march(&mut state) {
            frames += 1;
            assert!(frames < 1000, "swarm never reached an edge");
        }
        assert_eq!(state.swarm.direction, -1.0);
        assert_eq!(state.swarm.invaders[0].pos.y, start_y + 20.0);
        assert!((state.swarm.speed - 1.05).abs() < 1e-6);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::SwarmReversed { .. })
        ));
    }

    #[test]
    fn test_single_straggler_reverses_everyone() {
        let mut state = playing();
        // Leave only the bottom-left invader alive, right next to the left margin
        for inv in state.swarm.invaders.iter_mut() {
            inv.alive = false;
        }
        let idx = 4 * 11;
        state.swarm.invaders[idx].alive = true;
        state.swarm.invaders[idx].pos.x = 10.5;
        state.swarm.direction = -1.0;

        assert!(march(&mut state));
        assert_eq!(state.swarm.direction, 1.0);
    }

    #[test]
    fn test_speed_saturates() {
        let mut state = playing();
        state.tuning.swarm.max_speed = 1.1;
        state.swarm.invaders[0].pos.x = 5.0;
        for _ in 0..10 {
            state.swarm.invaders[0].pos.x = 5.0;
            march(&mut state);
        }
        assert!((state.swarm.speed - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_invader_fire_picks_live_invader() {
        let mut state = playing();
        state.tuning.swarm.fire_chance = 1.0;
        for inv in state.swarm.invaders.iter_mut() {
            inv.alive = false;
        }
        state.swarm.invaders[7].alive = true;
        let shooter = state.swarm.invaders[7].clone();

        invader_fire(&mut state);
        assert_eq!(state.bullets.len(), 1);
        let bullet = &state.bullets[0];
        assert_eq!(bullet.origin, BulletOrigin::Invader);
        assert!(bullet.vel.y > 0.0);
        assert_eq!(bullet.pos.y, shooter.pos.y + INVADER_HEIGHT);
        assert_eq!(bullet.rect().center().x, shooter.center().x);
    }

    #[test]
    fn test_no_fire_without_live_invaders() {
        let mut state = playing();
        state.tuning.swarm.fire_chance = 1.0;
        for inv in state.swarm.invaders.iter_mut() {
            inv.alive = false;
        }
        invader_fire(&mut state);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_zero_chance_never_fires() {
        let mut state = playing();
        state.tuning.swarm.fire_chance = 0.0;
        for _ in 0..1000 {
            invader_fire(&mut state);
        }
        assert!(state.bullets.is_empty());
    }
}
