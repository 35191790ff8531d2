//! Neon Strike entry point
//!
//! Headless native runner: drives the simulation at a nominal 60 Hz with a
//! simple autopilot and reports how the session ended.
//!
//! Usage: `neon-strike [seed] [max_frames] [tuning.json] [settings.json]`
//!
//! Pass `-` for the tuning path to keep the default balance while still
//! supplying settings.

use std::process::ExitCode;

use neon_strike::consts::*;
use neon_strike::sim::{GameState, SessionCommand, SessionStatus, TickInput, build_snapshot, tick};
use neon_strike::{Settings, Tuning};

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Neon Strike (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let max_frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_FRAMES);
    let tuning = match args.next().filter(|path| path != "-") {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let settings = args.next().map(Settings::load).unwrap_or_default();

    let mut state = GameState::with_tuning(seed, tuning);
    state.apply(SessionCommand::Start);

    let mut pilot = Autopilot::default();
    let mut frame = 0u64;
    while state.status == SessionStatus::Playing && frame < max_frames {
        let input = pilot.decide(&state);
        tick(&mut state, &input, frame as f64 * FRAME_MS);
        frame += 1;
    }

    let snapshot = build_snapshot(&state, &settings);
    log::info!(
        "Finished after {} frames: {:?}, score {}, lives {}, {} invaders left, {} particles shown",
        snapshot.frame,
        snapshot.status,
        snapshot.score,
        snapshot.lives,
        snapshot.invaders.len(),
        snapshot.particles.len()
    );
    println!(
        "{:?} score={} lives={} frames={}",
        snapshot.status, snapshot.score, snapshot.lives, snapshot.frame
    );

    ExitCode::SUCCESS
}

/// Tracks the lowest live invader, charges mega shots and burns overdrive
#[derive(Debug, Default)]
struct Autopilot {
    firing: bool,
}

impl Autopilot {
    fn decide(&mut self, state: &GameState) -> TickInput {
        let player = &state.player;
        let target = state
            .swarm
            .live()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|inv| inv.center().x);

        let mut input = TickInput::default();
        if let Some(target_x) = target {
            let dx = target_x - player.muzzle_x();
            input.left = dx < -4.0;
            input.right = dx > 4.0;
            input.dash = dx.abs() > 150.0;
        }

        // Hold until fully charged, then let go for one frame
        self.firing = !(self.firing && player.charge >= METER_MAX);
        input.fire = self.firing;
        input.overdrive = player.energy >= METER_MAX;
        input
    }
}
