//! Game state and core simulation types
//!
//! The entity store for one session: player ship, invader swarm, bullets
//! and particles. Everything the simulation mutates lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::timing::{Cooldown, FrameCountdown};
use crate::consts::*;
use crate::tuning::{SwarmTuning, Tuning};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionStatus {
    /// Waiting for the first start command
    Start,
    /// Active gameplay
    Playing,
    /// Lives depleted or the swarm reached the ship
    GameOver,
    /// Every invader destroyed
    Won,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::GameOver | SessionStatus::Won)
    }
}

/// Commands from the host shell, honored between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Start or restart: fresh player, fresh swarm, score 0, level 1
    Start,
}

/// Invader size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvaderTier {
    Small,
    Medium,
    Large,
}

impl InvaderTier {
    pub fn points(&self) -> u64 {
        match self {
            InvaderTier::Small => 10,
            InvaderTier::Medium => 30,
            InvaderTier::Large => 50,
        }
    }

    /// Top row is large, the upper half medium, the rest small
    pub fn for_row(row: usize, rows: usize) -> Self {
        if row == 0 {
            InvaderTier::Large
        } else if row < rows.div_ceil(2) {
            InvaderTier::Medium
        } else {
            InvaderTier::Small
        }
    }
}

/// A single invader (dead invaders stay in place with `alive = false`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub pos: Vec2,
    pub tier: InvaderTier,
    pub alive: bool,
    pub row: usize,
    pub col: usize,
}

impl Invader {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(INVADER_WIDTH, INVADER_HEIGHT))
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

/// The invader grid with its shared direction and speed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Swarm {
    /// Row-major grid, fixed for the whole session
    pub invaders: Vec<Invader>,
    /// +1.0 marching right, -1.0 marching left
    pub direction: f32,
    /// Pixels per frame
    pub speed: f32,
}

impl Swarm {
    /// Lay out a fresh, fully alive grid centered horizontally
    pub fn spawn(tuning: &SwarmTuning) -> Self {
        let pitch_x = INVADER_WIDTH + tuning.spacing;
        let pitch_y = INVADER_HEIGHT + tuning.spacing;
        let start_x = (PLAY_WIDTH - tuning.grid_width()) / 2.0;

        let mut invaders = Vec::with_capacity(tuning.rows * tuning.cols);
        for row in 0..tuning.rows {
            for col in 0..tuning.cols {
                invaders.push(Invader {
                    pos: Vec2::new(
                        start_x + col as f32 * pitch_x,
                        tuning.start_y + row as f32 * pitch_y,
                    ),
                    tier: InvaderTier::for_row(row, tuning.rows),
                    alive: true,
                    row,
                    col,
                });
            }
        }

        Self {
            invaders,
            direction: 1.0,
            speed: tuning.start_speed,
        }
    }

    pub fn live(&self) -> impl Iterator<Item = &Invader> {
        self.invaders.iter().filter(|i| i.alive)
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// True once a non-empty grid has no live invaders left
    pub fn is_cleared(&self) -> bool {
        !self.invaders.is_empty() && self.invaders.iter().all(|i| !i.alive)
    }

    /// True if any live invader's lower edge is below `y`
    pub fn has_reached(&self, y: f32) -> bool {
        self.live().any(|i| i.pos.y + INVADER_HEIGHT > y)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub lives: u8,
    /// 0-100, full energy enables overdrive
    pub energy: f32,
    /// 0-100, full charge fires a mega shot on release
    pub charge: f32,
    pub overdrive: FrameCountdown,
    pub hit_flash: FrameCountdown,
    /// Fire state seen on the previous tick (release detection)
    pub fire_held_last: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAY_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, PLAYER_Y),
            lives: PLAYER_START_LIVES,
            energy: METER_MAX,
            charge: 0.0,
            overdrive: FrameCountdown::default(),
            hit_flash: FrameCountdown::default(),
            fire_held_last: false,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Horizontal center of the nose, where bullets leave the ship
    pub fn muzzle_x(&self) -> f32 {
        self.pos.x + PLAYER_WIDTH / 2.0
    }

    pub fn is_overdrive(&self) -> bool {
        self.overdrive.is_active()
    }

    /// Clamp position and meters to their valid ranges
    pub fn clamp(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, PLAY_WIDTH - PLAYER_WIDTH);
        self.energy = self.energy.clamp(0.0, METER_MAX);
        self.charge = self.charge.clamp(0.0, METER_MAX);
    }
}

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOrigin {
    Player,
    Invader,
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame; negative y travels up
    pub vel: Vec2,
    pub origin: BulletOrigin,
    /// Mega bullets pierce through invaders
    pub mega: bool,
}

impl Bullet {
    /// Player bullet leaving the ship with its nose at `(center_x, y)`
    pub fn player(center_x: f32, y: f32, speed: f32, drift: f32, mega: bool) -> Self {
        let size = if mega {
            Vec2::new(MEGA_BULLET_WIDTH, MEGA_BULLET_HEIGHT)
        } else {
            Vec2::new(BULLET_WIDTH, BULLET_HEIGHT)
        };
        Self {
            pos: Vec2::new(center_x - size.x / 2.0, y),
            size,
            vel: Vec2::new(drift, -speed),
            origin: BulletOrigin::Player,
            mega,
        }
    }

    /// Invader bullet dropping from `(center_x, y)`
    pub fn invader(center_x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - BULLET_WIDTH / 2.0, y),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel: Vec2::new(0.0, speed),
            origin: BulletOrigin::Invader,
            mega: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Still within the vertical play bounds (plus margin)
    pub fn in_bounds(&self) -> bool {
        self.pos.y + self.size.y > -BULLET_BOUNDS_MARGIN
            && self.pos.y < PLAY_HEIGHT + BULLET_BOUNDS_MARGIN
    }
}

/// Particle palette: cyan for standard kills and dashes, pink for mega
/// kills and overdrive, red for hits on the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Cyan,
    Pink,
    Red,
}

impl ParticleColor {
    /// RGB for presentation
    pub fn rgb(&self) -> u32 {
        match self {
            ParticleColor::Cyan => 0x00f2ff,
            ParticleColor::Pink => 0xff00d4,
            ParticleColor::Red => 0xff3131,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed at 0
    pub life: f32,
    pub color: ParticleColor,
}

/// Kind of player shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotKind {
    Standard,
    Triple,
    Mega,
}

/// Things that happened during a tick, for audio and commentary adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { kind: ShotKind },
    Dash,
    OverdriveStarted,
    OverdriveEnded,
    InvaderFired { pos: Vec2 },
    SwarmReversed { speed: f32 },
    InvaderKilled { tier: InvaderTier, points: u64, pos: Vec2, mega: bool },
    PlayerHit { lives: u8 },
    Explosion { pos: Vec2, color: ParticleColor, particles: usize },
    SessionLost { score: u64 },
    SessionWon { score: u64 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single random source (invader fire, particle spread)
    pub rng: Pcg32,
    /// Number of start/restart commands honored
    pub restarts: u64,
    pub status: SessionStatus,
    pub score: u64,
    pub level: u32,
    /// Simulated frames in the current session
    pub frame: u64,
    pub player: Player,
    pub swarm: Swarm,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Screen shake intensity (0-1, decays each frame)
    pub shake: f32,
    pub fire_gate: Cooldown,
    pub dash_gate: Cooldown,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new session in START with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            restarts: 0,
            status: SessionStatus::Start,
            score: 0,
            level: 1,
            frame: 0,
            player: Player::default(),
            swarm: Swarm::default(),
            bullets: Vec::new(),
            particles: Vec::new(),
            shake: 0.0,
            fire_gate: Cooldown::default(),
            dash_gate: Cooldown::default(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Apply a host command. Only called between ticks.
    pub fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Start => self.start_session(),
        }
    }

    fn start_session(&mut self) {
        self.restarts += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.restarts));
        self.score = 0;
        self.level = 1;
        self.frame = 0;
        self.player = Player::default();
        self.swarm = Swarm::spawn(&self.tuning.swarm);
        self.bullets.clear();
        self.particles.clear();
        self.shake = 0.0;
        self.fire_gate = Cooldown::default();
        self.dash_gate = Cooldown::default();
        self.events.clear();
        self.status = SessionStatus::Playing;

        log::info!(
            "Session {} started: {} invaders, lives {}",
            self.restarts,
            self.swarm.invaders.len(),
            self.player.lives
        );
    }
}
