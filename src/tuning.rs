//! Data-driven game balance
//!
//! Every number that shapes how the game plays lives here so a balance pass
//! never touches simulation code. Loaded from JSON; missing fields fall back
//! to the shipped defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{INVADER_HEIGHT, INVADER_WIDTH, PLAYER_Y, PLAY_WIDTH};

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Player ship movement and resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal pixels per frame
    pub speed: f32,
    /// Speed multiplier while overdrive is active
    pub overdrive_speed_mult: f32,
    /// Energy regained per frame outside overdrive
    pub energy_regen: f32,
    /// Overdrive window length in frames
    pub overdrive_frames: u32,
    /// Dash jump distance in pixels
    pub dash_distance: f32,
    /// Minimum wall-clock time between dashes
    pub dash_cooldown_ms: f64,
    /// Frames of hit-flash after taking damage
    pub hit_flash_frames: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 7.0,
            overdrive_speed_mult: 1.5,
            energy_regen: 0.3,
            overdrive_frames: 300,
            dash_distance: 120.0,
            dash_cooldown_ms: 800.0,
            hit_flash_frames: 20,
        }
    }
}

/// Weapon cadence and projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub fire_cooldown_ms: f64,
    pub overdrive_fire_cooldown_ms: f64,
    /// Charge gained per frame while fire is held
    pub charge_rate: f32,
    /// Horizontal offset of the two outer triple-shot bullets
    pub spread_offset: f32,
    /// Horizontal drift of outer triple-shot bullets, as a fraction of bullet speed
    pub spread_angle: f32,
    pub bullet_speed: f32,
    pub invader_bullet_speed: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_cooldown_ms: 400.0,
            overdrive_fire_cooldown_ms: 120.0,
            charge_rate: 2.0,
            spread_offset: 15.0,
            spread_angle: 0.15,
            bullet_speed: 8.0,
            invader_bullet_speed: 6.0,
        }
    }
}

/// Invader grid layout and difficulty ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmTuning {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f32,
    pub start_y: f32,
    pub start_speed: f32,
    /// Speed added on every edge reversal
    pub speed_step: f32,
    pub max_speed: f32,
    /// Distance from each side wall that triggers a reversal
    pub edge_margin: f32,
    /// Pixels the swarm drops on every reversal
    pub row_descent: f32,
    /// Per-frame chance that one live invader fires
    pub fire_chance: f64,
}

impl SwarmTuning {
    /// Width of the grid from the left edge of the first column to the right
    /// edge of the last
    pub fn grid_width(&self) -> f32 {
        self.cols as f32 * (INVADER_WIDTH + self.spacing) - self.spacing
    }

    /// Lower edge of the bottom row at spawn
    pub fn grid_bottom(&self) -> f32 {
        self.start_y + self.rows as f32 * (INVADER_HEIGHT + self.spacing) - self.spacing
    }
}

impl Default for SwarmTuning {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 11,
            spacing: 15.0,
            start_y: 80.0,
            start_speed: 1.0,
            speed_step: 0.05,
            max_speed: 4.0,
            edge_margin: 10.0,
            row_descent: 20.0,
            fire_chance: 0.02,
        }
    }
}

/// Particles, shake and flash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTuning {
    pub explosion_particles: usize,
    pub overdrive_particles: usize,
    pub dash_particles: usize,
    pub player_hit_particles: usize,
    /// Particle velocity components are drawn from [-max, max]
    pub particle_speed: f32,
    /// Life lost per frame (life starts at 1.0)
    pub particle_decay: f32,
    pub max_particles: usize,
    /// Multiplicative per-frame shake decay
    pub shake_decay: f32,
    pub shake_mega_kill: f32,
    pub shake_overdrive: f32,
    pub shake_player_hit: f32,
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            explosion_particles: 8,
            overdrive_particles: 20,
            dash_particles: 10,
            player_hit_particles: 15,
            particle_speed: 4.0,
            particle_decay: 0.025,
            max_particles: 512,
            shake_decay: 0.9,
            shake_mega_kill: 0.4,
            shake_overdrive: 0.6,
            shake_player_hit: 1.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub weapon: WeaponTuning,
    pub swarm: SwarmTuning,
    pub feedback: FeedbackTuning,
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        let s = &self.swarm;
        if s.rows == 0 || s.cols == 0 {
            return Err(invalid("swarm.rows", "grid must have at least one row and column"));
        }
        if s.spacing < 0.0 || s.edge_margin < 0.0 || s.start_y < 0.0 {
            return Err(invalid(
                "swarm.spacing",
                "spacing, edge margin and start y must not be negative",
            ));
        }
        let lane = PLAY_WIDTH - 2.0 * s.edge_margin;
        if s.grid_width() > lane {
            return Err(invalid(
                "swarm.cols",
                format!(
                    "{} columns span {} px, only {} px between margins",
                    s.cols,
                    s.grid_width(),
                    lane
                ),
            ));
        }
        if s.grid_bottom() > PLAYER_Y {
            return Err(invalid(
                "swarm.rows",
                format!(
                    "{} rows reach y={} below the ship at y={}",
                    s.rows,
                    s.grid_bottom(),
                    PLAYER_Y
                ),
            ));
        }
        if s.start_speed <= 0.0 {
            return Err(invalid("swarm.start_speed", "must be positive"));
        }
        if s.speed_step < 0.0 {
            return Err(invalid("swarm.speed_step", "must not be negative"));
        }
        if s.max_speed < s.start_speed {
            return Err(invalid(
                "swarm.max_speed",
                format!("{} is below start speed {}", s.max_speed, s.start_speed),
            ));
        }
        if !(0.0..=1.0).contains(&s.fire_chance) {
            return Err(invalid("swarm.fire_chance", "must be within [0, 1]"));
        }

        let w = &self.weapon;
        if w.fire_cooldown_ms <= 0.0 || w.overdrive_fire_cooldown_ms <= 0.0 {
            return Err(invalid("weapon.fire_cooldown_ms", "cooldowns must be positive"));
        }
        if w.bullet_speed <= 0.0 || w.invader_bullet_speed <= 0.0 {
            return Err(invalid("weapon.bullet_speed", "must be positive"));
        }
        if w.charge_rate <= 0.0 {
            return Err(invalid("weapon.charge_rate", "must be positive"));
        }

        let p = &self.player;
        if p.speed < 0.0 || p.energy_regen < 0.0 {
            return Err(invalid("player.speed", "must not be negative"));
        }
        if p.dash_cooldown_ms <= 0.0 {
            return Err(invalid("player.dash_cooldown_ms", "must be positive"));
        }

        let f = &self.feedback;
        if f.particle_decay <= 0.0 {
            return Err(invalid("feedback.particle_decay", "must be positive"));
        }
        if !(0.0..1.0).contains(&f.shake_decay) {
            return Err(invalid("feedback.shake_decay", "must be within [0, 1)"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
