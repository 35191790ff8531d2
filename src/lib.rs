//! Neon Strike - A wave-based invader shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, swarm, collisions, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences applied to snapshots

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Ship baseline (distance from bottom of the field is 60 px)
    pub const PLAYER_Y: f32 = PLAY_HEIGHT - 60.0;
    pub const PLAYER_START_LIVES: u8 = 3;

    /// Energy and charge meters share the same scale
    pub const METER_MAX: f32 = 100.0;

    /// Invader size
    pub const INVADER_WIDTH: f32 = 30.0;
    pub const INVADER_HEIGHT: f32 = 20.0;

    /// Standard bullet
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    /// Charged mega bullet
    pub const MEGA_BULLET_WIDTH: f32 = 12.0;
    pub const MEGA_BULLET_HEIGHT: f32 = 24.0;
    /// Bullets survive this far past the top/bottom edge
    pub const BULLET_BOUNDS_MARGIN: f32 = 16.0;

    /// Nominal display refresh (used by the headless runner's clock)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
