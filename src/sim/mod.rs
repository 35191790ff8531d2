//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (row-major invader grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod feedback;
pub mod input;
pub mod movement;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod swarm;
pub mod tick;
pub mod timing;
pub mod weapon;

pub use collision::Rect;
pub use input::{Intent, TickInput};
pub use session::Outcome;
pub use snapshot::{FrameSnapshot, build_snapshot};
pub use state::{
    Bullet, BulletOrigin, GameEvent, GameState, Invader, InvaderTier, Particle, ParticleColor,
    Player, SessionCommand, SessionStatus, ShotKind, Swarm,
};
pub use tick::tick;
pub use timing::{Cooldown, FrameCountdown};
