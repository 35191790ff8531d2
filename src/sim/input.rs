//! Input resolution
//!
//! Turns the host's held-key snapshot into the actions for this frame.

use serde::{Deserialize, Serialize};

/// Held-state input snapshot, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub dash: bool,
    pub overdrive: bool,
}

/// Actions intended for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// -1.0 left, 1.0 right, 0.0 idle (left and right together cancel)
    pub steer: f32,
    pub dash: bool,
    pub overdrive: bool,
    pub fire_held: bool,
    /// Fire came up this frame
    pub fire_released: bool,
}

/// Resolve an input snapshot against last frame's fire state
pub fn resolve(input: &TickInput, fire_was_held: bool) -> Intent {
    let mut steer = 0.0;
    if input.left {
        steer -= 1.0;
    }
    if input.right {
        steer += 1.0;
    }

    Intent {
        steer,
        dash: input.dash,
        overdrive: input.overdrive,
        fire_held: input.fire,
        fire_released: !input.fire && fire_was_held,
    }
}
