//! Timing gates
//!
//! Two kinds of timer live side by side: rate limits measured against a
//! monotonic wall clock (fire and dash cadence) and fixed-length effects
//! counted in simulation frames (overdrive window, hit flash).

use serde::{Deserialize, Serialize};

/// Wall-clock rate limiter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Timestamp (ms) of the last time the gate was taken
    last_ms: Option<f64>,
}

impl Cooldown {
    /// True if at least `period_ms` has elapsed since the last stamp
    pub fn ready(&self, now_ms: f64, period_ms: f64) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms - last >= period_ms,
        }
    }

    pub fn stamp(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Take the gate if it is ready. Returns whether it was taken.
    pub fn try_take(&mut self, now_ms: f64, period_ms: f64) -> bool {
        if self.ready(now_ms, period_ms) {
            self.stamp(now_ms);
            true
        } else {
            false
        }
    }

    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}

/// Frame-count countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCountdown {
    remaining: u32,
}

impl FrameCountdown {
    pub fn start(&mut self, frames: u32) {
        self.remaining = frames;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one frame. Returns true on the frame the countdown expires.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
