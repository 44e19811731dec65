//! Wall-clock seam
//!
//! Widgets never read the system time themselves; hosts pass a [`WallClock`]
//! when they want a display to start from "now".

use chrono::Utc;

/// Source of the current Unix time
pub trait WallClock {
    fn now_epoch_seconds(&self) -> i64;
}

/// Reads the operating system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Always reports the same instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl WallClock for FixedClock {
    fn now_epoch_seconds(&self) -> i64 {
        self.0
    }
}
