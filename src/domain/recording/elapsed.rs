//! Elapsed recording time for display

use std::fmt;
use std::time::Duration as StdDuration;

/// Interval at which the elapsed-time display is refreshed while recording
pub const ELAPSED_TICK_MS: u64 = 200;

/// Whole minutes and seconds since recording started
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub fn from_duration(duration: StdDuration) -> Self {
        let total = duration.as_secs();
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
