//! Recording length value object for timed one-shot mode

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default length of a timed one-shot recording (10 seconds)
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// Non-zero recording length with whole-second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn default_duration() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts "30s", "1m", "2m30s" (case-insensitive, surrounding whitespace ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_lowercase();

        let (minutes_part, seconds_part) = match input.split_once('m') {
            Some((m, rest)) => (Some(m), rest),
            None => (None, input.as_str()),
        };

        let minutes = match minutes_part {
            Some(m) => parse_digits(m).ok_or_else(invalid)?,
            None => 0,
        };

        let seconds = if seconds_part.is_empty() {
            if minutes_part.is_none() {
                return Err(invalid());
            }
            0
        } else {
            let digits = seconds_part.strip_suffix('s').ok_or_else(invalid)?;
            parse_digits(digits).ok_or_else(invalid)?
        };

        let total_secs = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(invalid)?;
        if total_secs == 0 {
            return Err(invalid());
        }

        Ok(Self::from_secs(total_secs))
    }
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}
