//! Recording time value objects

mod duration;
mod elapsed;

pub use duration::{Duration, DEFAULT_DURATION_SECS};
pub use elapsed::{Elapsed, ELAPSED_TICK_MS};
