//! Audio value objects

mod format;
mod pcm;

pub use format::{AudioFormat, ALL_FORMATS};
pub use pcm::{
    PcmChunk, PcmSpec, RecordedAudio, BITS_PER_SAMPLE, CAPTURE_CHANNELS, CAPTURE_SAMPLE_RATE,
};
