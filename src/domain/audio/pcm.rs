//! Raw PCM value objects

use std::time::Duration as StdDuration;

/// Capture sample rate
pub const CAPTURE_SAMPLE_RATE: u32 = 44_100;

/// Capture channel count (mono)
pub const CAPTURE_CHANNELS: u16 = 1;

/// Bits per sample for every writer
pub const BITS_PER_SAMPLE: u16 = 16;

/// One block of interleaved signed 16-bit samples as delivered by the device
pub type PcmChunk = Vec<i16>;

/// Sample rate and channel layout of a PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmSpec {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// The fixed spec used for capture: 44.1kHz mono
    pub const fn capture() -> Self {
        Self::new(CAPTURE_SAMPLE_RATE, CAPTURE_CHANNELS)
    }

    /// Duration covered by `samples` interleaved samples
    pub fn duration_of(&self, samples: usize) -> StdDuration {
        let frames = samples as u64 / self.channels.max(1) as u64;
        StdDuration::from_millis(frames * 1000 / self.sample_rate.max(1) as u64)
    }
}

impl Default for PcmSpec {
    fn default() -> Self {
        Self::capture()
    }
}

/// Audio captured during one recording session.
///
/// Chunks are kept in the order the capture callback appended them and are
/// only ever concatenated, never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAudio {
    chunks: Vec<PcmChunk>,
    spec: PcmSpec,
}

impl RecordedAudio {
    pub fn new(chunks: Vec<PcmChunk>, spec: PcmSpec) -> Self {
        Self { chunks, spec }
    }

    pub fn spec(&self) -> PcmSpec {
        self.spec
    }

    pub fn chunks(&self) -> &[PcmChunk] {
        &self.chunks
    }

    /// Total number of samples across all chunks
    pub fn sample_count(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// True when no sample was ever delivered
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }

    /// Length of the recording
    pub fn duration(&self) -> StdDuration {
        self.spec.duration_of(self.sample_count())
    }

    /// Join every chunk into one contiguous buffer, in append order
    pub fn concat(&self) -> Vec<i16> {
        let mut samples = Vec::with_capacity(self.sample_count());
        for chunk in &self.chunks {
            samples.extend_from_slice(chunk);
        }
        samples
    }
}
