//! FLAC encoder
//!
//! Lossless, 16-bit, at whatever rate and channel count the take was
//! captured with.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

use super::EncodingError;
use crate::domain::audio::{AudioFormat, PcmSpec, BITS_PER_SAMPLE};

/// Encode interleaved 16-bit samples to FLAC bytes
pub fn encode_flac(samples: &[i16], spec: PcmSpec) -> Result<Vec<u8>, EncodingError> {
    if samples.is_empty() {
        return Err(EncodingError::Empty);
    }

    // flacenc works on i32
    let samples_i32: Vec<i32> = samples.iter().map(|&s| s as i32).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::setup(AudioFormat::Flac, format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        spec.channels as usize,
        BITS_PER_SAMPLE as usize,
        spec.sample_rate as usize,
    );

    let stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodingError::encode(AudioFormat::Flac, format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| EncodingError::encode(AudioFormat::Flac, e.to_string()))?;

    Ok(sink.into_inner())
}
