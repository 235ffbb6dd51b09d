//! OGG Vorbis encoder

use std::num::{NonZeroU32, NonZeroU8};

use vorbis_rs::{VorbisBitrateManagementStrategy, VorbisEncoderBuilder};

use super::EncodingError;
use crate::domain::audio::{AudioFormat, PcmSpec};

/// Quality-based VBR target, about 128 kbps for stereo music
pub const VORBIS_QUALITY: f32 = 0.4;

/// Frames handed to the encoder per block
const BLOCK_FRAMES: usize = 4096;

/// Encode interleaved 16-bit samples to an OGG Vorbis stream
pub fn encode_ogg(samples: &[i16], spec: PcmSpec) -> Result<Vec<u8>, EncodingError> {
    if samples.is_empty() {
        return Err(EncodingError::Empty);
    }

    let sample_rate = NonZeroU32::new(spec.sample_rate)
        .ok_or_else(|| EncodingError::setup(AudioFormat::Ogg, "sample rate must be non-zero"))?;
    let channel_count = u8::try_from(spec.channels)
        .ok()
        .and_then(NonZeroU8::new)
        .ok_or_else(|| EncodingError::setup(AudioFormat::Ogg, "unsupported channel count"))?;
    let channels = spec.channels as usize;

    let mut out = Vec::new();
    {
        let mut encoder = VorbisEncoderBuilder::new(sample_rate, channel_count, &mut out)
            .map_err(|e| EncodingError::setup(AudioFormat::Ogg, e.to_string()))?
            .bitrate_management_strategy(VorbisBitrateManagementStrategy::QualityVbr {
                target_quality: VORBIS_QUALITY,
            })
            .build()
            .map_err(|e| EncodingError::setup(AudioFormat::Ogg, e.to_string()))?;

        for block in samples.chunks(BLOCK_FRAMES * channels) {
            // Vorbis takes planar f32
            let frames = block.len() / channels;
            let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); channels];
            for frame in block.chunks_exact(channels) {
                for (ch, &sample) in frame.iter().enumerate() {
                    planar[ch].push(sample as f32 / 32768.0);
                }
            }

            encoder
                .encode_audio_block(&planar)
                .map_err(|e| EncodingError::encode(AudioFormat::Ogg, e.to_string()))?;
        }

        encoder
            .finish()
            .map_err(|e| EncodingError::encode(AudioFormat::Ogg, e.to_string()))?;
    }

    Ok(out)
}
