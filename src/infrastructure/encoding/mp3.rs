//! MP3 encoder (LAME)

use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, InterleavedPcm, Quality};

use super::EncodingError;
use crate::domain::audio::{AudioFormat, PcmSpec};

/// Nearest supported LAME bit rate at or above `kbps`, capped at 320
pub fn lame_bitrate(kbps: u32) -> Bitrate {
    match kbps {
        0..=32 => Bitrate::Kbps32,
        33..=40 => Bitrate::Kbps40,
        41..=48 => Bitrate::Kbps48,
        49..=64 => Bitrate::Kbps64,
        65..=80 => Bitrate::Kbps80,
        81..=96 => Bitrate::Kbps96,
        97..=112 => Bitrate::Kbps112,
        113..=128 => Bitrate::Kbps128,
        129..=160 => Bitrate::Kbps160,
        161..=192 => Bitrate::Kbps192,
        193..=224 => Bitrate::Kbps224,
        225..=256 => Bitrate::Kbps256,
        _ => Bitrate::Kbps320,
    }
}

fn setup_error(what: &str, e: impl std::fmt::Debug) -> EncodingError {
    EncodingError::setup(AudioFormat::Mp3, format!("{}: {:?}", what, e))
}

/// Encode interleaved 16-bit samples to a constant-bit-rate MP3.
///
/// The interleaved LAME entry point always reads stereo, so mono input is
/// duplicated into both channels.
pub fn encode_mp3(samples: &[i16], spec: PcmSpec, bitrate_kbps: u32) -> Result<Vec<u8>, EncodingError> {
    if samples.is_empty() {
        return Err(EncodingError::Empty);
    }

    let stereo: Vec<i16> = match spec.channels {
        1 => samples.iter().flat_map(|&s| [s, s]).collect(),
        2 => samples.to_vec(),
        n => return Err(setup_error("unsupported channel count", n)),
    };

    let mut builder = Builder::new().ok_or_else(|| setup_error("create encoder", "LAME init"))?;
    builder
        .set_num_channels(2)
        .map_err(|e| setup_error("set channels", e))?;
    builder
        .set_sample_rate(spec.sample_rate)
        .map_err(|e| setup_error("set sample rate", e))?;
    builder
        .set_brate(lame_bitrate(bitrate_kbps))
        .map_err(|e| setup_error("set bitrate", e))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| setup_error("set quality", e))?;
    let mut encoder = builder.build().map_err(|e| setup_error("build encoder", e))?;

    // LAME wants roughly 1.25x input + 7200 bytes of headroom
    let mut out: Vec<u8> = Vec::with_capacity(stereo.len() * 5 / 4 + 7200);

    let written = encoder
        .encode(InterleavedPcm(&stereo), out.spare_capacity_mut())
        .map_err(|e| EncodingError::encode(AudioFormat::Mp3, format!("{:?}", e)))?;
    // SAFETY: the encoder initialised exactly `written` bytes of spare capacity
    unsafe {
        out.set_len(written);
    }

    out.reserve(7200);
    let flushed = encoder
        .flush::<FlushNoGap>(out.spare_capacity_mut())
        .map_err(|e| EncodingError::encode(AudioFormat::Mp3, format!("{:?}", e)))?;
    // SAFETY: as above, for the flushed tail
    unsafe {
        out.set_len(out.len() + flushed);
    }

    Ok(out)
}
