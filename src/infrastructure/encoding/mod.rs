//! Audio encoders and the file writer built on them

pub mod flac;
pub mod mp3;
pub mod ogg;
pub mod wav;
pub mod writer;

use thiserror::Error;

use crate::domain::audio::{AudioFormat, PcmSpec};

pub use flac::encode_flac;
pub use mp3::encode_mp3;
pub use ogg::encode_ogg;
pub use wav::{decode_wav, encode_wav};
pub use writer::EncodingWriter;

/// Encoding errors
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("no samples to encode")]
    Empty,

    #[error("{format} encoder setup failed: {message}")]
    Setup { format: AudioFormat, message: String },

    #[error("{format} encoding failed: {message}")]
    Encode { format: AudioFormat, message: String },
}

impl EncodingError {
    pub(crate) fn setup(format: AudioFormat, message: impl Into<String>) -> Self {
        Self::Setup {
            format,
            message: message.into(),
        }
    }

    pub(crate) fn encode(format: AudioFormat, message: impl Into<String>) -> Self {
        Self::Encode {
            format,
            message: message.into(),
        }
    }
}

/// Encode interleaved 16-bit samples into the bytes of a complete file
pub fn encode(
    samples: &[i16],
    spec: PcmSpec,
    format: AudioFormat,
    mp3_bitrate_kbps: u32,
) -> Result<Vec<u8>, EncodingError> {
    match format {
        AudioFormat::Mp3 => encode_mp3(samples, spec, mp3_bitrate_kbps),
        AudioFormat::Wav => encode_wav(samples, spec),
        AudioFormat::Flac => encode_flac(samples, spec),
        AudioFormat::Ogg => encode_ogg(samples, spec),
    }
}
