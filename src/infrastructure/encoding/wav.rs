//! WAV (RIFF PCM) encoder

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::EncodingError;
use crate::domain::audio::{AudioFormat, PcmSpec, BITS_PER_SAMPLE};

fn wav_spec(spec: PcmSpec) -> WavSpec {
    WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// Encode interleaved 16-bit samples as a bit-exact PCM WAV
pub fn encode_wav(samples: &[i16], spec: PcmSpec) -> Result<Vec<u8>, EncodingError> {
    if samples.is_empty() {
        return Err(EncodingError::Empty);
    }

    let mut bytes = Vec::with_capacity(44 + samples.len() * 2);
    {
        let mut writer = WavWriter::new(Cursor::new(&mut bytes), wav_spec(spec))
            .map_err(|e| EncodingError::setup(AudioFormat::Wav, e.to_string()))?;

        let mut pcm = writer.get_i16_writer(samples.len() as u32);
        for &sample in samples {
            pcm.write_sample(sample);
        }
        pcm.flush()
            .map_err(|e| EncodingError::encode(AudioFormat::Wav, e.to_string()))?;

        writer
            .finalize()
            .map_err(|e| EncodingError::encode(AudioFormat::Wav, e.to_string()))?;
    }
    Ok(bytes)
}

/// Read a WAV back into its spec and 16-bit samples
pub fn decode_wav(bytes: &[u8]) -> Result<(PcmSpec, Vec<i16>), EncodingError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| EncodingError::encode(AudioFormat::Wav, e.to_string()))?;
    let header = reader.spec();
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EncodingError::encode(AudioFormat::Wav, e.to_string()))?;
    Ok((PcmSpec::new(header.sample_rate, header.channels), samples))
}
