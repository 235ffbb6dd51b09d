//! Sample conversion helpers for the capture adapter

use rubato::{FftFixedIn, Resampler};
use thiserror::Error;

/// Resampling errors
#[derive(Debug, Error)]
pub enum ResampleError {
    #[error("Resampler init failed: {0}")]
    Init(String),

    #[error("Resampling failed: {0}")]
    Process(String),
}

/// Scale a float sample in [-1, 1] to 16-bit, clamping out-of-range input
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Average interleaved frames down to one channel
pub fn downmix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Resample mono 16-bit audio from `from_rate` to `to_rate`
pub fn resample_mono(samples: &[i16], from_rate: u32, to_rate: u32) -> Result<Vec<i16>, ResampleError> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = to_rate as f64 / from_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, 1024, 2, 1)
        .map_err(|e| ResampleError::Init(e.to_string()))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());

        let mut block = samples_f32[input_pos..end_pos].to_vec();
        // last block is zero-padded to a full frame
        block.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[block], None)
            .map_err(|e| ResampleError::Process(e.to_string()))?;

        output.extend(resampled[0].iter().map(|&s| f32_to_i16(s)));
        input_pos = end_pos;
    }

    output.truncate(output_len);
    Ok(output)
}
