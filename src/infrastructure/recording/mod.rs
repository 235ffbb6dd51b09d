//! Microphone capture adapters

pub mod cpal_capture;
pub mod resample;

pub use cpal_capture::CpalCapture;
pub use resample::{downmix_to_mono, resample_mono, ResampleError};
