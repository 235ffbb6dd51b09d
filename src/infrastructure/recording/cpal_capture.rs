//! Microphone capture using cpal
//!
//! `cpal::Stream` is not `Send`, so each take owns a dedicated thread that
//! builds the stream, reports whether it started, and keeps it alive until
//! the take is closed. Device audio is mixed down to mono in the callback;
//! if the device cannot run at the requested rate the take is resampled
//! when it is closed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};

use super::resample::{downmix_to_mono, f32_to_i16, resample_mono};
use crate::application::ports::{CaptureDevice, CaptureError, CaptureStream, ChunkSink};
use crate::domain::audio::PcmSpec;

const CAPTURE_THREAD_NAME: &str = "dictaphone-capture";

/// How long the capture thread sleeps between stop checks
const STOP_POLL: Duration = Duration::from_millis(50);

/// The system default input device
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalCapture;

impl CpalCapture {
    pub fn new() -> Self {
        Self
    }

    fn input_device() -> Result<cpal::Device, CaptureError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(CaptureError::NoInputDevice)
    }

    /// Pick an i16/f32 config, preferring fewer channels and one that can
    /// run at `target_rate`
    fn input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let supported = device
            .supported_input_configs()
            .map_err(|e| CaptureError::Device(format!("Failed to get input configs: {}", e)))?;

        let includes_target = |range: &cpal::SupportedStreamConfigRange| {
            range.min_sample_rate().0 <= target_rate && range.max_sample_rate().0 >= target_rate
        };

        let mut best: Option<cpal::SupportedStreamConfigRange> = None;
        for range in supported {
            if range.sample_format() != SampleFormat::I16
                && range.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match best {
                None => true,
                Some(ref current) => {
                    let better_rate = includes_target(&range) && !includes_target(current);
                    let same_rate_fit = includes_target(&range) == includes_target(current);
                    better_rate || (same_rate_fit && range.channels() < current.channels())
                }
            };
            if is_better {
                best = Some(range);
            }
        }

        let range = best.ok_or_else(|| {
            CaptureError::Device("No supported input format (need i16 or f32)".to_string())
        })?;

        let sample_rate = if includes_target(&range) {
            SampleRate(target_rate)
        } else {
            range.max_sample_rate()
        };

        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };
        Ok((config, range.sample_format()))
    }

    /// Build and start the stream; returns it with the device rate
    fn start_stream(spec: PcmSpec, sink: &ChunkSink) -> Result<(cpal::Stream, u32), CaptureError> {
        let device = Self::input_device()?;
        let (config, sample_format) = Self::input_config(&device, spec.sample_rate)?;
        let channels = config.channels;
        let device_rate = config.sample_rate.0;

        let error_sink = sink.clone();
        let on_error = move |err: cpal::StreamError| {
            error_sink.warn(format!("Audio stream error: {}", err));
        };

        let stream = match sample_format {
            SampleFormat::I16 => {
                let data_sink = sink.clone();
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        data_sink.push(downmix_to_mono(data, channels));
                    },
                    on_error,
                    None,
                )
            }
            SampleFormat::F32 => {
                let data_sink = sink.clone();
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let samples: Vec<i16> = data.iter().map(|&s| f32_to_i16(s)).collect();
                        data_sink.push(downmix_to_mono(&samples, channels));
                    },
                    on_error,
                    None,
                )
            }
            other => {
                return Err(CaptureError::Device(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        }
        .map_err(|e| CaptureError::Device(format!("Failed to open input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| CaptureError::Device(format!("Failed to start input stream: {}", e)))?;

        Ok((stream, device_rate))
    }
}

impl CaptureDevice for CpalCapture {
    fn open(&self, spec: PcmSpec, sink: ChunkSink) -> Result<Box<dyn CaptureStream>, CaptureError> {
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, CaptureError>>();

        let thread_running = Arc::clone(&running);
        let thread_sink = sink.clone();
        let handle = std::thread::Builder::new()
            .name(CAPTURE_THREAD_NAME.to_string())
            .spawn(move || {
                let stream = match Self::start_stream(spec, &thread_sink) {
                    Ok((stream, device_rate)) => {
                        let _ = ready_tx.send(Ok(device_rate));
                        stream
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                while thread_running.load(Ordering::SeqCst) {
                    std::thread::park_timeout(STOP_POLL);
                }
                drop(stream);
            })
            .map_err(|e| CaptureError::Device(format!("Failed to spawn capture thread: {}", e)))?;

        let device_rate = match ready_rx.recv() {
            Ok(Ok(rate)) => rate,
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e);
            }
            Err(_) => {
                let _ = handle.join();
                return Err(CaptureError::Device(
                    "Capture thread exited before the stream started".to_string(),
                ));
            }
        };

        Ok(Box::new(CpalStream {
            running,
            handle: Some(handle),
            device_rate,
            spec,
            sink,
        }))
    }
}

/// A running take on the capture thread
struct CpalStream {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    device_rate: u32,
    spec: PcmSpec,
    sink: ChunkSink,
}

impl CpalStream {
    fn join(&mut self) -> Result<(), CaptureError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            handle
                .join()
                .map_err(|_| CaptureError::Device("Capture thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl CaptureStream for CpalStream {
    fn close(mut self: Box<Self>) -> Result<(), CaptureError> {
        self.join()?;

        if self.device_rate != self.spec.sample_rate {
            let samples = self.sink.take().concat();
            let resampled = resample_mono(&samples, self.device_rate, self.spec.sample_rate)
                .map_err(|e| CaptureError::Device(e.to_string()))?;
            self.sink.push(resampled);
        }
        Ok(())
    }
}

impl Drop for CpalStream {
    fn drop(&mut self) {
        let _ = self.join();
    }
}
