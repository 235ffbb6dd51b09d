//! Capture controller: owns the input stream for one take at a time

use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::audio::{PcmSpec, RecordedAudio};
use crate::domain::recording::Elapsed;

use super::ports::{CaptureDevice, CaptureError, CaptureStream, ChunkSink};

pub struct CaptureController<D: CaptureDevice> {
    device: D,
    spec: PcmSpec,
    sink: ChunkSink,
    stream: Option<Box<dyn CaptureStream>>,
    started_at: Option<Instant>,
    warnings: Option<UnboundedSender<String>>,
}

impl<D: CaptureDevice> CaptureController<D> {
    pub fn new(device: D, spec: PcmSpec) -> Self {
        Self {
            device,
            spec,
            sink: ChunkSink::new(),
            stream: None,
            started_at: None,
            warnings: None,
        }
    }

    /// Forward driver warnings of every future take to `warnings`
    pub fn with_warnings(mut self, warnings: UnboundedSender<String>) -> Self {
        self.warnings = Some(warnings);
        self
    }

    pub fn spec(&self) -> PcmSpec {
        self.spec
    }

    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    /// Open the device and begin appending chunks to a fresh buffer.
    ///
    /// On failure nothing changes and the controller stays idle.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.stream.is_some() {
            return Err(CaptureError::AlreadyRecording);
        }

        let sink = match self.warnings {
            Some(ref tx) => ChunkSink::with_warnings(tx.clone()),
            None => ChunkSink::new(),
        };
        let stream = self.device.open(self.spec, sink.clone())?;

        self.sink = sink;
        self.stream = Some(stream);
        self.started_at = Some(Instant::now());
        Ok(())
    }

    /// Close the stream and hand over everything captured.
    ///
    /// Fails with `NotRecording` when idle and `NoAudioCaptured` when the
    /// driver never delivered a sample. A close error with audio in hand
    /// keeps the take and is reported as a warning.
    pub fn stop(&mut self) -> Result<RecordedAudio, CaptureError> {
        let stream = self.stream.take().ok_or(CaptureError::NotRecording)?;
        self.started_at = None;

        let closed = stream.close();
        let audio = RecordedAudio::new(self.sink.take(), self.spec);

        match closed {
            Err(e) if audio.is_empty() => Err(e),
            _ if audio.is_empty() => Err(CaptureError::NoAudioCaptured),
            Err(e) => {
                self.warn(format!("Input stream did not close cleanly: {}", e));
                Ok(audio)
            }
            Ok(()) => Ok(audio),
        }
    }

    fn warn(&self, message: String) {
        if let Some(ref tx) = self.warnings {
            let _ = tx.send(message);
        }
    }

    /// Time since `start`, for display only
    pub fn elapsed(&self) -> Option<Elapsed> {
        self.started_at
            .map(|started| Elapsed::from_duration(started.elapsed()))
    }
}

impl<D: CaptureDevice> Drop for CaptureController<D> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.close();
        }
    }
}
