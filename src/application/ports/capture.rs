//! Audio capture port

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::audio::{PcmChunk, PcmSpec};

/// Capture errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Recording already in progress")]
    AlreadyRecording,

    #[error("No recording in progress")]
    NotRecording,

    #[error("No audio input device available")]
    NoInputDevice,

    #[error("{0}")]
    Device(String),

    #[error("No audio captured")]
    NoAudioCaptured,
}

/// Append-only destination for chunks delivered by the driver.
///
/// Cloned into the driver callback. `push` only takes a short lock and never
/// waits on the UI; warnings go through an unbounded channel.
#[derive(Clone, Default)]
pub struct ChunkSink {
    chunks: Arc<Mutex<Vec<PcmChunk>>>,
    warnings: Option<UnboundedSender<String>>,
}

impl ChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward driver warnings to `warnings`
    pub fn with_warnings(warnings: UnboundedSender<String>) -> Self {
        Self {
            chunks: Arc::default(),
            warnings: Some(warnings),
        }
    }

    /// Append one chunk; empty chunks are dropped
    pub fn push(&self, chunk: PcmChunk) {
        if chunk.is_empty() {
            return;
        }
        match self.chunks.lock() {
            Ok(mut chunks) => chunks.push(chunk),
            Err(poisoned) => poisoned.into_inner().push(chunk),
        }
    }

    /// Report a non-fatal driver condition
    pub fn warn(&self, message: impl Into<String>) {
        if let Some(ref tx) = self.warnings {
            let _ = tx.send(message.into());
        }
    }

    /// Drain every chunk, in append order
    pub fn take(&self) -> Vec<PcmChunk> {
        match self.chunks.lock() {
            Ok(mut chunks) => std::mem::take(&mut *chunks),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

/// An open input stream delivering chunks into its sink
pub trait CaptureStream: Send {
    /// Stop delivery and release the device.
    ///
    /// After this returns the sink holds every chunk of the take at the
    /// requested spec, and no further chunk will be pushed.
    fn close(self: Box<Self>) -> Result<(), CaptureError>;
}

/// Port for an audio input device
pub trait CaptureDevice: Send + Sync {
    /// Open and start a stream at `spec`, delivering into `sink`.
    ///
    /// Fails with `CaptureError::Device`/`NoInputDevice` when the device is
    /// busy or missing.
    fn open(&self, spec: PcmSpec, sink: ChunkSink) -> Result<Box<dyn CaptureStream>, CaptureError>;
}
