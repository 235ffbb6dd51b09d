//! Audio file writer port

use std::path::Path;

use thiserror::Error;

use crate::domain::audio::{AudioFormat, PcmSpec};

/// Save errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Write failed: {0}")]
    Write(String),
}

/// Port for turning interleaved 16-bit PCM into a file
pub trait AudioFileWriter: Send + Sync {
    /// Encode `samples` as `format` and write them to `target`.
    ///
    /// Must never overwrite an existing file at `target`, and must not leave a
    /// file behind at `target` when it fails.
    fn write(
        &self,
        samples: &[i16],
        spec: PcmSpec,
        format: AudioFormat,
        target: &Path,
    ) -> Result<(), SaveError>;
}
