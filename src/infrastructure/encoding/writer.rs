//! File writer: encode in memory, then publish without clobbering

use std::io::{self, Write};
use std::path::Path;

use crate::application::ports::{AudioFileWriter, SaveError};
use crate::domain::audio::{AudioFormat, PcmSpec};

use super::encode;

const TEMP_PREFIX: &str = ".dictaphone-";
const TEMP_SUFFIX: &str = ".part";

/// Writes finished files into place through a temp file in the target
/// directory, so a file at the target path is always complete
#[derive(Debug, Clone, Copy)]
pub struct EncodingWriter {
    mp3_bitrate_kbps: u32,
}

impl EncodingWriter {
    pub fn new(mp3_bitrate_kbps: u32) -> Self {
        Self { mp3_bitrate_kbps }
    }
}

/// Create `target` with `bytes`, failing if anything already exists there
pub fn write_new_file(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    // dropping the error's temp file removes it
    tmp.persist_noclobber(target).map_err(|e| e.error)?;
    Ok(())
}

impl AudioFileWriter for EncodingWriter {
    fn write(
        &self,
        samples: &[i16],
        spec: PcmSpec,
        format: AudioFormat,
        target: &Path,
    ) -> Result<(), SaveError> {
        let bytes = encode(samples, spec, format, self.mp3_bitrate_kbps)
            .map_err(|e| SaveError::Encode(e.to_string()))?;

        write_new_file(target, &bytes)
            .map_err(|e| SaveError::Write(format!("{}: {}", target.display(), e)))
    }
}
