//! Save pipeline: pick a free target path, encode, write

use std::path::{Path, PathBuf};

use crate::domain::audio::{AudioFormat, RecordedAudio};
use crate::domain::naming::base_name_or;

use super::ports::{AudioFileWriter, FileCatalog, SaveError};

/// First free `<output_dir>/<base>[_N].<ext>`.
///
/// `base` is the sanitized `requested` name, or `fallback` when nothing
/// usable is left. Collisions get `_1`, `_2`, ... appended to the base.
pub fn resolve_target_path<C>(
    catalog: &C,
    output_dir: &Path,
    requested: &str,
    fallback: &str,
    extension: &str,
) -> PathBuf
where
    C: FileCatalog + ?Sized,
{
    let base = base_name_or(requested, fallback);

    let candidate = output_dir.join(format!("{}.{}", base, extension));
    if !catalog.exists(&candidate) {
        return candidate;
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = output_dir.join(format!("{}_{}.{}", base, suffix, extension));
        if !catalog.exists(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Concatenate the take and hand it to the writer
pub fn encode_and_write<W>(
    writer: &W,
    audio: &RecordedAudio,
    format: AudioFormat,
    target: &Path,
) -> Result<(), SaveError>
where
    W: AudioFileWriter + ?Sized,
{
    let samples = audio.concat();
    if samples.is_empty() {
        return Err(SaveError::Encode("no samples to encode".to_string()));
    }
    writer.write(&samples, audio.spec(), format, target)
}

/// A take bound to its target, ready to run off the UI task
#[derive(Debug)]
pub struct SaveJob {
    audio: RecordedAudio,
    format: AudioFormat,
    target: PathBuf,
}

impl SaveJob {
    pub fn new(audio: RecordedAudio, format: AudioFormat, target: PathBuf) -> Self {
        Self {
            audio,
            format,
            target,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Run to completion. The take comes back on failure so it can be retried.
    pub fn run<W: AudioFileWriter + ?Sized>(self, writer: &W) -> SaveReport {
        match encode_and_write(writer, &self.audio, self.format, &self.target) {
            Ok(()) => SaveReport::Saved {
                target: self.target,
            },
            Err(error) => SaveReport::Failed {
                target: self.target,
                error,
                audio: self.audio,
            },
        }
    }
}

/// Result of a save job, delivered back to the UI task
#[derive(Debug)]
pub enum SaveReport {
    Saved {
        target: PathBuf,
    },
    Failed {
        target: PathBuf,
        error: SaveError,
        audio: RecordedAudio,
    },
}

impl SaveReport {
    pub fn target(&self) -> &Path {
        match self {
            Self::Saved { target } | Self::Failed { target, .. } => target,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// File name component of `path`, for status messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::application::testing::{MockCatalog, MockWriter};
    use crate::domain::audio::PcmSpec;

    fn take(samples: Vec<i16>) -> RecordedAudio {
        RecordedAudio::new(vec![samples], PcmSpec::capture())
    }

    #[test]
    fn free_name_is_used_as_is() {
        let catalog = MockCatalog::default();
        let path = resolve_target_path(&catalog, Path::new("/rec"), "8", "8", "mp3");
        assert_eq!(path, PathBuf::from("/rec/8.mp3"));
    }

    #[test]
    fn collisions_get_suffixes_on_the_base() {
        let catalog = MockCatalog::with_files("/rec", &["8.mp3"]);
        let path = resolve_target_path(&catalog, Path::new("/rec"), "8", "8", "mp3");
        assert_eq!(path, PathBuf::from("/rec/8_1.mp3"));

        catalog.add(Path::new("/rec"), "8_1.mp3");
        let path = resolve_target_path(&catalog, Path::new("/rec"), "8", "8", "mp3");
        assert_eq!(path, PathBuf::from("/rec/8_2.mp3"));
    }

    #[test]
    fn collision_is_per_extension() {
        let catalog = MockCatalog::with_files("/rec", &["8.wav"]);
        let path = resolve_target_path(&catalog, Path::new("/rec"), "8", "8", "mp3");
        assert_eq!(path, PathBuf::from("/rec/8.mp3"));
    }

    #[test]
    fn name_is_sanitized() {
        let catalog = MockCatalog::default();
        let path =
            resolve_target_path(&catalog, Path::new("/rec"), "  ../my take!  ", "8", "wav");
        assert_eq!(path, PathBuf::from("/rec/my take.wav"));
    }

    #[test]
    fn unusable_name_falls_back() {
        let catalog = MockCatalog::default();
        let path = resolve_target_path(&catalog, Path::new("/rec"), "///", "12", "flac");
        assert_eq!(path, PathBuf::from("/rec/12.flac"));
    }

    #[test]
    fn job_writes_concatenated_samples() {
        let writer = MockWriter::default();
        let audio = RecordedAudio::new(vec![vec![1, 2], vec![3]], PcmSpec::capture());
        let job = SaveJob::new(audio, AudioFormat::Wav, PathBuf::from("/rec/1.wav"));

        let outcome = job.run(&writer);
        assert!(outcome.is_saved());
        assert_eq!(outcome.target(), Path::new("/rec/1.wav"));

        let written = writer.written.lock().unwrap();
        assert_eq!(written[0].1, AudioFormat::Wav);
        assert_eq!(written[0].2, vec![1, 2, 3]);
    }

    #[test]
    fn failed_job_returns_the_take() {
        let writer = MockWriter::default();
        writer.fail.store(true, Ordering::SeqCst);
        let job = SaveJob::new(take(vec![5, 6]), AudioFormat::Mp3, PathBuf::from("/rec/1.mp3"));

        match job.run(&writer) {
            SaveReport::Failed { error, audio, .. } => {
                assert_eq!(error, SaveError::Write("disk full".to_string()));
                assert_eq!(audio.concat(), vec![5, 6]);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn empty_take_is_an_encode_error() {
        let writer = MockWriter::default();
        let audio = RecordedAudio::new(Vec::new(), PcmSpec::capture());
        let err = encode_and_write(&writer, &audio, AudioFormat::Mp3, Path::new("/rec/1.mp3"))
            .unwrap_err();
        assert_eq!(err, SaveError::Encode("no samples to encode".to_string()));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(display_name(Path::new("/rec/8_1.mp3")), "8_1.mp3");
    }
}
