//! Dictaphone use case
//!
//! Ties capture, naming and saving to one session state machine. Every
//! method runs on the UI task; only `SaveJob::run` is meant to leave it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::audio::{AudioFormat, RecordedAudio};
use crate::domain::error::FormatParseError;
use crate::domain::naming::NameField;
use crate::domain::recording::Elapsed;
use crate::domain::session::{
    Controls, InvalidStateTransition, RecordingSession, SessionState, Status,
};

use super::capture::CaptureController;
use super::naming::NameSequencer;
use super::ports::{CaptureDevice, CaptureError, FileCatalog, SaveError};
use super::save::{display_name, resolve_target_path, SaveJob, SaveReport};
use super::settings::Settings;

/// Dictaphone errors
#[derive(Debug, Error)]
pub enum DictaphoneError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),

    #[error(transparent)]
    Format(#[from] FormatParseError),

    #[error("Format {0} is not enabled")]
    FormatNotEnabled(AudioFormat),

    #[error("Nothing to save. Record first.")]
    NothingToSave,

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Cannot use directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Dictaphone<D: CaptureDevice, C: FileCatalog> {
    capture: CaptureController<D>,
    catalog: C,
    sequencer: NameSequencer,
    session: RecordingSession,
    name: NameField,
    pending: Option<RecordedAudio>,
    status: Status,
    output_dir: PathBuf,
    formats: Vec<AudioFormat>,
    format: AudioFormat,
}

impl<D: CaptureDevice, C: FileCatalog> Dictaphone<D, C> {
    /// Create the output directory and seed the name field
    pub fn new(
        settings: &Settings,
        capture: CaptureController<D>,
        catalog: C,
    ) -> Result<Self, DictaphoneError> {
        ensure_dir(&catalog, &settings.output_dir)?;

        let sequencer = NameSequencer::new(&settings.scan_dir, settings.floor);
        let name = NameField::new(sequencer.next_name(&catalog));

        let mut formats = settings.formats.clone();
        if formats.is_empty() {
            formats.push(settings.format);
        }
        let format = if formats.contains(&settings.format) {
            settings.format
        } else {
            formats[0]
        };

        Ok(Self {
            capture,
            catalog,
            sequencer,
            session: RecordingSession::new(),
            name,
            pending: None,
            status: Status::Ready,
            output_dir: settings.output_dir.clone(),
            formats,
            format,
        })
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_state(self.session.state())
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn name(&self) -> &NameField {
        &self.name
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn formats(&self) -> &[AudioFormat] {
        &self.formats
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn scan_dir(&self) -> &Path {
        self.sequencer.scan_dir()
    }

    pub fn floor(&self) -> u64 {
        self.sequencer.floor()
    }

    pub fn is_recording(&self) -> bool {
        self.session.is_recording()
    }

    /// Length of the take waiting to be saved, if any
    pub fn pending_duration(&self) -> Option<std::time::Duration> {
        self.pending.as_ref().map(RecordedAudio::duration)
    }

    /// Begin a new take. Any unsaved take is discarded.
    pub fn start(&mut self) -> Result<(), DictaphoneError> {
        if self.session.is_recording() {
            return Err(CaptureError::AlreadyRecording.into());
        }
        if self.session.is_saving() {
            return Err(DictaphoneError::SaveInProgress);
        }

        if let Err(e) = self.capture.start() {
            self.status = Status::AudioError(e.to_string());
            return Err(e.into());
        }

        self.session.start_recording()?;
        self.pending = None;
        self.status = Status::Recording(Elapsed::default());
        Ok(())
    }

    /// End the take. A no-op when not recording.
    pub fn stop(&mut self) -> Result<(), DictaphoneError> {
        if !self.session.is_recording() {
            return Ok(());
        }

        match self.capture.stop() {
            Ok(audio) => {
                self.session.stop_recording(true)?;
                self.pending = Some(audio);
                self.status = Status::Stopped;
                Ok(())
            }
            Err(e) => {
                self.session.stop_recording(false)?;
                self.status = match e {
                    CaptureError::NoAudioCaptured => Status::NoAudioCaptured,
                    ref other => Status::AudioError(other.to_string()),
                };
                Err(e.into())
            }
        }
    }

    /// Elapsed-timer tick: refresh the recording status line
    pub fn tick(&mut self) -> Option<Elapsed> {
        if !self.session.is_recording() {
            return None;
        }
        let elapsed = self.capture.elapsed()?;
        self.status = Status::Recording(elapsed);
        Some(elapsed)
    }

    /// Hand the pending take to a save job targeting the first free path.
    ///
    /// The session stays in `Saving` until `finish_save` receives the outcome.
    pub fn begin_save(&mut self) -> Result<SaveJob, DictaphoneError> {
        if self.session.is_saving() {
            return Err(DictaphoneError::SaveInProgress);
        }
        if self.session.is_recording() {
            return Err(InvalidStateTransition {
                current_state: SessionState::Recording,
                action: "save".to_string(),
            }
            .into());
        }
        if self.pending.is_none() {
            self.status = Status::NothingToSave;
            return Err(DictaphoneError::NothingToSave);
        }

        if let Err(e) = ensure_dir(&self.catalog, &self.output_dir) {
            self.status = Status::SaveFailed(e.to_string());
            return Err(e);
        }

        let target = resolve_target_path(
            &self.catalog,
            &self.output_dir,
            self.name.text(),
            self.name.last_suggested(),
            self.format.extension(),
        );

        self.session.begin_save()?;
        let audio = self.pending.take().ok_or(DictaphoneError::NothingToSave)?;
        self.status = Status::Saving(display_name(&target));
        Ok(SaveJob::new(audio, self.format, target))
    }

    /// Apply a finished save job.
    ///
    /// Success resets the name to a fresh suggestion; failure puts the take
    /// back so the user can retry.
    pub fn finish_save(&mut self, outcome: SaveReport) -> Result<PathBuf, DictaphoneError> {
        match outcome {
            SaveReport::Saved { target } => {
                self.session.save_succeeded()?;
                let next = self.sequencer.next_name(&self.catalog);
                self.name.reset(&next);
                self.status = Status::Saved(display_name(&target));
                Ok(target)
            }
            SaveReport::Failed { error, audio, .. } => {
                self.session.save_failed()?;
                self.pending = Some(audio);
                self.status = Status::SaveFailed(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Periodic refresh. Skipped while recording or when the user has
    /// typed their own name. Returns the new text when it changed.
    pub fn refresh_name(&mut self) -> Option<String> {
        if self.session.is_recording() {
            return None;
        }
        let next = self.sequencer.next_name(&self.catalog);
        self.name
            .refresh(&next)
            .then(|| self.name.text().to_string())
    }

    /// Replace the name field with user input
    pub fn edit_name(&mut self, text: impl Into<String>) {
        self.name.edit(text);
    }

    /// Current suggestion, independent of the name field
    pub fn next_name(&self) -> String {
        self.sequencer.next_name(&self.catalog)
    }

    pub fn set_format(&mut self, format: AudioFormat) -> Result<(), DictaphoneError> {
        if !self.formats.contains(&format) {
            return Err(DictaphoneError::FormatNotEnabled(format));
        }
        self.format = format;
        self.resuggest();
        Ok(())
    }

    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), DictaphoneError> {
        let dir = dir.into();
        ensure_dir(&self.catalog, &dir)?;
        self.output_dir = dir;
        self.resuggest();
        Ok(())
    }

    pub fn set_scan_dir(&mut self, dir: impl Into<PathBuf>) {
        self.sequencer.set_scan_dir(dir);
        self.resuggest();
    }

    fn resuggest(&mut self) {
        let next = self.sequencer.next_name(&self.catalog);
        self.name.resuggest(&next);
    }
}

fn ensure_dir<C: FileCatalog + ?Sized>(catalog: &C, dir: &Path) -> Result<(), DictaphoneError> {
    catalog
        .ensure_dir(dir)
        .map_err(|source| DictaphoneError::Directory {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::application::testing::{MockCatalog, MockDevice, MockWriter};
    use crate::domain::audio::PcmSpec;

    fn settings(floor: u64) -> Settings {
        Settings {
            output_dir: PathBuf::from("/rec"),
            scan_dir: PathBuf::from("/rec"),
            floor,
            ..Settings::default()
        }
    }

    fn dictaphone(
        device: MockDevice,
        catalog: MockCatalog,
    ) -> Dictaphone<MockDevice, MockCatalog> {
        let capture = CaptureController::new(device, PcmSpec::capture());
        Dictaphone::new(&settings(1), capture, catalog).unwrap()
    }

    /// Run a save job synchronously against the mock writer
    fn save(
        app: &mut Dictaphone<MockDevice, MockCatalog>,
        writer: &MockWriter,
    ) -> Result<PathBuf, DictaphoneError> {
        let job = app.begin_save()?;
        app.finish_save(job.run(writer))
    }

    #[test]
    fn new_creates_output_dir_and_suggests() {
        let catalog = MockCatalog::with_files("/rec", &["3.mp3", "7.wav"]);
        let app = dictaphone(MockDevice::default(), catalog.clone());

        assert_eq!(app.name().text(), "8");
        assert_eq!(app.state(), SessionState::Idle);
        assert_eq!(app.status(), &Status::Ready);
        assert_eq!(
            catalog.created_dirs.lock().unwrap().as_slice(),
            &[PathBuf::from("/rec")]
        );
    }

    #[test]
    fn new_fails_when_output_dir_cannot_be_created() {
        let catalog = MockCatalog::default();
        catalog.fail_ensure.store(true, Ordering::SeqCst);
        let capture = CaptureController::new(MockDevice::default(), PcmSpec::capture());
        let result = Dictaphone::new(&settings(1), capture, catalog);
        assert!(matches!(result, Err(DictaphoneError::Directory { .. })));
    }

    #[test]
    fn record_stop_save_cycle() {
        let catalog = MockCatalog::with_files("/rec", &["3.mp3", "7.wav"]);
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1, 2], vec![3]]), catalog);

        app.start().unwrap();
        assert_eq!(app.state(), SessionState::Recording);
        assert!(app.controls().stop);
        assert!(!app.controls().save);

        app.stop().unwrap();
        assert_eq!(app.state(), SessionState::Stopped);
        assert_eq!(app.status(), &Status::Stopped);
        assert!(app.pending_duration().is_some());

        let target = save(&mut app, &writer).unwrap();
        assert_eq!(target, PathBuf::from("/rec/8.mp3"));
        assert_eq!(app.state(), SessionState::Idle);
        assert_eq!(app.status(), &Status::Saved("8.mp3".to_string()));
        assert_eq!(app.name().text(), "9");
        assert_eq!(writer.written.lock().unwrap()[0].2, vec![1, 2, 3]);
    }

    #[test]
    fn save_is_disabled_after_success() {
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog);

        app.start().unwrap();
        app.stop().unwrap();
        save(&mut app, &writer).unwrap();

        assert!(!app.controls().save);
        assert!(matches!(app.begin_save(), Err(DictaphoneError::NothingToSave)));
        assert_eq!(app.status(), &Status::NothingToSave);
    }

    #[test]
    fn save_without_recording_reports_nothing_to_save() {
        let mut app = dictaphone(MockDevice::default(), MockCatalog::default());
        assert!(matches!(app.begin_save(), Err(DictaphoneError::NothingToSave)));
        assert_eq!(app.status().to_string(), "Nothing to save. Record first.");
        assert_eq!(app.state(), SessionState::Idle);
    }

    #[test]
    fn save_while_recording_is_rejected() {
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), MockCatalog::default());
        app.start().unwrap();
        assert!(matches!(
            app.begin_save(),
            Err(DictaphoneError::InvalidState(_))
        ));
        assert!(app.is_recording());
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let device = MockDevice::delivering(vec![vec![1]]);
        let mut app = dictaphone(device.clone(), MockCatalog::default());
        app.start().unwrap();
        assert!(matches!(
            app.start(),
            Err(DictaphoneError::Capture(CaptureError::AlreadyRecording))
        ));
        assert_eq!(device.opened.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let mut app = dictaphone(MockDevice::default(), MockCatalog::default());
        app.stop().unwrap();
        assert_eq!(app.state(), SessionState::Idle);
        assert_eq!(app.status(), &Status::Ready);
    }

    #[test]
    fn empty_take_returns_to_idle() {
        let mut app = dictaphone(MockDevice::default(), MockCatalog::default());
        app.start().unwrap();
        assert!(app.stop().is_err());
        assert_eq!(app.state(), SessionState::Idle);
        assert_eq!(app.status().to_string(), "No audio captured. Try again.");
        assert!(!app.controls().save);
    }

    #[test]
    fn device_failure_keeps_idle() {
        let mut app = dictaphone(MockDevice::failing(), MockCatalog::default());
        assert!(app.start().is_err());
        assert_eq!(app.state(), SessionState::Idle);
        assert!(app.controls().start);
        assert_eq!(app.status(), &Status::AudioError("device busy".to_string()));
    }

    #[test]
    fn new_take_discards_unsaved_audio() {
        let device = MockDevice::delivering(vec![vec![1]]);
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(device.clone(), catalog);

        app.start().unwrap();
        app.stop().unwrap();
        device.set_chunks(vec![vec![9, 9]]);
        app.start().unwrap();
        app.stop().unwrap();
        save(&mut app, &writer).unwrap();

        assert_eq!(writer.written.lock().unwrap()[0].2, vec![9, 9]);
    }

    #[test]
    fn collision_appends_suffix() {
        let catalog = MockCatalog::with_files("/rec", &["3.mp3"]);
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog.clone());

        // another process takes the suggested name
        catalog.add(Path::new("/rec"), "4.mp3");

        app.start().unwrap();
        app.stop().unwrap();
        let target = save(&mut app, &writer).unwrap();
        assert_eq!(target, PathBuf::from("/rec/4_1.mp3"));
    }

    #[test]
    fn user_name_is_sanitized_and_kept_until_save() {
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog.clone());

        app.edit_name("../Interview 2!");
        catalog.add(Path::new("/rec"), "5.mp3");
        assert_eq!(app.refresh_name(), None);
        assert_eq!(app.name().text(), "../Interview 2!");

        app.start().unwrap();
        app.stop().unwrap();
        let target = save(&mut app, &writer).unwrap();
        assert_eq!(target, PathBuf::from("/rec/Interview 2.mp3"));
        assert_eq!(app.name().text(), "6");
    }

    #[test]
    fn blank_name_falls_back_to_suggestion() {
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog);

        app.edit_name("   ");
        app.start().unwrap();
        app.stop().unwrap();
        let target = save(&mut app, &writer).unwrap();
        assert_eq!(target, PathBuf::from("/rec/1.mp3"));
    }

    #[test]
    fn failed_save_keeps_take_for_retry() {
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![4, 2]]), catalog);

        app.start().unwrap();
        app.stop().unwrap();

        writer.fail.store(true, Ordering::SeqCst);
        assert!(save(&mut app, &writer).is_err());
        assert_eq!(app.state(), SessionState::Stopped);
        assert_eq!(app.status().to_string(), "Save failed: Write failed: disk full");
        assert!(app.controls().save);
        assert_eq!(app.name().text(), "1");

        writer.fail.store(false, Ordering::SeqCst);
        save(&mut app, &writer).unwrap();
        assert_eq!(writer.written.lock().unwrap()[0].2, vec![4, 2]);
    }

    #[test]
    fn saving_blocks_everything_else() {
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), MockCatalog::default());
        app.start().unwrap();
        app.stop().unwrap();
        let _job = app.begin_save().unwrap();

        assert_eq!(app.state(), SessionState::Saving);
        assert_eq!(app.status(), &Status::Saving("1.mp3".to_string()));
        assert!(matches!(app.start(), Err(DictaphoneError::SaveInProgress)));
        assert!(matches!(app.begin_save(), Err(DictaphoneError::SaveInProgress)));
        let controls = app.controls();
        assert!(!controls.start && !controls.stop && !controls.save);
    }

    #[test]
    fn refresh_follows_directory_when_untouched() {
        let catalog = MockCatalog::default();
        let mut app = dictaphone(MockDevice::default(), catalog.clone());
        assert_eq!(app.name().text(), "1");
        assert_eq!(app.refresh_name(), None);

        catalog.add(Path::new("/rec"), "1.wav");
        assert_eq!(app.refresh_name(), Some("2".to_string()));
        assert_eq!(app.name().text(), "2");
    }

    #[test]
    fn refresh_is_skipped_while_recording() {
        let catalog = MockCatalog::default();
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog.clone());
        app.start().unwrap();
        catalog.add(Path::new("/rec"), "1.wav");
        assert_eq!(app.refresh_name(), None);
        assert_eq!(app.name().text(), "1");
    }

    #[test]
    fn tick_updates_recording_status() {
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), MockCatalog::default());
        assert_eq!(app.tick(), None);
        app.start().unwrap();
        let elapsed = app.tick().unwrap();
        assert_eq!(app.status(), &Status::Recording(elapsed));
    }

    #[test]
    fn format_change_resuggests_and_names_extension() {
        let catalog = MockCatalog::default();
        let writer = MockWriter::writing_to(catalog.clone());
        let mut app = dictaphone(MockDevice::delivering(vec![vec![1]]), catalog);

        app.set_format(AudioFormat::Flac).unwrap();
        app.start().unwrap();
        app.stop().unwrap();
        let target = save(&mut app, &writer).unwrap();
        assert_eq!(target, PathBuf::from("/rec/1.flac"));
        assert_eq!(writer.written.lock().unwrap()[0].1, AudioFormat::Flac);
    }

    #[test]
    fn disabled_format_is_rejected() {
        let capture = CaptureController::new(MockDevice::default(), PcmSpec::capture());
        let settings = Settings {
            formats: vec![AudioFormat::Wav],
            format: AudioFormat::Mp3,
            ..settings(1)
        };
        let mut app = Dictaphone::new(&settings, capture, MockCatalog::default()).unwrap();

        assert_eq!(app.format(), AudioFormat::Wav);
        assert!(matches!(
            app.set_format(AudioFormat::Ogg),
            Err(DictaphoneError::FormatNotEnabled(AudioFormat::Ogg))
        ));
    }

    #[test]
    fn scan_dir_change_resuggests_unless_edited() {
        let catalog = MockCatalog::with_files("/other", &["41.ogg"]);
        let mut app = dictaphone(MockDevice::default(), catalog);

        app.set_scan_dir("/other");
        assert_eq!(app.scan_dir(), Path::new("/other"));
        assert_eq!(app.name().text(), "42");

        app.edit_name("mine");
        app.set_scan_dir("/rec");
        assert_eq!(app.name().text(), "mine");
        assert_eq!(app.name().last_suggested(), "1");
    }

    #[test]
    fn output_dir_change_creates_directory() {
        let catalog = MockCatalog::default();
        let mut app = dictaphone(MockDevice::default(), catalog.clone());
        app.set_output_dir("/elsewhere").unwrap();
        assert_eq!(app.output_dir(), Path::new("/elsewhere"));
        assert!(catalog
            .created_dirs
            .lock()
            .unwrap()
            .contains(&PathBuf::from("/elsewhere")));
    }

    #[test]
    fn floor_applies_to_empty_scan_dir() {
        let capture = CaptureController::new(MockDevice::default(), PcmSpec::capture());
        let app = Dictaphone::new(&settings(555), capture, MockCatalog::default()).unwrap();
        assert_eq!(app.name().text(), "555");
        assert_eq!(app.floor(), 555);
    }
}
