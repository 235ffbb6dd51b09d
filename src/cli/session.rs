//! Interactive console session
//!
//! One task owns the `Dictaphone` and acts as the UI thread: it reacts to
//! console lines, the name-refresh and elapsed-time intervals, finished save
//! jobs, capture warnings and Ctrl+C. Encoding runs on the blocking pool and
//! reports back over a channel.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::application::ports::{AudioFileWriter, CaptureDevice, CaptureError, FileCatalog};
use crate::application::{Dictaphone, DictaphoneError, SaveJob, SaveReport, Settings};
use crate::domain::audio::AudioFormat;
use crate::domain::config::expand_home;
use crate::domain::session::SessionState;

use super::app::EXIT_SUCCESS;
use super::console::ConsoleCommand;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Whether the loop keeps running after a command
enum Flow {
    Continue,
    Quit,
}

/// Read console lines on a detached thread; the channel closes at end of input.
/// A blocked stdin read cannot be cancelled.
fn spawn_stdin_reader() -> UnboundedReceiver<io::Result<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = thread::Builder::new()
        .name("dictaphone-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(Err(e));
        return rx;
    }
    rx
}

pub struct InteractiveSession<D, C, W>
where
    D: CaptureDevice,
    C: FileCatalog,
    W: AudioFileWriter + 'static,
{
    app: Dictaphone<D, C>,
    writer: Arc<W>,
    presenter: Presenter,
    save_tx: UnboundedSender<SaveReport>,
    save_rx: UnboundedReceiver<SaveReport>,
    ticker: Interval,
}

impl<D, C, W> InteractiveSession<D, C, W>
where
    D: CaptureDevice,
    C: FileCatalog,
    W: AudioFileWriter + 'static,
{
    pub fn new(app: Dictaphone<D, C>, writer: W, settings: &Settings) -> Self {
        let (save_tx, save_rx) = mpsc::unbounded_channel();
        let mut ticker = interval(settings.elapsed_tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            app,
            writer: Arc::new(writer),
            presenter: Presenter::new(),
            save_tx,
            save_rx,
            ticker,
        }
    }

    /// Run on stdin until `quit`, end of input, or Ctrl+C
    pub async fn run(
        self,
        settings: &Settings,
        warnings: UnboundedReceiver<String>,
        shutdown: &ShutdownSignal,
    ) -> ExitCode {
        let lines = spawn_stdin_reader();
        self.run_with_lines(lines, settings, warnings, shutdown).await
    }

    async fn run_with_lines(
        mut self,
        mut lines: UnboundedReceiver<io::Result<String>>,
        settings: &Settings,
        mut warnings: UnboundedReceiver<String>,
        shutdown: &ShutdownSignal,
    ) -> ExitCode {
        let mut refresh = interval(settings.name_refresh);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.presenter.info(&format!(
            "Saving {} files to {}",
            self.app.format(),
            self.app.output_dir().display()
        ));
        self.presenter.info("Type 'help' for commands.");
        self.show_name();
        self.show_state();

        self.presenter.prompt();

        loop {
            tokio::select! {
                line = lines.recv() => match line {
                    Some(Ok(line)) => {
                        if let Flow::Quit = self.handle_line(&line) {
                            break;
                        }
                        if !self.app.is_recording() {
                            self.presenter.prompt();
                        }
                    }
                    Some(Err(e)) => {
                        self.presenter.error(&format!("Failed to read input: {}", e));
                        break;
                    }
                    None => break,
                },
                _ = refresh.tick() => {
                    if let Some(name) = self.app.refresh_name() {
                        self.presenter.info(&format!("Next name: {}", name));
                    }
                }
                _ = self.ticker.tick(), if self.app.is_recording() => {
                    if let Some(elapsed) = self.app.tick() {
                        self.presenter.update_recording(elapsed);
                    }
                }
                Some(report) = self.save_rx.recv() => self.on_save_report(report),
                Some(warning) = warnings.recv() => self.presenter.warn(&warning),
                _ = shutdown.wait() => break,
            }
        }

        self.shutdown().await
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match line.parse::<ConsoleCommand>() {
            Ok(command) => self.handle_command(command),
            Err(e) => {
                self.presenter.warn(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn handle_command(&mut self, command: ConsoleCommand) -> Flow {
        match command {
            ConsoleCommand::Start => self.start(),
            ConsoleCommand::Stop => self.stop(),
            ConsoleCommand::Save => self.save(),
            ConsoleCommand::Name(None) => {
                self.show_name();
                self.show_state();
            }
            ConsoleCommand::Name(Some(text)) => {
                self.app.edit_name(text);
                self.show_name();
                self.show_state();
            }
            ConsoleCommand::Format(None) => {
                self.show_format();
                self.show_state();
            }
            ConsoleCommand::Format(Some(value)) => {
                let result = value
                    .parse::<AudioFormat>()
                    .map_err(DictaphoneError::from)
                    .and_then(|format| self.app.set_format(format));
                self.after_setting(result);
                self.show_format();
                self.show_state();
            }
            ConsoleCommand::Output(None) => {
                self.show_output();
                self.show_state();
            }
            ConsoleCommand::Output(Some(dir)) => {
                let result = self.app.set_output_dir(expand_home(&dir));
                self.after_setting(result);
                self.show_output();
                self.show_state();
            }
            ConsoleCommand::Scan(None) => {
                self.show_scan();
                self.show_state();
            }
            ConsoleCommand::Scan(Some(dir)) => {
                self.app.set_scan_dir(expand_home(&dir));
                self.show_scan();
                self.show_name();
                self.show_state();
            }
            ConsoleCommand::Status => self.show_status(),
            ConsoleCommand::Help => self.presenter.help(),
            ConsoleCommand::Quit => return Flow::Quit,
            ConsoleCommand::Empty => {}
        }
        Flow::Continue
    }

    fn start(&mut self) {
        match self.app.start() {
            Ok(()) => {
                self.ticker.reset();
                self.presenter.start_spinner(&self.app.status().to_string());
                self.presenter.controls(&self.app.controls());
            }
            Err(e) => self.report_error(e),
        }
    }

    fn stop(&mut self) {
        let was_recording = self.app.is_recording();
        let result = self.app.stop();
        self.presenter.stop_spinner();

        match result {
            Ok(()) if !was_recording => self.presenter.info("Not recording."),
            Ok(()) => {
                if let Some(duration) = self.app.pending_duration() {
                    self.presenter
                        .info(&format!("Captured {:.1}s", duration.as_secs_f64()));
                }
                self.show_state();
            }
            Err(e) => self.report_error(e),
        }
    }

    fn save(&mut self) {
        match self.app.begin_save() {
            Ok(job) => {
                self.show_state();
                self.spawn_save(job);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Encode and write on the blocking pool; the report comes back on `save_rx`
    fn spawn_save(&self, job: SaveJob) {
        let writer = Arc::clone(&self.writer);
        let tx = self.save_tx.clone();
        tokio::task::spawn_blocking(move || {
            let report = job.run(writer.as_ref());
            let _ = tx.send(report);
        });
    }

    fn on_save_report(&mut self, report: SaveReport) {
        match self.app.finish_save(report) {
            Ok(path) => {
                self.presenter.status(self.app.status());
                self.presenter.output(&path.display().to_string());
                self.show_name();
            }
            Err(_) => {
                self.presenter.status(self.app.status());
                self.presenter.info("The recording is kept; 'save' to retry.");
            }
        }
        self.presenter.controls(&self.app.controls());
    }

    fn after_setting(&self, result: Result<(), DictaphoneError>) {
        if let Err(e) = result {
            self.presenter.error(&e.to_string());
        }
    }

    /// Print an error, preferring the status line when it already says it
    fn report_error(&self, error: DictaphoneError) {
        let shown_by_status = matches!(
            error,
            DictaphoneError::NothingToSave
                | DictaphoneError::Capture(
                    CaptureError::NoAudioCaptured
                        | CaptureError::NoInputDevice
                        | CaptureError::Device(_)
                )
        );
        if shown_by_status {
            self.presenter.status(self.app.status());
        } else {
            self.presenter.error(&error.to_string());
        }
        self.presenter.controls(&self.app.controls());
    }

    fn show_state(&self) {
        self.presenter.status(self.app.status());
        self.presenter.controls(&self.app.controls());
    }

    fn show_name(&self) {
        let name = self.app.name();
        if name.is_user_edited() {
            self.presenter.info(&format!(
                "Name: {} (suggested: {})",
                name.text(),
                name.last_suggested()
            ));
        } else {
            self.presenter.info(&format!("Name: {}", name.text()));
        }
    }

    fn show_format(&self) {
        let available: Vec<String> = self.app.formats().iter().map(|f| f.to_string()).collect();
        self.presenter.info(&format!(
            "Format: {} (available: {})",
            self.app.format(),
            available.join(", ")
        ));
    }

    fn show_output(&self) {
        self.presenter
            .info(&format!("Output: {}", self.app.output_dir().display()));
    }

    fn show_scan(&self) {
        self.presenter
            .info(&format!("Scan: {}", self.app.scan_dir().display()));
    }

    fn show_status(&self) {
        self.show_name();
        self.show_format();
        self.show_output();
        self.presenter.info(&format!(
            "Scan: {} (floor {})",
            self.app.scan_dir().display(),
            self.app.floor()
        ));
        self.show_state();
    }

    /// Finish an in-flight save, then report anything left unsaved
    async fn shutdown(mut self) -> ExitCode {
        if self.app.is_recording() {
            let _ = self.app.stop();
        }
        self.presenter.stop_spinner();

        if self.app.state() == SessionState::Saving {
            self.presenter.info("Waiting for the save to finish...");
            if let Some(report) = self.save_rx.recv().await {
                self.on_save_report(report);
            }
        }

        if self.app.state() == SessionState::Stopped {
            self.presenter.warn("Unsaved recording discarded.");
        }
        ExitCode::from(EXIT_SUCCESS)
    }
}
