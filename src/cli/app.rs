//! App runners: interactive session, timed one-shot and next-name

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::ports::ConfigStore;
use crate::application::{CaptureController, Dictaphone, DictaphoneError, NameSequencer, Settings};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CpalCapture, EncodingWriter, LocalFiles, XdgConfigStore};

use super::args::OneShotOptions;
use super::presenter::Presenter;
use super::session::InteractiveSession;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides
pub const ENV_OUTPUT_DIR: &str = "DICTAPHONE_OUTPUT_DIR";
pub const ENV_SCAN_DIR: &str = "DICTAPHONE_SCAN_DIR";

type LiveDictaphone = Dictaphone<CpalCapture, LocalFiles>;

fn build_dictaphone(
    settings: &Settings,
    warnings: UnboundedSender<String>,
) -> Result<LiveDictaphone, DictaphoneError> {
    let capture = CaptureController::new(CpalCapture::new(), settings.spec).with_warnings(warnings);
    Dictaphone::new(settings, capture, LocalFiles::new())
}

/// Run the interactive console session
pub async fn run_interactive(settings: Settings) -> ExitCode {
    let presenter = Presenter::new();
    let (warn_tx, warn_rx) = mpsc::unbounded_channel();

    let app = match build_dictaphone(&settings, warn_tx) {
        Ok(app) => app,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    let writer = EncodingWriter::new(settings.mp3_bitrate_kbps);
    InteractiveSession::new(app, writer, &settings)
        .run(&settings, warn_rx, &shutdown)
        .await
}

/// Record for a fixed time (or until Ctrl+C), save, and print the path
pub async fn run_oneshot(settings: Settings, options: OneShotOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let (warn_tx, mut warn_rx) = mpsc::unbounded_channel::<String>();

    let mut app = match build_dictaphone(&settings, warn_tx) {
        Ok(app) => app,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Some(name) = options.name {
        app.edit_name(name);
    }

    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    if app.start().is_err() {
        presenter.status(app.status());
        return ExitCode::from(EXIT_ERROR);
    }

    let total = options.duration;
    let started = Instant::now();
    presenter.start_spinner("Recording...");

    let mut ticker = interval(settings.elapsed_tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = tokio::time::sleep(total.as_std());
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = shutdown.wait() => {
                presenter.info("Stopped early");
                break;
            }
            _ = ticker.tick() => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                presenter.update_recording_progress(elapsed_ms, total.as_millis());
            }
            Some(warning) = warn_rx.recv() => presenter.warn(&warning),
        }
    }

    let stopped = app.stop();
    presenter.stop_spinner();
    if stopped.is_err() || app.pending_duration().is_none() {
        presenter.status(app.status());
        return ExitCode::from(EXIT_ERROR);
    }

    let job = match app.begin_save() {
        Ok(job) => job,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner(&app.status().to_string());
    let writer = EncodingWriter::new(settings.mp3_bitrate_kbps);
    let report = tokio::task::spawn_blocking(move || job.run(&writer)).await;
    presenter.stop_spinner();

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            presenter.error(&format!("Save task failed: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match app.finish_save(report) {
        Ok(path) => {
            presenter.status(app.status());
            presenter.output(&path.display().to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(_) => {
            presenter.status(app.status());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the name the next recording would get
pub fn run_next_name(settings: &Settings) -> ExitCode {
    let presenter = Presenter::new();
    let sequencer = NameSequencer::new(&settings.scan_dir, settings.floor);
    presenter.output(&sequencer.next_name(&LocalFiles::new()));
    ExitCode::from(EXIT_SUCCESS)
}

/// Config values taken from the environment
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());
    AppConfig {
        output_dir: var(ENV_OUTPUT_DIR),
        scan_dir: var(ENV_SCAN_DIR),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig, presenter: &Presenter) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
