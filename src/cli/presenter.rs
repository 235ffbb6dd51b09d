//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::recording::Elapsed;
use crate::domain::session::{Controls, Status};

/// Console commands with their one-line help
pub const CONSOLE_HELP: &[(&str, &str)] = &[
    ("start", "Start a new recording"),
    ("stop", "Stop recording"),
    ("save", "Save the last recording"),
    ("name [TEXT]", "Show or set the file name"),
    ("format [FMT]", "Show or set the output format"),
    ("output [DIR]", "Show or set the output directory"),
    ("scan [DIR]", "Show or set the directory scanned for numbers"),
    ("status", "Show status, controls and settings"),
    ("help", "Show this help"),
    ("quit", "Exit"),
];

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a line above the spinner, or plainly when none is running
    fn line(&self, text: String) {
        match self.spinner {
            Some(ref spinner) => spinner.println(text),
            None => eprintln!("{}", text),
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.line(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.line(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.line(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.line(format!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout (saved paths, names, config values)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Prompt on stderr without newline
    pub fn prompt(&self) {
        eprint!("{} ", ">".dimmed());
        let _ = io::stderr().flush();
    }

    /// Print a status line with a glyph matching its kind
    pub fn status(&self, status: &Status) {
        let message = status.to_string();
        match status {
            Status::Saved(_) => self.success(&message),
            Status::NothingToSave => self.warn(&message),
            s if s.is_error() => self.error(&message),
            _ => self.info(&message),
        }
    }

    /// Print which controls are enabled
    pub fn controls(&self, controls: &Controls) {
        self.line(format!("  {}", format_controls(controls)));
    }

    /// Format a timed recording's progress bar
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: u64) -> String {
        let elapsed_secs = elapsed_ms / 1000;
        let total_secs = total_ms / 1000;
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {:>3}s / {}s",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed_secs,
            total_secs
        )
    }

    /// Update the spinner for an open-ended recording
    pub fn update_recording(&self, elapsed: Elapsed) {
        self.update_spinner(&Status::Recording(elapsed).to_string());
    }

    /// Update the spinner for a timed recording
    pub fn update_recording_progress(&self, elapsed_ms: u64, total_ms: u64) {
        let progress = self.format_progress(elapsed_ms, total_ms);
        self.update_spinner(&format!("Recording... {}", progress));
    }

    /// Print a key-value pair (for config list and status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the console command list
    pub fn help(&self) {
        for (command, description) in CONSOLE_HELP {
            self.line(format!("  {:<14} {}", command.cyan(), description));
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

/// `start:on stop:off save:on`, with enabled controls highlighted
pub fn format_controls(controls: &Controls) -> String {
    let entry = |name: &str, enabled: bool| {
        if enabled {
            format!("{}:{}", name, "on".green())
        } else {
            format!("{}:{}", name, "off".dimmed())
        }
    };
    format!(
        "{} {} {}",
        entry("start", controls.start),
        entry("stop", controls.stop),
        entry("save", controls.save)
    )
}
