//! CLI layer - Command-line interface
//!
//! Contains argument parsing, the interactive console, output formatting,
//! signal handling, and the app runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod console;
pub mod presenter;
pub mod session;
pub mod signals;

// Re-export commonly used types
pub use app::{
    load_merged_config, run_interactive, run_next_name, run_oneshot, EXIT_ERROR, EXIT_SUCCESS,
    EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction, OneShotOptions};
pub use console::ConsoleCommand;
pub use presenter::Presenter;
