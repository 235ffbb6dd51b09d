//! Domain error types

use thiserror::Error;

/// A recording length that is not `<n>s`, `<n>m` or `<n>m<n>s`, or is zero
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid duration: \"{input}\". Use <n>s, <n>m or <n>m<n>s (e.g. 30s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when an unknown output format is requested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid format: \"{input}\". Valid formats are: mp3, wav, flac, ogg")]
pub struct FormatParseError {
    pub input: String,
}

/// Config file and `config` subcommand failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {0}")]
    ReadError(String),

    #[error("Config file is not valid TOML: {0}")]
    ParseError(String),

    #[error("Cannot write config file {0}")]
    WriteError(String),

    #[error("Invalid value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at {0}")]
    AlreadyExists(String),
}
