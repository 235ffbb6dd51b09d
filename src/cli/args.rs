//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::audio::AudioFormat;
use crate::domain::recording::Duration;

/// Dictaphone - record the microphone into numbered audio files
#[derive(Parser, Debug)]
#[command(name = "dictaphone")]
#[command(version)]
#[command(about = "Record the microphone into auto-numbered MP3/WAV/FLAC/OGG files")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory recordings are saved to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Directory scanned for existing numbered files
    #[arg(short = 's', long, value_name = "DIR")]
    pub scan_dir: Option<String>,

    /// Output format (mp3, wav, flac, ogg)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<AudioFormat>,

    /// Lowest number suggested when the scan directory has no numbered files
    #[arg(long, value_name = "N")]
    pub floor: Option<u64>,

    /// Record once for a fixed time (e.g., 30s, 1m, 2m30s), save, and exit
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<Duration>,

    /// File name for a timed recording (defaults to the next number)
    #[arg(short = 'n', long, value_name = "NAME", requires = "duration")]
    pub name: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the name the next recording would get
    NextName,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for a timed recording
#[derive(Debug, Clone)]
pub struct OneShotOptions {
    pub duration: Duration,
    pub name: Option<String>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["output_dir", "scan_dir", "format", "formats", "floor"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["dictaphone"]);
        assert!(cli.output_dir.is_none());
        assert!(cli.scan_dir.is_none());
        assert!(cli.format.is_none());
        assert!(cli.floor.is_none());
        assert!(cli.duration.is_none());
        assert!(cli.name.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_directories_and_format() {
        let cli = Cli::parse_from([
            "dictaphone",
            "--output-dir",
            "/rec",
            "-s",
            "/archive",
            "-f",
            "FLAC",
            "--floor",
            "555",
        ]);
        assert_eq!(cli.output_dir, Some("/rec".to_string()));
        assert_eq!(cli.scan_dir, Some("/archive".to_string()));
        assert_eq!(cli.format, Some(AudioFormat::Flac));
        assert_eq!(cli.floor, Some(555));
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["dictaphone", "-f", "aac"]).is_err());
    }

    #[test]
    fn cli_parses_timed_recording() {
        let cli = Cli::parse_from(["dictaphone", "-d", "2m30s", "-n", "memo"]);
        assert_eq!(cli.duration, Some(Duration::from_secs(150)));
        assert_eq!(cli.name, Some("memo".to_string()));
    }

    #[test]
    fn name_requires_duration() {
        assert!(Cli::try_parse_from(["dictaphone", "-n", "memo"]).is_err());
    }

    #[test]
    fn cli_rejects_bad_duration() {
        assert!(Cli::try_parse_from(["dictaphone", "-d", "soon"]).is_err());
    }

    #[test]
    fn cli_parses_next_name() {
        let cli = Cli::parse_from(["dictaphone", "next-name"]);
        assert!(matches!(cli.command, Some(Commands::NextName)));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["dictaphone", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["dictaphone", "config", "set", "floor", "100"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "floor");
            assert_eq!(value, "100");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("output_dir"));
        assert!(is_valid_config_key("formats"));
        assert!(is_valid_config_key("floor"));
        assert!(!is_valid_config_key("volume"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
