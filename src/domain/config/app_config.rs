//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::audio::{AudioFormat, ALL_FORMATS};
use crate::domain::naming::DEFAULT_FLOOR;

/// Directory name used under the user's audio folder
const APP_DIR_NAME: &str = "dictaphone";

/// Fallback output directory when the platform has no audio folder
const FALLBACK_OUTPUT_DIR: &str = "recordings";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where recordings are written
    pub output_dir: Option<String>,
    /// Where existing numbered files are looked up (read-only)
    pub scan_dir: Option<String>,
    /// Format selected at startup
    pub format: Option<String>,
    /// Formats offered for selection
    pub formats: Option<Vec<String>>,
    /// First number handed out when the scan directory has no numbered files
    pub floor: Option<u64>,
}

impl AppConfig {
    /// Create config with default values.
    ///
    /// `scan_dir` is left unset: it follows the resolved output directory.
    pub fn defaults() -> Self {
        Self {
            output_dir: Some(default_output_dir().to_string_lossy().into_owned()),
            scan_dir: None,
            format: Some(AudioFormat::default().to_string()),
            formats: Some(ALL_FORMATS.iter().map(|f| f.to_string()).collect()),
            floor: Some(DEFAULT_FLOOR),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            scan_dir: other.scan_dir.or(self.scan_dir),
            format: other.format.or(self.format),
            formats: other.formats.or(self.formats),
            floor: other.floor.or(self.floor),
        }
    }

    /// Output directory, with `~` expanded
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(expand_home)
            .unwrap_or_else(default_output_dir)
    }

    /// Scan directory, falling back to the output directory
    pub fn scan_dir_or_default(&self) -> PathBuf {
        self.scan_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(expand_home)
            .unwrap_or_else(|| self.output_dir_or_default())
    }

    /// Selectable formats; unknown names are skipped, an empty result means all
    pub fn formats_or_default(&self) -> Vec<AudioFormat> {
        let mut formats: Vec<AudioFormat> = Vec::new();
        for name in self.formats.iter().flatten() {
            if let Ok(format) = name.parse::<AudioFormat>() {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }
        if formats.is_empty() {
            ALL_FORMATS.to_vec()
        } else {
            formats
        }
    }

    /// Initial format; must be one of the selectable formats
    pub fn format_or_default(&self) -> AudioFormat {
        let selectable = self.formats_or_default();
        self.format
            .as_ref()
            .and_then(|s| s.parse::<AudioFormat>().ok())
            .filter(|f| selectable.contains(f))
            .unwrap_or(selectable[0])
    }

    pub fn floor_or_default(&self) -> u64 {
        self.floor.unwrap_or(DEFAULT_FLOOR)
    }
}

/// `<audio dir>/dictaphone`, or `./recordings` when there is no audio dir
pub fn default_output_dir() -> PathBuf {
    dirs::audio_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_OUTPUT_DIR))
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
