//! Resolved runtime settings

use std::path::PathBuf;
use std::time::Duration as StdDuration;

use crate::domain::audio::{AudioFormat, PcmSpec};
use crate::domain::config::AppConfig;
use crate::domain::recording::ELAPSED_TICK_MS;

/// MP3 bit rate in kbps
pub const MP3_BITRATE_KBPS: u32 = 128;

/// How often the suggested name is re-derived from the scan directory
pub const NAME_REFRESH_MS: u64 = 1000;

/// Everything the components need, resolved once from the merged config
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub scan_dir: PathBuf,
    /// Formats the user may pick from; never empty
    pub formats: Vec<AudioFormat>,
    pub format: AudioFormat,
    pub floor: u64,
    pub spec: PcmSpec,
    pub mp3_bitrate_kbps: u32,
    pub name_refresh: StdDuration,
    pub elapsed_tick: StdDuration,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            output_dir: config.output_dir_or_default(),
            scan_dir: config.scan_dir_or_default(),
            formats: config.formats_or_default(),
            format: config.format_or_default(),
            floor: config.floor_or_default(),
            spec: PcmSpec::capture(),
            mp3_bitrate_kbps: MP3_BITRATE_KBPS,
            name_refresh: StdDuration::from_millis(NAME_REFRESH_MS),
            elapsed_tick: StdDuration::from_millis(ELAPSED_TICK_MS),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&AppConfig::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_config() {
        let config = AppConfig {
            output_dir: Some("/rec".to_string()),
            scan_dir: Some("/scan".to_string()),
            format: Some("flac".to_string()),
            floor: Some(555),
            ..Default::default()
        };
        let settings = Settings::from_config(&config);
        assert_eq!(settings.output_dir, PathBuf::from("/rec"));
        assert_eq!(settings.scan_dir, PathBuf::from("/scan"));
        assert_eq!(settings.format, AudioFormat::Flac);
        assert_eq!(settings.floor, 555);
        assert_eq!(settings.formats.len(), 4);
    }

    #[test]
    fn fixed_capture_parameters() {
        let settings = Settings::default();
        assert_eq!(settings.spec, PcmSpec::new(44_100, 1));
        assert_eq!(settings.mp3_bitrate_kbps, 128);
        assert_eq!(settings.name_refresh, StdDuration::from_secs(1));
        assert_eq!(settings.elapsed_tick, StdDuration::from_millis(200));
    }
}
