//! Output format value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::FormatParseError;

/// All supported output formats, in menu order
pub const ALL_FORMATS: &[AudioFormat] = &[
    AudioFormat::Mp3,
    AudioFormat::Wav,
    AudioFormat::Flac,
    AudioFormat::Ogg,
];

/// Output container/codec for a saved recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Flac,
    Ogg,
}

impl AudioFormat {
    /// Get the file extension (without the dot)
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
        }
    }

    /// Whether the format discards information when encoding
    pub const fn is_lossy(&self) -> bool {
        matches!(self, Self::Mp3 | Self::Ogg)
    }

    /// Extensions of every supported format, used when scanning for numbered files
    pub fn all_extensions() -> Vec<&'static str> {
        ALL_FORMATS.iter().map(|f| f.extension()).collect()
    }
}

impl FromStr for AudioFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "flac" => Ok(Self::Flac),
            "ogg" => Ok(Self::Ogg),
            _ => Err(FormatParseError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
