//! Human-readable status line

use std::fmt;

use crate::domain::recording::Elapsed;

/// The single status line shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Recording(Elapsed),
    Stopped,
    NoAudioCaptured,
    NothingToSave,
    Saving(String),
    Saved(String),
    SaveFailed(String),
    AudioError(String),
}

impl Status {
    /// Whether the status reports a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::NoAudioCaptured | Self::SaveFailed(_) | Self::AudioError(_)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::Recording(elapsed) => write!(f, "Recording... ({})", elapsed),
            Self::Stopped => write!(f, "Recording stopped. Ready to save."),
            Self::NoAudioCaptured => write!(f, "No audio captured. Try again."),
            Self::NothingToSave => write!(f, "Nothing to save. Record first."),
            Self::Saving(file) => write!(f, "Saving to {} ...", file),
            Self::Saved(file) => write!(f, "Saved: {}", file),
            Self::SaveFailed(reason) => write!(f, "Save failed: {}", reason),
            Self::AudioError(reason) => write!(f, "Audio error: {}", reason),
        }
    }
}
