//! Recording session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Nothing recorded, or the last take was saved
    #[default]
    Idle,
    Recording,
    /// A non-empty take is waiting to be saved
    Stopped,
    /// The take has been handed to a save job
    Saving,
}

impl SessionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped => "stopped",
            Self::Saving => "saving",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recording session entity.
///
/// State machine:
///   IDLE | STOPPED -> RECORDING (start_recording)
///   RECORDING -> STOPPED (stop_recording, audio captured)
///   RECORDING -> IDLE (stop_recording, nothing captured)
///   STOPPED -> SAVING (begin_save)
///   SAVING -> IDLE (save_succeeded)
///   SAVING -> STOPPED (save_failed)
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: SessionState,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    pub fn is_saving(&self) -> bool {
        self.state == SessionState::Saving
    }

    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        match self.state {
            SessionState::Idle | SessionState::Stopped => {
                self.state = SessionState::Recording;
                Ok(())
            }
            _ => Err(self.invalid("start recording")),
        }
    }

    /// Leave RECORDING; `captured` selects STOPPED over IDLE
    pub fn stop_recording(&mut self, captured: bool) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(self.invalid("stop recording"));
        }
        self.state = if captured {
            SessionState::Stopped
        } else {
            SessionState::Idle
        };
        Ok(())
    }

    pub fn begin_save(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Stopped {
            return Err(self.invalid("save"));
        }
        self.state = SessionState::Saving;
        Ok(())
    }

    pub fn save_succeeded(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Saving {
            return Err(self.invalid("complete save"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    pub fn save_failed(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Saving {
            return Err(self.invalid("fail save"));
        }
        self.state = SessionState::Stopped;
        Ok(())
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}
