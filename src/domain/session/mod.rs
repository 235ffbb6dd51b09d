//! Recording session lifecycle

mod controls;
mod state;
mod status;

pub use controls::Controls;
pub use state::{InvalidStateTransition, RecordingSession, SessionState};
pub use status::Status;
