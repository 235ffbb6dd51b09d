//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod naming;
pub mod recording;
pub mod session;

// Re-export common types
pub use audio::{AudioFormat, PcmChunk, PcmSpec, RecordedAudio};
pub use config::AppConfig;
pub use error::*;
pub use naming::NameField;
pub use recording::{Duration, Elapsed};
pub use session::{Controls, RecordingSession, SessionState, Status};
