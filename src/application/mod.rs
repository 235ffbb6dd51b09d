//! Application layer - Use cases and port interfaces
//!
//! Contains the dictaphone operations and the trait definitions
//! for audio devices, the file system and persisted settings.

pub mod capture;
pub mod dictaphone;
pub mod naming;
pub mod ports;
pub mod save;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use capture::CaptureController;
pub use dictaphone::{Dictaphone, DictaphoneError};
pub use naming::{compute_next_name, NameSequencer};
pub use save::{display_name, encode_and_write, resolve_target_path, SaveJob, SaveReport};
pub use settings::Settings;
