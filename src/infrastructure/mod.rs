//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! microphone capture via cpal, the audio encoders, the local
//! file system and the TOML config file.

pub mod config;
pub mod encoding;
pub mod fs;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use encoding::EncodingWriter;
pub use fs::LocalFiles;
pub use recording::CpalCapture;
