//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod catalog;
pub mod config;
pub mod writer;

// Re-export common types
pub use capture::{CaptureDevice, CaptureError, CaptureStream, ChunkSink};
pub use catalog::FileCatalog;
pub use config::ConfigStore;
pub use writer::{AudioFileWriter, SaveError};
