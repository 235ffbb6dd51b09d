//! Dictaphone - record the microphone into auto-numbered audio files
//!
//! This crate provides a small recorder: capture from the default input
//! device, suggest the next free number as the file name, and save the take
//! as MP3, WAV, FLAC or OGG without ever overwriting an existing file.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the session state machine, and errors
//! - **Application**: Port interfaces (traits), capture, naming and save components
//! - **Infrastructure**: Adapter implementations (cpal, encoders, filesystem, config)
//! - **CLI**: Argument parsing, the interactive console, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
