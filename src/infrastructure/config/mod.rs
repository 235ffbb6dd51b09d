//! Config persistence adapters

pub mod xdg;

pub use xdg::{default_config_path, XdgConfigStore};
