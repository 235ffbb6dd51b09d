//! Configuration value objects

mod app_config;

pub use app_config::{default_output_dir, expand_home, AppConfig};
