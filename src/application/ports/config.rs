//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored config; a missing file yields an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored config, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file.
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
