//! XDG config store adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR_NAME: &str = "dictaphone";
const CONFIG_FILE_NAME: &str = "config.toml";

/// `<config dir>/dictaphone/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// Config file under the platform config directory
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn io_error(path: &Path, e: std::io::Error) -> String {
        format!("{}: {}", path.display(), e)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(Self::io_error(&self.path, e))),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = Self::to_toml(config)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(Self::io_error(parent, e)))?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(Self::io_error(&self.path, e)))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the defaults, refusing to replace an existing file
    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()));
        }
        self.save(&AppConfig::defaults()).await
    }
}
