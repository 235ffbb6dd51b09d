//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::audio::AudioFormat;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    let value = read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
    presenter.output(&value);

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` and store it under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "output_dir" | "scan_dir" => {
            let path = value.trim();
            if path.is_empty() {
                return Err(invalid(key, "Directory must not be empty"));
            }
            if key == "output_dir" {
                config.output_dir = Some(path.to_string());
            } else {
                config.scan_dir = Some(path.to_string());
            }
        }
        "format" => {
            let format = value
                .parse::<AudioFormat>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.format = Some(format.to_string());
        }
        "formats" => {
            let formats = parse_format_list(value).map_err(|e| invalid(key, e))?;
            config.formats = Some(formats.iter().map(|f| f.to_string()).collect());
        }
        "floor" => {
            let floor = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(key, "Value must be a non-negative integer"))?;
            config.floor = Some(floor);
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "output_dir" => config.output_dir.clone(),
        "scan_dir" => config.scan_dir.clone(),
        "format" => config.format.clone(),
        "formats" => config.formats.as_ref().map(|f| f.join(", ")),
        "floor" => config.floor.map(|n| n.to_string()),
        _ => None,
    }
}

/// Parse `mp3, wav` into formats, dropping duplicates
fn parse_format_list(value: &str) -> Result<Vec<AudioFormat>, String> {
    let mut formats = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let format = part.parse::<AudioFormat>().map_err(|e| e.to_string())?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    if formats.is_empty() {
        return Err("At least one format is required".to_string());
    }
    Ok(formats)
}
