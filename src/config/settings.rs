use anyhow::Result;
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::AppConfig;

const APP_NAME: &str = "GobanMenu";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "gobanmenu", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory")),
    }
}

/// Loads the application configuration from `path`, or from the platform
/// config file when `None`.
/// If the file doesn't exist, it creates a default one.
/// If the file cannot be parsed, it logs a warning, tries to complete an
/// older file with defaults, and otherwise falls back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = resolve_path(path)?;

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = AppConfig::default();
        save_config(&default_config, Some(&config_path))?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<AppConfig>(&config_content) {
        Ok(mut config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            fill_missing_settings(&mut config);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            migrate_legacy_config(&config_content).or_else(|_| Ok(AppConfig::default()))
        }
    }
}

/// Gives every setting key absent from `config` its default value.
fn fill_missing_settings(config: &mut AppConfig) {
    for (key, value) in AppConfig::default_settings() {
        config.settings.entry(key).or_insert(value);
    }
}

/// Completes a configuration written by an older version: missing or null
/// fields and missing setting keys take their default values.
fn migrate_legacy_config(config_content: &str) -> Result<AppConfig> {
    let mut value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let defaults = serde_json::to_value(AppConfig::default())?;
    let Value::Object(defaults) = defaults else {
        anyhow::bail!("Default config is not a JSON object");
    };

    for (key, default_val) in defaults {
        match obj.get_mut(&key) {
            None | Some(Value::Null) if key != "platform" && key != "label_catalog" => {
                obj.insert(key, default_val);
            }
            Some(Value::Object(existing)) if key == "settings" => {
                if let Value::Object(default_settings) = default_val {
                    for (setting, default_setting) in default_settings {
                        existing.entry(setting).or_insert(default_setting);
                    }
                }
            }
            _ => {}
        }
    }

    let migrated_config: AppConfig = serde_json::from_value(value)?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the provided configuration to `path`, or to the platform config
/// file when `None`.
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let config_path = resolve_path(path)?;

    if let Some(config_dir) = config_path.parent() {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            tracing::info!("Created config directory: {:?}", config_dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

// Platform-specific configuration paths for reference:
// macOS:   ~/Library/Application Support/com.gobanmenu.GobanMenu/
// Linux:   ~/.config/gobanmenu/
// Windows: %APPDATA%/gobanmenu/GobanMenu/config/
