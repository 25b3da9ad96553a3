pub mod settings;
pub mod store;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::collaborators::keys;
use crate::core::{AppIdentity, Catalog, IdentityTranslator, Translator};
use crate::platform::Platform;

pub use store::MemorySettings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub app_name: String,
    pub version: String,
    pub repository: String,
    /// Forces a platform profile instead of the compile target's.
    pub platform: Option<Platform>,
    /// JSON dictionary of translated labels.
    pub label_catalog: Option<PathBuf>,
    /// Initial values of the settings store.
    pub settings: Map<String, Value>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    pub fn identity(&self) -> AppIdentity {
        AppIdentity {
            name: self.app_name.clone(),
            version: self.version.clone(),
            repository: self.repository.clone(),
        }
    }

    /// The label catalog if one is configured and readable, otherwise labels
    /// stay untranslated.
    pub fn translator(&self) -> Arc<dyn Translator> {
        let Some(path) = &self.label_catalog else {
            return Arc::new(IdentityTranslator);
        };
        match Catalog::load(path) {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                tracing::warn!("{:#}. Falling back to untranslated labels.", e);
                Arc::new(IdentityTranslator)
            }
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    /// Default values for every setting the menu reads or writes.
    pub fn default_settings() -> Map<String, Value> {
        let defaults = [
            (keys::SHOW_MENUBAR, Value::Bool(true)),
            (keys::SHOW_COORDINATES, Value::Bool(false)),
            (keys::SHOW_MOVE_NUMBERS, Value::Bool(false)),
            (keys::SHOW_MOVE_COLORIZATION, Value::Bool(true)),
            (keys::SHOW_NEXT_MOVES, Value::Bool(true)),
            (keys::SHOW_SIBLINGS, Value::Bool(true)),
            (keys::SHOW_GRAPH, Value::Bool(true)),
            (keys::SHOW_COMMENTS, Value::Bool(true)),
            (keys::SHOW_LEFT_SIDEBAR, Value::Bool(false)),
            (keys::ZOOM_FACTOR, Value::from(1.0)),
            (keys::AUTO_GENMOVE, Value::Bool(false)),
        ];
        defaults
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "Goban".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            repository: "https://github.com/goban-app/goban".to_string(),
            platform: None,
            label_catalog: None,
            settings: Self::default_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translator_uses_configured_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.json");
        std::fs::write(&path, r#"{"&File": "&Datei"}"#).unwrap();
        let config = AppConfig {
            label_catalog: Some(path),
            ..Default::default()
        };

        assert_eq!(config.translator().translate("&File"), "&Datei");
    }

    #[test]
    fn test_unreadable_catalog_falls_back_to_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            label_catalog: Some(dir.path().join("missing.json")),
            ..Default::default()
        };

        assert_eq!(config.translator().translate("&File"), "&File");
        assert_eq!(AppConfig::default().translator().translate("&Help"), "&Help");
    }
}
