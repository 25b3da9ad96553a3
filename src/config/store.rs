//! An in-memory settings store seeded from the configuration file.

use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard};

use super::AppConfig;
use crate::core::SettingsStore;

#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<Map<String, Value>>,
}

impl MemorySettings {
    pub fn new(values: Map<String, Value>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.settings.clone())
    }

    /// A copy of every current value, for writing back into the config.
    pub fn export(&self) -> Map<String, Value> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.values
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        tracing::debug!("Setting {} = {}", key, value);
        self.lock().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::{keys, toggle_setting};

    #[test]
    fn test_seeded_from_config() {
        let settings = MemorySettings::from_config(&AppConfig::default());
        assert_eq!(settings.get(keys::SHOW_GRAPH), Some(Value::Bool(true)));
        assert_eq!(settings.get("unknown.key"), None);
    }

    #[test]
    fn test_toggle_setting_treats_missing_as_false() {
        let settings = MemorySettings::default();
        toggle_setting(&settings, keys::SHOW_COORDINATES);
        assert_eq!(settings.get(keys::SHOW_COORDINATES), Some(Value::Bool(true)));
        toggle_setting(&settings, keys::SHOW_COORDINATES);
        assert_eq!(settings.get(keys::SHOW_COORDINATES), Some(Value::Bool(false)));
    }

    #[test]
    fn test_export_reflects_updates() {
        let settings = MemorySettings::default();
        settings.set(keys::ZOOM_FACTOR, Value::from(1.5));
        assert_eq!(settings.export().get(keys::ZOOM_FACTOR), Some(&Value::from(1.5)));
    }
}
