//! Label translation.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Named values substituted into a template label.
pub type LabelParams = BTreeMap<String, String>;

/// Turns label keys into display text.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;

    /// Renders a label computed from parameters, e.g. `"{name} v{version}"`.
    fn translate_template(
        &self,
        template: &dyn Fn(&LabelParams) -> String,
        params: &LabelParams,
    ) -> String {
        template(params)
    }
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// A flat key-to-text dictionary. Unknown keys fall back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        tracing::info!(
            "Loaded {} label translations from {:?}",
            catalog.entries.len(),
            path
        );
        Ok(catalog)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Removes `&` mnemonic markers from a label; `&&` yields a literal `&`.
pub fn strip_mnemonic(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '&' {
            if chars.peek() == Some(&'&') {
                result.push('&');
                chars.next();
            }
        } else {
            result.push(c);
        }
    }
    result
}
