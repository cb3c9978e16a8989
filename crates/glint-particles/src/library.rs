//! Named emitter configs: built-in presets plus entries loaded from TOML

use crate::effects::presets;
use crate::emitter::EmitterConfig;
use glint_core::{GlintError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Effect library keyed by name.
///
/// A TOML document adds or overrides entries; each top-level table is one
/// emitter config. `extends = "<name>"` starts from an existing entry
/// instead of the defaults:
///
/// ```toml
/// [gold_sparkles]
/// extends = "sparkles"
/// color = "#ffd700"
/// emission_rate = 80
/// ```
#[derive(Debug, Clone)]
pub struct EffectLibrary {
    entries: BTreeMap<String, EmitterConfig>,
}

impl EffectLibrary {
    /// Library holding only the built-in presets
    pub fn with_presets() -> Self {
        let entries = presets::NAMES
            .iter()
            .filter_map(|name| presets::by_name(name).ok().map(|c| (name.to_string(), c)))
            .collect();
        Self { entries }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut library = Self::with_presets();
        library.merge_toml_str(s)?;
        Ok(library)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("[particles] loading effect library from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Add or override entries from a TOML document
    pub fn merge_toml_str(&mut self, s: &str) -> Result<()> {
        let doc: toml::value::Table = toml::from_str(s)?;
        for (name, value) in &doc {
            let table = value.as_table().ok_or_else(|| {
                GlintError::Config(format!("effect '{name}' must be a table"))
            })?;
            let base = match table.get("extends").and_then(|v| v.as_str()) {
                Some(parent) => self.get(parent)?.clone(),
                None => EmitterConfig::default(),
            };
            let config = EmitterConfig::from_toml_with_base(table, base)?.sanitized();
            log::debug!("[particles] loaded effect '{name}' ({})", config.kind);
            self.entries.insert(name.clone(), config);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&EmitterConfig> {
        self.entries
            .get(name)
            .ok_or_else(|| GlintError::UnknownPreset(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, config: EmitterConfig) {
        self.entries.insert(name.into(), config);
    }

    /// Entry names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EffectLibrary {
    fn default() -> Self {
        Self::with_presets()
    }
}
