//! CLI command implementations

pub mod presets;
pub mod simulate;

use anyhow::{Context, Result};
use glint_particles::EffectLibrary;

/// Built-in presets, optionally extended by a library file
pub(crate) fn load_library(path: Option<&str>) -> Result<EffectLibrary> {
    match path {
        Some(path) => EffectLibrary::load(path)
            .with_context(|| format!("Failed to load effect library {}", path)),
        None => Ok(EffectLibrary::with_presets()),
    }
}
