//! Engine settings loaded from TOML

use crate::quality::QualityTier;
use glint_core::{GlintError, Result};
use serde::Deserialize;
use std::path::Path;

/// Tunables for the particle system and screen effects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub quality: QualityTier,
    /// Background alpha used to fade the surface each frame, in (0, 1].
    /// 1.0 clears fully; lower values leave soft trails.
    pub trail_fade: f32,
    pub seed: u32,
    /// Per-frame multiplier applied to the flash overlay alpha
    pub flash_decay: f32,
    /// Flash alpha below which the overlay stops drawing
    pub flash_threshold: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            quality: QualityTier::High,
            trail_fade: 0.3,
            seed: 0x5EED_1234,
            flash_decay: 0.9,
            flash_threshold: 0.01,
        }
    }
}

impl ParticleSettings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        Ok(settings.sanitized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("[particles] loading settings from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.trail_fade.is_finite() || self.trail_fade <= 0.0 || self.trail_fade > 1.0 {
            log::warn!(
                "[particles] trail_fade {} out of range, using {}",
                self.trail_fade,
                defaults.trail_fade
            );
            self.trail_fade = defaults.trail_fade;
        }
        if !self.flash_decay.is_finite() || !(0.0..1.0).contains(&self.flash_decay) {
            log::warn!(
                "[particles] flash_decay {} out of range, using {}",
                self.flash_decay,
                defaults.flash_decay
            );
            self.flash_decay = defaults.flash_decay;
        }
        if !self.flash_threshold.is_finite() || self.flash_threshold <= 0.0 {
            self.flash_threshold = defaults.flash_threshold;
        }
        self
    }
}
