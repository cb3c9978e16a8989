//! Quality tiers: runtime-selectable caps on resident particles

use glint_core::{GlintError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    #[default]
    High,
    /// Explicit cap, e.g. for tests or a host-side budget
    Custom(usize),
}

impl QualityTier {
    /// Maximum number of resident particles after a step
    pub fn max_particles(self) -> usize {
        match self {
            Self::Low => 300,
            Self::Medium => 800,
            Self::High => 2000,
            Self::Custom(cap) => cap,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
            Self::Custom(cap) => write!(f, "custom({cap})"),
        }
    }
}

impl FromStr for QualityTier {
    type Err = GlintError;

    /// `low`, `medium`, `high`, or a bare particle count
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => other
                .parse::<usize>()
                .map(Self::Custom)
                .map_err(|_| GlintError::Config(format!("invalid quality tier '{s}'"))),
        }
    }
}
