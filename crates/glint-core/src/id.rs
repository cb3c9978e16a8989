//! Emitter handles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an emitter registered with a particle system.
///
/// Ids are allocated by the owning system and never reused within it,
/// so a stale handle simply stops resolving after removal.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmitterId(pub u64);

impl EmitterId {
    /// Create an EmitterId from a raw value
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmitterId({})", self.0)
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emitter#{}", self.0)
    }
}
