//! Glint Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a host uses to drive the effects engine:
//! - `FrameClock` - per-frame delta time source with stall clamping
//! - `RuntimeSystem` - trait for systems stepped once per display frame

mod clock;
mod system;

pub use clock::FrameClock;
pub use system::{step_all, RuntimeSystem};
