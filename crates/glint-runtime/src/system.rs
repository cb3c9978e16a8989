//! Runtime system trait

use glint_core::Result;

/// A system stepped by the host's frame loop
///
/// Systems are updated in the order the host calls them, once per display
/// frame, on the thread that owns them. Nothing reschedules itself: the
/// host loop is the only caller of `update`.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per frame with the elapsed seconds since the last frame
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the host is shutting down
    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable name for this system
    fn name(&self) -> &str;
}

/// Step every system in order. A failing system is logged and skipped so
/// one misbehaving effect layer cannot stall the frame.
pub fn step_all(systems: &mut [&mut dyn RuntimeSystem], dt: f64) {
    for system in systems.iter_mut() {
        if let Err(e) = system.update(dt) {
            log::error!("[{}] update failed: {e}", system.name());
        }
    }
}
