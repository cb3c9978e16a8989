//! Frame clock producing per-frame delta times

use std::time::Instant;

/// Longest frame the clock will report, in seconds
pub const DEFAULT_MAX_DELTA: f64 = 0.25;

/// Tracks frame time for a host driving the engine once per display refresh.
///
/// `tick()` measures wall time; `advance()` lets headless hosts and tests
/// feed a synthetic delta. Either way the reported delta is clamped to
/// `[0, max_delta]` so a stalled frame cannot trigger a burst of catch-up
/// emission.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Upper bound on a single frame's delta
    pub max_delta: f64,
    /// Number of frames advanced so far
    pub frame: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom stall clamp
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta: max_delta.max(0.0),
            ..Self::default()
        }
    }

    /// Advance by measured wall time. Call once per frame; returns the delta.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame += 1;
            return 0.0;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by a caller-supplied delta; returns the clamped delta.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let dt = if dt.is_finite() { dt } else { 0.0 };
        let clamped = dt.clamp(0.0, self.max_delta);
        if clamped != dt {
            log::trace!("frame delta {dt:.4}s clamped to {clamped:.4}s");
        }
        self.delta_time = clamped;
        self.total_time += clamped;
        self.frame += 1;
        clamped
    }
}
