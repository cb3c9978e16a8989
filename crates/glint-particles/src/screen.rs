//! One-shot screen effects: camera shake and full-screen flash
//!
//! Both run on the same frame loop as the particle system but share no
//! state with it.

use crate::rand::ParticleRng;
use crate::settings::ParticleSettings;
use crate::surface::DrawSurface;
use glam::Vec2;
use glint_core::{Color, Result};
use glint_runtime::RuntimeSystem;

/// Camera shake whose radius decays linearly to zero over its duration
#[derive(Debug, Clone, Default)]
pub struct CameraShake {
    intensity: f32,
    duration: f32,
    elapsed: f32,
    offset: Vec2,
}

impl CameraShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a shake, replacing any shake in progress
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        self.intensity = non_negative(intensity);
        self.duration = non_negative(duration);
        self.elapsed = 0.0;
        self.offset = Vec2::ZERO;
    }

    /// Shake radius at `t` seconds after the trigger; exactly 0 from `duration` on
    pub fn radius_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 || t >= self.duration {
            return 0.0;
        }
        self.intensity * (1.0 - t.max(0.0) / self.duration)
    }

    /// Random offset within the radius at `t`
    pub fn offset_at(&self, t: f32, rng: &mut ParticleRng) -> Vec2 {
        let radius = self.radius_at(t);
        if radius <= 0.0 {
            Vec2::ZERO
        } else {
            rng.point_in_disc(radius)
        }
    }

    pub fn update(&mut self, dt: f32, rng: &mut ParticleRng) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }
        self.elapsed += non_negative(dt);
        self.offset = self.offset_at(self.elapsed, rng);
    }

    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration && self.intensity > 0.0
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Full-surface color overlay that decays geometrically per frame
#[derive(Debug, Clone)]
pub struct ScreenFlash {
    color: Color,
    alpha: f32,
    decay: f32,
    threshold: f32,
    /// Triggered but not yet shown; the first frame draws at full intensity
    fresh: bool,
}

impl ScreenFlash {
    pub fn new(decay: f32, threshold: f32) -> Self {
        Self {
            color: Color::WHITE,
            alpha: 0.0,
            decay: decay.clamp(0.0, 0.999),
            threshold: threshold.max(f32::EPSILON),
            fresh: false,
        }
    }

    pub fn trigger(&mut self, color: Color, intensity: f32) {
        self.color = color.sanitized(Color::WHITE);
        self.alpha = non_negative(intensity).min(1.0);
        self.fresh = self.alpha > 0.0;
        if self.alpha < self.threshold {
            self.alpha = 0.0;
        }
    }

    /// Decay by one frame. A zero-length frame changes nothing.
    pub fn update(&mut self, dt: f32) {
        if self.alpha <= 0.0 || dt.is_nan() || dt <= 0.0 {
            return;
        }
        if self.fresh {
            self.fresh = false;
            return;
        }
        self.alpha *= self.decay;
        if self.alpha < self.threshold {
            self.alpha = 0.0;
        }
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        if self.is_active() {
            surface.overlay(self.color.with_alpha(self.color.a * self.alpha));
        }
    }

    pub fn is_active(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for ScreenFlash {
    fn default() -> Self {
        let settings = ParticleSettings::default();
        Self::new(settings.flash_decay, settings.flash_threshold)
    }
}

/// Shake and flash driven together by the host's frame loop
pub struct ScreenEffects {
    pub shake: CameraShake,
    pub flash: ScreenFlash,
    rng: ParticleRng,
}

impl ScreenEffects {
    pub fn new() -> Self {
        Self::with_settings(&ParticleSettings::default())
    }

    pub fn with_settings(settings: &ParticleSettings) -> Self {
        Self {
            shake: CameraShake::new(),
            flash: ScreenFlash::new(settings.flash_decay, settings.flash_threshold),
            // Decorrelate from the particle stream seeded with the same value
            rng: ParticleRng::new(settings.seed.rotate_left(16) ^ 0x9E37_79B9),
        }
    }

    pub fn shake(&mut self, intensity: f32, duration: f32) {
        log::debug!("[screen] shake {intensity:.1} for {duration:.2}s");
        self.shake.trigger(intensity, duration);
    }

    pub fn flash(&mut self, color: Color, intensity: f32) {
        log::debug!("[screen] flash at {intensity:.2}");
        self.flash.trigger(color, intensity);
    }

    pub fn step(&mut self, dt: f32) {
        self.shake.update(dt, &mut self.rng);
        self.flash.update(dt);
    }

    /// Camera offset the host should apply this frame
    pub fn offset(&self) -> Vec2 {
        self.shake.offset()
    }

    /// Draw the flash overlay (call after the scene and particles)
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        self.flash.render(surface);
    }

    pub fn is_active(&self) -> bool {
        self.shake.is_active() || self.flash.is_active()
    }
}

impl Default for ScreenEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem for ScreenEffects {
    fn update(&mut self, dt: f64) -> Result<()> {
        self.step(dt as f32);
        Ok(())
    }

    fn name(&self) -> &str {
        "screen"
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}
