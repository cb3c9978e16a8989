//! Particle state and per-step integration

use crate::curves::{lerp_color, lerp_f32, retain};
use crate::kind::{KindRule, ParticleKind};
use glam::Vec2;
use glint_core::Color;

/// Life at or below this is dead; absorbs f32 accumulation error
pub const DEATH_THRESHOLD: f32 = 1e-5;

/// Slowest allowed decay (life units per second). Keeps every particle mortal.
pub const MIN_DECAY: f32 = 0.01;

/// One visual primitive. Plain data: behavior comes from its kind's rule.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Color at spawn
    pub color: Color,
    /// Color the particle blends toward as it dies
    pub color_end: Color,
    /// Current size; derived from `size_start`/`size_end` and life
    pub size: f32,
    pub size_start: f32,
    pub size_end: f32,
    /// Normalized remaining life: 1 = just spawned, <= 0 = dead
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    /// Downward acceleration (screen space, +y is down)
    pub gravity: f32,
    /// Fraction of velocity lost per second, in [0, 1)
    pub friction: f32,
    /// Phase angle: star spin, or sway phase for `Sway`
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Lateral sway amplitude (render-time only)
    pub sway: f32,
    /// Trail length for `Line`
    pub length: f32,
    /// Insertion order within the owning system
    pub(crate) serial: u64,
}

impl Particle {
    /// A one-second, size-4, white particle at rest apart from `velocity`
    pub fn new(kind: ParticleKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity,
            color: Color::WHITE,
            color_end: Color::WHITE,
            size: 4.0,
            size_start: 4.0,
            size_end: 4.0,
            life: 1.0,
            decay: 1.0,
            gravity: 0.0,
            friction: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            sway: 0.0,
            length: 0.0,
            serial: 0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self.color_end = color;
        self
    }

    pub fn with_color_end(mut self, color_end: Color) -> Self {
        self.color_end = color_end;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self.size_start = size;
        self.size_end = size;
        self
    }

    /// Size at death, as a multiple of the spawn size
    pub fn with_size_end_scale(mut self, scale: f32) -> Self {
        self.size_end = self.size_start * scale;
        self
    }

    /// Lifetime in seconds from full life
    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.decay = if seconds > 0.0 { 1.0 / seconds } else { 1.0 };
        self
    }

    pub fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }

    /// Starting life below 1.0 (e.g. an already half-spent ember)
    pub fn with_life(mut self, life: f32) -> Self {
        self.life = life;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_spin(mut self, rotation: f32, rotation_speed: f32) -> Self {
        self.rotation = rotation;
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn with_sway(mut self, amplitude: f32) -> Self {
        self.sway = amplitude;
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    /// Clamp fields into the ranges the integrator expects
    pub fn sanitize(&mut self) {
        if !self.life.is_finite() {
            self.life = 1.0;
        }
        self.life = self.life.min(1.0);
        if !self.decay.is_finite() || self.decay < MIN_DECAY {
            self.decay = MIN_DECAY;
        }
        if !self.friction.is_finite() {
            self.friction = 0.0;
        }
        self.friction = self.friction.clamp(0.0, 0.999);
        if !self.gravity.is_finite() {
            self.gravity = 0.0;
        }
        self.size_start = self.size_start.max(0.0);
        self.size_end = self.size_end.max(0.0);
        self.size = self.size.max(0.0);
        self.length = self.length.max(0.0);
        self.color = self.color.sanitized(Color::WHITE);
        self.color_end = self.color_end.sanitized(self.color);
    }

    pub fn is_alive(&self) -> bool {
        self.life > DEATH_THRESHOLD
    }

    /// Spawn order within the owning system (higher is newer)
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Advance by `dt` seconds. Returns false once life is spent.
    pub fn step(&mut self, dt: f32, rule: &KindRule) -> bool {
        if dt.is_nan() || dt <= 0.0 {
            return self.is_alive();
        }

        self.position += self.velocity * dt;
        if self.gravity != 0.0 {
            self.velocity.y += self.gravity * dt;
        }
        if self.friction > 0.0 {
            self.velocity *= retain(self.friction, dt);
        }

        self.life -= self.decay * dt;
        self.size = lerp_f32(self.size_end, self.size_start, self.life.clamp(0.0, 1.0));

        if rule.spins {
            self.rotation += self.rotation_speed * dt;
        }
        if rule.length_loss > 0.0 {
            self.length *= retain(rule.length_loss, dt);
        }

        self.is_alive()
    }

    /// Color to draw with: blended toward `color_end` and faded by life
    pub fn render_color(&self) -> Color {
        let t = self.life.clamp(0.0, 1.0);
        let c = lerp_color(self.color_end, self.color, t);
        c.with_alpha(c.a * t)
    }

    pub fn alpha(&self) -> f32 {
        self.render_color().a
    }

    /// Draw position. Sway is applied here only, never to `position`.
    pub fn render_position(&self) -> Vec2 {
        if self.kind == ParticleKind::Sway {
            self.position + Vec2::new(self.rotation.sin() * self.sway, 0.0)
        } else {
            self.position
        }
    }
}
