//! Emitter configuration (parsed from TOML) and runtime state

use crate::kind::ParticleKind;
use crate::particle::Particle;
use crate::rand::ParticleRng;
use glam::Vec2;
use glint_core::{Color, Result};
use std::f32::consts::TAU;

/// Shortest lifetime a config may request, in seconds
pub const MIN_LIFETIME: f32 = 0.01;

/// Upper bound on emissions per step, so a stalled frame cannot flood the pool
pub const MAX_EMISSIONS_PER_STEP: u32 = 4096;

/// Emission parameters for one emitter
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub kind: ParticleKind,
    /// Emissions per second
    pub emission_rate: f32,
    /// Particles spawned per emission
    pub batch_size: u32,
    /// Continuous emitters run until removed; one-shot emitters stop after `burst_count`
    pub continuous: bool,
    pub burst_count: u32,
    /// Cone center, radians (0 = +x, PI/2 = +y/down)
    pub direction: f32,
    /// Full cone width, radians; angles are sampled in `direction ± spread / 2`
    pub spread: f32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Size at death as a multiple of spawn size
    pub size_end_scale: f32,
    pub color: Color,
    /// Color at death; `None` keeps the spawn color
    pub color_end: Option<Color>,
    /// Per-channel random offset applied to `color`
    pub color_jitter: f32,
    pub gravity: f32,
    pub friction: f32,
    pub rotation_speed_min: f32,
    pub rotation_speed_max: f32,
    pub sway_amplitude: f32,
    pub line_length: f32,
    /// Particles spawn uniformly inside this radius around the origin
    pub spawn_radius: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            kind: ParticleKind::Sparkle,
            emission_rate: 10.0,
            batch_size: 1,
            continuous: true,
            burst_count: 1,
            direction: 0.0,
            spread: TAU,
            lifetime_min: 0.5,
            lifetime_max: 1.0,
            speed_min: 20.0,
            speed_max: 60.0,
            size_min: 2.0,
            size_max: 4.0,
            size_end_scale: 1.0,
            color: Color::WHITE,
            color_end: None,
            color_jitter: 0.0,
            gravity: 0.0,
            friction: 0.0,
            rotation_speed_min: 0.0,
            rotation_speed_max: 0.0,
            sway_amplitude: 0.0,
            line_length: 0.0,
            spawn_radius: 0.0,
        }
    }
}

impl EmitterConfig {
    /// Parse an EmitterConfig from a TOML table.
    ///
    /// Missing keys keep their defaults; `direction` and `spread` are in degrees.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        Self::from_toml_with_base(table, Self::default())
    }

    /// Like `from_toml`, but keys missing from `table` keep `base`'s values
    pub fn from_toml_with_base(table: &toml::value::Table, base: Self) -> Result<Self> {
        let mut config = base;

        if let Some(v) = table.get("kind").and_then(|v| v.as_str()) {
            config.kind = v.parse()?;
        }
        if let Some(v) = table.get("emission_rate") {
            config.emission_rate = toml_f32(v, config.emission_rate);
        }
        if let Some(v) = table.get("batch_size") {
            config.batch_size = v.as_integer().unwrap_or(1).clamp(0, i64::from(u32::MAX)) as u32;
        }
        if let Some(v) = table.get("continuous") {
            config.continuous = v.as_bool().unwrap_or(true);
        }
        if let Some(v) = table.get("burst_count") {
            config.burst_count = v.as_integer().unwrap_or(1).clamp(0, i64::from(u32::MAX)) as u32;
        }
        if let Some(v) = table.get("direction") {
            config.direction = toml_f32(v, config.direction.to_degrees()).to_radians();
        }
        if let Some(v) = table.get("spread") {
            config.spread = toml_f32(v, config.spread.to_degrees()).to_radians();
        }
        if let Some(v) = table.get("lifetime_min") {
            config.lifetime_min = toml_f32(v, config.lifetime_min);
        }
        if let Some(v) = table.get("lifetime_max") {
            config.lifetime_max = toml_f32(v, config.lifetime_max);
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, config.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, config.speed_max);
        }
        if let Some(v) = table.get("size_min") {
            config.size_min = toml_f32(v, config.size_min);
        }
        if let Some(v) = table.get("size_max") {
            config.size_max = toml_f32(v, config.size_max);
        }
        if let Some(v) = table.get("size_end_scale") {
            config.size_end_scale = toml_f32(v, config.size_end_scale);
        }
        if let Some(v) = table.get("color") {
            config.color = toml_color(v, config.color);
        }
        if let Some(v) = table.get("color_end") {
            config.color_end = Some(toml_color(v, config.color_end.unwrap_or(config.color)));
        }
        if let Some(v) = table.get("color_jitter") {
            config.color_jitter = toml_f32(v, config.color_jitter);
        }
        if let Some(v) = table.get("gravity") {
            config.gravity = toml_f32(v, config.gravity);
        }
        if let Some(v) = table.get("friction") {
            config.friction = toml_f32(v, config.friction);
        }
        if let Some(v) = table.get("rotation_speed_min") {
            config.rotation_speed_min = toml_f32(v, config.rotation_speed_min);
        }
        if let Some(v) = table.get("rotation_speed_max") {
            config.rotation_speed_max = toml_f32(v, config.rotation_speed_max);
        }
        if let Some(v) = table.get("sway_amplitude") {
            config.sway_amplitude = toml_f32(v, config.sway_amplitude);
        }
        if let Some(v) = table.get("line_length") {
            config.line_length = toml_f32(v, config.line_length);
        }
        if let Some(v) = table.get("spawn_radius") {
            config.spawn_radius = toml_f32(v, config.spawn_radius);
        }

        Ok(config)
    }

    /// Clamp every field into a usable range. Bad values never fail; they
    /// fall back to something drawable and are reported at warn level.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let mut clamped: Vec<&str> = Vec::new();

        if !self.emission_rate.is_finite() || self.emission_rate < 0.0 {
            self.emission_rate = 0.0;
            clamped.push("emission_rate");
        }
        if self.batch_size == 0 {
            self.batch_size = 1;
            clamped.push("batch_size");
        }
        if !self.continuous && self.burst_count == 0 {
            self.burst_count = 1;
            clamped.push("burst_count");
        }
        if !self.direction.is_finite() {
            self.direction = 0.0;
            clamped.push("direction");
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            self.spread = 0.0;
            clamped.push("spread");
        } else if self.spread > TAU {
            self.spread = TAU;
            clamped.push("spread");
        }

        let (lo, hi, bad) = ordered_range(
            self.lifetime_min,
            self.lifetime_max,
            (defaults.lifetime_min, defaults.lifetime_max),
        );
        let (lo, hi) = (lo.max(MIN_LIFETIME), hi.max(MIN_LIFETIME));
        if bad || lo != self.lifetime_min || hi != self.lifetime_max {
            clamped.push("lifetime");
        }
        self.lifetime_min = lo;
        self.lifetime_max = hi;

        let (lo, hi, bad) = ordered_range(self.speed_min, self.speed_max, (0.0, 0.0));
        if bad {
            clamped.push("speed");
        }
        self.speed_min = lo;
        self.speed_max = hi;

        let (lo, hi, bad) =
            ordered_range(self.size_min, self.size_max, (defaults.size_min, defaults.size_max));
        let (lo, hi) = (lo.max(0.0), hi.max(0.0));
        if bad || lo != self.size_min || hi != self.size_max {
            clamped.push("size");
        }
        self.size_min = lo;
        self.size_max = hi;

        if !self.size_end_scale.is_finite() || self.size_end_scale < 0.0 {
            self.size_end_scale = 1.0;
            clamped.push("size_end_scale");
        }

        if !self.color.is_valid() {
            self.color = self.color.sanitized(Color::WHITE);
            clamped.push("color");
        }
        if let Some(end) = self.color_end {
            if !end.is_valid() {
                self.color_end = Some(end.sanitized(self.color));
                clamped.push("color_end");
            }
        }
        if !self.color_jitter.is_finite() || !(0.0..=1.0).contains(&self.color_jitter) {
            self.color_jitter = finite_or(self.color_jitter, 0.0).clamp(0.0, 1.0);
            clamped.push("color_jitter");
        }

        if !self.gravity.is_finite() {
            self.gravity = 0.0;
            clamped.push("gravity");
        }
        if !self.friction.is_finite() || !(0.0..1.0).contains(&self.friction) {
            self.friction = finite_or(self.friction, 0.0).clamp(0.0, 0.999);
            clamped.push("friction");
        }

        let (lo, hi, bad) =
            ordered_range(self.rotation_speed_min, self.rotation_speed_max, (0.0, 0.0));
        if bad {
            clamped.push("rotation_speed");
        }
        self.rotation_speed_min = lo;
        self.rotation_speed_max = hi;

        for (value, name) in [
            (&mut self.sway_amplitude, "sway_amplitude"),
            (&mut self.line_length, "line_length"),
            (&mut self.spawn_radius, "spawn_radius"),
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
                clamped.push(name);
            }
        }

        if !clamped.is_empty() {
            log::warn!(
                "[particles] {} emitter config clamped: {}",
                self.kind,
                clamped.join(", ")
            );
        }
        self
    }

    /// Build one particle at `origin` using this config's sampling rule
    pub fn spawn_particle(&self, origin: Vec2, rng: &mut ParticleRng) -> Particle {
        let angle = rng.cone_angle(self.direction, self.spread);
        let speed = rng.range(self.speed_min, self.speed_max);
        let position = origin + rng.point_in_disc(self.spawn_radius);
        let lifetime = rng.range(self.lifetime_min, self.lifetime_max);
        let size = rng.range(self.size_min, self.size_max);

        let color = if self.color_jitter > 0.0 {
            Color::new(
                (self.color.r + rng.jitter(self.color_jitter)).clamp(0.0, 1.0),
                (self.color.g + rng.jitter(self.color_jitter)).clamp(0.0, 1.0),
                (self.color.b + rng.jitter(self.color_jitter)).clamp(0.0, 1.0),
                self.color.a,
            )
        } else {
            self.color
        };

        let spin = rng.range(self.rotation_speed_min, self.rotation_speed_max);
        Particle::new(self.kind, position, Vec2::from_angle(angle) * speed)
            .with_color(color)
            .with_color_end(self.color_end.unwrap_or(color))
            .with_size(size)
            .with_size_end_scale(self.size_end_scale)
            .with_lifetime(lifetime)
            .with_gravity(self.gravity)
            .with_friction(self.friction)
            .with_spin(rng.range(0.0, TAU), spin)
            .with_sway(self.sway_amplitude)
            .with_length(self.line_length)
    }
}

/// Whether an emitter can keep producing particles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Active,
    /// One-shot emitter has fired every burst; the owner should remove it
    Exhausted,
}

/// Runtime state for one emitter
#[derive(Debug, Clone)]
pub struct Emitter {
    /// Always sanitized; mutate through the `set_*` methods
    config: EmitterConfig,
    pub origin: Vec2,
    /// Fractional emission accumulator; carries remainders across steps
    accumulator: f32,
    bursts_remaining: u32,
    total_spawned: u64,
}

impl Emitter {
    pub fn new(config: EmitterConfig, origin: Vec2) -> Self {
        let config = config.sanitized();
        // One-shot emitters fire their first burst on the first step
        let accumulator = if config.continuous { 0.0 } else { 1.0 };
        let bursts_remaining = if config.continuous {
            0
        } else {
            config.burst_count
        };
        Self {
            config,
            origin,
            accumulator,
            bursts_remaining,
            total_spawned: 0,
        }
    }

    /// Advance by `dt` seconds, appending spawned particles to `spawned`.
    pub fn step(&mut self, dt: f32, rng: &mut ParticleRng, spawned: &mut Vec<Particle>) -> Emission {
        if self.is_exhausted() {
            return Emission::Exhausted;
        }
        if dt.is_nan() || dt <= 0.0 {
            return Emission::Active;
        }

        let emissions = if self.config.continuous {
            self.accumulate(dt)
        } else {
            let due = if self.config.emission_rate > 0.0 {
                self.accumulate(dt)
            } else {
                // No rate: every remaining burst fires at once
                self.accumulator = 0.0;
                self.bursts_remaining
            };
            let due = due.min(self.bursts_remaining);
            self.bursts_remaining -= due;
            due
        };

        let batch = self.config.batch_size;
        for _ in 0..emissions.min(MAX_EMISSIONS_PER_STEP) {
            for _ in 0..batch {
                spawned.push(self.config.spawn_particle(self.origin, rng));
            }
        }
        self.total_spawned += u64::from(emissions.min(MAX_EMISSIONS_PER_STEP)) * u64::from(batch);

        if self.is_exhausted() {
            Emission::Exhausted
        } else {
            Emission::Active
        }
    }

    fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += self.config.emission_rate * dt;
        let count = self.accumulator.floor();
        self.accumulator -= count;
        count as u32
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn is_exhausted(&self) -> bool {
        !self.config.continuous && self.bursts_remaining == 0
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn set_direction(&mut self, direction: f32) {
        if direction.is_finite() {
            self.config.direction = direction;
        }
    }

    /// Change the emission rate; only future emission is affected
    pub fn set_emission_rate(&mut self, rate: f32) {
        self.config.emission_rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    }

    pub fn set_speed_range(&mut self, min: f32, max: f32) {
        let (lo, hi, _) = ordered_range(min, max, (self.config.speed_min, self.config.speed_max));
        self.config.speed_min = lo;
        self.config.speed_max = hi;
    }

    pub fn set_size_range(&mut self, min: f32, max: f32) {
        let (lo, hi, _) = ordered_range(min, max, (self.config.size_min, self.config.size_max));
        self.config.size_min = lo.max(0.0);
        self.config.size_max = hi.max(0.0);
    }
}

// ── Range and TOML helpers ──

fn finite_or(v: f32, default: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        default
    }
}

/// Returns (min, max, was_invalid); non-finite input falls back to `default`
fn ordered_range(min: f32, max: f32, default: (f32, f32)) -> (f32, f32, bool) {
    if !min.is_finite() || !max.is_finite() {
        return (default.0, default.1, true);
    }
    if min > max {
        (max, min, true)
    } else {
        (min, max, false)
    }
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

/// Accepts `[r, g, b]`, `[r, g, b, a]` or a `"#rrggbb"` string
fn toml_color(v: &toml::Value, default: Color) -> Color {
    if let Some(s) = v.as_str() {
        return u32::from_str_radix(s.trim_start_matches('#'), 16)
            .map(Color::from_hex)
            .unwrap_or(default);
    }
    if let Some(arr) = v.as_array() {
        if arr.len() >= 3 {
            return Color::new(
                toml_f32(&arr[0], default.r),
                toml_f32(&arr[1], default.g),
                toml_f32(&arr[2], default.b),
                arr.get(3).map(|a| toml_f32(a, 1.0)).unwrap_or(1.0),
            );
        }
    }
    default
}
