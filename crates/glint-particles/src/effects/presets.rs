//! Built-in emitter presets, one per stock effect

use crate::emitter::EmitterConfig;
use crate::kind::ParticleKind;
use glint_core::{Color, GlintError, Result};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Names accepted by `by_name`, in display order
pub const NAMES: [&str; 7] = [
    "sparkles",
    "stars",
    "bubbles",
    "trail",
    "explosion",
    "floating_motes",
    "confetti_burst",
];

pub fn by_name(name: &str) -> Result<EmitterConfig> {
    match name {
        "sparkles" => Ok(sparkles()),
        "stars" => Ok(stars()),
        "bubbles" => Ok(bubbles()),
        "trail" => Ok(trail()),
        "explosion" => Ok(explosion()),
        "floating_motes" => Ok(floating_motes()),
        "confetti_burst" => Ok(confetti_burst()),
        _ => Err(GlintError::UnknownPreset(name.to_string())),
    }
}

/// Small golden glints scattering in every direction
pub fn sparkles() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Sparkle,
        emission_rate: 40.0,
        spread: TAU,
        lifetime_min: 0.4,
        lifetime_max: 0.9,
        speed_min: 20.0,
        speed_max: 80.0,
        size_min: 2.0,
        size_max: 5.0,
        size_end_scale: 0.2,
        color: Color::from_hex(0xFFE27A),
        color_jitter: 0.08,
        friction: 0.7,
        rotation_speed_min: -4.0,
        rotation_speed_max: 4.0,
        ..Default::default()
    }
}

/// Slow spinning stars drifting upward
pub fn stars() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Star,
        emission_rate: 12.0,
        direction: -FRAC_PI_2,
        spread: PI / 2.0,
        lifetime_min: 1.0,
        lifetime_max: 1.8,
        speed_min: 30.0,
        speed_max: 70.0,
        size_min: 5.0,
        size_max: 9.0,
        size_end_scale: 0.5,
        color: Color::from_hex(0xFFF4C2),
        gravity: 25.0,
        rotation_speed_min: -2.5,
        rotation_speed_max: 2.5,
        ..Default::default()
    }
}

/// Rising translucent bubbles
pub fn bubbles() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Ring,
        emission_rate: 8.0,
        direction: -FRAC_PI_2,
        spread: PI / 3.0,
        lifetime_min: 1.5,
        lifetime_max: 3.0,
        speed_min: 15.0,
        speed_max: 40.0,
        size_min: 4.0,
        size_max: 12.0,
        size_end_scale: 1.3,
        color: Color::new(0.6, 0.85, 1.0, 0.8),
        gravity: -10.0,
        friction: 0.2,
        spawn_radius: 10.0,
        ..Default::default()
    }
}

/// Short streaks left behind a moving object; aim `direction` opposite its motion
pub fn trail() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Line,
        emission_rate: 30.0,
        direction: PI,
        spread: 0.3,
        lifetime_min: 0.2,
        lifetime_max: 0.4,
        speed_min: 60.0,
        speed_max: 120.0,
        size_min: 1.0,
        size_max: 2.0,
        color: Color::new(1.0, 1.0, 1.0, 0.7),
        friction: 0.5,
        line_length: 18.0,
        ..Default::default()
    }
}

/// One-shot fireball: hot discs cooling from yellow to red
pub fn explosion() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Disc,
        emission_rate: 0.0,
        batch_size: 40,
        continuous: false,
        burst_count: 1,
        spread: TAU,
        lifetime_min: 0.4,
        lifetime_max: 0.9,
        speed_min: 80.0,
        speed_max: 260.0,
        size_min: 3.0,
        size_max: 8.0,
        size_end_scale: 0.1,
        color: Color::from_hex(0xFFD54A),
        color_end: Some(Color::new(0.8, 0.1, 0.0, 0.6)),
        gravity: 60.0,
        friction: 0.85,
        ..Default::default()
    }
}

/// Dust motes that float and sway in place
pub fn floating_motes() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Sway,
        emission_rate: 5.0,
        direction: -FRAC_PI_2,
        spread: 0.6,
        lifetime_min: 3.0,
        lifetime_max: 5.0,
        speed_min: 5.0,
        speed_max: 15.0,
        size_min: 1.5,
        size_max: 3.0,
        color: Color::new(1.0, 1.0, 0.9, 0.6),
        rotation_speed_min: 1.0,
        rotation_speed_max: 2.5,
        sway_amplitude: 8.0,
        spawn_radius: 60.0,
        ..Default::default()
    }
}

/// Three quick bursts of colorful stars falling under gravity
pub fn confetti_burst() -> EmitterConfig {
    EmitterConfig {
        kind: ParticleKind::Star,
        emission_rate: 6.0,
        batch_size: 15,
        continuous: false,
        burst_count: 3,
        direction: -FRAC_PI_2,
        spread: PI * 0.8,
        lifetime_min: 1.2,
        lifetime_max: 2.0,
        speed_min: 150.0,
        speed_max: 300.0,
        size_min: 3.0,
        size_max: 6.0,
        color: Color::new(0.6, 0.5, 0.6, 1.0),
        color_jitter: 0.4,
        gravity: 220.0,
        friction: 0.4,
        rotation_speed_min: -8.0,
        rotation_speed_max: 8.0,
        ..Default::default()
    }
}
