//! Boost trail: speed lines, glow and an energy core streaming behind a racer

use super::composite::{Composite, MemberSpec};
use crate::emitter::EmitterConfig;
use crate::kind::ParticleKind;
use glint_core::Color;
use std::f32::consts::PI;

pub const SPEED_LINES: &str = "speed_lines";
pub const GLOW: &str = "glow";
pub const ENERGY_CORE: &str = "energy_core";

/// Build an inactive boost trail. Every member emits opposite the driving velocity.
pub fn boost_trail() -> Composite {
    Composite::new(
        "boost_trail",
        vec![
            MemberSpec {
                name: SPEED_LINES,
                config: EmitterConfig {
                    kind: ParticleKind::Line,
                    spread: 0.35,
                    lifetime_min: 0.25,
                    lifetime_max: 0.45,
                    size_min: 1.5,
                    size_max: 2.5,
                    color: Color::new(0.75, 0.92, 1.0, 0.9),
                    friction: 0.6,
                    line_length: 28.0,
                    spawn_radius: 6.0,
                    ..Default::default()
                },
                rate: 40.0,
                speed_base: 120.0,
                speed_factor: 0.6,
                speed_jitter: 0.2,
                direction_offset: PI,
                size_follows_intensity: false,
            },
            MemberSpec {
                name: GLOW,
                config: EmitterConfig {
                    kind: ParticleKind::Disc,
                    spread: 0.8,
                    lifetime_min: 0.3,
                    lifetime_max: 0.6,
                    size_min: 6.0,
                    size_max: 10.0,
                    size_end_scale: 0.3,
                    color: Color::new(0.3, 0.6, 1.0, 0.6),
                    friction: 0.8,
                    ..Default::default()
                },
                rate: 25.0,
                speed_base: 30.0,
                speed_factor: 0.2,
                speed_jitter: 0.3,
                direction_offset: PI,
                size_follows_intensity: true,
            },
            MemberSpec {
                name: ENERGY_CORE,
                config: EmitterConfig {
                    kind: ParticleKind::Sparkle,
                    spread: 1.2,
                    lifetime_min: 0.4,
                    lifetime_max: 0.8,
                    size_min: 2.0,
                    size_max: 4.0,
                    size_end_scale: 0.2,
                    color: Color::from_hex(0xFFF3A0),
                    color_end: Some(Color::new(0.4, 0.8, 1.0, 0.0)),
                    friction: 0.5,
                    rotation_speed_min: -6.0,
                    rotation_speed_max: 6.0,
                    ..Default::default()
                },
                rate: 18.0,
                speed_base: 60.0,
                speed_factor: 0.35,
                speed_jitter: 0.25,
                direction_offset: PI,
                size_follows_intensity: true,
            },
        ],
    )
}
