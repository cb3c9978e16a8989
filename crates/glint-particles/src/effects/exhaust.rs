//! Exhaust plume: drifting smoke with a few hot sparks

use super::composite::{Composite, MemberSpec};
use crate::emitter::EmitterConfig;
use crate::kind::ParticleKind;
use glint_core::Color;
use std::f32::consts::PI;

pub const SMOKE: &str = "smoke";
pub const SPARKS: &str = "sparks";

/// Build an inactive exhaust plume
pub fn exhaust_plume() -> Composite {
    Composite::new(
        "exhaust_plume",
        vec![
            MemberSpec {
                name: SMOKE,
                config: EmitterConfig {
                    kind: ParticleKind::Disc,
                    spread: 0.6,
                    lifetime_min: 0.6,
                    lifetime_max: 1.2,
                    size_min: 4.0,
                    size_max: 7.0,
                    size_end_scale: 2.5,
                    color: Color::new(0.55, 0.55, 0.6, 0.35),
                    gravity: -30.0,
                    friction: 0.7,
                    spawn_radius: 3.0,
                    ..Default::default()
                },
                rate: 14.0,
                speed_base: 20.0,
                speed_factor: 0.1,
                speed_jitter: 0.4,
                direction_offset: PI,
                size_follows_intensity: true,
            },
            MemberSpec {
                name: SPARKS,
                config: EmitterConfig {
                    kind: ParticleKind::Line,
                    spread: 0.9,
                    lifetime_min: 0.15,
                    lifetime_max: 0.3,
                    size_min: 1.0,
                    size_max: 1.5,
                    color: Color::from_hex(0xFFB040),
                    color_end: Some(Color::new(1.0, 0.2, 0.0, 0.0)),
                    gravity: 120.0,
                    line_length: 8.0,
                    ..Default::default()
                },
                rate: 10.0,
                speed_base: 90.0,
                speed_factor: 0.3,
                speed_jitter: 0.3,
                direction_offset: PI,
                size_follows_intensity: false,
            },
        ],
    )
}
