//! Particle kinds and the per-kind behavior table
//!
//! Particles are plain data tagged with a `ParticleKind`. Everything that
//! differs between kinds (spin, line shrink, draw routine) lives in a
//! `KindRule` looked up from the system's `KindTable`.

use crate::particle::Particle;
use crate::surface::DrawSurface;
use glam::Vec2;
use glint_core::{GlintError, Result};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Render shape and behavior tag shared by an emitter and its particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// 4-pointed glint with glow halo
    Sparkle,
    /// 5-pointed star with glow halo
    Star,
    /// Stroked circle with faint fill (bubbles)
    Ring,
    /// Filled circle with glow halo (explosions, glow)
    Disc,
    /// Segment trailing back along the velocity (speed lines, trails)
    Line,
    /// Filled circle drifting side to side (floating motes)
    Sway,
}

impl ParticleKind {
    pub const COUNT: usize = 6;

    pub const ALL: [ParticleKind; Self::COUNT] = [
        ParticleKind::Sparkle,
        ParticleKind::Star,
        ParticleKind::Ring,
        ParticleKind::Disc,
        ParticleKind::Line,
        ParticleKind::Sway,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParticleKind::Sparkle => "sparkle",
            ParticleKind::Star => "star",
            ParticleKind::Ring => "ring",
            ParticleKind::Disc => "disc",
            ParticleKind::Line => "line",
            ParticleKind::Sway => "sway",
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ParticleKind {
    type Err = GlintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sparkle" | "glow" | "point" => Ok(ParticleKind::Sparkle),
            "star" => Ok(ParticleKind::Star),
            "ring" | "bubble" => Ok(ParticleKind::Ring),
            "disc" | "circle" => Ok(ParticleKind::Disc),
            "line" | "trail" | "streak" => Ok(ParticleKind::Line),
            "sway" | "mote" | "float" => Ok(ParticleKind::Sway),
            _ => Err(GlintError::UnknownKind(s.to_string())),
        }
    }
}

/// Stateless draw routine for one kind
pub type DrawFn = fn(&Particle, &mut dyn DrawSurface);

/// Behavior of one particle kind
#[derive(Clone, Copy)]
pub struct KindRule {
    /// Advance `rotation` by `rotation_speed` each step
    pub spins: bool,
    /// Fraction of line length lost per second
    pub length_loss: f32,
    pub draw: DrawFn,
}

/// Lookup table from kind to rule, owned by the particle system
#[derive(Clone)]
pub struct KindTable {
    rules: [KindRule; ParticleKind::COUNT],
}

impl KindTable {
    pub fn rule(&self, kind: ParticleKind) -> &KindRule {
        &self.rules[kind.index()]
    }

    /// Replace the rule for one kind (e.g. a host-specific draw routine)
    pub fn set_rule(&mut self, kind: ParticleKind, rule: KindRule) {
        self.rules[kind.index()] = rule;
    }
}

impl Default for KindTable {
    fn default() -> Self {
        let still = |draw: DrawFn| KindRule {
            spins: false,
            length_loss: 0.0,
            draw,
        };
        let spinning = |draw: DrawFn| KindRule {
            spins: true,
            length_loss: 0.0,
            draw,
        };
        // Order must match ParticleKind discriminants
        Self {
            rules: [
                spinning(draw_sparkle),
                spinning(draw_star),
                still(draw_ring),
                still(draw_disc),
                KindRule {
                    spins: false,
                    length_loss: 0.75,
                    draw: draw_line,
                },
                spinning(draw_sway),
            ],
        }
    }
}

// ── Draw routines ──

const GLOW_SCALE: f32 = 1.8;
const GLOW_ALPHA: f32 = 0.25;
const RING_FILL_ALPHA: f32 = 0.15;

/// Vertices of an n-pointed star, first point facing `rotation - PI/2`
pub fn star_points(center: Vec2, outer: f32, inner: f32, points: usize, rotation: f32) -> Vec<Vec2> {
    let step = PI / points as f32;
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = rotation - FRAC_PI_2 + step * i as f32;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

fn draw_glow(p: &Particle, surface: &mut dyn DrawSurface) {
    let color = p.render_color();
    surface.fill_circle(p.position, p.size * GLOW_SCALE, color.with_alpha(color.a * GLOW_ALPHA));
}

fn draw_sparkle(p: &Particle, surface: &mut dyn DrawSurface) {
    draw_glow(p, surface);
    let points = star_points(p.position, p.size, p.size * 0.3, 4, p.rotation);
    surface.fill_polygon(&points, p.render_color());
}

fn draw_star(p: &Particle, surface: &mut dyn DrawSurface) {
    draw_glow(p, surface);
    let points = star_points(p.position, p.size, p.size * 0.45, 5, p.rotation);
    surface.fill_polygon(&points, p.render_color());
}

fn draw_ring(p: &Particle, surface: &mut dyn DrawSurface) {
    let color = p.render_color();
    surface.fill_circle(p.position, p.size, color.with_alpha(color.a * RING_FILL_ALPHA));
    surface.stroke_circle(p.position, p.size, (p.size * 0.12).max(1.0), color);
}

fn draw_disc(p: &Particle, surface: &mut dyn DrawSurface) {
    draw_glow(p, surface);
    surface.fill_circle(p.position, p.size, p.render_color());
}

fn draw_line(p: &Particle, surface: &mut dyn DrawSurface) {
    let dir = p.velocity.normalize_or_zero();
    if p.length <= 0.0 || dir == Vec2::ZERO {
        return;
    }
    let tail = p.position - dir * p.length;
    surface.line(p.position, tail, p.size.max(0.5), p.render_color());
}

fn draw_sway(p: &Particle, surface: &mut dyn DrawSurface) {
    surface.fill_circle(p.render_position(), p.size, p.render_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn kind_names_round_trip() {
        for kind in ParticleKind::ALL {
            assert_eq!(kind.as_str().parse::<ParticleKind>().unwrap(), kind);
        }
        assert_eq!("bubble".parse::<ParticleKind>().unwrap(), ParticleKind::Ring);
        assert!("smoke-ring".parse::<ParticleKind>().is_err());
    }

    #[test]
    fn table_order_matches_kinds() {
        let table = KindTable::default();
        assert!(table.rule(ParticleKind::Star).spins);
        assert!(!table.rule(ParticleKind::Ring).spins);
        assert!(table.rule(ParticleKind::Line).length_loss > 0.0);
        assert!(table.rule(ParticleKind::Sway).spins);
    }

    #[test]
    fn star_has_alternating_radii() {
        let pts = star_points(Vec2::ZERO, 10.0, 4.0, 5, 0.0);
        assert_eq!(pts.len(), 10);
        assert!((pts[0].length() - 10.0).abs() < 1e-4);
        assert!((pts[1].length() - 4.0).abs() < 1e-4);
        // First point straight up (negative y in screen space)
        assert!((pts[0].y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn ring_fill_is_fainter_than_stroke() {
        let table = KindTable::default();
        let p = Particle::new(ParticleKind::Ring, Vec2::ZERO, Vec2::ZERO).with_size(6.0);
        let mut rec = RecordingSurface::new();
        (table.rule(p.kind).draw)(&p, &mut rec);
        let cmds = rec.commands();
        assert_eq!(cmds.len(), 2);
        let fill = cmds[0].alpha().unwrap();
        let stroke = cmds[1].alpha().unwrap();
        assert!(matches!(cmds[1], DrawCommand::StrokeCircle { .. }));
        assert!(fill < stroke);
    }

    #[test]
    fn line_trails_behind_velocity() {
        let table = KindTable::default();
        let p = Particle::new(ParticleKind::Line, Vec2::new(50.0, 0.0), Vec2::new(10.0, 0.0))
            .with_length(20.0);
        let mut rec = RecordingSurface::new();
        (table.rule(p.kind).draw)(&p, &mut rec);
        match &rec.commands()[0] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(*from, Vec2::new(50.0, 0.0));
                assert!((to.x - 30.0).abs() < 1e-4);
            }
            other => panic!("Expected line, got {other:?}"),
        }
    }

    #[test]
    fn sway_draws_at_offset_position() {
        let table = KindTable::default();
        let mut p = Particle::new(ParticleKind::Sway, Vec2::new(10.0, 10.0), Vec2::ZERO)
            .with_sway(5.0);
        p.rotation = FRAC_PI_2;
        let mut rec = RecordingSurface::new();
        (table.rule(p.kind).draw)(&p, &mut rec);
        match &rec.commands()[0] {
            DrawCommand::FillCircle { center, .. } => {
                assert!((center.x - 15.0).abs() < 1e-4);
                assert!((center.y - 10.0).abs() < 1e-4);
            }
            other => panic!("Expected circle, got {other:?}"),
        }
        // Physics position is untouched by sway
        assert_eq!(p.position, Vec2::new(10.0, 10.0));
    }
}
