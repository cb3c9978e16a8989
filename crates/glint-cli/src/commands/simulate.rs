//! Headless simulation command

use anyhow::{Context, Result};
use glint_core::{Color, Vec2};
use glint_particles::effects::{boost_trail, CompositeEffect};
use glint_particles::{
    Emitter, ParticleSettings, ParticleSystem, QualityTier, RecordingSurface, ScreenEffects,
};
use glint_runtime::{step_all, FrameClock, RuntimeSystem};
use serde::Serialize;

const DEFAULT_PRESET: &str = "sparkles";
/// Virtual canvas center where effects are anchored
const CENTER: Vec2 = Vec2::new(400.0, 300.0);
const TRACK_RADIUS: f32 = 150.0;
/// Laps per second around the boost track
const TRACK_SPEED: f32 = 0.5;

pub struct SimulateArgs {
    pub preset: Option<String>,
    pub boost: bool,
    pub seconds: f64,
    pub fps: u32,
    pub quality: Option<String>,
    pub settings: Option<String>,
    pub library: Option<String>,
    pub format: String,
}

#[derive(Debug, Serialize)]
struct Report {
    effect: String,
    quality: String,
    cap: usize,
    frames: u64,
    seconds: f64,
    spawned: u64,
    expired: u64,
    culled: u64,
    resident: usize,
    peak_resident: usize,
    draw_commands: usize,
    overlays: usize,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }

    let mut settings = match &args.settings {
        Some(path) => ParticleSettings::load(path)
            .with_context(|| format!("Failed to load settings {}", path))?,
        None => ParticleSettings::default(),
    };
    if let Some(quality) = &args.quality {
        settings.quality = quality
            .parse::<QualityTier>()
            .with_context(|| format!("Invalid quality '{}'", quality))?;
    }
    let library = super::load_library(args.library.as_deref())?;

    let recorder = RecordingSurface::new();
    let mut system = ParticleSystem::with_settings(&settings);
    system.attach_surface(Box::new(recorder.clone()));
    let mut screen = ScreenEffects::with_settings(&settings);

    let mut boost = args.boost.then(boost_trail);
    let effect = if let Some(fx) = boost.as_mut() {
        let (origin, velocity) = track_state(0.0);
        fx.start(&mut system, origin, velocity, 1.0);
        fx.name().to_string()
    } else {
        let name = args.preset.as_deref().unwrap_or(DEFAULT_PRESET);
        let config = library.get(name)?.clone();
        if !config.continuous {
            // One-shot effects hit the screen too
            screen.shake(8.0, 0.4);
            screen.flash(Color::WHITE, 0.6);
        }
        system.add_emitter(Emitter::new(config, CENTER));
        name.to_string()
    };
    log::info!(
        "simulating '{}' for {:.2}s at {} fps (quality {})",
        effect,
        args.seconds,
        args.fps,
        settings.quality
    );

    let frames = (args.seconds * args.fps as f64).round() as u64;
    let mut clock = FrameClock::new();
    let mut peak_resident = 0;
    let mut draw_commands = 0;
    let mut overlays = 0;

    for _ in 0..frames {
        let dt = clock.advance(1.0 / args.fps as f64);
        if let Some(fx) = boost.as_mut() {
            let (origin, velocity) = track_state(clock.total_time as f32);
            fx.update(&mut system, origin, velocity, 1.0);
        }

        step_all(&mut [&mut system as &mut dyn RuntimeSystem, &mut screen], dt);

        let mut overlay_surface = RecordingSurface::new();
        screen.render(&mut overlay_surface);
        overlays += overlay_surface.len();

        draw_commands += recorder.take().len();
        peak_resident = peak_resident.max(system.particle_count());
    }

    if let Some(fx) = boost.as_mut() {
        fx.stop(&mut system);
    }

    let stats = system.stats();
    let report = Report {
        effect,
        quality: settings.quality.to_string(),
        cap: system.quality_tier().max_particles(),
        frames: stats.frames,
        seconds: clock.total_time,
        spawned: stats.spawned,
        expired: stats.expired,
        culled: stats.culled,
        resident: system.particle_count(),
        peak_resident,
        draw_commands,
        overlays,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    system.shutdown()?;
    Ok(())
}

/// Position and velocity of the boost driver `t` seconds in
fn track_state(t: f32) -> (Vec2, Vec2) {
    let omega = std::f32::consts::TAU * TRACK_SPEED;
    let angle = omega * t;
    let origin = CENTER + Vec2::from_angle(angle) * TRACK_RADIUS;
    let velocity = Vec2::new(-angle.sin(), angle.cos()) * TRACK_RADIUS * omega;
    (origin, velocity)
}

fn print_text(report: &Report) {
    println!("Effect:        {}", report.effect);
    println!("Quality:       {} (cap {})", report.quality, report.cap);
    println!("Frames:        {} ({:.2}s)", report.frames, report.seconds);
    println!();
    println!("Spawned:       {}", report.spawned);
    println!("Expired:       {}", report.expired);
    println!("Culled:        {}", report.culled);
    println!("Resident:      {} (peak {})", report.resident, report.peak_resident);
    println!("Draw commands: {}", report.draw_commands);
    if report.overlays > 0 {
        println!("Flash frames:  {}", report.overlays);
    }
}
