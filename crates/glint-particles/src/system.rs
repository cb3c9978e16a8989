//! The particle system: owns the pool and the emitter set and runs the frame step

use crate::emitter::{Emission, Emitter, EmitterConfig};
use crate::kind::KindTable;
use crate::particle::Particle;
use crate::quality::QualityTier;
use crate::rand::ParticleRng;
use crate::settings::ParticleSettings;
use crate::surface::DrawSurface;
use glam::Vec2;
use glint_core::{EmitterId, Result};
use glint_runtime::RuntimeSystem;
use serde::Serialize;

/// Running counters, mostly for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SystemStats {
    pub frames: u64,
    /// Particles inserted into the pool (emitted, burst or injected)
    pub spawned: u64,
    /// Particles removed because their life ran out
    pub expired: u64,
    /// Particles dropped to honor the quality cap
    pub culled: u64,
}

/// Owns every resident particle and registered emitter.
///
/// One instance is created by the host and handed by `&mut` to whatever
/// needs to add emitters or particles; `step` is the only place children
/// are advanced.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    emitters: Vec<(EmitterId, Emitter)>,
    kinds: KindTable,
    quality: QualityTier,
    trail_fade: f32,
    rng: ParticleRng,
    surface: Option<Box<dyn DrawSurface>>,
    next_emitter_id: u64,
    next_serial: u64,
    /// Reused between frames to collect emitter output
    spawn_buffer: Vec<Particle>,
    stats: SystemStats,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::with_settings(&ParticleSettings::default())
    }

    pub fn with_settings(settings: &ParticleSettings) -> Self {
        let settings = settings.clone().sanitized();
        Self {
            particles: Vec::with_capacity(settings.quality.max_particles()),
            emitters: Vec::new(),
            kinds: KindTable::default(),
            quality: settings.quality,
            trail_fade: settings.trail_fade,
            rng: ParticleRng::new(settings.seed),
            surface: None,
            next_emitter_id: 1,
            next_serial: 0,
            spawn_buffer: Vec::new(),
            stats: SystemStats::default(),
        }
    }

    // ── Emitters ──

    /// Register an emitter; it starts emitting on the next step
    pub fn add_emitter(&mut self, emitter: Emitter) -> EmitterId {
        let id = EmitterId::from_raw(self.next_emitter_id);
        self.next_emitter_id += 1;
        log::debug!(
            "[particles] registered {id} ({}, {:.1}/s)",
            emitter.config().kind,
            emitter.config().emission_rate
        );
        self.emitters.push((id, emitter));
        id
    }

    /// Unregister an emitter. Emission stops immediately; particles it
    /// already spawned stay in the pool and age out normally.
    pub fn remove_emitter(&mut self, id: EmitterId) -> Option<Emitter> {
        let index = self.emitters.iter().position(|(eid, _)| *eid == id)?;
        log::debug!("[particles] removed {id}");
        Some(self.emitters.remove(index).1)
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn has_emitter(&self, id: EmitterId) -> bool {
        self.emitter(id).is_some()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Registered emitter ids in registration order
    pub fn emitter_ids(&self) -> impl Iterator<Item = EmitterId> + '_ {
        self.emitters.iter().map(|(id, _)| *id)
    }

    // ── Direct injection ──

    /// Inject one particle straight into the pool. It is aged from the
    /// next step on; the quality cap is enforced during that step.
    pub fn emit(&mut self, mut particle: Particle) {
        particle.sanitize();
        if !particle.is_alive() {
            log::trace!("[particles] ignored dead {} particle", particle.kind);
            return;
        }
        self.insert(particle);
    }

    /// One-shot burst: spawn `count` particles from `config`'s sampling rule at `origin`
    pub fn burst(&mut self, config: &EmitterConfig, origin: Vec2, count: usize) {
        let config = config.clone().sanitized();
        for _ in 0..count {
            let particle = config.spawn_particle(origin, &mut self.rng);
            self.insert(particle);
        }
    }

    fn insert(&mut self, mut particle: Particle) {
        particle.serial = self.next_serial;
        self.next_serial += 1;
        self.stats.spawned += 1;
        self.particles.push(particle);
    }

    // ── Frame step ──

    /// Advance the simulation by `dt` seconds and render to the attached surface.
    ///
    /// Order: emitters spawn, residents advance and the dead are removed,
    /// new particles are inserted and the quality cap is applied, then the
    /// surface is faded and survivors drawn oldest first.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.stats.frames += 1;

        let mut spawned = std::mem::take(&mut self.spawn_buffer);
        let mut exhausted = Vec::new();
        for (id, emitter) in &mut self.emitters {
            if emitter.step(dt, &mut self.rng, &mut spawned) == Emission::Exhausted {
                exhausted.push(*id);
            }
        }
        if !exhausted.is_empty() {
            self.emitters.retain(|(id, _)| !exhausted.contains(id));
            log::debug!("[particles] retired {} exhausted emitter(s)", exhausted.len());
        }

        let before = self.particles.len();
        let kinds = &self.kinds;
        self.particles
            .retain_mut(|p| p.step(dt, kinds.rule(p.kind)));
        self.stats.expired += (before - self.particles.len()) as u64;

        for particle in spawned.drain(..) {
            self.insert(particle);
        }
        self.spawn_buffer = spawned;
        self.enforce_cap();

        if let Some(surface) = self.surface.as_deref_mut() {
            draw_particles(&self.particles, &self.kinds, self.trail_fade, surface);
        }
    }

    /// Drop the lowest-life particles (oldest first on ties) until the
    /// pool fits the active tier's cap.
    fn enforce_cap(&mut self) {
        let cap = self.quality.max_particles();
        let len = self.particles.len();
        if len <= cap {
            return;
        }
        let excess = len - cap;

        let particles = &self.particles;
        let mut order: Vec<usize> = (0..len).collect();
        order.select_nth_unstable_by(excess - 1, |&a, &b| {
            let (pa, pb) = (&particles[a], &particles[b]);
            pa.life
                .total_cmp(&pb.life)
                .then(pa.serial.cmp(&pb.serial))
        });

        let mut doomed = vec![false; len];
        for &i in &order[..excess] {
            doomed[i] = true;
        }
        let mut index = 0;
        self.particles.retain(|_| {
            let keep = !doomed[index];
            index += 1;
            keep
        });

        self.stats.culled += excess as u64;
        log::trace!("[particles] culled {excess} particle(s) over cap {cap}");
    }

    /// Render current residents without stepping
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        draw_particles(&self.particles, &self.kinds, self.trail_fade, surface);
    }

    // ── Surface ──

    pub fn attach_surface(&mut self, surface: Box<dyn DrawSurface>) {
        self.surface = Some(surface);
    }

    pub fn detach_surface(&mut self) -> Option<Box<dyn DrawSurface>> {
        self.surface.take()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    // ── Quality and state ──

    /// Change the cap; applied from the next step on
    pub fn set_quality_tier(&mut self, tier: QualityTier) {
        if tier != self.quality {
            log::info!(
                "[particles] quality {} -> {} (cap {})",
                self.quality,
                tier,
                tier.max_particles()
            );
        }
        self.quality = tier;
    }

    pub fn quality_tier(&self) -> QualityTier {
        self.quality
    }

    /// Drop every particle and emitter (scene transition). Active composite
    /// effects re-register their members on their next update.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.emitters.clear();
        self.spawn_buffer.clear();
    }

    /// Resident particles in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn stats(&self) -> SystemStats {
        self.stats
    }

    pub fn kinds_mut(&mut self) -> &mut KindTable {
        &mut self.kinds
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeSystem for ParticleSystem {
    fn update(&mut self, dt: f64) -> Result<()> {
        self.step(dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

fn draw_particles(
    particles: &[Particle],
    kinds: &KindTable,
    fade: f32,
    surface: &mut dyn DrawSurface,
) {
    surface.fade(fade);
    for p in particles.iter().filter(|p| p.is_alive()) {
        (kinds.rule(p.kind).draw)(p, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ParticleKind;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn system_with_cap(cap: usize) -> ParticleSystem {
        let mut system = ParticleSystem::new();
        system.set_quality_tier(QualityTier::Custom(cap));
        system
    }

    fn disc(x: f32) -> Particle {
        Particle::new(ParticleKind::Disc, Vec2::new(x, 0.0), Vec2::ZERO).with_lifetime(10.0)
    }

    #[test]
    fn emitter_registration_lifecycle() {
        let mut system = ParticleSystem::new();
        let a = system.add_emitter(Emitter::new(EmitterConfig::default(), Vec2::ZERO));
        let b = system.add_emitter(Emitter::new(EmitterConfig::default(), Vec2::ZERO));
        assert_ne!(a, b);
        assert_eq!(system.emitter_ids().collect::<Vec<_>>(), vec![a, b]);

        assert!(system.remove_emitter(a).is_some());
        assert!(system.remove_emitter(a).is_none());
        assert!(!system.has_emitter(a));
        assert_eq!(system.emitter_count(), 1);
    }

    #[test]
    fn removed_emitter_stops_but_particles_survive() {
        let mut system = ParticleSystem::new();
        let config = EmitterConfig {
            emission_rate: 60.0,
            lifetime_min: 5.0,
            lifetime_max: 5.0,
            ..Default::default()
        };
        let id = system.add_emitter(Emitter::new(config, Vec2::ZERO));
        for _ in 0..10 {
            system.step(1.0 / 60.0);
        }
        let resident = system.particle_count();
        assert!(resident >= 9);

        system.remove_emitter(id);
        system.step(1.0 / 60.0);
        assert_eq!(system.particle_count(), resident);
    }

    #[test]
    fn new_particles_are_not_aged_in_their_first_frame() {
        let mut system = ParticleSystem::new();
        let config = EmitterConfig {
            emission_rate: 10.0,
            speed_min: 50.0,
            speed_max: 50.0,
            spread: 0.0,
            ..Default::default()
        };
        system.add_emitter(Emitter::new(config, Vec2::new(3.0, 4.0)));
        system.step(0.1);
        assert_eq!(system.particle_count(), 1);
        let p = &system.particles()[0];
        assert_eq!(p.life, 1.0);
        assert_eq!(p.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn exhausted_one_shot_emitters_are_retired() {
        let mut system = ParticleSystem::new();
        let config = EmitterConfig {
            continuous: false,
            burst_count: 1,
            batch_size: 12,
            ..Default::default()
        };
        system.add_emitter(Emitter::new(config, Vec2::ZERO));
        system.step(0.016);
        assert_eq!(system.emitter_count(), 0);
        assert_eq!(system.particle_count(), 12);
    }

    #[test]
    fn cull_prefers_lowest_life() {
        let mut system = system_with_cap(2);
        system.emit(disc(0.0));
        system.emit(disc(1.0).with_life(0.2));
        system.emit(disc(2.0));
        system.step(0.01);
        assert_eq!(system.particle_count(), 2);
        assert!(system.particles().iter().all(|p| p.life > 0.5));
        assert_eq!(system.stats().culled, 1);
    }

    #[test]
    fn cull_drops_oldest_on_equal_life() {
        let mut system = system_with_cap(3);
        for i in 0..5 {
            system.emit(disc(i as f32));
        }
        system.step(0.01);
        let xs: Vec<f32> = system.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn cap_change_applies_on_next_step() {
        let mut system = system_with_cap(100);
        for i in 0..40 {
            system.emit(disc(i as f32));
        }
        system.step(0.01);
        assert_eq!(system.particle_count(), 40);

        system.set_quality_tier(QualityTier::Custom(10));
        assert_eq!(system.particle_count(), 40);
        system.step(0.01);
        assert_eq!(system.particle_count(), 10);
    }

    #[test]
    fn render_skipped_without_surface_but_simulation_advances() {
        let mut system = ParticleSystem::new();
        system.emit(disc(0.0).with_lifetime(1.0));
        system.step(0.5);
        assert!(!system.has_surface());
        assert!((system.particles()[0].life - 0.5).abs() < 1e-5);

        let recorder = RecordingSurface::new();
        system.attach_surface(Box::new(recorder.clone()));
        system.step(0.1);
        let cmds = recorder.commands();
        assert!(matches!(cmds[0], DrawCommand::Fade { .. }));
        // Disc = glow + core
        assert_eq!(cmds.len(), 3);
    }

    #[test]
    fn render_order_is_insertion_order() {
        let mut system = ParticleSystem::new();
        system.emit(disc(1.0));
        system.emit(disc(2.0));
        let mut recorder = RecordingSurface::new();
        system.render(&mut recorder);
        let centers: Vec<f32> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { center, radius, .. } if *radius < 5.0 => Some(center.x),
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![1.0, 2.0]);
    }

    #[test]
    fn dead_particles_are_never_drawn() {
        let mut system = ParticleSystem::new();
        let recorder = RecordingSurface::new();
        system.attach_surface(Box::new(recorder.clone()));
        system.emit(disc(0.0).with_lifetime(0.1));
        system.step(0.2);
        assert_eq!(system.particle_count(), 0);
        assert_eq!(recorder.commands(), vec![DrawCommand::Fade { alpha: 0.3 }]);
    }

    #[test]
    fn emit_ignores_dead_particles() {
        let mut system = ParticleSystem::new();
        system.emit(disc(0.0).with_life(0.0));
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn clear_drops_everything() {
        let mut system = ParticleSystem::new();
        system.add_emitter(Emitter::new(EmitterConfig::default(), Vec2::ZERO));
        system.burst(&EmitterConfig::default(), Vec2::ZERO, 5);
        system.clear();
        assert_eq!(system.particle_count(), 0);
        assert_eq!(system.emitter_count(), 0);
    }

    #[test]
    fn runtime_system_update_steps() {
        let mut system = ParticleSystem::new();
        system.emit(disc(0.0).with_lifetime(1.0));
        RuntimeSystem::update(&mut system, 0.25).unwrap();
        assert_eq!(system.stats().frames, 1);
        assert!((system.particles()[0].life - 0.75).abs() < 1e-5);
        assert_eq!(system.name(), "particles");
    }
}
