//! Composite effects: fixed emitter bundles driven by one external signal

use crate::emitter::{Emitter, EmitterConfig};
use crate::system::ParticleSystem;
use glam::Vec2;
use glint_core::{wrap_angle, EmitterId};

/// Velocity magnitude below which the previous heading is kept
const HEADING_EPSILON: f32 = 1e-3;

/// A bundle of emitters that move and rescale together.
///
/// The host calls `update` every frame with the driving object's position,
/// velocity and intensity, before stepping the particle system.
pub trait CompositeEffect {
    /// Register the member emitters. Restarts cleanly if already active.
    fn start(&mut self, system: &mut ParticleSystem, origin: Vec2, velocity: Vec2, intensity: f32);

    /// Reposition and rescale members; no-op while inactive.
    /// Members dropped from the system behind the effect's back are re-registered.
    fn update(&mut self, system: &mut ParticleSystem, origin: Vec2, velocity: Vec2, intensity: f32);

    /// Unregister every member. In-flight particles are left to age out.
    fn stop(&mut self, system: &mut ParticleSystem);

    fn is_active(&self) -> bool;

    /// Ids of the registered members, empty while inactive
    fn emitters(&self) -> &[EmitterId];
}

/// How one member emitter responds to the driving signal
#[derive(Debug, Clone)]
pub struct MemberSpec {
    pub name: &'static str,
    /// Template; `origin`, `direction`, rate, speed and size are overwritten each update
    pub config: EmitterConfig,
    /// Emission rate at intensity 1.0
    pub rate: f32,
    /// Spawn speed is `speed_base + speed_factor * |velocity|`
    pub speed_base: f32,
    pub speed_factor: f32,
    /// Relative spread of spawn speed around that value
    pub speed_jitter: f32,
    /// Added to the velocity heading (PI = emit backwards)
    pub direction_offset: f32,
    /// Scale spawn size between 50% and 100% with intensity
    pub size_follows_intensity: bool,
}

impl MemberSpec {
    /// Push the driving signal into `emitter`'s parameters
    fn apply(&self, emitter: &mut Emitter, origin: Vec2, heading: f32, speed: f32, intensity: f32) {
        emitter.set_origin(origin);
        emitter.set_direction(wrap_angle(heading + self.direction_offset));
        emitter.set_emission_rate(self.rate * intensity);

        let spawn_speed = self.speed_base + self.speed_factor * speed;
        let jitter = self.speed_jitter.clamp(0.0, 1.0);
        emitter.set_speed_range(spawn_speed * (1.0 - jitter), spawn_speed * (1.0 + jitter));

        if self.size_follows_intensity {
            let scale = 0.5 + 0.5 * intensity;
            emitter.set_size_range(self.config.size_min * scale, self.config.size_max * scale);
        }
    }
}

/// Clamp an intensity input into [0, 1]; NaN counts as zero
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Generic composite: a named, fixed list of member specs
#[derive(Debug, Clone)]
pub struct Composite {
    name: &'static str,
    members: Vec<MemberSpec>,
    ids: Vec<EmitterId>,
    heading: f32,
    active: bool,
}

impl Composite {
    pub fn new(name: &'static str, members: Vec<MemberSpec>) -> Self {
        Self {
            name,
            members,
            ids: Vec::new(),
            heading: 0.0,
            active: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &[MemberSpec] {
        &self.members
    }

    /// Current heading in radians (direction of the driving velocity)
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Id of the member with the given name, while active
    pub fn member_id(&self, name: &str) -> Option<EmitterId> {
        let index = self.members.iter().position(|m| m.name == name)?;
        self.ids.get(index).copied()
    }

    fn track_heading(&mut self, velocity: Vec2) -> f32 {
        let speed = velocity.length();
        if speed.is_finite() && speed > HEADING_EPSILON {
            self.heading = velocity.y.atan2(velocity.x);
            speed
        } else {
            0.0
        }
    }
}

impl CompositeEffect for Composite {
    fn start(&mut self, system: &mut ParticleSystem, origin: Vec2, velocity: Vec2, intensity: f32) {
        if self.active {
            self.stop(system);
        }
        let intensity = clamp_intensity(intensity);
        let speed = self.track_heading(velocity);

        for spec in &self.members {
            let mut emitter = Emitter::new(spec.config.clone(), origin);
            spec.apply(&mut emitter, origin, self.heading, speed, intensity);
            self.ids.push(system.add_emitter(emitter));
        }
        self.active = true;
        log::debug!(
            "[effects] {} started with {} emitter(s)",
            self.name,
            self.ids.len()
        );
    }

    fn update(&mut self, system: &mut ParticleSystem, origin: Vec2, velocity: Vec2, intensity: f32) {
        if !self.active {
            return;
        }
        let intensity = clamp_intensity(intensity);
        let speed = self.track_heading(velocity);

        for (spec, id) in self.members.iter().zip(self.ids.iter_mut()) {
            match system.emitter_mut(*id) {
                Some(emitter) => spec.apply(emitter, origin, self.heading, speed, intensity),
                None => {
                    let mut emitter = Emitter::new(spec.config.clone(), origin);
                    spec.apply(&mut emitter, origin, self.heading, speed, intensity);
                    *id = system.add_emitter(emitter);
                    log::debug!(
                        "[effects] {} re-registered member '{}' as {}",
                        self.name,
                        spec.name,
                        id
                    );
                }
            }
        }
    }

    fn stop(&mut self, system: &mut ParticleSystem) {
        if !self.active {
            return;
        }
        for id in self.ids.drain(..) {
            system.remove_emitter(id);
        }
        self.active = false;
        log::debug!("[effects] {} stopped", self.name);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn emitters(&self) -> &[EmitterId] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ParticleKind;
    use std::f32::consts::PI;

    fn pair() -> Composite {
        let spec = |name, kind| MemberSpec {
            name,
            config: EmitterConfig {
                kind,
                size_min: 4.0,
                size_max: 8.0,
                ..Default::default()
            },
            rate: 20.0,
            speed_base: 10.0,
            speed_factor: 0.5,
            speed_jitter: 0.0,
            direction_offset: PI,
            size_follows_intensity: true,
        };
        Composite::new(
            "pair",
            vec![spec("a", ParticleKind::Disc), spec("b", ParticleKind::Line)],
        )
    }

    #[test]
    fn clamp_intensity_bounds() {
        assert_eq!(clamp_intensity(-1.0), 0.0);
        assert_eq!(clamp_intensity(3.0), 1.0);
        assert_eq!(clamp_intensity(f32::NAN), 0.0);
        assert_eq!(clamp_intensity(0.25), 0.25);
    }

    #[test]
    fn start_maps_signal_into_members() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::new(5.0, 6.0), Vec2::new(100.0, 0.0), 0.5);

        assert!(fx.is_active());
        assert_eq!(system.emitter_count(), 2);
        let emitter = system.emitter(fx.member_id("a").unwrap()).unwrap();
        assert_eq!(emitter.origin, Vec2::new(5.0, 6.0));
        assert!((emitter.config().emission_rate - 10.0).abs() < 1e-5);
        assert!((emitter.config().speed_min - 60.0).abs() < 1e-4);
        assert!((emitter.config().size_max - 6.0).abs() < 1e-4);
        assert!((emitter.config().direction.abs() - PI).abs() < 1e-5);
    }

    #[test]
    fn restart_does_not_orphan_emitters() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::ZERO, Vec2::X, 1.0);
        let first: Vec<_> = fx.emitters().to_vec();
        fx.start(&mut system, Vec2::ZERO, Vec2::X, 1.0);
        assert_eq!(system.emitter_count(), 2);
        assert!(first.iter().all(|id| !system.has_emitter(*id)));
    }

    #[test]
    fn update_is_noop_while_inactive() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.update(&mut system, Vec2::ZERO, Vec2::X, 1.0);
        assert!(!fx.is_active());
        assert_eq!(system.emitter_count(), 0);
    }

    #[test]
    fn zero_velocity_keeps_last_heading() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::ZERO, Vec2::new(0.0, 50.0), 1.0);
        fx.update(&mut system, Vec2::ZERO, Vec2::ZERO, 1.0);
        assert!((fx.heading() - PI / 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_intensity_silences_emission() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::ZERO, Vec2::X * 10.0, 0.0);
        for _ in 0..30 {
            system.step(1.0 / 30.0);
        }
        assert_eq!(system.particle_count(), 0);
    }

    #[test]
    fn update_restores_members_after_system_clear() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::ZERO, Vec2::X * 10.0, 1.0);
        let before: Vec<_> = fx.emitters().to_vec();

        system.clear();
        assert_eq!(system.emitter_count(), 0);

        fx.update(&mut system, Vec2::new(3.0, 4.0), Vec2::X * 10.0, 1.0);
        assert!(fx.is_active());
        assert_eq!(system.emitter_count(), 2);
        assert!(fx.emitters().iter().all(|id| system.has_emitter(*id)));
        assert!(fx.emitters().iter().all(|id| !before.contains(id)));
        let emitter = system.emitter(fx.member_id("b").unwrap()).unwrap();
        assert_eq!(emitter.origin, Vec2::new(3.0, 4.0));

        for _ in 0..10 {
            system.step(0.05);
        }
        assert!(system.particle_count() > 0);

        fx.stop(&mut system);
        assert_eq!(system.emitter_count(), 0);
    }

    #[test]
    fn stop_keeps_in_flight_particles() {
        let mut system = ParticleSystem::new();
        let mut fx = pair();
        fx.start(&mut system, Vec2::ZERO, Vec2::X * 10.0, 1.0);
        for _ in 0..10 {
            system.step(0.05);
        }
        let resident = system.particle_count();
        assert!(resident > 0);

        fx.stop(&mut system);
        fx.stop(&mut system);
        assert!(fx.emitters().is_empty());
        assert_eq!(system.emitter_count(), 0);
        assert_eq!(system.particle_count(), resident);
    }
}
