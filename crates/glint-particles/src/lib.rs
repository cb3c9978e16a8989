//! Glint Particles - CPU-driven 2D particle and screen-effect simulation
//!
//! Provides a single owning frame loop for visual effects:
//! - `Particle` - plain data tagged with a `ParticleKind`; behavior lives in a `KindTable`
//! - `Emitter` - rate-accurate continuous or one-shot particle generation in a cone
//! - `ParticleSystem` - pool + emitter set, quality-tier cap with cull-lowest-life, rendering
//! - `CompositeEffect` - emitter bundles (boost trail, exhaust plume) driven by one signal
//! - `ScreenEffects` - camera shake and full-screen flash
//! - `EffectLibrary` / `ParticleSettings` - TOML-driven configuration

pub mod curves;
pub mod effects;
pub mod emitter;
pub mod kind;
pub mod library;
pub mod particle;
pub mod quality;
pub mod rand;
pub mod screen;
pub mod settings;
pub mod surface;
pub mod system;

pub use effects::{boost_trail, exhaust_plume, Composite, CompositeEffect, MemberSpec};
pub use emitter::{Emission, Emitter, EmitterConfig};
pub use kind::{KindRule, KindTable, ParticleKind};
pub use library::EffectLibrary;
pub use particle::Particle;
pub use quality::QualityTier;
pub use rand::ParticleRng;
pub use screen::{CameraShake, ScreenEffects, ScreenFlash};
pub use settings::ParticleSettings;
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
pub use system::{ParticleSystem, SystemStats};
