//! Composite and preset effects built on top of the particle system

mod boost;
mod composite;
mod exhaust;
pub mod presets;

pub use boost::{boost_trail, ENERGY_CORE, GLOW, SPEED_LINES};
pub use composite::{clamp_intensity, Composite, CompositeEffect, MemberSpec};
pub use exhaust::{exhaust_plume, SMOKE, SPARKS};
