//! Glint Core - Foundational types for the Glint effects engine
//!
//! This crate provides the core types that all other Glint crates depend on:
//! - `EmitterId` - Handles for emitters registered with a particle system
//! - `Color` - RGBA color with clamping and blending helpers
//! - `Vec2` - 2D vector (re-exported from `glam`)
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{GlintError, Result};
pub use glam::Vec2;
pub use id::EmitterId;
pub use types::{wrap_angle, Color};
