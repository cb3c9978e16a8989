//! Value-over-lifetime interpolation and frame-rate independent decay

use glint_core::Color;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two RGBA colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    a.lerp(b, t)
}

/// Multiplier that retains `(1 - loss)` per second over `dt` seconds
pub fn retain(loss: f32, dt: f32) -> f32 {
    let keep = (1.0 - loss).clamp(0.0, 1.0);
    if keep >= 1.0 {
        1.0
    } else {
        keep.powf(dt)
    }
}
