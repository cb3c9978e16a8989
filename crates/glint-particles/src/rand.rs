//! Lightweight xorshift32 PRNG for spawn sampling

use glam::Vec2;
use std::f32::consts::TAU;

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 random bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max); `min` when the range is empty
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Returns a float in [-amount, amount)
    pub fn jitter(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        self.range(-amount, amount)
    }

    /// Returns an angle inside the cone `direction ± spread / 2`
    pub fn cone_angle(&mut self, direction: f32, spread: f32) -> f32 {
        if spread <= 0.0 {
            return direction;
        }
        direction + self.range(-spread * 0.5, spread * 0.5)
    }

    /// Returns a random unit vector
    pub fn unit_vector(&mut self) -> Vec2 {
        Vec2::from_angle(self.range(0.0, TAU))
    }

    /// Returns a point uniformly distributed inside a disc of `radius`
    pub fn point_in_disc(&mut self, radius: f32) -> Vec2 {
        if radius <= 0.0 {
            return Vec2::ZERO;
        }
        // sqrt keeps the area density uniform
        self.unit_vector() * (radius * self.next_f32().sqrt())
    }
}
