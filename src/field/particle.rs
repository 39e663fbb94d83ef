//! Particle entity and color palette

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::uniform;

/// Colors a particle can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// `#0ea5e9`
    Sky,
    /// `#d946ef`
    Fuchsia,
    /// `#ef4444`
    Red,
    /// `#f97316`
    Orange,
}

/// Default two-color backdrop palette
pub const PALETTE: [ParticleColor; 2] = [ParticleColor::Sky, ParticleColor::Fuchsia];

impl ParticleColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ParticleColor::Sky => [0x0e, 0xa5, 0xe9],
            ParticleColor::Fuchsia => [0xd9, 0x46, 0xef],
            ParticleColor::Red => [0xef, 0x44, 0x44],
            ParticleColor::Orange => [0xf9, 0x73, 0x16],
        }
    }

    /// Coin flip between two colors
    pub fn pick<R: Rng + ?Sized>(rng: &mut R, a: ParticleColor, b: ParticleColor) -> Self {
        if rng.random_bool(0.5) { a } else { b }
    }
}

/// A single backdrop particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius, fixed at creation
    pub size: f32,
    pub color: ParticleColor,
    /// Opacity in [0, 1], fixed at creation
    pub alpha: f32,
}

impl Particle {
    /// Random drifting particle somewhere inside `width` x `height`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(uniform(rng, 0.0, width), uniform(rng, 0.0, height)),
            vel: Vec2::new(
                uniform(rng, -PARTICLE_DRIFT, PARTICLE_DRIFT),
                uniform(rng, -PARTICLE_DRIFT, PARTICLE_DRIFT),
            ),
            size: uniform(rng, PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX),
            color: ParticleColor::pick(rng, PALETTE[0], PALETTE[1]),
            alpha: uniform(rng, PARTICLE_ALPHA_MIN, PARTICLE_ALPHA_MAX),
        }
    }

    /// Advance one step and wrap to the opposite edge on each axis
    pub fn integrate(&mut self, width: f32, height: f32) {
        self.pos += self.vel;
        self.pos.x = crate::wrap_coord(self.pos.x, width);
        self.pos.y = crate::wrap_coord(self.pos.y, height);
    }

    /// Nudge velocity toward `target` if within `radius`. Never damped.
    pub fn attract(&mut self, target: Vec2, radius: f32, pull: f32) {
        let delta = target - self.pos;
        if delta.length() < radius {
            self.vel += delta * pull;
        }
    }
}
