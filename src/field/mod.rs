//! Particle backdrop
//!
//! Explicit-Euler drift with toroidal wrap, a gentle pointer pull, and
//! faint links between nearby pairs. Seeded RNG only.

pub mod draw;
pub mod particle;
pub mod state;

pub use draw::{CountingSink, DrawCommand, DrawSink, LINK_COLOR, Rgb};
pub use particle::{PALETTE, Particle, ParticleColor};
pub use state::{Bounds, Burst, BurstColor, FieldConfig, ParticleField};
