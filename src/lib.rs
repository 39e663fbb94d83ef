//! Parlor - A browser novelty page
//!
//! Core modules:
//! - `field`: Particle backdrop (kinematics, wrap, proximity links)
//! - `blackjack`: Single-deck blackjack round engine
//! - `calculator`: Four-function chained calculator
//! - `effects`: Fun/roast button bursts and captions
//! - `panel`: Active panel navigation
//! - `clock`: Date/time display formatting
//! - `settings`: Persisted preferences

pub mod blackjack;
pub mod calculator;
pub mod clock;
pub mod effects;
pub mod field;
pub mod panel;
pub mod settings;

pub use blackjack::{ActionError, BlackjackEngine, RoundPhase, TableView};
pub use calculator::Calculator;
pub use field::{Bounds, DrawCommand, DrawSink, FieldConfig, ParticleField};
pub use panel::{Navigator, Panel};
pub use settings::{QualityPreset, Settings};

use rand::Rng;

/// Page configuration constants
pub mod consts {
    /// Particles created at page load
    pub const PARTICLE_COUNT: usize = 100;
    /// Initial velocity component range (±)
    pub const PARTICLE_DRIFT: f32 = 0.5;
    /// Initial particle radius range
    pub const PARTICLE_SIZE_MIN: f32 = 1.0;
    pub const PARTICLE_SIZE_MAX: f32 = 3.0;
    /// Particle opacity range
    pub const PARTICLE_ALPHA_MIN: f32 = 0.1;
    pub const PARTICLE_ALPHA_MAX: f32 = 0.6;

    /// Pointer attraction radius (pixels)
    pub const POINTER_RADIUS: f32 = 200.0;
    /// Fraction of the particle→pointer vector added to velocity per tick
    pub const POINTER_PULL: f32 = 0.0001;

    /// Particles closer than this get a connecting line
    pub const LINK_DISTANCE: f32 = 150.0;
    /// Line alpha at zero distance
    pub const LINK_ALPHA: f32 = 0.1;
    /// Distance over which line alpha falls by 1.0
    pub const LINK_FADE: f32 = 1500.0;
    pub const LINK_WIDTH: f32 = 1.0;

    /// Blackjack table defaults
    pub const STARTING_BALANCE: u64 = 1000;
    pub const BLACKJACK: u32 = 21;
    /// Dealer draws while below this total
    pub const DEALER_STAND: u32 = 17;
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Wrap a coordinate to the opposite edge when it leaves `[0, extent]`
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}
