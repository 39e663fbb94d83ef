//! Fun and roast button effects
//!
//! Each button fires a particle burst from the viewport center and shows a
//! random line of text.

use rand::Rng;

use crate::field::{Bounds, Burst, BurstColor, ParticleColor};

/// How long the fun button shows its caption before reverting (ms)
pub const CAPTION_REVERT_MS: i32 = 1000;

pub const FUN_CAPTIONS: [&str; 4] = ["Woohoo!", "Awesome!", "Let's Go!", "Zach Rocks!"];

pub const ROAST_LINES: [&str; 9] = [
    "You're so short you need a ladder to pick up a dime.",
    "Can you hear me? Oh wait, you're deaf.",
    "Nice glasses, can you see the haters yet?",
    "Go touch grass! Oh wait, you don't know what that is.",
    "1v1 me in real life? You'd lag out.",
    "I'd explain it to you, but I don't have any crayons.",
    "You're the reason they put instructions on shampoo bottles.",
    "If you were any shorter, you'd be a pixel.",
    "Your aim is so bad you missed the floor when you fell.",
];

/// One step of the roast line reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    /// Delay after the click
    pub at_ms: i32,
    pub scale: f32,
    pub opacity: f32,
    /// The new line replaces the old one at this step
    pub show_line: bool,
}

impl RevealStep {
    /// Inline style for the text element
    pub fn style(&self) -> String {
        format!("transform: scale({}); opacity: {}", self.scale, self.opacity)
    }
}

/// Shrink out, pop in slightly oversized with the new line, settle
pub const ROAST_REVEAL: [RevealStep; 3] = [
    RevealStep {
        at_ms: 0,
        scale: 0.5,
        opacity: 0.0,
        show_line: false,
    },
    RevealStep {
        at_ms: 100,
        scale: 1.1,
        opacity: 1.0,
        show_line: true,
    },
    RevealStep {
        at_ms: 300,
        scale: 1.0,
        opacity: 1.0,
        show_line: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Fun,
    Roast,
}

impl Effect {
    /// Burst fired from the center of `bounds`
    pub fn burst(&self, bounds: Bounds) -> Burst {
        let origin = bounds.center();
        match self {
            Effect::Fun => Burst {
                origin,
                count: 20,
                speed: 7.5,
                size_min: 2.0,
                size_max: 6.0,
                color: BurstColor::Palette,
            },
            Effect::Roast => Burst {
                origin,
                count: 50,
                speed: 10.0,
                size_min: 2.0,
                size_max: 7.0,
                color: BurstColor::Pair(ParticleColor::Red, ParticleColor::Orange),
            },
        }
    }

    pub fn lines(&self) -> &'static [&'static str] {
        match self {
            Effect::Fun => &FUN_CAPTIONS,
            Effect::Roast => &ROAST_LINES,
        }
    }

    /// Uniformly random line for this effect
    pub fn pick_line<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        let lines = self.lines();
        lines[rng.random_range(0..lines.len())]
    }
}
