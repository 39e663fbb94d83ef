//! Particle field state: population, per-frame tick, bursts, resize

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::draw::{DrawCommand, DrawSink, LINK_COLOR};
use super::particle::{Particle, ParticleColor};
use crate::consts::*;
use crate::uniform;

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Tunables for the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Pointer attraction radius
    pub pointer_radius: f32,
    /// Fraction of the particle→pointer vector added per tick
    pub pointer_pull: f32,
    /// Pairs closer than this are linked
    pub link_distance: f32,
    pub link_alpha: f32,
    pub link_fade: f32,
    pub link_width: f32,
    /// Live population cap; oldest particles are evicted first
    pub max_particles: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pointer_radius: POINTER_RADIUS,
            pointer_pull: POINTER_PULL,
            link_distance: LINK_DISTANCE,
            link_alpha: LINK_ALPHA,
            link_fade: LINK_FADE,
            link_width: LINK_WIDTH,
            max_particles: 1000,
        }
    }
}

/// How burst particles are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstColor {
    /// Default backdrop palette
    Palette,
    /// Every particle the same color
    Fixed(ParticleColor),
    /// Coin flip per particle
    Pair(ParticleColor, ParticleColor),
}

/// One-shot injection of particles from a single point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub origin: Vec2,
    pub count: usize,
    /// Velocity components are uniform in ±speed
    pub speed: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub color: BurstColor,
}

/// The animated particle backdrop
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    /// Last pointer sample seen by `tick`
    pointer: Option<Vec2>,
    config: FieldConfig,
    rng: Pcg32,
}

impl ParticleField {
    /// Create an empty field
    pub fn new(bounds: Bounds, config: FieldConfig, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            bounds,
            pointer: None,
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replace the population with `count` random particles inside `bounds`
    pub fn initialize(&mut self, count: usize, bounds: Bounds) {
        self.bounds = bounds;
        self.particles.clear();
        let count = count.min(self.config.max_particles);
        self.particles.reserve(count);
        for _ in 0..count {
            let p = Particle::random(&mut self.rng, bounds.width, bounds.height);
            self.particles.push(p);
        }
        log::debug!(
            "Field initialized: {} particles in {}x{}",
            count,
            bounds.width,
            bounds.height
        );
    }

    /// Advance every particle one step and emit draw commands.
    ///
    /// Two passes: all particles are moved and drawn first, then links are
    /// drawn for every unordered pair closer than `link_distance`.
    pub fn tick<S: DrawSink + ?Sized>(&mut self, pointer: Option<Vec2>, sink: &mut S) {
        self.pointer = pointer;
        let Bounds { width, height } = self.bounds;

        for p in self.particles.iter_mut() {
            p.integrate(width, height);
            if let Some(target) = pointer {
                p.attract(target, self.config.pointer_radius, self.config.pointer_pull);
            }
            sink.draw(DrawCommand::Circle {
                center: p.pos,
                radius: p.size,
                color: p.color.rgb(),
                alpha: p.alpha,
            });
        }

        let max_dist_sq = self.config.link_distance * self.config.link_distance;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist_sq = a.pos.distance_squared(b.pos);
                if dist_sq >= max_dist_sq {
                    continue;
                }
                let alpha = self.link_alpha(dist_sq.sqrt());
                sink.draw(DrawCommand::Line {
                    from: a.pos,
                    to: b.pos,
                    color: LINK_COLOR,
                    alpha,
                    width: self.config.link_width,
                });
            }
        }
    }

    /// Line alpha for a pair at `distance`, never negative
    pub fn link_alpha(&self, distance: f32) -> f32 {
        (self.config.link_alpha - distance / self.config.link_fade).max(0.0)
    }

    /// Append burst particles, then evict the oldest beyond the cap.
    /// Returns the number evicted.
    pub fn inject_burst(&mut self, burst: &Burst) -> usize {
        self.particles.reserve(burst.count);
        for _ in 0..burst.count {
            let mut p = Particle::random(&mut self.rng, self.bounds.width, self.bounds.height);
            p.pos = burst.origin;
            p.vel = Vec2::new(
                uniform(&mut self.rng, -burst.speed, burst.speed),
                uniform(&mut self.rng, -burst.speed, burst.speed),
            );
            p.size = uniform(&mut self.rng, burst.size_min, burst.size_max);
            p.color = match burst.color {
                BurstColor::Palette => p.color,
                BurstColor::Fixed(color) => color,
                BurstColor::Pair(a, b) => ParticleColor::pick(&mut self.rng, a, b),
            };
            self.particles.push(p);
        }
        log::debug!(
            "Burst of {} at ({:.0}, {:.0}), population {}",
            burst.count,
            burst.origin.x,
            burst.origin.y,
            self.particles.len()
        );
        self.enforce_cap()
    }

    fn enforce_cap(&mut self) -> usize {
        let excess = self.particles.len().saturating_sub(self.config.max_particles);
        if excess > 0 {
            self.particles.drain(..excess);
            log::warn!(
                "Particle cap {} reached, evicted {} oldest",
                self.config.max_particles,
                excess
            );
        }
        excess
    }

    /// Update bounds only. Particles outside the new bounds wrap on the next tick.
    pub fn on_resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::draw::CountingSink;
    use proptest::prelude::*;

    fn field() -> ParticleField {
        ParticleField::new(Bounds::new(800.0, 600.0), FieldConfig::default(), 12345)
    }

    fn at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size: 2.0,
            color: ParticleColor::Sky,
            alpha: 0.4,
        }
    }

    #[test]
    fn test_initialize_population() {
        let mut f = field();
        f.initialize(100, Bounds::new(1024.0, 768.0));
        assert_eq!(f.len(), 100);
        assert_eq!(f.bounds(), Bounds::new(1024.0, 768.0));
        for p in f.particles() {
            assert!(p.pos.x <= 1024.0 && p.pos.y <= 768.0);
        }
    }

    #[test]
    fn test_wrap_on_crossing_tick() {
        let mut f = field();
        f.particles_mut().push(at(800.0, 300.0, 1.0, 0.0));
        f.particles_mut().push(at(0.0, 300.0, -1.0, 0.0));
        let mut sink = Vec::new();
        f.tick(None, &mut sink);
        assert_eq!(f.particles()[0].pos.x, 0.0);
        assert_eq!(f.particles()[1].pos.x, 800.0);
    }

    #[test]
    fn test_circles_before_lines() {
        let mut f = field();
        f.particles_mut().push(at(100.0, 100.0, 0.0, 0.0));
        f.particles_mut().push(at(150.0, 100.0, 0.0, 0.0));
        f.particles_mut().push(at(700.0, 500.0, 0.0, 0.0));
        let mut sink = Vec::new();
        f.tick(None, &mut sink);

        assert_eq!(sink.len(), 4);
        assert!(sink[..3].iter().all(|c| matches!(c, DrawCommand::Circle { .. })));
        match sink[3] {
            DrawCommand::Line { alpha, width, color, .. } => {
                // 0.1 - 50/1500
                assert!((alpha - (0.1 - 50.0 / 1500.0)).abs() < 1e-6);
                assert_eq!(width, 1.0);
                assert_eq!(color, LINK_COLOR);
            }
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_link_alpha_clamped() {
        let f = field();
        assert!((f.link_alpha(0.0) - 0.1).abs() < 1e-6);
        assert!(f.link_alpha(149.99) >= 0.0);
        assert_eq!(f.link_alpha(1000.0), 0.0);
    }

    #[test]
    fn test_pointer_nudge_is_unbounded() {
        let mut f = field();
        f.particles_mut().push(at(100.0, 100.0, 0.0, 0.0));
        let pointer = Some(Vec2::new(150.0, 100.0));
        let mut sink = CountingSink::default();
        for _ in 0..10 {
            f.tick(pointer, &mut sink);
        }
        // Velocity keeps accumulating while in range
        assert!(f.particles()[0].vel.x > 0.0);
        assert_eq!(f.pointer(), pointer);

        // No pointer, no nudge
        let vel = f.particles()[0].vel;
        f.tick(None, &mut sink);
        assert_eq!(f.particles()[0].vel, vel);
        assert_eq!(f.pointer(), None);
    }

    #[test]
    fn test_burst_appends_at_origin() {
        let mut f = field();
        f.initialize(10, Bounds::new(800.0, 600.0));
        let burst = Burst {
            origin: Vec2::new(400.0, 300.0),
            count: 50,
            speed: 10.0,
            size_min: 2.0,
            size_max: 7.0,
            color: BurstColor::Pair(ParticleColor::Red, ParticleColor::Orange),
        };
        assert_eq!(f.inject_burst(&burst), 0);
        assert_eq!(f.len(), 60);
        for p in &f.particles()[10..] {
            assert_eq!(p.pos, Vec2::new(400.0, 300.0));
            assert!(p.vel.x.abs() <= 10.0 && p.vel.y.abs() <= 10.0);
            assert!((2.0..=7.0).contains(&p.size));
            assert!(matches!(p.color, ParticleColor::Red | ParticleColor::Orange));
        }
    }

    #[test]
    fn test_burst_fixed_color() {
        let mut f = field();
        let burst = Burst {
            origin: Vec2::ZERO,
            count: 5,
            speed: 1.0,
            size_min: 1.0,
            size_max: 2.0,
            color: BurstColor::Fixed(ParticleColor::Orange),
        };
        f.inject_burst(&burst);
        assert!(f.particles().iter().all(|p| p.color == ParticleColor::Orange));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let config = FieldConfig {
            max_particles: 30,
            ..Default::default()
        };
        let mut f = ParticleField::new(Bounds::new(800.0, 600.0), config, 1);
        f.initialize(20, Bounds::new(800.0, 600.0));
        let eleventh = f.particles()[10].pos;
        let burst = Burst {
            origin: Vec2::new(1.0, 1.0),
            count: 20,
            speed: 1.0,
            size_min: 1.0,
            size_max: 2.0,
            color: BurstColor::Palette,
        };
        assert_eq!(f.inject_burst(&burst), 10);
        assert_eq!(f.len(), 30);
        // Oldest ten gone, survivors keep their order
        assert_eq!(f.particles()[0].pos, eleventh);
        assert_eq!(f.particles()[29].pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_zero_cap_disables_field() {
        let config = FieldConfig {
            max_particles: 0,
            ..Default::default()
        };
        let mut f = ParticleField::new(Bounds::new(800.0, 600.0), config, 1);
        f.initialize(100, Bounds::new(800.0, 600.0));
        assert!(f.is_empty());
        let mut sink = CountingSink::default();
        f.tick(None, &mut sink);
        assert_eq!(sink.circles, 0);
    }

    #[test]
    fn test_resize_does_not_reposition() {
        let mut f = field();
        f.particles_mut().push(at(700.0, 500.0, 0.0, 0.0));
        f.on_resize(Bounds::new(400.0, 300.0));
        assert_eq!(f.particles()[0].pos, Vec2::new(700.0, 500.0));

        // Next tick wraps it back into view
        let mut sink = CountingSink::default();
        f.tick(None, &mut sink);
        assert_eq!(f.particles()[0].pos, Vec2::new(0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_tick_keeps_particles_in_bounds(
            x in 0.0f32..800.0,
            y in 0.0f32..600.0,
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
        ) {
            let mut f = field();
            f.particles_mut().push(at(x, y, vx, vy));
            let mut sink = CountingSink::default();
            f.tick(None, &mut sink);
            let p = &f.particles()[0];
            prop_assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
        }
    }
}
