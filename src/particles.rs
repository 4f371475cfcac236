//! Particle System
//!
//! Fixed-size pool of single-pixel particles. Particles are seeded once by
//! [`ParticleSystem::init`] and go inert when their time-to-live runs out;
//! they are never respawned or removed.

use crate::math::Vec2;
use crate::raster::{Color, Image};
use crate::util::Rng;

/// Deceleration applied to both velocity components, per second
const ACCELERATION: f32 = 50.0;

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: f32,
    pub color: Color,
    pub ttl: f32,
    pub inactive: bool,
}

impl Particle {
    /// Random particle inside `[1, width] x [1, height]` with a 1-6s lifetime
    fn random(width: u32, height: u32, rng: &mut Rng) -> Self {
        let position = Vec2::new(
            rng.range_i32(1, width.max(1) as i32) as f32,
            rng.range_i32(1, height.max(1) as i32) as f32,
        );
        // [-0.5, 0.49] in hundredths
        let velocity = Vec2::new(
            rng.range_i32(0, 99) as f32 / 100.0 - 0.5,
            rng.range_i32(0, 99) as f32 / 100.0 - 0.5,
        );
        Self {
            position,
            velocity,
            acceleration: ACCELERATION,
            color: Color::WHITE,
            ttl: rng.range_i32(0, 499) as f32 / 100.0 + 1.0,
            inactive: false,
        }
    }
}

/// Particle pool manager
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// (Re)seed every slot with a fresh random particle over the canvas
    pub fn init(&mut self, width: u32, height: u32, rng: &mut Rng) {
        self.particles.clear();
        self.particles
            .extend((0..self.capacity).map(|_| Particle::random(width, height, rng)));
    }

    /// Advance every active particle by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            if p.inactive {
                continue;
            }

            p.position = p.position + p.velocity * dt;

            // Constant deceleration on both axes, not a directional force
            p.velocity.x -= p.acceleration * dt;
            p.velocity.y -= p.acceleration * dt;

            p.ttl -= dt;
            if p.ttl <= 0.0 {
                p.inactive = true;
            }
        }
    }

    /// Plot active particles as single pixels. Off-canvas ones are skipped
    /// but stay active.
    pub fn render(&self, buffer: &mut Image) {
        for p in &self.particles {
            if p.inactive {
                continue;
            }
            let (x, y) = p.position.to_pixel();
            if buffer.in_bounds(x, y) {
                buffer.set_pixel_safe(x, y, p.color);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.inactive).count()
    }
}
