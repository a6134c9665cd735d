//! Blood spray burst played where a cell was destroyed (not gameplay-affecting)

use glam::Vec3;
use rand::Rng;

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// Burst of particles with a fixed lifetime
#[derive(Debug, Clone)]
pub struct BloodSpray {
    pub particles: Vec<Particle>,
    /// Seconds since the burst
    pub age: f32,
    pub duration: f32,
}

/// Per-frame displacement factor
const SPRAY_STEP: f32 = 0.02;
/// Per-frame velocity damping
const SPRAY_DAMPING: f32 = 0.95;
/// Spread of the initial positions around the impact point
const SPRAY_JITTER: f32 = 1.0;
/// Spread of the initial velocity components
const SPRAY_SPEED: f32 = 10.0;

impl BloodSpray {
    pub fn new(origin: Vec3, count: usize, duration: f32, rng: &mut impl Rng) -> Self {
        let mut spread = |scale: f32| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * scale,
                (rng.random::<f32>() - 0.5) * scale,
                (rng.random::<f32>() - 0.5) * scale,
            )
        };
        let particles = (0..count)
            .map(|_| Particle {
                pos: origin + spread(SPRAY_JITTER),
                vel: spread(SPRAY_SPEED),
            })
            .collect();
        Self {
            particles,
            age: 0.0,
            duration,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.age >= self.duration
    }

    /// Advance one frame; returns false once the burst has expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.is_finished() {
            return false;
        }
        for p in &mut self.particles {
            p.pos += p.vel * SPRAY_STEP;
            p.vel *= SPRAY_DAMPING;
        }
        true
    }
}
