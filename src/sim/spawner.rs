//! Fixed-interval blood cell spawning
//!
//! The spawn timer runs on simulation time. Each elapsed interval rolls a
//! [`SpawnRequest`] into a queue; the tick drains the queue once per frame,
//! loading a model for each request. Nothing here touches the live entity
//! collection directly.

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::entity::EntityKind;
use crate::polar_to_planar;
use crate::tuning::Tuning;

/// A rolled but not yet materialized cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub pos: Vec3,
    pub rotation_z: f32,
    pub kind: EntityKind,
}

/// Spawn point on the tube cross-section at the given depth
#[inline]
pub fn spawn_position(radius: f32, angle: f32, depth: f32) -> Vec3 {
    polar_to_planar(radius, angle).extend(depth)
}

/// Roll position, orientation and behavior of a fresh cell
pub fn roll_spawn(rng: &mut impl Rng, level_speed: f32, tuning: &Tuning) -> SpawnRequest {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let radius = tuning.spawn_min_radius
        + rng.random::<f32>() * (tuning.spawn_max_radius - tuning.spawn_min_radius);
    let rotation_z = rng.random::<f32>() * std::f32::consts::PI;

    let linear = rng.random_bool(tuning.linear_probability);
    let velocity = if linear {
        Vec2::ZERO
    } else {
        Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * level_speed,
            (rng.random::<f32>() * 2.0 - 1.0) * level_speed,
        )
    };
    let seeking = rng.random_bool(tuning.seeking_probability);

    let kind = if seeking {
        EntityKind::Seeking
    } else if linear {
        EntityKind::Linear
    } else {
        EntityKind::Oscillating { velocity }
    };

    SpawnRequest {
        pos: spawn_position(radius, angle, tuning.spawn_depth),
        rotation_z,
        kind,
    }
}

/// Spawn timer plus the request buffer it feeds
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: f32,
    elapsed: f32,
    running: bool,
    queue: VecDeque<SpawnRequest>,
}

impl Spawner {
    /// A stopped spawner; call [`Spawner::start`] once the scene is ready
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            running: false,
            queue: VecDeque::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arm the timer. A running timer keeps its progress.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed = 0.0;
        }
    }

    /// Clear the timer. Queued requests are kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    /// Advance the timer, enqueuing one request per elapsed interval.
    ///
    /// Returns the number of requests enqueued.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng, level_speed: f32, tuning: &Tuning) -> usize {
        if !self.running {
            return 0;
        }
        self.elapsed += dt;
        let mut enqueued = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.queue.push_back(roll_spawn(rng, level_speed, tuning));
            enqueued += 1;
        }
        enqueued
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Take every queued request in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = SpawnRequest> + '_ {
        self.queue.drain(..)
    }

    /// Drop queued requests without materializing them
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
