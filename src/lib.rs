//! Pathogen Surge - A tube-runner arcade game
//!
//! Core modules:
//! - `sim`: Per-frame obstacle simulation (spawn, motion, collisions, particles)
//! - `scene`: Scene trait, scene manager and the concrete scenes
//! - `platform`: Host collaborators (renderer, asset loader, audio backend)
//! - `audio`: Sound cue gating on top of an audio backend
//! - `tuning`: Data-driven game balance and per-level parameters

pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{AssetError, ConfigError, SceneError};
pub use scene::{SceneManager, SceneParams};
pub use settings::Settings;
pub use tuning::{BodyPart, LevelParams, LevelTable, Tuning};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration (the simulation advances per frame, not per second)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Simulation time between two blood cell spawns (seconds)
    pub const SPAWN_INTERVAL: f32 = 0.5;
    /// Spawn ring bounds (distance from the tube axis)
    pub const SPAWN_MIN_RADIUS: f32 = 1.0;
    pub const SPAWN_MAX_RADIUS: f32 = 6.0;
    /// Depth of the spawn point, far end of the tube
    pub const SPAWN_DEPTH: f32 = -50.0;

    /// Oscillating cells bounce back past this radius
    pub const CELL_MAX_RADIUS: f32 = 7.0;
    /// Cells are retired once they pass this depth
    pub const RETIRE_DEPTH: f32 = 50.0;
    /// Planar speed of cells chasing the player
    pub const FOLLOW_SPEED: f32 = 0.05;
    /// Upper bound of the cosmetic per-frame rotation increment
    pub const ROTATION_JITTER: f32 = 0.02;
    /// Uniform scale applied to blood cell models
    pub const CELL_SCALE: f32 = 0.8;

    /// Chance a fresh cell has no lateral velocity
    pub const LINEAR_PROBABILITY: f64 = 0.7;
    /// Chance a fresh cell chases the player (independent of the above)
    pub const SEEKING_PROBABILITY: f64 = 0.1;

    /// Player is clamped to this radius
    pub const PLAYER_MAX_RADIUS: f32 = 6.5;
    /// Uniform scale applied to the player model
    pub const PLAYER_SCALE: f32 = 0.5;
    /// AR mode: the player is drawn at real-world size
    pub const AR_PLAYER_SCALE: f32 = 0.05;
    /// AR mode: player floats this far in front of the camera
    pub const AR_PLAYER_DISTANCE: f32 = 1.5;

    /// Vessel model scrolls back to 0 past this depth
    pub const VESSEL_WRAP_DEPTH: f32 = 400.0;
    pub const VESSEL_SCALE: f32 = 15.0;
}

/// Convert a spawn ring sample to a point on the tube cross-section.
///
/// The angle is measured from the +Y axis, so `angle = 0` lands on `(0, r)`.
#[inline]
pub fn polar_to_planar(radius: f32, angle: f32) -> Vec2 {
    Vec2::new(radius * angle.sin(), radius * angle.cos())
}

/// Distance of a point from the tube axis (depth ignored)
#[inline]
pub fn planar_distance(pos: Vec3) -> f32 {
    pos.truncate().length()
}

/// Project a point back onto the circle of `max_radius` if it strayed past it.
///
/// Keeps the angle and the depth, only the planar distance changes.
pub fn clamp_to_radius(pos: Vec3, max_radius: f32) -> Vec3 {
    let distance = planar_distance(pos);
    if distance <= max_radius {
        return pos;
    }
    let angle = pos.y.atan2(pos.x);
    Vec3::new(max_radius * angle.cos(), max_radius * angle.sin(), pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_planar_zero_angle() {
        let p = polar_to_planar(consts::SPAWN_MIN_RADIUS, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - consts::SPAWN_MIN_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_inside_is_noop() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(clamp_to_radius(p, 6.5), p);
    }

    #[test]
    fn test_clamp_keeps_angle_and_depth() {
        let p = Vec3::new(10.0, 10.0, -4.0);
        let clamped = clamp_to_radius(p, 6.5);
        assert!((planar_distance(clamped) - 6.5).abs() < 1e-4);
        assert!((clamped.x - clamped.y).abs() < 1e-4);
        assert_eq!(clamped.z, -4.0);
    }
}
