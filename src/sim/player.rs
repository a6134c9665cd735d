//! The player's virus

use glam::Vec3;

use super::collision::Aabb;
use crate::consts::{AR_PLAYER_DISTANCE, PLAYER_SCALE};
use crate::input::MoveIntent;
use crate::platform::ModelHandle;
use crate::clamp_to_radius;

/// Model yaw so the virus faces down the tube
pub const PLAYER_BASE_YAW: f32 = std::f32::consts::PI * 3.0 / 2.0;

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub yaw: f32,
    pub intent: MoveIntent,
    pub lives: u32,
    /// Uniform model scale, also applied to the collision box
    pub scale: f32,
    /// None until the model loaded; an unloaded player neither moves nor collides
    pub model: Option<ModelHandle>,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: PLAYER_BASE_YAW,
            intent: MoveIntent::default(),
            lives,
            scale: PLAYER_SCALE,
            model: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        let model = self.model?;
        Some(Aabb::from_oriented(
            self.pos,
            model.half_extents * self.scale,
            Vec3::new(0.0, self.yaw, 0.0),
        ))
    }

    /// Move by held keys, `speed` per axis, then clamp to the tube
    pub fn steer(&mut self, speed: f32, max_radius: f32) {
        let intent = self.intent;
        if intent.left {
            self.pos.x -= speed;
        }
        if intent.right {
            self.pos.x += speed;
        }
        if intent.up {
            self.pos.y += speed;
        }
        if intent.down {
            self.pos.y -= speed;
        }
        self.pos = clamp_to_radius(self.pos, max_radius);
    }

    /// AR: float in front of the device camera, then clamp to the tube
    pub fn follow_camera(&mut self, camera_pos: Vec3, direction: Vec3, max_radius: f32) {
        let direction = direction.normalize_or_zero();
        self.pos = camera_pos + direction * AR_PLAYER_DISTANCE;
        self.yaw = direction.x.atan2(direction.z) - PLAYER_BASE_YAW;
        self.pos = clamp_to_radius(self.pos, max_radius);
    }

    /// Take one hit; returns true when that was the last life
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::planar_distance;

    #[test]
    fn test_steer_diagonal() {
        let mut p = Player::new(3);
        p.intent.apply(Key::Right, true);
        p.intent.apply(Key::Up, true);
        p.steer(0.15, 6.5);
        assert!((p.pos.x - 0.15).abs() < 1e-6);
        assert!((p.pos.y - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_steer_clamps_radially() {
        let mut p = Player::new(3);
        p.pos = Vec3::new(6.4, 0.0, 0.0);
        p.intent.apply(Key::Right, true);
        p.steer(0.35, 6.5);
        assert!((p.pos.x - 6.5).abs() < 1e-5);
        assert!(p.pos.y.abs() < 1e-5);
    }

    #[test]
    fn test_follow_camera() {
        let mut p = Player::new(3);
        p.follow_camera(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -2.0), 6.5);
        assert!((p.pos - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);

        p.follow_camera(Vec3::new(20.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 6.5);
        assert!((planar_distance(p.pos) - 6.5).abs() < 1e-4);
    }

    #[test]
    fn test_unloaded_player_has_no_bounds() {
        let mut p = Player::new(1);
        assert!(p.bounds().is_none());
        p.model = Some(ModelHandle {
            id: 1,
            half_extents: Vec3::ONE,
        });
        assert!(p.bounds().is_some());
    }

    #[test]
    fn test_bounds_follow_scale() {
        let mut p = Player::new(1);
        p.yaw = 0.0;
        p.model = Some(ModelHandle {
            id: 1,
            half_extents: Vec3::ONE,
        });
        let desktop = p.bounds().unwrap();
        assert!((desktop.max.x - 0.5).abs() < 1e-5);

        p.scale = crate::consts::AR_PLAYER_SCALE;
        let ar = p.bounds().unwrap();
        assert!((ar.max.x - 0.05).abs() < 1e-5);
        assert!((ar.min.y + 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_lose_life_saturates() {
        let mut p = Player::new(1);
        assert!(p.lose_life());
        assert!(p.lose_life());
        assert_eq!(p.lives, 0);
    }
}
