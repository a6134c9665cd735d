//! Blood cells: the obstacles flowing down the vessel

use glam::{Vec2, Vec3};

use super::collision::Aabb;
use crate::consts::CELL_SCALE;
use crate::platform::ModelHandle;

/// How a cell moves across the tube cross-section
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Straight down the tube, no lateral motion
    Linear,
    /// Drifts sideways and bounces off the vessel wall
    Oscillating { velocity: Vec2 },
    /// Homes in on the player
    Seeking,
}

impl EntityKind {
    /// Lateral velocity added each frame (zero unless oscillating)
    pub fn lateral_velocity(&self) -> Vec2 {
        match self {
            EntityKind::Oscillating { velocity } => *velocity,
            _ => Vec2::ZERO,
        }
    }
}

/// A live blood cell
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec3,
    /// Euler angles (radians), cosmetic
    pub rotation: Vec3,
    pub kind: EntityKind,
    pub model: ModelHandle,
}

impl Entity {
    /// World-space bounding box, accounting for scale and rotation
    pub fn bounds(&self) -> Aabb {
        Aabb::from_oriented(self.pos, self.model.half_extents * CELL_SCALE, self.rotation)
    }

    /// Flip lateral velocity if the cell strayed past `max_radius`.
    ///
    /// Only oscillating cells are affected. Returns true on reflection.
    pub fn reflect_if_outside(&mut self, max_radius: f32) -> bool {
        if crate::planar_distance(self.pos) <= max_radius {
            return false;
        }
        match &mut self.kind {
            EntityKind::Oscillating { velocity } => {
                *velocity = -*velocity;
                true
            }
            _ => false,
        }
    }
}
