//! Collision detection between the player and blood cells
//!
//! Everything is an axis-aligned box. Rotated models get the box that
//! encloses their rotated local box, so a spinning cell's box breathes a
//! little as it tumbles down the tube.

use glam::{EulerRot, Mat3, Vec3};

use super::entity::Entity;
use crate::input::Ray;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box enclosing a local box of `half` extents rotated by XYZ Euler angles
    pub fn from_oriented(center: Vec3, half: Vec3, rotation: Vec3) -> Self {
        let m = Mat3::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        let extent = m.x_axis.abs() * half.x + m.y_axis.abs() * half.y + m.z_axis.abs() * half.z;
        Self::from_center_half(center, extent)
    }

    /// Touching boxes count as intersecting
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y
            || other.max.z < self.min.z
            || other.min.z > self.max.z)
    }

    /// Distance along the ray to the entry point, if the ray hits the box
    pub fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.direction.recip();
        let t1 = (self.min - ray.origin) * inv;
        let t2 = (self.max - ray.origin) * inv;
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Index of the first cell (collection order) touching the player box.
///
/// Only one hit is reported per call: the detector processes at most one
/// collision per frame, however many cells overlap the player.
pub fn first_collision(player: &Aabb, entities: &[Entity]) -> Option<usize> {
    entities.iter().position(|e| player.intersects(&e.bounds()))
}
