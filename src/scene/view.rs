//! What a scene hands to the renderer each frame

use glam::Vec3;
use serde::Serialize;

use crate::input::{Ray, UiAction};
use crate::platform::ModelHandle;

/// Camera projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Projection {
    Perspective { fov_deg: f32 },
    /// Screen-space overlay scenes
    Orthographic,
}

/// A scene camera
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    pub projection: Projection,
    pub position: Vec3,
    pub target: Vec3,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn perspective(fov_deg: f32, position: Vec3) -> Self {
        Self {
            projection: Projection::Perspective { fov_deg },
            position,
            target: position + Vec3::NEG_Z,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn orthographic() -> Self {
        Self {
            projection: Projection::Orthographic,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            aspect: 1.0,
            near: 0.1,
            far: 10.0,
        }
    }

    pub fn look_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// AR: the device drives the camera
    pub fn set_pose(&mut self, position: Vec3, direction: Vec3) {
        self.position = position;
        self.target = position + direction.normalize_or_zero();
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Ray through the center of the screen
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}

/// A model instance to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawable {
    pub model: ModelHandle,
    pub position: Vec3,
    /// XYZ Euler angles
    pub rotation: Vec3,
    pub scale: f32,
}

/// World-space text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: Vec3,
    pub font_size: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vec3, font_size: f32) -> Self {
        Self {
            text: text.into(),
            position,
            font_size,
        }
    }
}

/// A highlight light on a selectable box (menu)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    pub position: Vec3,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneView {
    pub drawables: Vec<Drawable>,
    pub labels: Vec<Label>,
    /// Overlay buttons (pause menu, game over)
    pub buttons: Vec<UiAction>,
    /// Particle positions
    pub particles: Vec<Vec3>,
    pub highlights: Vec<Highlight>,
}
