//! Platform abstraction layer
//!
//! The game never draws, decodes or plays anything itself. The host provides:
//! - a [`Renderer`] that draws a [`SceneView`] once per frame
//! - an [`AssetLoader`] that turns model paths into handles
//! - an [`AudioBackend`](crate::audio::AudioBackend) for playback
//!
//! `headless` implements all three for the native demo binary; `web` exposes
//! the game to a JavaScript host.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec3;
use serde::Serialize;

use crate::error::AssetError;
use crate::scene::{Camera, SceneView};

/// Model files
pub mod paths {
    pub const VIRUS: &str = "assets/models/virus.glb";
    pub const VESSEL: &str = "assets/models/blood_vessel.glb";
    pub const BLOOD_CELL: &str = "assets/models/globule_rouge.glb";
    pub const ANGIOLOGY: &str = "assets/models/angiology.glb";
    pub const ARTHROLOGY: &str = "assets/models/arthrology.glb";
}

/// A loaded model owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelHandle {
    pub id: u32,
    /// Half extents of the model's local bounding box (before scaling)
    pub half_extents: Vec3,
}

impl ModelHandle {
    /// Build a handle from a host id and the `[x, y, z]` half extents it reported
    pub fn from_host(id: u32, half_extents: &[f32], path: &str) -> Result<Self, AssetError> {
        match half_extents {
            [x, y, z] => Ok(Self {
                id,
                half_extents: Vec3::new(*x, *y, *z),
            }),
            _ => Err(AssetError::Decode {
                path: path.to_string(),
                reason: format!("expected 3 half extents, got {}", half_extents.len()),
            }),
        }
    }
}

/// Model loading collaborator
pub trait AssetLoader {
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError>;
    /// Give back the rendering resources of a model instance
    fn release(&mut self, model: ModelHandle);
}

/// Rendering collaborator
pub trait Renderer {
    /// Draw one frame. Called exactly once per frame.
    fn render(&mut self, view: &SceneView, camera: &Camera);
    /// Viewport size changed
    fn resize(&mut self, width: u32, height: u32);
}
