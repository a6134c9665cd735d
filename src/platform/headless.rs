//! Collaborators for running without a window or sound card
//!
//! Used by the native demo binary and by tests. Nothing is drawn or played;
//! everything is logged.

use std::collections::{HashMap, HashSet};

use glam::Vec3;

use super::{AssetLoader, ModelHandle, Renderer, paths};
use crate::audio::AudioBackend;
use crate::error::AssetError;
use crate::scene::{Camera, SceneView};

/// Counts frames and logs a summary every `log_every` frames
#[derive(Debug)]
pub struct LogRenderer {
    frames: u64,
    log_every: u64,
    size: (u32, u32),
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl LogRenderer {
    pub fn new(log_every: u64) -> Self {
        Self {
            frames: 0,
            log_every: log_every.max(1),
            size: (0, 0),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last viewport size
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, view: &SceneView, camera: &Camera) {
        self.frames += 1;
        if self.frames % self.log_every == 0 {
            log::debug!(
                "Frame {}: {} models, {} particles, labels {:?}, camera at {:?}",
                self.frames,
                view.drawables.len(),
                view.particles.len(),
                view.labels.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(),
                camera.position
            );
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        log::debug!("Viewport {}x{}", width, height);
    }
}

/// Serves every known model path with fixed bounding box sizes
#[derive(Debug)]
pub struct StaticAssetLoader {
    extents: HashMap<String, Vec3>,
    live: HashSet<u32>,
    next_id: u32,
}

impl Default for StaticAssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticAssetLoader {
    /// Loader knowing every model the game ships with
    pub fn new() -> Self {
        let mut extents = HashMap::new();
        extents.insert(paths::VIRUS.to_string(), Vec3::splat(1.0));
        extents.insert(paths::BLOOD_CELL.to_string(), Vec3::new(0.6, 0.6, 0.25));
        extents.insert(paths::VESSEL.to_string(), Vec3::new(1.0, 1.0, 30.0));
        extents.insert(paths::ANGIOLOGY.to_string(), Vec3::new(0.3, 0.9, 0.15));
        extents.insert(paths::ARTHROLOGY.to_string(), Vec3::new(0.3, 0.9, 0.15));
        for organ in ["brain", "intestine", "lungs", "heart", "liver"] {
            extents.insert(format!("assets/models/{organ}.glb"), Vec3::splat(0.5));
        }
        Self {
            extents,
            live: HashSet::new(),
            next_id: 1,
        }
    }

    /// Add or override a model
    pub fn with_model(mut self, path: &str, half_extents: Vec3) -> Self {
        self.extents.insert(path.to_string(), half_extents);
        self
    }

    /// Make loads of `path` fail
    pub fn without_model(mut self, path: &str) -> Self {
        self.extents.remove(path);
        self
    }

    /// Models loaded and not yet released
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl AssetLoader for StaticAssetLoader {
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError> {
        let half_extents = *self
            .extents
            .get(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);
        Ok(ModelHandle { id, half_extents })
    }

    fn release(&mut self, model: ModelHandle) {
        if !self.live.remove(&model.id) {
            log::trace!("Release of unknown model {}", model.id);
        }
    }
}

/// Audio backend that only tracks whether the ambient channel would be playing
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: bool,
}

impl AudioBackend for SilentAudio {
    fn play_ambient(&mut self, path: &str, volume: f32, looping: bool) {
        log::debug!("Ambient {} (volume {:.2}, loop {})", path, volume, looping);
        self.playing = true;
    }

    fn play_once(&mut self, path: &str, volume: f32) {
        log::debug!("Sound {} (volume {:.2})", path, volume);
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_fails() {
        let mut loader = StaticAssetLoader::new();
        let err = loader.load_model("assets/models/spleen.glb").unwrap_err();
        assert_eq!(err, AssetError::NotFound("assets/models/spleen.glb".to_string()));
    }

    #[test]
    fn test_release_tracks_live_models() {
        let mut loader = StaticAssetLoader::new();
        let a = loader.load_model(paths::BLOOD_CELL).unwrap();
        let b = loader.load_model(paths::BLOOD_CELL).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(loader.live_count(), 2);
        loader.release(a);
        loader.release(a);
        assert_eq!(loader.live_count(), 1);
    }

    #[test]
    fn test_renderer_counts_frames() {
        let mut renderer = LogRenderer::new(2);
        renderer.resize(800, 600);
        for _ in 0..5 {
            renderer.render(&SceneView::default(), &Camera::orthographic());
        }
        assert_eq!(renderer.frames(), 5);
        assert_eq!(renderer.size(), (800, 600));
    }

    #[test]
    fn test_without_model() {
        let mut loader = StaticAssetLoader::new().without_model(paths::VIRUS);
        assert!(loader.load_model(paths::VIRUS).is_err());
    }
}
