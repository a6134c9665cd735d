//! Recording collaborators shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec3;

use pathogen_surge::audio::AudioBackend;
use pathogen_surge::platform::{AssetLoader, ModelHandle, Renderer, paths};
use pathogen_surge::scene::{Camera, SceneView};
use pathogen_surge::{AssetError, SceneManager, Settings, Tuning};

pub const DT: f32 = 1.0 / 60.0;

/// Everything the collaborators saw, readable after they were boxed away
#[derive(Default)]
pub struct Recorder {
    pub views: Vec<SceneView>,
    pub live_models: HashSet<u32>,
    pub released: Vec<u32>,
    pub sounds: Vec<String>,
    pub ambient_playing: bool,
    pub failing_paths: HashSet<&'static str>,
    next_id: u32,
}

pub type Shared = Rc<RefCell<Recorder>>;

pub struct RecordingRenderer(pub Shared);

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &SceneView, _camera: &Camera) {
        self.0.borrow_mut().views.push(view.clone());
    }

    fn resize(&mut self, _width: u32, _height: u32) {}
}

pub struct RecordingAssets(pub Shared);

impl AssetLoader for RecordingAssets {
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError> {
        let mut rec = self.0.borrow_mut();
        if rec.failing_paths.contains(path) {
            return Err(AssetError::NotFound(path.to_string()));
        }
        rec.next_id += 1;
        let id = rec.next_id;
        rec.live_models.insert(id);
        let half_extents = match path {
            paths::VIRUS => Vec3::splat(1.0),
            paths::BLOOD_CELL => Vec3::new(0.6, 0.6, 0.25),
            _ => Vec3::splat(0.5),
        };
        Ok(ModelHandle { id, half_extents })
    }

    fn release(&mut self, model: ModelHandle) {
        let mut rec = self.0.borrow_mut();
        rec.live_models.remove(&model.id);
        rec.released.push(model.id);
    }
}

pub struct RecordingAudio(pub Shared);

impl AudioBackend for RecordingAudio {
    fn play_ambient(&mut self, path: &str, _volume: f32, _looping: bool) {
        let mut rec = self.0.borrow_mut();
        rec.ambient_playing = true;
        rec.sounds.push(format!("ambient {path}"));
    }

    fn play_once(&mut self, path: &str, _volume: f32) {
        self.0.borrow_mut().sounds.push(format!("once {path}"));
    }

    fn pause(&mut self) {
        self.0.borrow_mut().ambient_playing = false;
    }

    fn resume(&mut self) {
        self.0.borrow_mut().ambient_playing = true;
    }

    fn stop(&mut self) {
        self.0.borrow_mut().ambient_playing = false;
    }

    fn is_playing(&self) -> bool {
        self.0.borrow().ambient_playing
    }
}

/// Manager with every scene registered and recording collaborators
pub fn manager_with(tuning: Tuning, failing: &[&'static str]) -> (SceneManager, Shared) {
    let rec: Shared = Rc::default();
    rec.borrow_mut().failing_paths.extend(failing.iter().copied());
    let manager = SceneManager::new(
        Box::new(RecordingRenderer(rec.clone())),
        Box::new(RecordingAssets(rec.clone())),
        Box::new(RecordingAudio(rec.clone())),
        Settings::default(),
        tuning,
        99,
    )
    .with_default_scenes();
    (manager, rec)
}

pub fn manager() -> (SceneManager, Shared) {
    manager_with(Tuning::default(), &[])
}

/// Every cell seeks the player, so hits come quickly and one at a time
pub fn homing_tuning() -> Tuning {
    Tuning {
        seeking_probability: 1.0,
        ..Tuning::default()
    }
}
