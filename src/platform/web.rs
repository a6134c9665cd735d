//! Browser host bridge
//!
//! The page owns the 3D engine, the canvas and Web Audio. It hands a `Host`
//! object to [`WebGame`] and forwards DOM events; the game calls back into
//! the host to load models, play sounds and draw each frame.

use wasm_bindgen::prelude::*;

use glam::Vec3;

use super::{AssetLoader, ModelHandle, Renderer};
use crate::audio::AudioBackend;
use crate::consts::FRAME_DT;
use crate::error::AssetError;
use crate::input::{InputEvent, Key, Ray, UiAction};
use crate::scene::{Camera, SceneManager, SceneParams, SceneView, Variant};
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen]
extern "C" {
    /// JavaScript side of the bridge
    #[derive(Clone, Debug)]
    pub type Host;

    /// Draw one frame from the JSON encoded view and camera
    #[wasm_bindgen(method)]
    fn render(this: &Host, view: &str, camera: &str);

    #[wasm_bindgen(method)]
    fn resize(this: &Host, width: u32, height: u32);

    /// Returns the id of the new model instance
    #[wasm_bindgen(method, catch, js_name = loadModel)]
    fn load_model(this: &Host, path: &str) -> Result<u32, JsValue>;

    /// Returns `[half_x, half_y, half_z]` of a loaded model
    #[wasm_bindgen(method, js_name = modelHalfExtents)]
    fn model_half_extents(this: &Host, id: u32) -> Vec<f32>;

    #[wasm_bindgen(method, js_name = releaseModel)]
    fn release_model(this: &Host, id: u32);

    #[wasm_bindgen(method, js_name = playAmbient)]
    fn play_ambient(this: &Host, path: &str, volume: f32, looping: bool);

    #[wasm_bindgen(method, js_name = playOnce)]
    fn play_once(this: &Host, path: &str, volume: f32);

    #[wasm_bindgen(method, js_name = pauseAudio)]
    fn pause_audio(this: &Host);

    #[wasm_bindgen(method, js_name = resumeAudio)]
    fn resume_audio(this: &Host);

    #[wasm_bindgen(method, js_name = stopAudio)]
    fn stop_audio(this: &Host);

    #[wasm_bindgen(method, js_name = isPlaying)]
    fn is_playing(this: &Host) -> bool;
}

struct HostRenderer(Host);

impl Renderer for HostRenderer {
    fn render(&mut self, view: &SceneView, camera: &Camera) {
        match (serde_json::to_string(view), serde_json::to_string(camera)) {
            (Ok(view), Ok(camera)) => self.0.render(&view, &camera),
            (Err(e), _) | (_, Err(e)) => log::error!("Failed to encode frame: {}", e),
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.0.resize(width, height);
    }
}

struct HostAssets(Host);

impl AssetLoader for HostAssets {
    fn load_model(&mut self, path: &str) -> Result<ModelHandle, AssetError> {
        let id = self.0.load_model(path).map_err(|e| AssetError::Decode {
            path: path.to_string(),
            reason: format!("{e:?}"),
        })?;
        let half_extents = self.0.model_half_extents(id);
        ModelHandle::from_host(id, &half_extents, path).inspect_err(|_| self.0.release_model(id))
    }

    fn release(&mut self, model: ModelHandle) {
        self.0.release_model(model.id);
    }
}

struct HostAudio(Host);

impl AudioBackend for HostAudio {
    fn play_ambient(&mut self, path: &str, volume: f32, looping: bool) {
        self.0.play_ambient(path, volume, looping);
    }

    fn play_once(&mut self, path: &str, volume: f32) {
        self.0.play_once(path, volume);
    }

    fn pause(&mut self) {
        self.0.pause_audio();
    }

    fn resume(&mut self) {
        self.0.resume_audio();
    }

    fn stop(&mut self) {
        self.0.stop_audio();
    }

    fn is_playing(&self) -> bool {
        self.0.is_playing()
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Install the console logger and panic hook
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// The game as seen from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    manager: SceneManager,
    variant: Variant,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings` and `tuning` are optional JSON overrides
    #[wasm_bindgen(constructor)]
    pub fn new(host: Host, ar: bool, settings: Option<String>, tuning: Option<String>) -> Result<WebGame, JsValue> {
        let settings = match settings {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        let tuning = match tuning {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let manager = SceneManager::new(
            Box::new(HostRenderer(host.clone())),
            Box::new(HostAssets(host.clone())),
            Box::new(HostAudio(host)),
            settings,
            tuning,
            seed,
        )
        .with_default_scenes();
        let variant = if ar { Variant::Ar } else { Variant::Desktop };
        log::info!("Pathogen Surge ready ({:?}, seed {})", variant, seed);

        let mut game = WebGame {
            manager,
            variant,
            last_time: 0.0,
        };
        game.manager
            .switch_scene(variant.menu(), SceneParams::none())
            .map_err(to_js)?;
        Ok(game)
    }

    /// Call from `requestAnimationFrame` with its timestamp
    pub fn frame(&mut self, time_ms: f64) -> Result<(), JsValue> {
        let dt = if self.last_time > 0.0 {
            (((time_ms - self.last_time) / 1000.0) as f32).min(0.1)
        } else {
            FRAME_DT
        };
        self.last_time = time_ms;
        self.manager.frame(dt).map_err(to_js)
    }

    pub fn key_down(&mut self, event: &web_sys::KeyboardEvent) -> Result<(), JsValue> {
        match Key::from_dom(&event.key()) {
            Some(key) => self.send(InputEvent::KeyDown(key)),
            None => Ok(()),
        }
    }

    pub fn key_up(&mut self, event: &web_sys::KeyboardEvent) -> Result<(), JsValue> {
        match Key::from_dom(&event.key()) {
            Some(key) => self.send(InputEvent::KeyUp(key)),
            None => Ok(()),
        }
    }

    /// World-space picking ray under the pointer
    pub fn pointer_move(&mut self, ox: f32, oy: f32, oz: f32, dx: f32, dy: f32, dz: f32) -> Result<(), JsValue> {
        let ray = Ray::new(Vec3::new(ox, oy, oz), Vec3::new(dx, dy, dz));
        self.send(InputEvent::PointerMove(ray))
    }

    pub fn click(&mut self) -> Result<(), JsValue> {
        self.send(InputEvent::Click)
    }

    pub fn tap(&mut self, time_ms: f64) -> Result<(), JsValue> {
        self.send(InputEvent::Tap { time_ms })
    }

    /// A pause menu or game-over button, by id
    pub fn action(&mut self, id: &str) -> Result<(), JsValue> {
        match UiAction::from_str(id) {
            Some(action) => self.send(InputEvent::Action(action)),
            None => {
                log::warn!("Unknown button {}", id);
                Ok(())
            }
        }
    }

    /// AR device pose for this frame
    pub fn camera_pose(&mut self, px: f32, py: f32, pz: f32, dx: f32, dy: f32, dz: f32) -> Result<(), JsValue> {
        self.send(InputEvent::CameraPose {
            position: Vec3::new(px, py, pz),
            direction: Vec3::new(dx, dy, dz),
        })
    }

    pub fn visibility(&mut self, hidden: bool) -> Result<(), JsValue> {
        self.send(InputEvent::Visibility { hidden })
    }

    pub fn set_muted(&mut self, muted: bool) -> Result<(), JsValue> {
        self.send(InputEvent::SetMuted(muted))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.manager.resize(width, height);
    }

    pub fn is_ar(&self) -> bool {
        self.variant.is_ar()
    }

    /// Name of the live scene
    pub fn scene(&self) -> Option<String> {
        self.manager.current_name().map(str::to_string)
    }

    fn send(&mut self, event: InputEvent) -> Result<(), JsValue> {
        self.manager.handle_input(event).map_err(to_js)
    }
}
