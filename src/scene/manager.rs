//! Scene registry and lifecycle
//!
//! `Idle -> Switching -> Active -> Switching -> Active ...`
//!
//! A switch resolves and constructs the target first, so an unknown name or
//! missing level leaves the current scene active and untouched. Only then is
//! the outgoing scene cleaned up and the new one initialized and bound.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{
    EndScene, GameOverScene, GameScene, MenuScene, Scene, SceneCommand, SceneContext, SceneParams,
    Variant,
};
use crate::audio::{AudioBackend, AudioManager};
use crate::error::SceneError;
use crate::input::InputEvent;
use crate::platform::{AssetLoader, Renderer};
use crate::settings::Settings;
use crate::tuning::{BodyPart, Tuning};

/// Builds a scene from the transition parameters and a fresh seed
pub type SceneConstructor =
    Box<dyn Fn(&SceneParams, &Tuning, u64) -> Result<Box<dyn Scene>, SceneError>>;

/// Lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerState {
    /// Nothing constructed yet
    Idle,
    /// Tearing down the old scene / initializing `target`
    Switching { target: String },
    /// `scene` receives updates and is rendered
    Active { scene: String },
}

/// Owns the registry, the single live scene and the collaborators
pub struct SceneManager {
    registry: HashMap<String, SceneConstructor>,
    current: Option<Box<dyn Scene>>,
    state: ManagerState,
    renderer: Box<dyn Renderer>,
    ctx: SceneContext,
    seeds: Pcg32,
    aspect: f32,
    frames: u64,
}

impl SceneManager {
    pub fn new(
        renderer: Box<dyn Renderer>,
        assets: Box<dyn AssetLoader>,
        audio: Box<dyn AudioBackend>,
        settings: Settings,
        tuning: Tuning,
        seed: u64,
    ) -> Self {
        let mut seeds = Pcg32::seed_from_u64(seed);
        let audio_seed = seeds.random::<u64>();
        Self {
            registry: HashMap::new(),
            current: None,
            state: ManagerState::Idle,
            renderer,
            ctx: SceneContext {
                assets,
                audio: AudioManager::new(audio, settings, audio_seed),
                tuning,
            },
            seeds,
            aspect: 1.0,
            frames: 0,
        }
    }

    /// Register every scene of the game, desktop and AR
    pub fn with_default_scenes(mut self) -> Self {
        self.register_defaults();
        self
    }

    pub fn register_defaults(&mut self) {
        for variant in [Variant::Desktop, Variant::Ar] {
            self.add_scene(variant.menu(), move |_, _, _| {
                let scene: Box<dyn Scene> = Box::new(MenuScene::new(variant));
                Ok(scene)
            });

            let name = variant.game();
            self.add_scene(name, move |params, tuning, seed| {
                let part = required_part(name, params)?;
                let scene: Box<dyn Scene> = Box::new(GameScene::new(variant, part, tuning, seed));
                Ok(scene)
            });

            let name = variant.end();
            self.add_scene(name, move |params, _, _| {
                let part = required_part(name, params)?;
                let scene: Box<dyn Scene> = Box::new(EndScene::new(variant, part));
                Ok(scene)
            });

            let name = variant.game_over();
            self.add_scene(name, move |params, _, _| {
                let part = required_part(name, params)?;
                let scene: Box<dyn Scene> = Box::new(GameOverScene::new(variant, part));
                Ok(scene)
            });
        }
    }

    /// Register a constructor. A second registration under the same name
    /// replaces the first.
    pub fn add_scene<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(&SceneParams, &Tuning, u64) -> Result<Box<dyn Scene>, SceneError> + 'static,
    {
        if self
            .registry
            .insert(name.to_string(), Box::new(constructor))
            .is_some()
        {
            log::warn!("Scene {} registered twice, keeping the latest", name);
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Switch to a named scene
    pub fn switch_scene(&mut self, name: &str, params: SceneParams) -> Result<(), SceneError> {
        let Some(constructor) = self.registry.get(name) else {
            log::error!("Scene {} not found", name);
            return Err(SceneError::NotFound(name.to_string()));
        };
        let seed = self.seeds.random::<u64>();
        let mut next = constructor(&params, &self.ctx.tuning, seed)?;

        log::info!(
            "Switching scene: {} -> {} ({:?})",
            self.current_name().unwrap_or("<none>"),
            name,
            params.body_part.map(|p| p.as_str())
        );
        self.state = ManagerState::Switching {
            target: name.to_string(),
        };

        if let Some(mut old) = self.current.take() {
            old.cleanup(&mut self.ctx);
        }

        next.camera_mut().set_aspect(self.aspect);
        next.init(&mut self.ctx);
        self.current = Some(next);
        self.state = ManagerState::Active {
            scene: name.to_string(),
        };
        Ok(())
    }

    /// Run one frame: update the live scene, render it once, then apply
    /// whatever transition it requested
    pub fn frame(&mut self, dt: f32) -> Result<(), SceneError> {
        self.frames += 1;
        self.ctx.audio.tick();

        let command = match self.current.as_mut() {
            Some(scene) => {
                let command = scene.update(dt, &mut self.ctx);
                self.renderer.render(&scene.view(), scene.camera());
                command
            }
            None => SceneCommand::None,
        };
        self.apply(command)
    }

    /// Deliver host input to the live scene
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), SceneError> {
        if let InputEvent::SetMuted(muted) = event {
            self.ctx.audio.set_muted(muted);
            return Ok(());
        }
        let command = match self.current.as_mut() {
            Some(scene) => scene.handle_input(&event, &mut self.ctx),
            None => SceneCommand::None,
        };
        self.apply(command)
    }

    /// Viewport size changed
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
        if let Some(scene) = self.current.as_mut() {
            scene.camera_mut().set_aspect(self.aspect);
        }
    }

    fn apply(&mut self, command: SceneCommand) -> Result<(), SceneError> {
        match command {
            SceneCommand::None => Ok(()),
            SceneCommand::SwitchTo { name, params } => self.switch_scene(&name, params),
        }
    }

    pub fn state(&self) -> &ManagerState {
        &self.state
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    pub fn current_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|scene| scene.name())
    }

    /// The live scene as a concrete type
    pub fn current_as<T: 'static>(&self) -> Option<&T> {
        self.current.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn audio(&self) -> &AudioManager {
        &self.ctx.audio
    }

    pub fn tuning(&self) -> &Tuning {
        &self.ctx.tuning
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn required_part(name: &str, params: &SceneParams) -> Result<BodyPart, SceneError> {
    params
        .body_part
        .ok_or_else(|| SceneError::MissingBodyPart(name.to_string()))
}
