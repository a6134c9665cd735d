//! The tube run
//!
//! Wraps a [`GameState`] and connects it to the collaborators: models are
//! loaded in `init`, the simulation runs in `update`, input toggles pause and
//! steers the player, and run outcomes become scene transitions.

use std::any::Any;

use glam::Vec3;

use super::view::{Camera, Drawable, Label, SceneView};
use super::{Scene, SceneCommand, SceneContext, SceneParams, Variant};
use crate::audio::SoundCue;
use crate::consts::{AR_PLAYER_SCALE, CELL_SCALE, VESSEL_SCALE};
use crate::input::{InputEvent, Key, UiAction};
use crate::platform::{ModelHandle, paths};
use crate::sim::{CameraPose, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::{BodyPart, Tuning};

const PAUSE_BUTTONS: [UiAction; 3] = [UiAction::Resume, UiAction::Restart, UiAction::Exit];

/// Game scene, desktop or AR
pub struct GameScene {
    variant: Variant,
    body_part: BodyPart,
    state: GameState,
    camera: Camera,
    vessel: Option<ModelHandle>,
    /// Latest AR device pose
    pose: Option<CameraPose>,
}

impl GameScene {
    pub fn new(variant: Variant, body_part: BodyPart, tuning: &Tuning, seed: u64) -> Self {
        let level = *tuning.levels_for(variant.is_ar()).get(body_part);
        let camera = match variant {
            Variant::Desktop => Camera::perspective(75.0, Vec3::new(0.0, 0.0, 10.0)).look_at(Vec3::ZERO),
            Variant::Ar => Camera::perspective(75.0, Vec3::ZERO),
        };
        let mut state = GameState::new(level, tuning, seed);
        if variant.is_ar() {
            state.player.scale = AR_PLAYER_SCALE;
        }
        Self {
            variant,
            body_part,
            state,
            camera,
            vessel: None,
            pose: None,
        }
    }

    pub fn body_part(&self) -> BodyPart {
        self.body_part
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    fn params(&self) -> SceneParams {
        SceneParams::with_body_part(self.body_part)
    }

    fn pause(&mut self, ctx: &mut SceneContext) {
        self.state.pause();
        ctx.audio.pause();
    }

    fn resume(&mut self, ctx: &mut SceneContext) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        self.state.resume();
        ctx.audio.resume();
    }

    fn lives_label(&self) -> Label {
        let text = format!("Lives: {}", self.state.player.lives);
        match self.variant {
            Variant::Desktop => Label::new(text, Vec3::new(-5.0, 5.0, 0.0), 1.0),
            Variant::Ar => Label::new(text, Vec3::new(0.0, 0.0, -5.0), 0.2),
        }
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        self.variant.game()
    }

    fn init(&mut self, ctx: &mut SceneContext) {
        match ctx.assets.load_model(paths::VIRUS) {
            Ok(model) => self.state.player.model = Some(model),
            Err(e) => log::error!("Error loading player model: {}", e),
        }
        match ctx.assets.load_model(paths::VESSEL) {
            Ok(model) => self.vessel = Some(model),
            Err(e) => log::error!("Error loading vessel model: {}", e),
        }

        self.state.arm_spawner();
        ctx.audio.play_playlist();
        log::info!(
            "Game started: {} ({} lives, distance {})",
            self.body_part,
            self.state.level.lives,
            self.state.level.distance
        );
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext) -> SceneCommand {
        let input = TickInput {
            camera: if self.variant.is_ar() { self.pose } else { None },
            particles: ctx.audio.settings().particles,
        };
        let events = tick(&mut self.state, &input, ctx.assets.as_mut(), &ctx.tuning, dt);

        for event in events {
            match event {
                GameEvent::Collided { .. } => ctx.audio.play(SoundCue::Destroy),
                GameEvent::GameOver => {
                    log::info!("Out of lives on {}", self.body_part);
                    ctx.audio.pause();
                    return SceneCommand::switch_to(self.variant.game_over(), self.params());
                }
                GameEvent::DistanceReached => {
                    log::info!("{} infected after {} frames", self.body_part, self.state.frames);
                    return SceneCommand::switch_to(self.variant.end(), self.params());
                }
                _ => {}
            }
        }
        SceneCommand::None
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        match *event {
            InputEvent::KeyDown(Key::Pause) => match self.state.phase {
                GamePhase::Playing => self.pause(ctx),
                GamePhase::Paused => self.resume(ctx),
                _ => {}
            },
            InputEvent::KeyDown(key) => {
                self.state.player.intent.apply(key, true);
            }
            InputEvent::KeyUp(key) => {
                self.state.player.intent.apply(key, false);
            }
            InputEvent::Action(UiAction::Pause) => {
                if self.state.phase == GamePhase::Playing {
                    self.pause(ctx);
                }
            }
            InputEvent::Action(UiAction::Resume) => self.resume(ctx),
            InputEvent::Action(UiAction::Restart) => {
                self.state.restart();
                ctx.audio.resume();
            }
            InputEvent::Action(UiAction::Exit) => {
                ctx.audio.pause();
                return SceneCommand::switch_to(self.variant.menu(), SceneParams::none());
            }
            InputEvent::Visibility { hidden } => {
                self.state.set_hidden(hidden);
                if hidden {
                    ctx.audio.pause();
                } else if self.state.phase == GamePhase::Playing {
                    ctx.audio.resume();
                }
            }
            InputEvent::CameraPose { position, direction } if self.variant.is_ar() => {
                self.pose = Some(CameraPose { position, direction });
                self.camera.set_pose(position, direction);
            }
            _ => {}
        }
        SceneCommand::None
    }

    fn view(&self) -> SceneView {
        let mut view = SceneView::default();
        if let Some(vessel) = self.vessel {
            view.drawables.push(Drawable {
                model: vessel,
                position: Vec3::new(0.0, 0.0, self.state.vessel_depth),
                rotation: Vec3::ZERO,
                scale: VESSEL_SCALE,
            });
        }
        if let Some(model) = self.state.player.model {
            view.drawables.push(Drawable {
                model,
                position: self.state.player.pos,
                rotation: Vec3::new(0.0, self.state.player.yaw, 0.0),
                scale: self.state.player.scale,
            });
        }
        view.drawables.extend(self.state.entities.iter().map(|cell| Drawable {
            model: cell.model,
            position: cell.pos,
            rotation: cell.rotation,
            scale: CELL_SCALE,
        }));
        view.particles = self
            .state
            .sprays
            .iter()
            .flat_map(|spray| spray.particles.iter().map(|p| p.pos))
            .collect();
        view.labels.push(self.lives_label());
        if self.state.is_paused() {
            view.buttons.extend(PAUSE_BUTTONS);
        } else if self.variant.is_ar() && self.state.phase == GamePhase::Playing {
            view.buttons.push(UiAction::Pause);
        }
        view
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn cleanup(&mut self, ctx: &mut SceneContext) {
        self.state.spawner.stop();
        self.state.spawner.clear();
        for cell in self.state.entities.drain(..) {
            ctx.assets.release(cell.model);
        }
        if let Some(model) = self.state.player.model.take() {
            ctx.assets.release(model);
        }
        if let Some(model) = self.vessel.take() {
            ctx.assets.release(model);
        }
        self.state.sprays.clear();
        ctx.audio.stop();
        log::debug!("Game scene {} cleaned up", self.name());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
