//! Out of lives: restart the same level or go back to the menu

use std::any::Any;

use glam::Vec3;

use super::view::{Camera, Label, SceneView};
use super::{Scene, SceneCommand, SceneContext, SceneParams, Variant};
use crate::audio::SoundCue;
use crate::input::{InputEvent, UiAction};
use crate::tuning::BodyPart;

pub struct GameOverScene {
    variant: Variant,
    body_part: BodyPart,
    camera: Camera,
}

impl GameOverScene {
    pub fn new(variant: Variant, body_part: BodyPart) -> Self {
        Self {
            variant,
            body_part,
            camera: Camera::orthographic(),
        }
    }

    pub fn body_part(&self) -> BodyPart {
        self.body_part
    }
}

impl Scene for GameOverScene {
    fn name(&self) -> &'static str {
        self.variant.game_over()
    }

    fn init(&mut self, ctx: &mut SceneContext) {
        ctx.audio.play(SoundCue::GameOver);
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        SceneCommand::None
    }

    fn handle_input(&mut self, event: &InputEvent, _ctx: &mut SceneContext) -> SceneCommand {
        match event {
            InputEvent::Action(UiAction::Restart) => SceneCommand::switch_to(
                self.variant.game(),
                SceneParams::with_body_part(self.body_part),
            ),
            InputEvent::Action(UiAction::MainMenu) => {
                SceneCommand::switch_to(self.variant.menu(), SceneParams::none())
            }
            _ => SceneCommand::None,
        }
    }

    fn view(&self) -> SceneView {
        SceneView {
            labels: vec![Label::new("Game Over", Vec3::ZERO, 1.0)],
            buttons: vec![UiAction::Restart, UiAction::MainMenu],
            ..Default::default()
        }
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn cleanup(&mut self, _ctx: &mut SceneContext) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
