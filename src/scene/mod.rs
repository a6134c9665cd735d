//! Scenes and the scene lifecycle
//!
//! A scene is a self-contained simulation/render context: its own camera,
//! models and (for the game) entity collection. The [`SceneManager`] owns the
//! single live scene and drives it through the [`Scene`] trait only.
//!
//! Scenes never switch themselves. They return a [`SceneCommand`] from
//! `update`/`handle_input` and the manager performs the transition.

pub mod end;
pub mod game;
pub mod game_over;
pub mod manager;
pub mod menu;
pub mod view;

use std::any::Any;

use crate::audio::AudioManager;
use crate::input::InputEvent;
use crate::platform::AssetLoader;
use crate::tuning::{BodyPart, Tuning};

pub use end::EndScene;
pub use game::GameScene;
pub use game_over::GameOverScene;
pub use manager::{ManagerState, SceneConstructor, SceneManager};
pub use menu::MenuScene;
pub use view::{Camera, Drawable, Highlight, Label, Projection, SceneView};

/// Registered scene names
pub mod names {
    pub const MENU: &str = "menu";
    pub const GAME: &str = "game";
    pub const END: &str = "end";
    pub const GAME_OVER: &str = "game-over";
    pub const MENU_AR: &str = "menuAr";
    pub const GAME_AR: &str = "gameAr";
    pub const END_AR: &str = "endAr";
    pub const GAME_OVER_AR: &str = "game-overAr";
}

/// Control mode. Each scene exists once per variant, and transitions stay
/// within the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Keyboard and mouse
    Desktop,
    /// Camera-steered, tap to select
    Ar,
}

impl Variant {
    pub fn is_ar(&self) -> bool {
        matches!(self, Variant::Ar)
    }

    pub fn menu(&self) -> &'static str {
        match self {
            Variant::Desktop => names::MENU,
            Variant::Ar => names::MENU_AR,
        }
    }

    pub fn game(&self) -> &'static str {
        match self {
            Variant::Desktop => names::GAME,
            Variant::Ar => names::GAME_AR,
        }
    }

    pub fn end(&self) -> &'static str {
        match self {
            Variant::Desktop => names::END,
            Variant::Ar => names::END_AR,
        }
    }

    pub fn game_over(&self) -> &'static str {
        match self {
            Variant::Desktop => names::GAME_OVER,
            Variant::Ar => names::GAME_OVER_AR,
        }
    }
}

/// Parameters carried by a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneParams {
    /// Selected level
    pub body_part: Option<BodyPart>,
}

impl SceneParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_body_part(part: BodyPart) -> Self {
        Self {
            body_part: Some(part),
        }
    }
}

/// What a scene asks the manager to do after a frame or an input event
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    None,
    SwitchTo { name: String, params: SceneParams },
}

impl SceneCommand {
    pub fn switch_to(name: &str, params: SceneParams) -> Self {
        SceneCommand::SwitchTo {
            name: name.to_string(),
            params,
        }
    }
}

/// Collaborators shared by every scene, owned by the manager
pub struct SceneContext {
    pub assets: Box<dyn AssetLoader>,
    pub audio: AudioManager,
    pub tuning: Tuning,
}

/// Scene capability interface
pub trait Scene {
    /// Registered name
    fn name(&self) -> &'static str;

    /// Load models, start sounds. The scene is not active until this returns.
    fn init(&mut self, ctx: &mut SceneContext);

    /// Advance one frame
    fn update(&mut self, dt: f32, ctx: &mut SceneContext) -> SceneCommand;

    fn handle_input(&mut self, _event: &InputEvent, _ctx: &mut SceneContext) -> SceneCommand {
        SceneCommand::None
    }

    /// Snapshot for the renderer
    fn view(&self) -> SceneView;

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    /// Release every model and stop the scene's sounds
    fn cleanup(&mut self, ctx: &mut SceneContext);

    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::Desktop.game_over(), "game-over");
        assert_eq!(Variant::Ar.game_over(), "game-overAr");
        assert_eq!(Variant::Ar.menu(), "menuAr");
        assert!(!Variant::Desktop.is_ar());
    }

    #[test]
    fn test_switch_command() {
        let cmd = SceneCommand::switch_to(names::END, SceneParams::with_body_part(BodyPart::Head));
        assert_eq!(
            cmd,
            SceneCommand::SwitchTo {
                name: "end".to_string(),
                params: SceneParams {
                    body_part: Some(BodyPart::Head)
                },
            }
        );
    }
}
