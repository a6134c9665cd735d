//! Body part selection
//!
//! Five invisible boxes over the anatomy models. Desktop picks the box under
//! the pointer and launches on click; AR picks the box in the middle of the
//! camera view and launches on a double tap. A selection sticks until another
//! box is hit.

use std::any::Any;

use glam::Vec3;

use super::view::{Camera, Drawable, Highlight, Label, SceneView};
use super::{Scene, SceneCommand, SceneContext, SceneParams, Variant};
use crate::input::{InputEvent, Ray};
use crate::platform::{ModelHandle, paths};
use crate::sim::Aabb;
use crate::tuning::BodyPart;

const PROMPT: &str = "Choose wich body part to contaminate";
const AR_PROMPT_SUFFIX: &str = "\n\nDouble tap to validate";

/// A selectable box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub part: BodyPart,
    pub center: Vec3,
    pub size: Vec3,
}

impl HitBox {
    const fn new(part: BodyPart, center: Vec3, size: Vec3) -> Self {
        Self { part, center, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half(self.center, self.size * 0.5)
    }
}

const ARM_SIZE: Vec3 = Vec3::new(0.15, 0.6, 0.3);

static DESKTOP_BOXES: [HitBox; 5] = [
    HitBox::new(BodyPart::Head, Vec3::new(0.0, 1.6, 0.0), Vec3::splat(0.25)),
    HitBox::new(BodyPart::Chest, Vec3::new(0.0, 1.2, 0.0), Vec3::new(0.3, 0.4, 0.3)),
    HitBox::new(BodyPart::Legs, Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.3, 0.75, 0.3)),
    HitBox::new(BodyPart::LeftArm, Vec3::new(0.25, 1.1, 0.0), ARM_SIZE),
    HitBox::new(BodyPart::RightArm, Vec3::new(-0.25, 1.1, 0.0), ARM_SIZE),
];

/// AR: the body floats 1.4 m in front of the starting pose
static AR_BOXES: [HitBox; 5] = [
    HitBox::new(BodyPart::Head, Vec3::new(0.0, 0.6, -1.4), Vec3::splat(0.25)),
    HitBox::new(BodyPart::Chest, Vec3::new(0.0, 0.2, -1.4), Vec3::new(0.3, 0.4, 0.3)),
    HitBox::new(BodyPart::Legs, Vec3::new(0.0, -0.5, -1.4), Vec3::new(0.3, 0.75, 0.3)),
    HitBox::new(BodyPart::LeftArm, Vec3::new(0.25, 0.1, -1.4), ARM_SIZE),
    HitBox::new(BodyPart::RightArm, Vec3::new(-0.25, 0.1, -1.4), ARM_SIZE),
];

/// Closest box along the ray
pub fn pick(boxes: &[HitBox], ray: &Ray) -> Option<BodyPart> {
    boxes
        .iter()
        .filter_map(|b| b.bounds().ray_distance(ray).map(|t| (t, b.part)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, part)| part)
}

/// Menu scene, desktop or AR
pub struct MenuScene {
    variant: Variant,
    camera: Camera,
    models: Vec<ModelHandle>,
    selected: Option<BodyPart>,
    /// AR: time of the previous tap (ms)
    last_tap_ms: f64,
}

impl MenuScene {
    pub fn new(variant: Variant) -> Self {
        let camera = match variant {
            Variant::Desktop => Camera::perspective(75.0, Vec3::new(0.0, 1.5, 1.5)).look_at(Vec3::new(0.0, 1.0, 0.0)),
            Variant::Ar => Camera::perspective(75.0, Vec3::new(0.0, 0.4, 0.0)).look_at(Vec3::new(0.0, 0.0, -1.4)),
        };
        Self {
            variant,
            camera,
            models: Vec::new(),
            selected: None,
            last_tap_ms: 0.0,
        }
    }

    pub fn selected(&self) -> Option<BodyPart> {
        self.selected
    }

    fn boxes(&self) -> &'static [HitBox; 5] {
        match self.variant {
            Variant::Desktop => &DESKTOP_BOXES,
            Variant::Ar => &AR_BOXES,
        }
    }

    fn model_origin(&self) -> Vec3 {
        match self.variant {
            Variant::Desktop => Vec3::ZERO,
            Variant::Ar => Vec3::new(0.0, -1.0, -1.4),
        }
    }

    /// Hover / gaze. Missing every box keeps the current selection.
    fn hover(&mut self, ray: &Ray) {
        if let Some(part) = pick(self.boxes(), ray) {
            if self.selected != Some(part) {
                log::debug!("Selected {}", part);
                self.selected = Some(part);
            }
        }
    }

    fn launch(&self) -> SceneCommand {
        match self.selected {
            Some(part) => SceneCommand::switch_to(self.variant.game(), SceneParams::with_body_part(part)),
            None => SceneCommand::None,
        }
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        self.variant.menu()
    }

    fn init(&mut self, ctx: &mut SceneContext) {
        for path in [paths::ANGIOLOGY, paths::ARTHROLOGY] {
            match ctx.assets.load_model(path) {
                Ok(model) => self.models.push(model),
                Err(e) => log::error!("Error loading menu model: {}", e),
            }
        }
        ctx.audio.play_menu_music();
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        if self.variant.is_ar() {
            let ray = self.camera.center_ray();
            self.hover(&ray);
        }
        SceneCommand::None
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext) -> SceneCommand {
        match (self.variant, event) {
            (Variant::Desktop, InputEvent::PointerMove(ray)) => self.hover(ray),
            (Variant::Desktop, InputEvent::Click) => return self.launch(),
            (Variant::Ar, InputEvent::CameraPose { position, direction }) => {
                self.camera.set_pose(*position, *direction);
            }
            (Variant::Ar, InputEvent::Tap { time_ms }) => {
                let interval = time_ms - self.last_tap_ms;
                self.last_tap_ms = *time_ms;
                if interval > 0.0 && interval < ctx.tuning.double_tap_ms {
                    return self.launch();
                }
            }
            _ => {}
        }
        SceneCommand::None
    }

    fn view(&self) -> SceneView {
        let origin = self.model_origin();
        let drawables = self
            .models
            .iter()
            .map(|&model| Drawable {
                model,
                position: origin,
                rotation: Vec3::ZERO,
                scale: 1.0,
            })
            .collect();

        let highlights = self
            .selected
            .and_then(|part| self.boxes().iter().find(|b| b.part == part))
            .map(|b| Highlight { position: b.center })
            .into_iter()
            .collect();

        let labels = match self.variant {
            Variant::Desktop => {
                let text = self.selected.map_or(PROMPT, |p| p.as_str());
                vec![Label::new(text, Vec3::new(0.5, 2.0, 0.0), 0.2)]
            }
            Variant::Ar => vec![
                Label::new(format!("{PROMPT}{AR_PROMPT_SUFFIX}"), Vec3::new(-0.5, 0.5, -1.0), 0.05),
                Label::new(
                    self.selected.map_or("", |p| p.as_str()),
                    Vec3::new(0.25, 0.45, -1.0),
                    0.05,
                ),
            ],
        };

        SceneView {
            drawables,
            labels,
            highlights,
            ..Default::default()
        }
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn cleanup(&mut self, ctx: &mut SceneContext) {
        for model in self.models.drain(..) {
            ctx.assets.release(model);
        }
        ctx.audio.stop();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Ambient, AudioManager};
    use crate::platform::headless::{SilentAudio, StaticAssetLoader};
    use crate::settings::Settings;
    use crate::tuning::Tuning;

    fn ctx() -> SceneContext {
        SceneContext {
            assets: Box::new(StaticAssetLoader::new()),
            audio: AudioManager::new(Box::new(SilentAudio::default()), Settings::default(), 3),
            tuning: Tuning::default(),
        }
    }

    fn ray_to(from: Vec3, target: Vec3) -> Ray {
        Ray::new(from, target - from)
    }

    #[test]
    fn test_pick_head_from_camera() {
        let eye = Vec3::new(0.0, 1.5, 1.5);
        assert_eq!(pick(&DESKTOP_BOXES, &ray_to(eye, Vec3::new(0.0, 1.6, 0.0))), Some(BodyPart::Head));
        assert_eq!(pick(&DESKTOP_BOXES, &ray_to(eye, Vec3::new(0.25, 1.1, 0.0))), Some(BodyPart::LeftArm));
        assert_eq!(pick(&DESKTOP_BOXES, &Ray::new(eye, Vec3::Z)), None);
    }

    #[test]
    fn test_click_launches_selected_part() {
        let mut ctx = ctx();
        let mut menu = MenuScene::new(Variant::Desktop);
        menu.init(&mut ctx);
        assert_eq!(ctx.audio.ambient(), Ambient::Menu);

        // Nothing selected: ignored
        assert_eq!(menu.handle_input(&InputEvent::Click, &mut ctx), SceneCommand::None);

        let ray = ray_to(Vec3::new(0.0, 1.5, 1.5), Vec3::new(0.0, 0.5, 0.0));
        menu.handle_input(&InputEvent::PointerMove(ray), &mut ctx);
        assert_eq!(menu.selected(), Some(BodyPart::Legs));
        assert_eq!(menu.view().labels[0].text, "Legs");

        // Moving off the body keeps the selection
        menu.handle_input(&InputEvent::PointerMove(Ray::new(Vec3::ZERO, Vec3::Z)), &mut ctx);
        assert_eq!(
            menu.handle_input(&InputEvent::Click, &mut ctx),
            SceneCommand::switch_to("game", SceneParams::with_body_part(BodyPart::Legs))
        );
    }

    #[test]
    fn test_ar_gaze_and_double_tap() {
        let mut ctx = ctx();
        let mut menu = MenuScene::new(Variant::Ar);
        menu.init(&mut ctx);
        menu.handle_input(
            &InputEvent::CameraPose {
                position: Vec3::new(0.0, 0.6, 0.0),
                direction: Vec3::NEG_Z,
            },
            &mut ctx,
        );
        menu.update(1.0 / 60.0, &mut ctx);
        assert_eq!(menu.selected(), Some(BodyPart::Head));

        assert_eq!(menu.handle_input(&InputEvent::Tap { time_ms: 1000.0 }, &mut ctx), SceneCommand::None);
        // Too slow
        assert_eq!(menu.handle_input(&InputEvent::Tap { time_ms: 1400.0 }, &mut ctx), SceneCommand::None);
        assert_eq!(
            menu.handle_input(&InputEvent::Tap { time_ms: 1550.0 }, &mut ctx),
            SceneCommand::switch_to("gameAr", SceneParams::with_body_part(BodyPart::Head))
        );
    }

    #[test]
    fn test_same_timestamp_is_not_double_tap() {
        let mut ctx = ctx();
        let mut menu = MenuScene::new(Variant::Ar);
        menu.selected = Some(BodyPart::Chest);
        menu.handle_input(&InputEvent::Tap { time_ms: 500.0 }, &mut ctx);
        assert_eq!(menu.handle_input(&InputEvent::Tap { time_ms: 500.0 }, &mut ctx), SceneCommand::None);
    }

    #[test]
    fn test_cleanup_releases_models() {
        let mut ctx = ctx();
        let mut menu = MenuScene::new(Variant::Desktop);
        menu.init(&mut ctx);
        assert_eq!(menu.view().drawables.len(), 2);
        menu.cleanup(&mut ctx);
        assert!(menu.view().drawables.is_empty());
        assert_eq!(ctx.audio.ambient(), Ambient::Silent);
    }
}
