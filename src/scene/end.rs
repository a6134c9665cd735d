//! Level complete: the infected organ, slowly spinning, with a caption

use std::any::Any;

use glam::Vec3;

use super::view::{Camera, Drawable, Label, SceneView};
use super::{Scene, SceneCommand, SceneContext, Variant};
use crate::platform::ModelHandle;
use crate::tuning::BodyPart;

/// Y rotation per frame
const SPIN: f32 = 0.01;

/// What the end screen shows for a body part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganInfo {
    pub model: &'static str,
    pub scale: f32,
    pub caption: &'static str,
}

pub fn organ_info(part: BodyPart) -> OrganInfo {
    match part {
        BodyPart::Head => OrganInfo {
            model: "assets/models/brain.glb",
            scale: 0.005,
            caption: "The brain is the body's control center, responsible for thoughts, memory, and emotion.",
        },
        BodyPart::Legs => OrganInfo {
            model: "assets/models/intestine.glb",
            scale: 1.0,
            caption: "The intestines are responsible for absorbing nutrients from food.",
        },
        BodyPart::Chest => OrganInfo {
            model: "assets/models/lungs.glb",
            scale: 4.0,
            caption: "The lungs are responsible for breathing, which brings oxygen into the body.",
        },
        BodyPart::LeftArm => OrganInfo {
            model: "assets/models/heart.glb",
            scale: 0.9,
            caption: "The heart pumps blood throughout the body, delivering oxygen and nutrients.",
        },
        BodyPart::RightArm => OrganInfo {
            model: "assets/models/liver.glb",
            scale: 0.01,
            caption: "The liver processes nutrients and filters out harmful substances.",
        },
    }
}

pub struct EndScene {
    variant: Variant,
    body_part: BodyPart,
    info: OrganInfo,
    camera: Camera,
    model: Option<ModelHandle>,
    yaw: f32,
}

impl EndScene {
    pub fn new(variant: Variant, body_part: BodyPart) -> Self {
        Self {
            variant,
            body_part,
            info: organ_info(body_part),
            camera: Camera::perspective(75.0, Vec3::new(0.0, 1.5, 2.0)).look_at(Vec3::new(0.0, 1.0, 0.0)),
            model: None,
            yaw: 0.0,
        }
    }

    pub fn body_part(&self) -> BodyPart {
        self.body_part
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

impl Scene for EndScene {
    fn name(&self) -> &'static str {
        self.variant.end()
    }

    fn init(&mut self, ctx: &mut SceneContext) {
        match ctx.assets.load_model(self.info.model) {
            Ok(model) => self.model = Some(model),
            Err(e) => log::error!("Error loading {} model: {}", self.body_part, e),
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SceneContext) -> SceneCommand {
        if self.model.is_some() {
            self.yaw += SPIN;
        }
        SceneCommand::None
    }

    fn view(&self) -> SceneView {
        SceneView {
            drawables: self
                .model
                .map(|model| Drawable {
                    model,
                    position: Vec3::new(0.0, 1.0, 0.0),
                    rotation: Vec3::new(0.0, self.yaw, 0.0),
                    scale: self.info.scale,
                })
                .into_iter()
                .collect(),
            labels: vec![Label::new(self.info.caption, Vec3::new(0.5, 2.0, 0.0), 0.2)],
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
        if let Some(model) = self.model.take() {
            ctx.assets.release(model);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
