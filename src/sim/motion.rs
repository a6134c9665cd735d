//! Per-frame cell motion, boundary reflection and retirement

use glam::Vec3;
use rand::Rng;

use super::entity::{Entity, EntityKind};
use crate::tuning::Tuning;

/// Move one cell by a frame. `player` is the target for seeking cells.
pub fn advance_entity(entity: &mut Entity, player: Option<Vec3>, speed: f32, tuning: &Tuning, rng: &mut impl Rng) {
    match entity.kind {
        EntityKind::Seeking => {
            if let Some(target) = player {
                let to_player = (target - entity.pos).truncate().normalize_or_zero();
                entity.pos.x += to_player.x * tuning.follow_speed;
                entity.pos.y += to_player.y * tuning.follow_speed;
            }
        }
        kind => {
            let lateral = kind.lateral_velocity();
            entity.pos.x += lateral.x;
            entity.pos.y += lateral.y;
        }
    }
    entity.pos.z += speed;

    entity.rotation += Vec3::new(
        rng.random::<f32>() * tuning.rotation_jitter,
        rng.random::<f32>() * tuning.rotation_jitter,
        rng.random::<f32>() * tuning.rotation_jitter,
    );
}

/// Advance every cell, retiring those that passed the player.
///
/// Cells are processed in collection order; retired cells are returned so
/// the caller can release their models. Survivors past the wall radius get
/// their lateral velocity reflected.
pub fn advance_entities(
    entities: &mut Vec<Entity>,
    player: Option<Vec3>,
    speed: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let mut retired = Vec::new();
    entities.retain_mut(|entity| {
        advance_entity(entity, player, speed, tuning, rng);
        if entity.pos.z > tuning.retire_depth {
            retired.push(entity.clone());
            return false;
        }
        if entity.reflect_if_outside(tuning.cell_max_radius) {
            log::trace!("Cell {} bounced off the vessel wall", entity.id);
        }
        true
    });
    retired
}
