//! Per-frame simulation tick
//!
//! Order within a frame is fixed: spawn drain, vessel scroll, player,
//! cells (motion, retirement, reflection), collision, win check.

use glam::Vec3;

use super::collision::first_collision;
use super::motion::advance_entities;
use super::particles::BloodSpray;
use super::state::{GameEvent, GamePhase, GameState};
use crate::platform::{AssetLoader, paths};
use crate::tuning::Tuning;

/// AR device pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub direction: Vec3,
}

/// Per-tick inputs that are not part of the state
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// AR: the player follows this pose instead of the arrow keys
    pub camera: Option<CameraPose>,
    /// Spawn blood sprays on impact
    pub particles: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            camera: None,
            particles: true,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    assets: &mut dyn AssetLoader,
    tuning: &Tuning,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Sprays keep animating through the pause menu
    state.sprays.retain_mut(|spray| spray.update(dt));

    if state.phase != GamePhase::Playing {
        return events;
    }
    state.frames += 1;
    let speed = state.level.speed;

    // --- SPAWN ---
    state.spawner.advance(dt, &mut state.rng, speed, tuning);
    let requests: Vec<_> = state.spawner.drain().collect();
    for request in requests {
        match assets.load_model(paths::BLOOD_CELL) {
            Ok(model) => {
                let id = state.spawn(request, model);
                log::trace!("Spawned cell {} at {:?} ({:?})", id, request.pos, request.kind);
                events.push(GameEvent::Spawned { id });
            }
            Err(e) => {
                log::warn!("Error loading blood cell model: {}", e);
                events.push(GameEvent::SpawnSkipped);
            }
        }
    }

    // --- VESSEL ---
    state.vessel_depth += speed;
    if state.vessel_depth > tuning.vessel_wrap_depth {
        state.vessel_depth = 0.0;
    }

    // --- PLAYER ---
    if state.player.is_loaded() {
        state.distance += state.level.player_speed;
        match input.camera {
            Some(pose) => state
                .player
                .follow_camera(pose.position, pose.direction, tuning.player_max_radius),
            None => state
                .player
                .steer(state.level.player_speed, tuning.player_max_radius),
        }
    }

    // --- CELLS ---
    let target = state.player.is_loaded().then_some(state.player.pos);
    let retired = advance_entities(&mut state.entities, target, speed, tuning, &mut state.rng);
    for cell in retired {
        log::trace!("Retired cell {}", cell.id);
        assets.release(cell.model);
        events.push(GameEvent::Retired { id: cell.id });
    }

    // --- COLLISION ---
    if let Some(bounds) = state.player.bounds() {
        if let Some(index) = first_collision(&bounds, &state.entities) {
            let cell = state.entities.remove(index);
            assets.release(cell.model);
            if input.particles {
                let spray = BloodSpray::new(cell.pos, tuning.spray_particles, tuning.spray_duration, &mut state.rng);
                state.sprays.push(spray);
            }

            let last_life = state.player.lose_life();
            log::debug!("Hit cell {}, {} lives left", cell.id, state.player.lives);
            events.push(GameEvent::Collided {
                id: cell.id,
                lives: state.player.lives,
            });

            if last_life {
                state.phase = GamePhase::GameOver;
                state.spawner.stop();
                events.push(GameEvent::GameOver);
                return events;
            }
        }
    }

    // --- WIN ---
    if state.distance >= state.level.distance {
        state.phase = GamePhase::Won;
        state.spawner.stop();
        events.push(GameEvent::DistanceReached);
    }

    events
}
