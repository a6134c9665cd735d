//! Game state and core simulation types
//!
//! Everything one game scene simulates lives here, owned by that scene.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Entity;
use super::particles::BloodSpray;
use super::player::Player;
use super::spawner::{SpawnRequest, Spawner};
use crate::platform::ModelHandle;
use crate::tuning::{LevelParams, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Pause menu open
    Paused,
    /// Out of lives
    GameOver,
    /// Distance reached
    Won,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Spawned { id: u32 },
    /// Model load failed, request dropped
    SpawnSkipped,
    Retired { id: u32 },
    /// Player hit a cell; `lives` is what remains
    Collided { id: u32, lives: u32 },
    GameOver,
    DistanceReached,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub level: LevelParams,
    pub phase: GamePhase,
    pub player: Player,
    /// Live cells in spawn order
    pub entities: Vec<Entity>,
    pub spawner: Spawner,
    /// Distance travelled so far
    pub distance: f32,
    /// Depth offset of the scrolling vessel model
    pub vessel_depth: f32,
    /// Visual particles (not gameplay-affecting)
    pub sprays: Vec<BloodSpray>,
    /// Page hidden: spawn timer suspended
    pub hidden: bool,
    pub rng: Pcg32,
    /// Simulation frame counter
    pub frames: u64,
    next_id: u32,
}

impl GameState {
    pub fn new(level: LevelParams, tuning: &Tuning, seed: u64) -> Self {
        Self {
            level,
            phase: GamePhase::Playing,
            player: Player::new(level.lives),
            entities: Vec::new(),
            spawner: Spawner::new(tuning.spawn_interval),
            distance: 0.0,
            vessel_depth: 0.0,
            sprays: Vec::new(),
            hidden: false,
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Materialize a spawn request with a loaded model
    pub fn spawn(&mut self, request: SpawnRequest, model: ModelHandle) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            pos: request.pos,
            rotation: glam::Vec3::new(0.0, 0.0, request.rotation_z),
            kind: request.kind,
            model,
        });
        id
    }

    /// Open the pause menu. Idempotent: the spawn timer is simply cleared again.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
        self.spawner.stop();
    }

    /// Close the pause menu and restore the spawn timer.
    ///
    /// Cells and positions are untouched.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
        self.arm_spawner();
    }

    /// Reset lives and unpause. The cells already in the tube stay.
    pub fn restart(&mut self) {
        self.player.lives = self.level.lives;
        self.phase = GamePhase::Playing;
        self.arm_spawner();
    }

    /// Page visibility changed
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.spawner.stop();
        } else {
            self.arm_spawner();
        }
    }

    /// Start the spawn timer if the run is live and visible
    pub fn arm_spawner(&mut self) {
        if self.phase == GamePhase::Playing && !self.hidden {
            self.spawner.start();
        }
    }
}
