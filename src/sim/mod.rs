//! Obstacle simulation
//!
//! All gameplay logic of the tube lives here. This module must stay
//! deterministic for a given seed:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the asset loader trait

pub mod collision;
pub mod entity;
pub mod motion;
pub mod particles;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_collision};
pub use entity::{Entity, EntityKind};
pub use particles::{BloodSpray, Particle};
pub use player::Player;
pub use spawner::{SpawnRequest, Spawner, roll_spawn, spawn_position};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{CameraPose, TickInput, tick};
