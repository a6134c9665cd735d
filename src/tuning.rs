//! Data-driven game balance
//!
//! Defaults are the values the game ships with. Either table can be
//! overridden from JSON for balancing sessions.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Selectable level, named after the body part being infected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Legs,
    Chest,
    #[serde(rename = "Left Arm")]
    LeftArm,
    #[serde(rename = "Right Arm")]
    RightArm,
}

impl BodyPart {
    pub const ALL: [BodyPart; 5] = [
        BodyPart::Head,
        BodyPart::Legs,
        BodyPart::Chest,
        BodyPart::LeftArm,
        BodyPart::RightArm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Head => "Head",
            BodyPart::Legs => "Legs",
            BodyPart::Chest => "Chest",
            BodyPart::LeftArm => "Left Arm",
            BodyPart::RightArm => "Right Arm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "head" => Some(BodyPart::Head),
            "legs" => Some(BodyPart::Legs),
            "chest" => Some(BodyPart::Chest),
            "left arm" | "left_arm" => Some(BodyPart::LeftArm),
            "right arm" | "right_arm" => Some(BodyPart::RightArm),
            _ => None,
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Depth advance of cells and vessel per frame, also bounds lateral cell speed
    pub speed: f32,
    /// Player lateral speed per frame, also the distance gained per frame
    pub player_speed: f32,
    /// Starting lives
    pub lives: u32,
    /// Distance to cover to win the level
    pub distance: f32,
}

impl LevelParams {
    const fn new(speed: f32, player_speed: f32, lives: u32, distance: f32) -> Self {
        Self {
            speed,
            player_speed,
            lives,
            distance,
        }
    }
}

/// One entry per body part, complete by construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    #[serde(rename = "Head")]
    pub head: LevelParams,
    #[serde(rename = "Legs")]
    pub legs: LevelParams,
    #[serde(rename = "Chest")]
    pub chest: LevelParams,
    #[serde(rename = "Left Arm")]
    pub left_arm: LevelParams,
    #[serde(rename = "Right Arm")]
    pub right_arm: LevelParams,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::desktop()
    }
}

impl LevelTable {
    /// Keyboard-controlled game
    pub fn desktop() -> Self {
        Self {
            head: LevelParams::new(0.2, 0.15, 3, 1000.0),
            legs: LevelParams::new(0.3, 0.2, 2, 700.0),
            chest: LevelParams::new(0.4, 0.25, 3, 600.0),
            left_arm: LevelParams::new(0.5, 0.3, 3, 600.0),
            right_arm: LevelParams::new(0.4, 0.35, 2, 600.0),
        }
    }

    /// Camera-steered AR game (legs are harder)
    pub fn ar() -> Self {
        Self {
            legs: LevelParams::new(0.3, 0.2, 1, 700.0),
            ..Self::desktop()
        }
    }

    pub fn get(&self, part: BodyPart) -> &LevelParams {
        match part {
            BodyPart::Head => &self.head,
            BodyPart::Legs => &self.legs,
            BodyPart::Chest => &self.chest,
            BodyPart::LeftArm => &self.left_arm,
            BodyPart::RightArm => &self.right_arm,
        }
    }

    /// Parse a table from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for part in BodyPart::ALL {
            let level = self.get(part);
            if level.lives == 0 {
                return Err(ConfigError::Invalid {
                    field: "lives",
                    reason: format!("{part} starts with no lives"),
                });
            }
            if level.player_speed <= 0.0 || level.distance <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "distance",
                    reason: format!("{part} can never be completed"),
                });
            }
        }
        Ok(())
    }
}

/// Global balance knobs shared by every level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawn_interval: f32,
    pub spawn_min_radius: f32,
    pub spawn_max_radius: f32,
    pub spawn_depth: f32,
    pub linear_probability: f64,
    pub seeking_probability: f64,
    pub cell_max_radius: f32,
    pub retire_depth: f32,
    pub follow_speed: f32,
    pub rotation_jitter: f32,
    pub player_max_radius: f32,
    pub vessel_wrap_depth: f32,
    /// Particles per blood spray
    pub spray_particles: usize,
    /// Blood spray lifetime (seconds)
    pub spray_duration: f32,
    /// AR menu: max gap between two taps of a double tap (ms)
    pub double_tap_ms: f64,
    pub levels: LevelTable,
    pub ar_levels: LevelTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            spawn_min_radius: SPAWN_MIN_RADIUS,
            spawn_max_radius: SPAWN_MAX_RADIUS,
            spawn_depth: SPAWN_DEPTH,
            linear_probability: LINEAR_PROBABILITY,
            seeking_probability: SEEKING_PROBABILITY,
            cell_max_radius: CELL_MAX_RADIUS,
            retire_depth: RETIRE_DEPTH,
            follow_speed: FOLLOW_SPEED,
            rotation_jitter: ROTATION_JITTER,
            player_max_radius: PLAYER_MAX_RADIUS,
            vessel_wrap_depth: VESSEL_WRAP_DEPTH,
            spray_particles: 50,
            spray_duration: 0.5,
            double_tap_ms: 300.0,
            levels: LevelTable::desktop(),
            ar_levels: LevelTable::ar(),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        if tuning.spawn_interval <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "spawn_interval",
                reason: format!("must be positive, got {}", tuning.spawn_interval),
            });
        }
        if tuning.spawn_min_radius > tuning.spawn_max_radius {
            return Err(ConfigError::Invalid {
                field: "spawn_min_radius",
                reason: "greater than spawn_max_radius".to_string(),
            });
        }
        for (field, p) in [
            ("linear_probability", tuning.linear_probability),
            ("seeking_probability", tuning.seeking_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{p} is not a probability"),
                });
            }
        }
        tuning.levels.validate()?;
        tuning.ar_levels.validate()?;
        Ok(tuning)
    }

    /// Level table for the given control mode
    pub fn levels_for(&self, ar: bool) -> &LevelTable {
        if ar { &self.ar_levels } else { &self.levels }
    }
}
