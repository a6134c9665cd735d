//! Game settings and preferences
//!
//! Toggled from the host UI (sound icon, options). Not persisted.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Blood spray particles on collision
    pub particles: bool,

    // === Audio ===
    /// Sound icon state; muted blocks every playback call
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music / ambient volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            muted: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
        }
    }
}

impl Settings {
    /// Parse settings handed over by the host page
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.clamp_volumes();
        Ok(settings)
    }

    fn clamp_volumes(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Effective sound effect volume multiplier
    pub fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective ambient volume multiplier
    pub fn effective_music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_silences_everything() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx(), 0.0);
        assert_eq!(settings.effective_music(), 0.0);
    }

    #[test]
    fn test_from_json_clamps_volumes() {
        let settings = Settings::from_json(r#"{ "master_volume": 3.0, "sfx_volume": 0.5 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.effective_sfx(), 0.5);
        assert!(settings.particles);
    }
}
