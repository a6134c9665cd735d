//! Sound cue gating on top of a host audio backend
//!
//! The backend (Web Audio, a native mixer, or nothing at all) only knows how
//! to play files. Everything about *when* to play lives here: mute and pause
//! gating, the random ambient water playlist, cue volumes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;

/// Ambient water tracks, one is picked at random whenever the last one ends
pub const WATER_TRACKS: [&str; 4] = [
    "assets/sounds/water_09.mp3",
    "assets/sounds/water_10.mp3",
    "assets/sounds/water_11.mp3",
    "assets/sounds/water_12.mp3",
];
const WATER_VOLUME: f32 = 0.1;
const MENU_TRACK: &str = "assets/sounds/main-menu-creepy.mp3";
const MENU_VOLUME: f32 = 0.5;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Blood cell destroyed on impact
    Destroy,
    /// Game over jingle
    GameOver,
}

impl SoundCue {
    pub fn path(&self) -> &'static str {
        match self {
            SoundCue::Destroy => "assets/sounds/pop.mp3",
            SoundCue::GameOver => "assets/sounds/game-over.mp3",
        }
    }

    fn volume(&self) -> f32 {
        match self {
            SoundCue::Destroy => 0.5,
            SoundCue::GameOver => 0.3,
        }
    }
}

/// Host audio playback
pub trait AudioBackend {
    /// Replace the ambient channel with `path` and start it
    fn play_ambient(&mut self, path: &str, volume: f32, looping: bool);
    /// Fire and forget
    fn play_once(&mut self, path: &str, volume: f32);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Whether the ambient channel is currently audible
    fn is_playing(&self) -> bool;
}

/// What the ambient channel should be doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambient {
    Silent,
    /// Random water tracks, chained
    Playlist,
    /// Looping menu music
    Menu,
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    settings: Settings,
    ambient: Ambient,
    paused: bool,
    rng: Pcg32,
    current_track: Option<usize>,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: Settings, seed: u64) -> Self {
        Self {
            backend,
            settings,
            ambient: Ambient::Silent,
            paused: false,
            rng: Pcg32::seed_from_u64(seed),
            current_track: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ambient(&self) -> Ambient {
        self.ambient
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    /// Index into [`WATER_TRACKS`] of the track last started
    pub fn current_track(&self) -> Option<usize> {
        self.current_track
    }

    /// Mute/unmute (the sound icon). Muting stops the ambient channel,
    /// unmuting restarts whatever ambient mode is active.
    pub fn set_muted(&mut self, muted: bool) {
        if self.settings.muted == muted {
            return;
        }
        self.settings.muted = muted;
        if muted {
            self.backend.stop();
        } else {
            self.start_ambient();
        }
    }

    /// Start the random water playlist (game scenes)
    pub fn play_playlist(&mut self) {
        self.ambient = Ambient::Playlist;
        self.paused = false;
        self.start_ambient();
    }

    /// Start the looping menu music
    pub fn play_menu_music(&mut self) {
        self.ambient = Ambient::Menu;
        self.paused = false;
        self.start_ambient();
    }

    /// Play a one-shot effect
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.settings.effective_sfx();
        if vol <= 0.0 {
            return;
        }
        self.backend.play_once(cue.path(), cue.volume() * vol);
    }

    /// Pause the ambient channel. Repeated calls are no-ops.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.backend.pause();
    }

    /// Resume the ambient channel (only audible when not muted)
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if !self.settings.muted {
            self.backend.resume();
        }
    }

    /// Stop everything and forget the ambient mode (scene cleanup)
    pub fn stop(&mut self) {
        self.ambient = Ambient::Silent;
        self.paused = false;
        self.current_track = None;
        self.backend.stop();
    }

    /// Per-frame housekeeping: chain the next water track when one ends
    pub fn tick(&mut self) {
        if self.ambient != Ambient::Playlist || self.paused || self.settings.muted {
            return;
        }
        if !self.backend.is_playing() {
            self.play_random_water();
        }
    }

    fn start_ambient(&mut self) {
        if self.settings.muted || self.paused {
            return;
        }
        match self.ambient {
            Ambient::Silent => {}
            Ambient::Playlist => self.play_random_water(),
            Ambient::Menu => {
                let vol = MENU_VOLUME * self.settings.effective_music();
                self.backend.play_ambient(MENU_TRACK, vol, true);
            }
        }
    }

    fn play_random_water(&mut self) {
        let index = self.rng.random_range(0..WATER_TRACKS.len());
        self.current_track = Some(index);
        let vol = WATER_VOLUME * self.settings.effective_music();
        log::trace!("Ambient track {}", WATER_TRACKS[index]);
        self.backend.play_ambient(WATER_TRACKS[index], vol, false);
    }
}
