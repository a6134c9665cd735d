//! Input events delivered by the host
//!
//! The host translates DOM events (or native window events) into these and
//! hands them to the scene manager. Scenes consume them on the next frame.

use glam::Vec3;
use serde::Serialize;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// "p" toggles the pause menu
    Pause,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "p" => Some(Key::Pause),
            _ => None,
        }
    }
}

/// Buttons on the pause menu and the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiAction {
    /// AR game: open the pause menu
    Pause,
    Resume,
    Restart,
    /// Leave the game for the menu
    Exit,
    /// Game-over screen: back to the menu
    MainMenu,
}

impl UiAction {
    /// Parse a host button id
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pause" | "Pause" => Some(UiAction::Pause),
            "resume" | "Resume" => Some(UiAction::Resume),
            "restart" | "Restart" => Some(UiAction::Restart),
            "exit" | "Exit" => Some(UiAction::Exit),
            "menu" | "Main Menu" => Some(UiAction::MainMenu),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UiAction::Pause => "Pause",
            UiAction::Resume => "Resume",
            UiAction::Restart => "Restart",
            UiAction::Exit => "Exit",
            UiAction::MainMenu => "Main Menu",
        }
    }
}

/// A world-space picking ray (the host unprojects the pointer)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Need not be normalized
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// Host input
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer moved; carries the picking ray under the cursor
    PointerMove(Ray),
    /// Click / mouse button release
    Click,
    /// Touch start, with the host timestamp in milliseconds
    Tap { time_ms: f64 },
    /// A UI button was pressed
    Action(UiAction),
    /// AR device pose, sampled each frame
    CameraPose { position: Vec3, direction: Vec3 },
    /// Page visibility changed
    Visibility { hidden: bool },
    /// Sound icon toggled
    SetMuted(bool),
}

/// Held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// Apply a key transition; returns false for keys that are not movement
    pub fn apply(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::Pause => return false,
        }
        true
    }
}
