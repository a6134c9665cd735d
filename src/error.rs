//! Error types
//!
//! Asset failures are caught where the load was issued and never reach the
//! frame loop. Scene lookup failures abort only the requested transition.

use thiserror::Error;

/// Scene lifecycle errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// No constructor registered under that name
    #[error("Scene {0} not found")]
    NotFound(String),

    /// The target scene needs a level and none was passed
    #[error("Scene {0} requires a body part")]
    MissingBodyPart(String),
}

/// Asset loading errors reported by the loader collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Nothing exists at that path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The file exists but could not be decoded
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Tuning / level table parse errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed fine but a value makes no sense
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
