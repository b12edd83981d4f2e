//! Game settings
//!
//! The defaults are the compiled-in configuration. An optional JSON file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_SCORE, TARGET_FPS};
use crate::error::{GameError, GameResult};
use crate::input::{Action, Bindings, Key};

/// Window placement and size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: "Pong".to_string(),
            x: 256,
            y: 256,
            width: 256,
            height: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub path: String,
    pub point_size: u16,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            path: "res/font.ttf".to_string(),
            point_size: 16,
        }
    }
}

/// Default key map: A/Z for player one, K/M for player two
pub fn default_bindings() -> Bindings {
    let mut bindings = Bindings::new();
    bindings
        .bind_key(Key::A, Action::PlayerOneUp)
        .bind_key(Key::Z, Action::PlayerOneDown)
        .bind_key(Key::K, Action::PlayerTwoUp)
        .bind_key(Key::M, Action::PlayerTwoDown)
        .bind_key(Key::Return, Action::Confirm)
        .bind_key(Key::Backspace, Action::Cancel)
        .bind_key(Key::P, Action::Pause)
        .bind_key(Key::Q, Action::Quit);
    bindings
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub font: FontSettings,
    pub bindings: Bindings,

    /// Points needed to win (inclusive)
    pub max_score: u8,
    /// Frame cadence the driver aims for
    pub target_fps: u32,
    /// Fixed serve RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display: DisplaySettings::default(),
            font: FontSettings::default(),
            bindings: default_bindings(),
            max_score: DEFAULT_MAX_SCORE,
            target_fps: TARGET_FPS,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> GameResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to the defaults when the file is
    /// missing or unusable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(GameError::InvalidSettings(format!(
                "window size {}x{} must be non-zero",
                self.display.width, self.display.height
            )));
        }
        let limit = i32::MAX as u32;
        if self.display.width > limit || self.display.height > limit {
            return Err(GameError::InvalidSettings(format!(
                "window size {}x{} exceeds {}",
                self.display.width, self.display.height, limit
            )));
        }
        if self.max_score == 0 {
            return Err(GameError::InvalidSettings("max_score must be at least 1".into()));
        }
        if self.target_fps == 0 {
            return Err(GameError::InvalidSettings("target_fps must be at least 1".into()));
        }
        if self.font.point_size == 0 {
            return Err(GameError::InvalidSettings("font point_size must be at least 1".into()));
        }
        Ok(())
    }
}
