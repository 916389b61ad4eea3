//! Game settings and preferences
//!
//! The simulation only needs the playfield size, which it asks for every
//! tick through [`SettingsProvider`]. Everything else here belongs to the
//! embedding application.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};
use crate::error::CollaboratorError;

/// Source of the current playfield resolution
pub trait SettingsProvider {
    fn world_size(&self) -> (i32, i32);
}

/// Fixed playfield size (800x600 by default)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBounds {
    pub width: i32,
    pub height: i32,
}

impl FixedBounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl Default for FixedBounds {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT)
    }
}

impl SettingsProvider for FixedBounds {
    fn world_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub world_width: i32,
    pub world_height: i32,

    // === HUD ===
    /// Show the in-game HUD
    pub show_hud: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            show_hud: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl SettingsProvider for Settings {
    fn world_size(&self) -> (i32, i32) {
        (self.world_width, self.world_height)
    }
}

impl Settings {
    /// Effective sound effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CollaboratorError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
