//! Player audio preferences
//!
//! Read from JSON next to the game; a missing or unreadable file means
//! defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::ContentError;
use crate::flags::FlagSnapshot;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 0.7,
            music_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Fold in flag-driven overrides for this round
    pub fn apply_flags(&mut self, flags: &FlagSnapshot) {
        if flags.mute_sound {
            log::info!("Sound muted by flag");
            self.muted = true;
        }
    }

    /// Effective sound effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| ContentError::parse(path, e))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}
