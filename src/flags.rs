//! Feature flags resolved once at round start
//!
//! The simulation never evaluates flags. A `FlagSource` is queried once and the
//! answers are frozen into a `FlagSnapshot` shared with the presentation layer.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::{ContentError, Difficulty};

pub const MUTE_SOUND_FLAG: &str = "mute-sound-dark-skies";
pub const TRIVIA_EASY_FLAG: &str = "trivia-easy-enabled";
pub const TRIVIA_MEDIUM_FLAG: &str = "trivia-medium-enabled";
pub const TRIVIA_HARD_FLAG: &str = "trivia-hard-enabled";

/// Anything that can answer boolean flag queries
pub trait FlagSource {
    fn bool_variation(&self, key: &str, default: bool) -> bool;
}

/// Flags from a fixed key/value map (JSON object on disk)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticFlags {
    values: HashMap<String, bool>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: bool) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| ContentError::parse(path, e))
    }

    /// Load `path`, or answer every query with its default
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default flag values");
            Self::default()
        })
    }
}

impl FlagSource for StaticFlags {
    fn bool_variation(&self, key: &str, default: bool) -> bool {
        self.values.get(key).copied().unwrap_or(default)
    }
}

/// Resolved flag values for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSnapshot {
    pub mute_sound: bool,
    /// Never empty
    pub trivia_difficulties: Vec<Difficulty>,
}

impl Default for FlagSnapshot {
    fn default() -> Self {
        Self {
            mute_sound: false,
            trivia_difficulties: Difficulty::ALL.to_vec(),
        }
    }
}

impl FlagSnapshot {
    pub fn resolve(source: &dyn FlagSource) -> Self {
        let mute_sound = source.bool_variation(MUTE_SOUND_FLAG, false);

        let tiers = [
            (TRIVIA_EASY_FLAG, Difficulty::Easy),
            (TRIVIA_MEDIUM_FLAG, Difficulty::Medium),
            (TRIVIA_HARD_FLAG, Difficulty::Hard),
        ];
        let mut trivia_difficulties: Vec<Difficulty> = tiers
            .into_iter()
            .filter(|(key, _)| source.bool_variation(key, true))
            .map(|(_, difficulty)| difficulty)
            .collect();

        if trivia_difficulties.is_empty() {
            log::warn!("No trivia difficulties enabled, falling back to all difficulties");
            trivia_difficulties = Difficulty::ALL.to_vec();
        }

        log::info!(
            "Flags: mute_sound={} trivia={:?}",
            mute_sound,
            trivia_difficulties
                .iter()
                .map(Difficulty::as_str)
                .collect::<Vec<_>>()
        );

        Self {
            mute_sound,
            trivia_difficulties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let snapshot = FlagSnapshot::resolve(&StaticFlags::new());
        assert_eq!(snapshot, FlagSnapshot::default());
    }

    #[test]
    fn test_mute_and_tiers() {
        let flags = StaticFlags::new()
            .with(MUTE_SOUND_FLAG, true)
            .with(TRIVIA_EASY_FLAG, false);
        let snapshot = FlagSnapshot::resolve(&flags);
        assert!(snapshot.mute_sound);
        assert_eq!(
            snapshot.trivia_difficulties,
            vec![Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn test_all_tiers_disabled_enables_all() {
        let flags = StaticFlags::new()
            .with(TRIVIA_EASY_FLAG, false)
            .with(TRIVIA_MEDIUM_FLAG, false)
            .with(TRIVIA_HARD_FLAG, false);
        let snapshot = FlagSnapshot::resolve(&flags);
        assert_eq!(snapshot.trivia_difficulties, Difficulty::ALL.to_vec());
    }

    #[test]
    fn test_parse_flag_file() {
        let flags: StaticFlags =
            serde_json::from_str(r#"{ "mute-sound-dark-skies": true }"#).expect("valid json");
        assert!(flags.bool_variation(MUTE_SOUND_FLAG, false));
        assert!(flags.bool_variation("unknown", true));
    }
}
