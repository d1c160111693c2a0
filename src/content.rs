//! Trivia content shown when the player hits an obstacle
//!
//! Loaded from a JSON array of `{ "text": ..., "difficulty": ... }` objects.
//! Failures here never reach the simulation: a missing or broken file falls
//! back to the built-in deck.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors reading content and preference files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Trivia difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaItem {
    pub text: String,
    /// `None` for an unrecognized tier; such items never pass a filter
    #[serde(default = "default_difficulty", deserialize_with = "lenient_difficulty")]
    pub difficulty: Option<Difficulty>,
}

impl TriviaItem {
    pub fn new(text: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            text: text.into(),
            difficulty: Some(difficulty),
        }
    }

    /// Tier name for display
    pub fn difficulty_name(&self) -> &'static str {
        self.difficulty.as_ref().map_or("unknown", Difficulty::as_str)
    }
}

fn default_difficulty() -> Option<Difficulty> {
    Some(Difficulty::Easy)
}

/// Accept any JSON value; only the known tier names map to a difficulty
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let difficulty = value.as_str().and_then(Difficulty::from_name);
    if difficulty.is_none() {
        log::debug!("Unrecognized trivia difficulty {value}");
    }
    Ok(difficulty)
}

/// An ordered collection of trivia items; the sim picks by index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriviaDeck {
    items: Vec<TriviaItem>,
}

impl TriviaDeck {
    pub fn new(items: Vec<TriviaItem>) -> Self {
        Self { items }
    }

    /// Deck used when no content file can be loaded
    pub fn builtin() -> Self {
        let items = [
            ("Space is completely silent: there is no air to carry sound.", Difficulty::Easy),
            ("A day on Venus is longer than its year.", Difficulty::Medium),
            ("Neutron stars can spin hundreds of times per second.", Difficulty::Hard),
        ];
        Self::new(
            items
                .into_iter()
                .map(|(text, difficulty)| TriviaItem::new(text, difficulty))
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        Self::from_json(&json).map_err(|e| ContentError::parse(path, e))
    }

    /// Load `path`, falling back to the built-in deck on any failure
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(deck) => {
                log::info!("Loaded {} trivia items from {}", deck.len(), path.display());
                deck
            }
            Err(e) => {
                log::warn!("{e}; using built-in trivia");
                Self::builtin()
            }
        }
    }

    /// Keep items whose difficulty is enabled.
    /// If nothing matches, the whole deck is kept.
    pub fn filtered(&self, enabled: &[Difficulty]) -> Self {
        let items: Vec<TriviaItem> = self
            .items
            .iter()
            .filter(|item| item.difficulty.is_some_and(|d| enabled.contains(&d)))
            .cloned()
            .collect();

        if items.is_empty() {
            log::warn!("No trivia matches enabled difficulties, keeping all questions");
            return self.clone();
        }

        log::info!(
            "Filtered trivia: {} questions from {} total",
            items.len(),
            self.items.len()
        );
        Self { items }
    }

    pub fn get(&self, index: usize) -> Option<&TriviaItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriviaItem> {
        self.items.iter()
    }
}
