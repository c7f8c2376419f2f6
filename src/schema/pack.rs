use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::category::Category;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("pack must be a mapping of category keys to term lists, got {0}")]
    NotAMapping(&'static str),
}

/// Extra vocabulary keyed by category key (`"OBJECTS"`, `"MOOD"`, ...).
///
/// Keys are kept as written so that packs can carry keys this crate does
/// not know; those are ignored at merge time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pack {
    pub terms: BTreeMap<String, Vec<String>>,
}

impl Pack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add terms for a category, keyed by the category's pack key.
    pub fn with_terms(mut self, category: Category, terms: &[&str]) -> Self {
        self.terms
            .entry(category.key().to_string())
            .or_default()
            .extend(terms.iter().map(|t| t.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.values().all(|terms| terms.is_empty())
    }

    /// Keys that do not name a known category.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.terms
            .keys()
            .filter(|k| Category::from_key(k).is_none())
            .map(|k| k.as_str())
            .collect()
    }

    /// Parse a pack from a RON map.
    pub fn parse_ron(input: &str) -> Result<Pack, PackError> {
        Ok(ron::from_str(input)?)
    }

    /// Parse a pack from JSON.
    ///
    /// The top level must be an object. Array elements that are numbers or
    /// booleans are kept in their textual form; values that are not arrays
    /// are skipped.
    pub fn parse_json(input: &str) -> Result<Pack, PackError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let object = match value {
            serde_json::Value::Object(map) => map,
            other => return Err(PackError::NotAMapping(json_kind(&other))),
        };

        let mut terms = BTreeMap::new();
        for (key, value) in object {
            let serde_json::Value::Array(items) = value else {
                log::warn!("custom pack key '{}' is not a list, skipping", key);
                continue;
            };
            let list: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    serde_json::Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect();
            terms.insert(key, list);
        }

        Ok(Pack { terms })
    }

    /// Load a pack from a file. `.ron` files are read as RON, anything
    /// else as JSON.
    pub fn load_from_file(path: &Path) -> Result<Pack, PackError> {
        let contents = std::fs::read_to_string(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            Self::parse_ron(&contents)
        } else {
            Self::parse_json(&contents)
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

/// A built-in, curated story pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryPack {
    #[default]
    General,
    ClockworkAlchemist,
    NeonCyberpunk,
    MedievalFantasy,
    GothicHorror,
    SpaceOpera,
    NoirDetective,
}

impl StoryPack {
    pub const ALL: [StoryPack; 7] = [
        Self::General,
        Self::ClockworkAlchemist,
        Self::NeonCyberpunk,
        Self::MedievalFantasy,
        Self::GothicHorror,
        Self::SpaceOpera,
        Self::NoirDetective,
    ];

    /// Identifier used in the packs data file and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::ClockworkAlchemist => "clockwork_alchemist",
            Self::NeonCyberpunk => "neon_cyberpunk",
            Self::MedievalFantasy => "medieval_fantasy",
            Self::GothicHorror => "gothic_horror",
            Self::SpaceOpera => "space_opera",
            Self::NoirDetective => "noir_detective",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General (Default)",
            Self::ClockworkAlchemist => "The Clockwork Alchemist",
            Self::NeonCyberpunk => "Neon Sci-Fi / Cyberpunk",
            Self::MedievalFantasy => "Medieval High Fantasy",
            Self::GothicHorror => "Gothic Horror",
            Self::SpaceOpera => "Space Opera",
            Self::NoirDetective => "Noir Detective",
        }
    }

    pub fn from_id(id: &str) -> Option<StoryPack> {
        Self::ALL.iter().copied().find(|p| p.id() == id)
    }
}

/// Where a custom pack comes from, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CustomPackSource {
    #[default]
    None,
    /// JSON pasted as text.
    Pasted(String),
    /// An uploaded file, JSON or RON by extension.
    File(PathBuf),
}

/// Outcome of resolving a custom pack for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomPackStatus {
    NotSupplied,
    Loaded { source: String },
    Invalid { reason: String },
}

impl CustomPackSource {
    /// Resolve into a pack. Failures never propagate: an unreadable or
    /// malformed pack comes back empty with an `Invalid` status.
    pub fn resolve(&self) -> (Pack, CustomPackStatus) {
        let (result, source) = match self {
            Self::None => return (Pack::default(), CustomPackStatus::NotSupplied),
            Self::Pasted(text) if text.trim().is_empty() => {
                return (Pack::default(), CustomPackStatus::NotSupplied)
            }
            Self::Pasted(text) => (Pack::parse_json(text), "pasted text".to_string()),
            Self::File(path) => (Pack::load_from_file(path), path.display().to_string()),
        };

        match result {
            Ok(pack) => (pack, CustomPackStatus::Loaded { source }),
            Err(e) => {
                log::warn!("custom pack from {} is invalid: {}", source, e);
                (
                    Pack::default(),
                    CustomPackStatus::Invalid {
                        reason: format!("failed to parse custom pack from {}: {}", source, e),
                    },
                )
            }
        }
    }
}
