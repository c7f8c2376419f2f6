use serde::{Deserialize, Serialize};

/// A visual vocabulary category.
///
/// Each category owns one term set in the vocabulary registry and is
/// addressed in packs by its upper-case key (e.g. `"OBJECTS"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    CharRoles,
    Clothing,
    PhysAttr,
    Objects,
    Environments,
    TimeOfDay,
    Weather,
    Lighting,
    Colors,
    Camera,
    Composition,
    Mood,
    Style,
    Quality,
    Effects,
}

impl Category {
    /// Every category, in registry order.
    pub const ALL: [Category; 15] = [
        Self::CharRoles,
        Self::Clothing,
        Self::PhysAttr,
        Self::Objects,
        Self::Environments,
        Self::TimeOfDay,
        Self::Weather,
        Self::Lighting,
        Self::Colors,
        Self::Camera,
        Self::Composition,
        Self::Mood,
        Self::Style,
        Self::Quality,
        Self::Effects,
    ];

    /// Returns the pack key for this category (e.g., "CHAR_ROLES").
    pub fn key(&self) -> &'static str {
        match self {
            Self::CharRoles => "CHAR_ROLES",
            Self::Clothing => "CLOTHING",
            Self::PhysAttr => "PHYS_ATTR",
            Self::Objects => "OBJECTS",
            Self::Environments => "ENVIRONMENTS",
            Self::TimeOfDay => "TIME_OF_DAY",
            Self::Weather => "WEATHER",
            Self::Lighting => "LIGHTING",
            Self::Colors => "COLORS",
            Self::Camera => "CAMERA",
            Self::Composition => "COMPOSITION",
            Self::Mood => "MOOD",
            Self::Style => "STYLE",
            Self::Quality => "QUALITY",
            Self::Effects => "EFFECTS",
        }
    }

    /// Looks up a category by its pack key. Keys are matched exactly.
    pub fn from_key(key: &str) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}
