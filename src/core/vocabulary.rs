/// Vocabulary registry — per-category term sets, built-in packs and style presets.
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

use crate::core::matcher::find_terms;
use crate::schema::category::Category;
use crate::schema::options::StylePreset;
use crate::schema::pack::{Pack, StoryPack};

// ---------------------------------------------------------------------------
// Embedded data — compiled into the library
// ---------------------------------------------------------------------------
mod data {
    pub const BASE_VOCABULARY: &str = include_str!("../../vocab_data/base.ron");
    pub const STORY_PACKS: &str = include_str!("../../vocab_data/packs.ron");
    pub const STYLE_PRESETS: &str = include_str!("../../vocab_data/style_presets.ron");
}

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Term sets for every category.
///
/// Terms are stored trimmed and lowercased in ordered sets, so membership
/// is case-insensitive and iteration is deterministic. Merging only ever
/// adds terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    categories: BTreeMap<Category, BTreeSet<String>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The base vocabulary shipped with the crate.
    pub fn builtin() -> Result<Vocabulary, VocabularyError> {
        Self::parse_ron(data::BASE_VOCABULARY)
    }

    /// Load a vocabulary from a RON file shaped like a pack.
    pub fn load_from_ron(path: &Path) -> Result<Vocabulary, VocabularyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a vocabulary from a RON map of category key → terms.
    pub fn parse_ron(input: &str) -> Result<Vocabulary, VocabularyError> {
        let pack: Pack = ron::from_str(input)?;
        let mut vocab = Vocabulary::new();
        vocab.merge_pack(&pack);
        Ok(vocab)
    }

    /// Union a pack into this vocabulary. Returns the number of new terms.
    ///
    /// Unknown category keys and blank terms are skipped. Merging the same
    /// pack again adds nothing.
    pub fn merge_pack(&mut self, pack: &Pack) -> usize {
        let mut added = 0;
        for (key, terms) in &pack.terms {
            let Some(category) = Category::from_key(key) else {
                log::debug!("ignoring unknown pack category '{}'", key);
                continue;
            };
            let set = self.categories.entry(category).or_default();
            for term in terms {
                let term = term.trim().to_lowercase();
                if !term.is_empty() && set.insert(term) {
                    added += 1;
                }
            }
        }
        added
    }

    /// A copy of this vocabulary with `pack` merged in.
    pub fn with_pack(&self, pack: &Pack) -> Vocabulary {
        let mut derived = self.clone();
        derived.merge_pack(pack);
        derived
    }

    /// Terms of a category in lexical order.
    pub fn terms(&self, category: Category) -> impl Iterator<Item = &str> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn contains(&self, category: Category, term: &str) -> bool {
        self.categories
            .get(&category)
            .is_some_and(|set| set.contains(&term.trim().to_lowercase()))
    }

    pub fn len(&self, category: Category) -> usize {
        self.categories.get(&category).map_or(0, BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(BTreeSet::is_empty)
    }

    /// Match this category's terms against `text`.
    pub fn find(&self, text: &str, category: Category) -> Vec<String> {
        find_terms(text, self.terms(category))
    }
}

/// The curated story packs, keyed by pack id.
#[derive(Debug, Clone, Default)]
pub struct PackLibrary {
    packs: FxHashMap<String, Pack>,
}

impl PackLibrary {
    pub fn builtin() -> Result<PackLibrary, VocabularyError> {
        Self::parse_ron(data::STORY_PACKS)
    }

    pub fn parse_ron(input: &str) -> Result<PackLibrary, VocabularyError> {
        let packs: FxHashMap<String, Pack> = ron::from_str(input)?;
        Ok(PackLibrary { packs })
    }

    /// The pack for `id`, or `None` when the data has no entry for it.
    pub fn get(&self, id: StoryPack) -> Option<&Pack> {
        self.packs.get(id.id())
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

/// Fixed term lists per style preset.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    presets: FxHashMap<String, Vec<String>>,
}

impl PresetLibrary {
    pub fn builtin() -> Result<PresetLibrary, VocabularyError> {
        Self::parse_ron(data::STYLE_PRESETS)
    }

    pub fn parse_ron(input: &str) -> Result<PresetLibrary, VocabularyError> {
        let presets: FxHashMap<String, Vec<String>> = ron::from_str(input)?;
        Ok(PresetLibrary { presets })
    }

    /// Terms for a preset; unknown presets and `None` give an empty list.
    pub fn terms(&self, preset: StylePreset) -> &[String] {
        self.presets
            .get(preset.id())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
