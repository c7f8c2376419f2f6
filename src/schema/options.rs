use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::pack::StoryPack;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Post-processing transform applied to every composed line.
///
/// The serde names double as the command-line values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Brevity {
    /// Drop standalone articles.
    Concise,
    #[default]
    Standard,
    /// Normalize spacing around label colons and commas.
    Verbose,
}

impl Brevity {
    pub const ALL: [Brevity; 3] = [Self::Concise, Self::Standard, Self::Verbose];
}

/// How free text is routed into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Controlled vocabulary only.
    #[default]
    Vocabulary,
    /// Controlled vocabulary, then suffix/set noun heuristics for
    /// environment and object words the vocabulary misses.
    VocabularyWithNouns,
}

/// Where the character sheet text ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetPlacement {
    /// Verbatim inside the Main Character section.
    #[default]
    Inline,
    /// As a separate `Character Sheet Reference` line ahead of everything else.
    ReferenceLine,
}

/// A named list of style/quality terms injected into the Style & Quality section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePreset {
    #[default]
    MotionGraphicsAnime,
    CelShadedAnime,
    RealisticCinematic,
    PainterlyFantasy,
    MangaInk,
    ClockworkAlchemist,
    PainterlyAnime,
    GrittyNoir,
    None,
}

impl StylePreset {
    pub const ALL: [StylePreset; 9] = [
        Self::MotionGraphicsAnime,
        Self::CelShadedAnime,
        Self::RealisticCinematic,
        Self::PainterlyFantasy,
        Self::MangaInk,
        Self::ClockworkAlchemist,
        Self::PainterlyAnime,
        Self::GrittyNoir,
        Self::None,
    ];

    /// Key in the style presets data file.
    pub fn id(&self) -> &'static str {
        match self {
            Self::MotionGraphicsAnime => "motion_graphics_anime",
            Self::CelShadedAnime => "cel_shaded_anime",
            Self::RealisticCinematic => "realistic_cinematic",
            Self::PainterlyFantasy => "painterly_fantasy",
            Self::MangaInk => "manga_ink",
            Self::ClockworkAlchemist => "clockwork_alchemist",
            Self::PainterlyAnime => "painterly_anime",
            Self::GrittyNoir => "gritty_noir",
            Self::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MotionGraphicsAnime => "Motion Graphics Anime (default)",
            Self::CelShadedAnime => "Cel-Shaded Anime",
            Self::RealisticCinematic => "Realistic Cinematic",
            Self::PainterlyFantasy => "Painterly Fantasy",
            Self::MangaInk => "Manga Ink",
            Self::ClockworkAlchemist => "The Clockwork Alchemist",
            Self::PainterlyAnime => "Painterly Anime",
            Self::GrittyNoir => "Gritty Noir",
            Self::None => "None",
        }
    }

    pub fn from_id(id: &str) -> Option<StylePreset> {
        Self::ALL.iter().copied().find(|p| p.id() == id)
    }
}

/// Every recognized knob of a prompt invocation.
///
/// All fields have defaults, so a config file only needs the fields it
/// changes:
///
/// ```ron
/// (
///     pack: clockwork_alchemist,
///     brevity: concise,
///     max_terms_per_section: 6,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptOptions {
    pub pack: StoryPack,
    pub style_preset: StylePreset,
    pub brevity: Brevity,
    pub show_labels: bool,
    /// Maximum terms per section; 0 means unlimited.
    pub max_terms_per_section: usize,
    pub classifier: ClassifierStrategy,
    pub sheet_placement: SheetPlacement,
    /// Append generic quality cues (highly detailed, 4k, depth of field).
    pub quality_anchors: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            pack: StoryPack::General,
            style_preset: StylePreset::MotionGraphicsAnime,
            brevity: Brevity::Standard,
            show_labels: true,
            max_terms_per_section: 10,
            classifier: ClassifierStrategy::Vocabulary,
            sheet_placement: SheetPlacement::Inline,
            quality_anchors: false,
        }
    }
}

impl PromptOptions {
    /// Load options from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<PromptOptions, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse options from a RON string.
    pub fn parse_ron(input: &str) -> Result<PromptOptions, OptionsError> {
        Ok(ron::from_str(input)?)
    }
}
