/// Section composition — groups buckets into labeled, capped prompt sections.
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::core::classifier::{normalize_whitespace, Buckets};
use crate::schema::category::Category;
use crate::schema::options::{PromptOptions, SheetPlacement};

/// Generic quality cues appended when quality anchors are enabled.
pub const QUALITY_ANCHORS: &[&str] = &["highly detailed", "4k", "depth of field"];

/// At most this many extracted names lead the character section.
const MAX_NAMES: usize = 2;

/// The semantic groupings of a composed prompt, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CharacterSheet,
    Character,
    Objects,
    Environment,
    LightingColor,
    CameraComposition,
    Mood,
    StyleQuality,
    Negative,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CharacterSheet => "Character Sheet Reference",
            Self::Character => "Main Character",
            Self::Objects => "Secondary / Objects",
            Self::Environment => "Environment / Background",
            Self::LightingColor => "Lighting & Color",
            Self::CameraComposition => "Camera & Composition",
            Self::Mood => "Mood / Emotion",
            Self::StyleQuality => "Style & Quality",
            Self::Negative => "Negative",
        }
    }
}

/// One entry of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionItem {
    /// A matched or injected term; subject to dedup and the section cap.
    Term(String),
    /// Caller-supplied text passed through verbatim; never capped.
    Literal(String),
}

impl SectionItem {
    pub fn text(&self) -> &str {
        match self {
            Self::Term(s) | Self::Literal(s) => s,
        }
    }
}

/// A labeled line of the composed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Items joined with ", ".
    pub fn joined(&self) -> String {
        self.items
            .iter()
            .map(SectionItem::text)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.joined().trim().is_empty()
    }

    /// Number of term items (literals excluded).
    pub fn term_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i, SectionItem::Term(_)))
            .count()
    }
}

/// Builds a section's item list: dedups terms case-insensitively, counts
/// them against the cap, and lets literals through untouched.
struct SectionBuilder {
    kind: SectionKind,
    items: Vec<SectionItem>,
    seen: FxHashSet<String>,
    cap: usize,
}

impl SectionBuilder {
    fn new(kind: SectionKind, cap: usize) -> Self {
        Self {
            kind,
            items: Vec::new(),
            seen: FxHashSet::default(),
            cap,
        }
    }

    fn full(&self) -> bool {
        self.cap > 0 && self.seen.len() >= self.cap
    }

    fn terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            if self.full() {
                break;
            }
            let term = term.as_ref().trim();
            if term.is_empty() || !self.seen.insert(term.to_lowercase()) {
                continue;
            }
            self.items.push(SectionItem::Term(term.to_string()));
        }
        self
    }

    fn literal(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
            self.items.push(SectionItem::Literal(text.to_string()));
        }
        self
    }

    fn build(self) -> Section {
        Section {
            kind: self.kind,
            items: self.items,
        }
    }
}

/// Caller-supplied free text for composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeInput<'a> {
    pub character_sheet: Option<&'a str>,
    pub negative: Option<&'a str>,
    pub preset_terms: &'a [String],
}

/// Assemble sections from buckets, in canonical order, omitting empty ones.
///
/// Every section's terms are capped at `options.max_terms_per_section`
/// (0 = unlimited). Literal text (character sheet, negative prompt) is
/// never capped.
pub fn compose(buckets: &Buckets, options: &PromptOptions, input: ComposeInput<'_>) -> Vec<Section> {
    let cap = options.max_terms_per_section;
    let mut sections = Vec::new();

    let inline_sheet = match options.sheet_placement {
        SheetPlacement::Inline => input.character_sheet,
        SheetPlacement::ReferenceLine => {
            let sheet = input.character_sheet.map(normalize_whitespace);
            sections.push(
                SectionBuilder::new(SectionKind::CharacterSheet, 0)
                    .literal(sheet.as_deref())
                    .build(),
            );
            None
        }
    };

    sections.push(
        SectionBuilder::new(SectionKind::Character, cap)
            .terms(buckets.names.iter().take(MAX_NAMES))
            .terms(buckets.get(Category::CharRoles))
            .literal(inline_sheet)
            .terms(buckets.get(Category::PhysAttr))
            .terms(buckets.get(Category::Clothing))
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::Objects, cap)
            .terms(buckets.get(Category::Objects))
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::Environment, cap)
            .terms(buckets.get(Category::Environments))
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::LightingColor, cap)
            .terms(buckets.get(Category::Colors))
            .terms(buckets.get(Category::Lighting))
            .terms(buckets.get(Category::TimeOfDay))
            .terms(buckets.get(Category::Weather))
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::CameraComposition, cap)
            .terms(buckets.get(Category::Camera))
            .terms(buckets.get(Category::Composition))
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::Mood, cap)
            .terms(buckets.get(Category::Mood))
            .build(),
    );

    let anchors: &[&str] = if options.quality_anchors {
        QUALITY_ANCHORS
    } else {
        &[]
    };
    sections.push(
        SectionBuilder::new(SectionKind::StyleQuality, cap)
            .terms(input.preset_terms)
            .terms(buckets.get(Category::Style))
            .terms(buckets.get(Category::Quality))
            .terms(buckets.get(Category::Effects))
            .terms(anchors)
            .build(),
    );

    sections.push(
        SectionBuilder::new(SectionKind::Negative, 0)
            .literal(input.negative)
            .build(),
    );

    sections.retain(|s| !s.is_empty());
    sections
}
