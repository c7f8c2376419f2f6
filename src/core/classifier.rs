/// Bucketing — routes free text into per-category term lists.
///
/// The vocabulary pass always runs. The noun heuristic pass is layered on
/// top when `ClassifierStrategy::VocabularyWithNouns` is selected.
use rustc_hash::FxHashMap;

use crate::core::names::extract_names;
use crate::core::vocabulary::Vocabulary;
use crate::schema::category::Category;
use crate::schema::options::ClassifierStrategy;

/// Token separators for the noun heuristic.
const TOKEN_SEPARATORS: &[char] = &[',', '.', ';', ':', '(', ')', '[', ']', '{', '}', '-', '_', '/'];

/// Nouns that read as places without a telling suffix.
const ENVIRONMENT_NOUNS: &[&str] = &["ruins", "market", "harbor", "cathedral"];
const ENVIRONMENT_SUFFIXES: &[&str] = &["shop", "room"];

/// Nouns that read as props; plurals are singularized on the way in.
const OBJECT_NOUNS: &[&str] = &[
    "lanterns",
    "gears",
    "cogs",
    "machine",
    "device",
    "contraption",
    "blueprints",
];

/// Matched terms per category plus extracted names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    terms: FxHashMap<Category, Vec<String>>,
    pub names: Vec<String>,
}

impl Buckets {
    /// Terms matched for a category, in match order.
    pub fn get(&self, category: Category) -> &[String] {
        self.terms.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, category: Category, terms: Vec<String>) {
        self.terms.insert(category, terms);
    }

    pub fn push(&mut self, category: Category, term: String) {
        self.terms.entry(category).or_default().push(term);
    }

    pub fn contains(&self, category: Category, term: &str) -> bool {
        self.get(category).iter().any(|t| t == term)
    }

    /// Total matched terms across all categories (names excluded).
    pub fn term_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bucket `text` against `vocab` using the given strategy.
///
/// Names are taken from the raw text so line structure is preserved; term
/// matching runs on whitespace-normalized text so phrases wrapped across
/// lines still match. Each category is matched independently.
pub fn classify(
    text: &str,
    vocab: &Vocabulary,
    primary_name: Option<&str>,
    strategy: ClassifierStrategy,
) -> Buckets {
    let mut buckets = Buckets {
        names: extract_names(text, vocab, primary_name),
        ..Buckets::default()
    };

    let normalized = normalize_whitespace(text);
    for category in Category::ALL {
        buckets.set(category, vocab.find(&normalized, category));
    }

    if strategy == ClassifierStrategy::VocabularyWithNouns {
        classify_nouns(&normalized, &mut buckets);
    }

    log::debug!(
        "classified {} terms and {} names ({:?})",
        buckets.term_count(),
        buckets.names.len(),
        strategy
    );
    buckets
}

/// Candidate nouns: alphabetic tokens longer than 3 characters, lowercased,
/// deduplicated in order of appearance.
pub fn noun_candidates(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let tokens = text
        .split(|c: char| c.is_whitespace() || TOKEN_SEPARATORS.contains(&c))
        .filter(|t| !t.is_empty());

    for token in tokens {
        if token.chars().count() <= 3 || !token.chars().all(char::is_alphabetic) {
            continue;
        }
        let word = token.to_lowercase();
        if !out.contains(&word) {
            out.push(word);
        }
    }
    out
}

/// Route heuristic environment and object nouns into `buckets`.
///
/// A candidate already present in the Environment or Objects bucket is
/// left alone.
pub fn classify_nouns(text: &str, buckets: &mut Buckets) {
    for noun in noun_candidates(text) {
        if buckets.contains(Category::Environments, &noun)
            || buckets.contains(Category::Objects, &noun)
        {
            continue;
        }

        let is_environment = ENVIRONMENT_SUFFIXES.iter().any(|s| noun.ends_with(s))
            || ENVIRONMENT_NOUNS.contains(&noun.as_str());

        if is_environment {
            buckets.push(Category::Environments, noun);
        } else if OBJECT_NOUNS.contains(&noun.as_str()) {
            let singular = noun.trim_end_matches('s').to_string();
            buckets.push(Category::Objects, singular);
        }
    }
}
