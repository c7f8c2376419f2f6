/// Proper-noun extraction — capitalized tokens as candidate character names.
use regex::Regex;
use std::sync::OnceLock;

use crate::core::vocabulary::Vocabulary;
use crate::schema::category::Category;

fn capitalized_token() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z][a-zA-Z'-]+\b").expect("valid name pattern"))
}

/// Pull candidate names out of `text`.
///
/// Each line is scanned for capitalized tokens. Tokens whose lowercase form
/// is an environment term are dropped ("Forest" opening a sentence is not a
/// person). Names are deduplicated case-sensitively in order of first
/// appearance. A non-empty `primary` name goes first if it was not found.
pub fn extract_names(text: &str, vocab: &Vocabulary, primary: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for line in text.split('\n') {
        for token in capitalized_token().find_iter(line) {
            let token = token.as_str();
            if vocab.contains(Category::Environments, token) {
                continue;
            }
            if !names.iter().any(|n| n == token) {
                names.push(token.to_string());
            }
        }
    }

    if let Some(primary) = primary.map(str::trim).filter(|p| !p.is_empty()) {
        if !names.iter().any(|n| n == primary) {
            names.insert(0, primary.to_string());
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::builtin().unwrap()
    }

    #[test]
    fn finds_capitalized_tokens_in_order() {
        let names = extract_names("Alaric meets Lys.\nLater Alaric leaves.", &vocab(), None);
        assert_eq!(names, vec!["Alaric", "Lys", "Later"]);
    }

    #[test]
    fn skips_environment_words() {
        let names = extract_names("Forest paths lead to Mira's hut.", &vocab(), None);
        assert_eq!(names, vec!["Mira's"]);
    }

    #[test]
    fn keeps_hyphenated_and_apostrophes() {
        let names = extract_names("Jean-Luc and O'Brien", &vocab(), None);
        assert_eq!(names, vec!["Jean-Luc", "O'Brien"]);
    }

    #[test]
    fn single_capitals_are_not_names() {
        assert!(extract_names("I saw a tree", &vocab(), None).is_empty());
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let names = extract_names("Raven and RAVEN", &vocab(), None);
        assert_eq!(names, vec!["Raven", "RAVEN"]);
    }

    #[test]
    fn primary_name_prepended_once() {
        let names = extract_names("Lys waits.", &vocab(), Some("Alaric"));
        assert_eq!(names, vec!["Alaric", "Lys"]);

        let names = extract_names("Lys waits for Alaric.", &vocab(), Some("Alaric"));
        assert_eq!(names, vec!["Lys", "Alaric"]);

        let names = extract_names("Lys waits.", &vocab(), Some("  "));
        assert_eq!(names, vec!["Lys"]);
    }
}
