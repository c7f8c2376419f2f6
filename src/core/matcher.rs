/// Controlled-vocabulary term matching against free text.
use rustc_hash::FxHashSet;

/// Word characters for boundary checks: alphanumerics and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find which `terms` occur in `text`.
///
/// Matching is case-insensitive and boundary-aware: an occurrence only
/// counts when it is not directly preceded or followed by a word
/// character. Terms are tried longest first (ties in lexical order), and
/// the result keeps that order, deduplicated. The result order therefore
/// follows term length, not position in the text.
///
/// Occurrences of a matched term claim their span of the text. A shorter
/// term lying entirely inside a claimed span is not a separate match, so
/// "close-up" is only reported next to "extreme close-up" when it also
/// appears on its own.
pub fn find_terms<'a, I>(text: &str, terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let haystack = text.to_lowercase();

    let mut candidates: Vec<String> = terms
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    candidates.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });

    let mut seen = FxHashSet::default();
    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut found = Vec::new();
    for term in candidates {
        if seen.contains(&term) {
            continue;
        }
        let free: Vec<(usize, usize)> = bounded_occurrences(&haystack, &term)
            .into_iter()
            .filter(|&(start, end)| !claimed.iter().any(|&(s, e)| s <= start && end <= e))
            .collect();
        if free.is_empty() {
            continue;
        }
        claimed.extend(free);
        seen.insert(term.clone());
        found.push(term);
    }
    found
}

/// Returns true if `needle` occurs in `haystack` with a non-word character
/// (or the text edge) on both sides.
pub fn contains_bounded(haystack: &str, needle: &str) -> bool {
    !bounded_occurrences(haystack, needle).is_empty()
}

/// Byte spans of every boundary-respecting occurrence of `needle`.
fn bounded_occurrences(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    if needle.is_empty() {
        return spans;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            spans.push((start, end));
        }

        // Step one character past this occurrence's start
        from = start
            + haystack[start..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    spans
}
