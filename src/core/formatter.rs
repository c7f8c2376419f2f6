/// Formatting — renders sections to text and applies the brevity transform.
use regex::Regex;
use std::sync::OnceLock;

use crate::core::composer::Section;
use crate::schema::options::Brevity;

fn article() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(?:a|an|the)\b ").expect("valid article pattern"))
}

fn comma_spacing() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*,\s*").expect("valid comma pattern"))
}

/// Render one section as `Label: v1, v2` or just `v1, v2`.
pub fn render_line(section: &Section, show_labels: bool) -> String {
    if show_labels {
        format!("{}: {}", section.label(), section.joined())
    } else {
        section.joined()
    }
}

/// Apply a brevity transform to a rendered line.
pub fn apply_brevity(line: &str, brevity: Brevity) -> String {
    match brevity {
        Brevity::Standard => line.to_string(),
        Brevity::Concise => article().replace_all(line, "").into_owned(),
        Brevity::Verbose => normalize_spacing(line),
    }
}

/// Collapse whitespace runs and put exactly one space after each comma.
fn normalize_spacing(line: &str) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    comma_spacing().replace_all(&collapsed, ", ").into_owned()
}

/// Render all non-empty sections, one per line, in order.
pub fn format(sections: &[Section], brevity: Brevity, show_labels: bool) -> String {
    sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| apply_brevity(&render_line(s, show_labels), brevity))
        .collect::<Vec<_>>()
        .join("\n")
}
