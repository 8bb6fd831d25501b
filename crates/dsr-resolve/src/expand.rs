//! Compound citation expansion.
//!
//! Template authors write citations like `"IB Sections 1.2, 3.2"` that name
//! several sections at once. Expansion runs once, before classification,
//! and splits such citations into one fully-qualified reference per
//! section number, preserving order. Singletons pass through unchanged, as
//! do table references (tables are never compound in this domain).

use std::sync::LazyLock;

use regex::Regex;

/// `IB Section(s) <list>` or `PBRER [Section(s)] <list>` where `<list>` has
/// two or more dotted-decimal numbers separated by comma, ampersand, slash
/// or the word "and", with an optional trailing parenthetical.
static COMPOUND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(IB\s+Sections?|PBRER(?:\s+Sections?)?)\s+(\d+(?:\.\d+)*(?:\s*(?:,|&|/|\band\b)\s*\d+(?:\.\d+)*)+)\s*(?:\([^)]*\))?\s*$",
    )
    .expect("compound citation pattern")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("section number pattern"));

/// Expand a compound citation into one citation per section number.
///
/// Returns `[text]` unchanged when the citation is not compound.
#[must_use]
pub fn expand_compound_refs(text: &str) -> Vec<String> {
    let Some(caps) = COMPOUND_RE.captures(text) else {
        return vec![text.to_string()];
    };

    let prefix_lower = caps[1].to_lowercase();
    let prefix = if prefix_lower.starts_with("ib") {
        "IB Section"
    } else if prefix_lower.contains("section") {
        "PBRER Section"
    } else {
        "PBRER"
    };

    NUMBER_RE
        .find_iter(&caps[2])
        .map(|num| format!("{prefix} {}", num.as_str()))
        .collect()
}
