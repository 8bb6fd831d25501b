//! Citation classification.
//!
//! Classification is a pure function of the citation string. Patterns are
//! checked in a fixed priority order; table detection runs before generic
//! section detection so `"IB Table 30"` can never be read as a section
//! reference.

use std::sync::LazyLock;

use regex::Regex;

use dsr_model::SourceRef;

/// IB reference with an optional `Section(s)` keyword, a dotted number and
/// an optional trailing parenthetical description.
static IB_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*IB\s*(?:Sections?\s*)?(\d+(?:\.\d+)*)\s*(?:\([^)]*\))?\s*$")
        .expect("IB section pattern")
});

/// IB table reference (`IB Table 30`). Table numbers are plain integers.
static IB_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*IB\s+Table\s+(\d+)\s*(?:\([^)]*\))?\s*$").expect("IB table pattern")
});

/// Bare `IB` with no section number.
static IB_BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*IB\s*$").expect("bare IB pattern"));

/// PBRER reference with an optional `Section(s)` keyword and dotted number.
static PBRER_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*PBRER\s*(?:Sections?\s*)?(\d+(?:\.\d+)*)\s*(?:\([^)]*\))?\s*$")
        .expect("PBRER section pattern")
});

/// Known external source keywords, matched as case-insensitive substrings.
const EXTERNAL_KEYWORDS: [&str; 5] = [
    "uptodate",
    "medline",
    "embase",
    "company safety database",
    "signal assessment",
];

/// Classify a `required_sources` string into a [`SourceRef`].
#[must_use]
pub fn classify_source(source: &str) -> SourceRef {
    // Table refs first: they must never fall through to section handling.
    if let Some(caps) = IB_TABLE_RE.captures(source) {
        return SourceRef::IbTable {
            number: caps[1].to_string(),
        };
    }

    if let Some(caps) = IB_SECTION_RE.captures(source) {
        return SourceRef::Ib {
            section: Some(caps[1].to_string()),
        };
    }

    if IB_BARE_RE.is_match(source) {
        return SourceRef::Ib { section: None };
    }

    if let Some(caps) = PBRER_SECTION_RE.captures(source) {
        return SourceRef::Pbrer {
            section: Some(caps[1].to_string()),
        };
    }

    // Bare PBRER, or PBRER with unstructured trailing text.
    let stripped = source.trim();
    let lower = stripped.to_lowercase();
    if lower.starts_with("pbrer") {
        return SourceRef::Pbrer { section: None };
    }

    for kw in EXTERNAL_KEYWORDS {
        if lower.contains(kw) {
            return SourceRef::External;
        }
    }

    SourceRef::Unknown
}
