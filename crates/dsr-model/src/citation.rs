//! Citation types for evidence source references.
//!
//! A citation is a raw text reference appearing in a template's
//! `required_sources` list, e.g. `"IB Section 2.3"` or `"Medline"`. It is
//! never persisted: classification is a pure function of the string and is
//! recomputed on every resolution pass.

use serde::{Deserialize, Serialize};

/// A classified evidence source reference.
///
/// The variant set is closed so resolution logic is exhaustive-checked:
/// every citation a template can carry falls into exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRef {
    /// Investigator's Brochure reference, optionally to a dotted-decimal
    /// section (`"IB Section 4.3.3"` → `section = Some("4.3.3")`).
    Ib { section: Option<String> },
    /// Investigator's Brochure table reference (`"IB Table 30"`).
    IbTable { number: String },
    /// PBRER reference, optionally to a dotted-decimal section.
    Pbrer { section: Option<String> },
    /// A known external source (literature database, safety database).
    External,
    /// Anything that could not be classified.
    Unknown,
}

impl SourceRef {
    /// Short kind tag matching the serialized form.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ib { .. } => "ib",
            Self::IbTable { .. } => "ib_table",
            Self::Pbrer { .. } => "pbrer",
            Self::External => "external",
            Self::Unknown => "unknown",
        }
    }

    /// The section or table locator, when the citation carries one.
    #[must_use]
    pub fn locator(&self) -> Option<&str> {
        match self {
            Self::Ib { section } | Self::Pbrer { section } => section.as_deref(),
            Self::IbTable { number } => Some(number),
            Self::External | Self::Unknown => None,
        }
    }
}

/// Result of resolving a single (already expanded) citation.
///
/// `content` is either cleaned evidence text or a deterministic placeholder
/// naming what is missing; placeholders surface verbatim in the assembled
/// document as prompts for a human reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// The citation string exactly as it appeared after expansion.
    pub original_ref: String,
    /// Classification of the citation.
    pub source: SourceRef,
    /// Cleaned evidence text, or a placeholder when `found` is false.
    pub content: String,
    /// True when the citation resolved to real evidence content.
    pub found: bool,
}
