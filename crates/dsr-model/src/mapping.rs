//! Section mapping output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a DSR section was matched to a template section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Explicit mapping-table entry (author-declared ground truth).
    MappingTable,
    /// Normalized exact title equality.
    ExactTitle,
    /// Embedding similarity above threshold.
    VectorSimilarity,
    /// Keyword-overlap title match (fallback when no vector index).
    TitleMatch,
    /// Reasoning provider judged a conceptual relationship.
    ConceptualMatch,
    /// Reasoning provider matched on content.
    ContentMatch,
    /// No template analog identified.
    NoMatch,
}

impl MatchMethod {
    /// Wire/tag string, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MappingTable => "mapping_table",
            Self::ExactTitle => "exact_title",
            Self::VectorSimilarity => "vector_similarity",
            Self::TitleMatch => "title_match",
            Self::ConceptualMatch => "conceptual_match",
            Self::ContentMatch => "content_match",
            Self::NoMatch => "no_match",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mapping record per input DSR section.
///
/// The mapper guarantees exactly one record per input section, in input
/// order; unmatched sections carry `template_section = None` and
/// [`MatchMethod::NoMatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMapping {
    /// DSR section number.
    pub dsr_section: String,
    /// DSR section title.
    pub dsr_title: String,
    /// File the DSR section came from.
    #[serde(default)]
    pub dsr_file: String,
    /// Matched template section id, if any.
    pub template_section: Option<String>,
    /// Matched template section title, if any.
    pub template_title: Option<String>,
    /// Strategy that produced the match.
    pub match_method: MatchMethod,
    /// Confidence in [0, 1]. Mapping-table matches are 1.0.
    #[serde(default)]
    pub confidence: f32,
    /// Free-text explanation for reviewers.
    #[serde(default)]
    pub notes: String,
}
