//! Reasoning-provider contract for the assisted mapping pass.
//!
//! The final pass hands the remaining unmatched sections plus the full
//! template catalogue to an external reasoning collaborator as one
//! structured batch. The mapper records whatever comes back; validation is
//! limited to requiring a non-empty, still-unmapped DSR section id.

use serde::{Deserialize, Serialize};

use dsr_model::{MatchMethod, Result};

/// A DSR section still unmapped after the deterministic passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSection {
    pub section_num: String,
    pub title: String,
}

/// A template section offered as a mapping candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSection {
    pub section_id: String,
    pub title: String,
}

/// One batched request covering every remaining unmatched section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub unmatched: Vec<UnmatchedSection>,
    pub candidates: Vec<CandidateSection>,
}

/// A provider's verdict for one DSR section. `template_section = None`
/// with [`MatchMethod::NoMatch`] is an explicit "no analog" answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedMatch {
    pub dsr_section: String,
    pub template_section: Option<String>,
    pub template_title: Option<String>,
    pub match_method: MatchMethod,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<ProposedMatch>,
}

/// External reasoning collaborator for the assisted pass.
///
/// Implementations may block on network I/O and own their retry policy;
/// a failure surfaces as [`dsr_model::DsrError::ProviderUnavailable`] and
/// simply contributes no mappings for that run.
pub trait ReasoningProvider {
    fn match_sections(&self, request: &MatchRequest) -> Result<MatchResponse>;
}
