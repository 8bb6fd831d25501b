//! Multi-pass mapping of DSR sections onto template sections.
//!
//! Strategies run as an ordered cascade of increasingly expensive and
//! uncertain passes; see [`engine::map_sections`]. The similarity pass is
//! backed by [`dsr_index::VectorIndex`] and the final assisted pass by an
//! external [`reasoning::ReasoningProvider`].

pub mod engine;
pub mod reasoning;
pub mod score;
pub mod state;

pub use engine::{KEYWORD_THRESHOLD, Pass2Strategy, VECTOR_THRESHOLD, map_sections};
pub use reasoning::{
    CandidateSection, MatchRequest, MatchResponse, ProposedMatch, ReasoningProvider,
    UnmatchedSection,
};
pub use score::{keyword_overlap, normalize_title};
pub use state::MappingState;
