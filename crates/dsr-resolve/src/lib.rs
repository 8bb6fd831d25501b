//! Citation classification and evidence resolution.
//!
//! Template sections cite evidence as free-text references ("IB Section
//! 2.3", "PBRER 5.1", "Medline"). This crate expands compound citations,
//! classifies each into a [`dsr_model::SourceRef`], and resolves it against
//! the evidence content indices, producing one [`dsr_model::ResolvedSource`]
//! per expanded citation with a deterministic placeholder on every miss.

pub mod classify;
pub mod clean;
pub mod expand;
pub mod resolver;

pub use classify::classify_source;
pub use clean::clean_source_text;
pub use expand::expand_compound_refs;
pub use resolver::resolve_sources;
