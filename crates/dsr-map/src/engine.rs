//! The four-pass mapping cascade.
//!
//! Every DSR section starts unmapped. Passes run in fixed order, each
//! touching only still-unmapped sections:
//!
//! 0. explicit mapping table (author-declared, absolute priority),
//! 1. normalized exact title equality,
//! 2. vector similarity, or keyword overlap when no index is supplied,
//! 3. assisted matching via an external reasoning provider.
//!
//! Sections left over after pass 3 receive a synthetic no-match record,
//! so the output always contains exactly one mapping per input section,
//! in input order.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use dsr_index::VectorIndex;
use dsr_model::{
    DsrSection, MappingTableEntry, MatchMethod, SectionMapping, TemplateSection,
};

use crate::reasoning::{CandidateSection, MatchRequest, ReasoningProvider, UnmatchedSection};
use crate::score::{keyword_overlap, normalize_title};
use crate::state::MappingState;

/// Minimum cosine similarity for a vector match.
pub const VECTOR_THRESHOLD: f32 = 0.75;
/// Minimum keyword-overlap score for a fallback title match.
pub const KEYWORD_THRESHOLD: f64 = 0.5;
/// Candidates fetched per similarity query.
const VECTOR_SEARCH_K: usize = 3;
/// Content prefix length appended to the title in similarity queries.
const QUERY_CONTENT_CHARS: usize = 200;

/// Strategy for the similarity pass, chosen once per run.
///
/// Exactly one of the two runs per invocation; absence of a vector index
/// is a run-level capability, not a per-section null check.
pub enum Pass2Strategy<'a> {
    /// Query the supplied index, restricted to template-sourced entries.
    Vector(&'a VectorIndex),
    /// Keyword-overlap scoring over normalized titles.
    Keyword,
}

/// Run the full mapping cascade.
///
/// Guarantees `output.len() == dsr_sections.len()` with order preserved,
/// regardless of provider failures: pass 2 degrades to keyword scoring
/// when the embedding provider fails, and a pass 3 failure is logged and
/// contributes no mappings.
#[must_use]
pub fn map_sections(
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
    mapping_entries: &[MappingTableEntry],
    pass2: Pass2Strategy<'_>,
    reasoning: Option<&dyn ReasoningProvider>,
) -> Vec<SectionMapping> {
    let mut state = MappingState::new();

    if !mapping_entries.is_empty() {
        state = pass_mapping_table(state, dsr_sections, template_sections, mapping_entries);
        info!(mapped = state.len(), "after pass 0 (mapping table)");
    }

    state = pass_exact_title(state, dsr_sections, template_sections);
    info!(mapped = state.len(), "after pass 1 (exact title)");

    state = match pass2 {
        Pass2Strategy::Vector(index) => {
            let state = pass_vector(state, dsr_sections, template_sections, index);
            info!(mapped = state.len(), "after pass 2 (vector)");
            state
        }
        Pass2Strategy::Keyword => {
            let state = pass_keyword(state, dsr_sections, template_sections);
            info!(mapped = state.len(), "after pass 2 (keyword)");
            state
        }
    };

    if let Some(provider) = reasoning {
        state = pass_assisted(state, dsr_sections, template_sections, provider);
        info!(mapped = state.len(), "after pass 3 (assisted)");
    }

    state.into_ordered(dsr_sections)
}

/// Pass 0: explicit mapping table. An entry's section id names both the
/// DSR section and the template section it targets; the match only lands
/// when that id resolves to a real template section.
fn pass_mapping_table(
    mut state: MappingState,
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
    mapping_entries: &[MappingTableEntry],
) -> MappingState {
    let tmpl_by_id: BTreeMap<&str, &TemplateSection> = template_sections
        .iter()
        .map(|t| (t.section_id.as_str(), t))
        .collect();
    let entry_by_id: BTreeMap<&str, &MappingTableEntry> = mapping_entries
        .iter()
        .map(|e| (e.dsr_section_id.as_str(), e))
        .collect();

    for d in dsr_sections {
        if state.is_mapped(&d.section_num) {
            continue;
        }
        let Some(entry) = entry_by_id.get(d.section_num.as_str()) else {
            continue;
        };
        let Some(tmpl) = tmpl_by_id.get(entry.dsr_section_id.as_str()) else {
            continue;
        };
        debug!(dsr = %d.section_num, template = %tmpl.section_id, "pass 0 mapping table");
        state.assign(SectionMapping {
            dsr_section: d.section_num.clone(),
            dsr_title: d.title.clone(),
            dsr_file: d.file.clone(),
            template_section: Some(tmpl.section_id.clone()),
            template_title: Some(tmpl.title.clone()),
            match_method: MatchMethod::MappingTable,
            confidence: 1.0,
            notes: format!(
                "Explicit mapping table: sources={}",
                entry.source_refs.join(", ")
            ),
        });
    }
    state
}

/// Pass 1: normalized exact title equality. When several template
/// sections share a normalized title, the first in template order wins.
fn pass_exact_title(
    mut state: MappingState,
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
) -> MappingState {
    let mut tmpl_by_title: BTreeMap<String, &TemplateSection> = BTreeMap::new();
    for t in template_sections {
        tmpl_by_title.entry(normalize_title(&t.title)).or_insert(t);
    }

    for d in dsr_sections {
        if state.is_mapped(&d.section_num) {
            continue;
        }
        let norm = normalize_title(&d.title);
        if norm.is_empty() {
            continue;
        }
        if let Some(t) = tmpl_by_title.get(&norm) {
            debug!(dsr = %d.section_num, template = %t.section_id, "pass 1 exact title");
            state.assign(SectionMapping {
                dsr_section: d.section_num.clone(),
                dsr_title: d.title.clone(),
                dsr_file: d.file.clone(),
                template_section: Some(t.section_id.clone()),
                template_title: Some(t.title.clone()),
                match_method: MatchMethod::ExactTitle,
                confidence: 1.0,
                notes: "Exact title match".to_string(),
            });
        }
    }
    state
}

/// Pass 2 (vector): query the index with title plus a content prefix,
/// restricted to template-sourced entries. A provider failure degrades
/// the rest of the pass to keyword scoring.
fn pass_vector(
    mut state: MappingState,
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
    index: &VectorIndex,
) -> MappingState {
    for d in dsr_sections {
        if state.is_mapped(&d.section_num) {
            continue;
        }
        let prefix: String = d.content.chars().take(QUERY_CONTENT_CHARS).collect();
        let query = format!("{} {}", d.title, prefix);

        let hits = match index.search(&query, VECTOR_SEARCH_K, Some("template")) {
            Ok(hits) => hits,
            Err(error) => {
                warn!(%error, "similarity search failed; falling back to keyword scoring");
                // Everything still unmapped, including this section, gets
                // keyword-scored instead.
                return pass_keyword(state, dsr_sections, template_sections);
            }
        };

        let Some(best) = hits.first() else { continue };
        if best.score < VECTOR_THRESHOLD {
            continue;
        }
        let tmpl_id = best.metadata.get("section_id").cloned().unwrap_or_default();
        let tmpl_title = best.metadata.get("title").cloned().unwrap_or_default();
        debug!(
            dsr = %d.section_num,
            template = %tmpl_id,
            score = best.score,
            "pass 2 vector match"
        );
        state.assign(SectionMapping {
            dsr_section: d.section_num.clone(),
            dsr_title: d.title.clone(),
            dsr_file: d.file.clone(),
            template_section: Some(tmpl_id),
            template_title: Some(tmpl_title),
            match_method: MatchMethod::VectorSimilarity,
            confidence: best.score.clamp(0.0, 1.0),
            notes: format!("Vector similarity score={:.3}", best.score),
        });
    }
    state
}

/// Pass 2 (keyword): best overlap score over all template titles.
fn pass_keyword(
    mut state: MappingState,
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
) -> MappingState {
    for d in dsr_sections {
        if state.is_mapped(&d.section_num) {
            continue;
        }
        let mut best_score = 0.0_f64;
        let mut best_tmpl: Option<&TemplateSection> = None;
        for t in template_sections {
            let score = keyword_overlap(&d.title, &t.title);
            if score > best_score {
                best_score = score;
                best_tmpl = Some(t);
            }
        }
        if let Some(t) = best_tmpl
            && best_score >= KEYWORD_THRESHOLD
        {
            debug!(
                dsr = %d.section_num,
                template = %t.section_id,
                score = best_score,
                "pass 2 keyword match"
            );
            state.assign(SectionMapping {
                dsr_section: d.section_num.clone(),
                dsr_title: d.title.clone(),
                dsr_file: d.file.clone(),
                template_section: Some(t.section_id.clone()),
                template_title: Some(t.title.clone()),
                match_method: MatchMethod::TitleMatch,
                confidence: best_score.clamp(0.0, 1.0) as f32,
                notes: format!("Keyword overlap match (score={best_score:.2})"),
            });
        }
    }
    state
}

/// Pass 3: batch the remaining unmatched sections with the full template
/// catalogue to the reasoning provider. Returned matches are recorded as
/// given; only a non-empty, still-unmapped DSR id is required.
fn pass_assisted(
    mut state: MappingState,
    dsr_sections: &[DsrSection],
    template_sections: &[TemplateSection],
    provider: &dyn ReasoningProvider,
) -> MappingState {
    let unmatched: Vec<&DsrSection> = dsr_sections
        .iter()
        .filter(|d| !state.is_mapped(&d.section_num))
        .collect();
    if unmatched.is_empty() {
        info!("pass 3: nothing unmatched, skipping reasoning call");
        return state;
    }
    info!(unmatched = unmatched.len(), "pass 3: assisted matching");

    let request = MatchRequest {
        unmatched: unmatched
            .iter()
            .map(|d| UnmatchedSection {
                section_num: d.section_num.clone(),
                title: d.title.clone(),
            })
            .collect(),
        candidates: template_sections
            .iter()
            .map(|t| CandidateSection {
                section_id: t.section_id.clone(),
                title: t.title.clone(),
            })
            .collect(),
    };

    let response = match provider.match_sections(&request) {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, "reasoning provider failed; pass 3 contributes no mappings");
            return state;
        }
    };

    for m in response.matches {
        if m.dsr_section.is_empty() || state.is_mapped(&m.dsr_section) {
            continue;
        }
        let dsr_obj = unmatched.iter().find(|d| d.section_num == m.dsr_section);
        state.assign(SectionMapping {
            dsr_section: m.dsr_section.clone(),
            dsr_title: dsr_obj.map(|d| d.title.clone()).unwrap_or_default(),
            dsr_file: dsr_obj.map(|d| d.file.clone()).unwrap_or_default(),
            template_section: m.template_section,
            template_title: m.template_title,
            match_method: m.match_method,
            confidence: m.confidence.clamp(0.0, 1.0),
            notes: m.notes,
        });
    }
    state
}
