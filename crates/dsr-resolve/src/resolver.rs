//! Evidence resolution against content indices.
//!
//! Every citation in a section's `required_sources` list yields exactly one
//! [`ResolvedSource`] per expanded reference, in expansion order. Misses
//! are recovered into deterministic placeholder strings that surface in
//! the assembled document as actionable prompts for a reviewer, so each
//! miss names exactly what is missing and how to supply it.

use regex::Regex;
use tracing::debug;

use dsr_model::{ContentIndex, ResolvedSource, SourceRef};

use crate::classify::classify_source;
use crate::clean::clean_source_text;
use crate::expand::expand_compound_refs;

fn placeholder(detail: &str) -> String {
    format!("[ADDITIONAL DATA NEEDED: {detail}]")
}

fn hit(original_ref: &str, source: SourceRef, content: &str) -> ResolvedSource {
    ResolvedSource {
        original_ref: original_ref.to_string(),
        source,
        content: clean_source_text(content),
        found: true,
    }
}

fn miss(original_ref: &str, source: SourceRef, detail: &str) -> ResolvedSource {
    ResolvedSource {
        original_ref: original_ref.to_string(),
        source,
        content: placeholder(detail),
        found: false,
    }
}

/// Scan index values for a word-bounded `Table <n>` mention.
///
/// Tables are extracted inline with their surrounding IB section, so a
/// table citation resolves to the first section whose text names the
/// table. Iteration follows the index's insertion order, which is the
/// evidence document's own order; first match wins, no scoring.
fn find_table(ib_index: &ContentIndex, number: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"\bTable {number}\b")).ok()?;
    ib_index
        .values()
        .find(|text| pattern.is_match(text))
        .cloned()
}

/// Resolve a section's citation list against the available indices.
///
/// `ib_index` is always required; `pbrer_index` and `literature_results`
/// are optional collaborators, and their absence degrades the affected
/// citations to placeholders rather than failing.
#[must_use]
pub fn resolve_sources(
    required_sources: &[String],
    ib_index: &ContentIndex,
    pbrer_index: Option<&ContentIndex>,
    literature_results: Option<&ContentIndex>,
) -> Vec<ResolvedSource> {
    let mut results = Vec::new();

    for raw in required_sources {
        for ref_text in expand_compound_refs(raw) {
            let source = classify_source(&ref_text);
            let trimmed = ref_text.trim();
            debug!(reference = trimmed, kind = source.kind(), "resolving citation");

            let resolved = match &source {
                SourceRef::Ib {
                    section: Some(num),
                } => match ib_index.get(num) {
                    Some(text) => hit(&ref_text, source.clone(), text),
                    None => {
                        let detail = format!(
                            "{trimmed} \u{2014} IB section {num} is not in the extracted index; \
                             re-extract the brochure or paste the content manually"
                        );
                        miss(&ref_text, source.clone(), &detail)
                    }
                },
                SourceRef::Ib { section: None } => miss(
                    &ref_text,
                    source.clone(),
                    "Investigator's Brochure was referenced without a section number \
                     \u{2014} identify the relevant IB section manually",
                ),
                SourceRef::IbTable { number } => match find_table(ib_index, number) {
                    Some(text) => hit(&ref_text, source.clone(), &text),
                    None => {
                        let detail = format!(
                            "{trimmed} \u{2014} Table {number} was not found in any extracted \
                             IB section; supply the table content manually"
                        );
                        miss(&ref_text, source.clone(), &detail)
                    }
                },
                SourceRef::Pbrer {
                    section: Some(num),
                } => match pbrer_index {
                    Some(index) => match index.get(num) {
                        Some(text) => hit(&ref_text, source.clone(), text),
                        None => {
                            let detail = format!(
                                "{trimmed} \u{2014} PBRER section {num} is not in the \
                                 provided index"
                            );
                            miss(&ref_text, source.clone(), &detail)
                        }
                    },
                    None => {
                        let detail = format!(
                            "{trimmed} \u{2014} no PBRER index was provided; \
                             pass one with --pbrer-index"
                        );
                        miss(&ref_text, source.clone(), &detail)
                    }
                },
                SourceRef::Pbrer { section: None } => miss(
                    &ref_text,
                    source.clone(),
                    "PBRER was referenced without a section number \u{2014} identify the \
                     relevant PBRER section manually",
                ),
                SourceRef::External => resolve_external(&ref_text, literature_results),
                SourceRef::Unknown => {
                    let detail = format!(
                        "{trimmed} \u{2014} source reference could not be classified; \
                         resolve manually"
                    );
                    miss(&ref_text, source.clone(), &detail)
                }
            };
            results.push(resolved);
        }
    }

    results
}

/// Case-insensitive substring match, in either direction, between the
/// citation and literature-index keys. First match in insertion order wins.
fn resolve_external(
    ref_text: &str,
    literature_results: Option<&ContentIndex>,
) -> ResolvedSource {
    let trimmed = ref_text.trim();
    if let Some(literature) = literature_results {
        let ref_lower = trimmed.to_lowercase();
        for (key, content) in literature {
            let key_lower = key.to_lowercase();
            if key_lower.contains(&ref_lower) || ref_lower.contains(&key_lower) {
                return hit(ref_text, SourceRef::External, content);
            }
        }
    }
    let detail = format!(
        "{trimmed} \u{2014} add a literature entry under this key (--literature)"
    );
    miss(ref_text, SourceRef::External, &detail)
}
