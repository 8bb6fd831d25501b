use dsr_model::{ContentIndex, SourceRef};
use dsr_resolve::resolve_sources;

fn ib_index() -> ContentIndex {
    ContentIndex::from([
        ("2.3".to_string(), "This is the content of IB section 2.3.".to_string()),
        ("4.3.3".to_string(), "Safety data from section 4.3.3.".to_string()),
        ("6.1".to_string(), "Adverse events summary.".to_string()),
    ])
}

fn refs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn single_ib_found() {
    let result = resolve_sources(&refs(&["IB 2.3"]), &ib_index(), None, None);
    assert_eq!(result.len(), 1);
    let r = &result[0];
    assert_eq!(r.original_ref, "IB 2.3");
    assert_eq!(
        r.source,
        SourceRef::Ib {
            section: Some("2.3".to_string())
        }
    );
    assert_eq!(r.content, "This is the content of IB section 2.3.");
    assert!(r.found);
}

#[test]
fn single_ib_not_found() {
    let result = resolve_sources(&refs(&["IB 9.9"]), &ib_index(), None, None);
    assert_eq!(result.len(), 1);
    let r = &result[0];
    assert!(!r.found);
    assert!(r.content.contains("ADDITIONAL DATA NEEDED"));
    assert!(r.content.contains("IB"));
    assert!(r.content.contains("9.9"));
}

#[test]
fn ib_not_found_with_empty_index() {
    let result = resolve_sources(&refs(&["IB 9.9"]), &ContentIndex::new(), None, None);
    assert!(!result[0].found);
    assert!(result[0].content.contains("IB"));
    assert!(result[0].content.contains("9.9"));
}

#[test]
fn multiple_refs_keep_order() {
    let result = resolve_sources(&refs(&["IB 2.3", "IB 9.9", "IB 6.1"]), &ib_index(), None, None);
    assert_eq!(result.len(), 3);
    assert!(result[0].found);
    assert_eq!(result[0].content, "This is the content of IB section 2.3.");
    assert!(!result[1].found);
    assert!(result[2].found);
    assert_eq!(result[2].content, "Adverse events summary.");
}

#[test]
fn bare_ib_placeholder() {
    let result = resolve_sources(&refs(&["IB"]), &ib_index(), None, None);
    let r = &result[0];
    assert_eq!(r.source, SourceRef::Ib { section: None });
    assert!(!r.found);
    assert!(r.content.contains("Investigator's Brochure was referenced without"));
}

#[test]
fn empty_input_yields_empty_output() {
    let result = resolve_sources(&[], &ib_index(), None, None);
    assert!(result.is_empty());
}

#[test]
fn pbrer_without_index_names_the_flag() {
    let result = resolve_sources(&refs(&["PBRER Section 5"]), &ib_index(), None, None);
    let r = &result[0];
    assert!(!r.found);
    assert!(r.content.contains("ADDITIONAL DATA NEEDED"));
    assert!(r.content.contains("PBRER Section 5"));
    assert!(r.content.contains("--pbrer-index"));
}

#[test]
fn pbrer_resolved_from_secondary_index() {
    let pbrer = ContentIndex::from([
        ("1.3".to_string(), "PBRER 1.3 content".to_string()),
        ("5.1.2".to_string(), "PBRER 5.1.2 content".to_string()),
    ]);
    let result = resolve_sources(&refs(&["PBRER 1.3"]), &ib_index(), Some(&pbrer), None);
    assert!(result[0].found);
    assert_eq!(result[0].content, "PBRER 1.3 content");

    let result = resolve_sources(&refs(&["PBRER 9.9"]), &ib_index(), Some(&pbrer), None);
    assert!(!result[0].found);
    assert!(result[0].content.contains("9.9"));
}

#[test]
fn literature_matches_in_either_direction() {
    let literature = ContentIndex::from([(
        "UpToDate".to_string(),
        "UpToDate clinical summary".to_string(),
    )]);
    let result = resolve_sources(&refs(&["UpToDate"]), &ib_index(), None, Some(&literature));
    assert!(result[0].found);
    assert_eq!(result[0].content, "UpToDate clinical summary");

    // Citation longer than the key still matches.
    let result = resolve_sources(
        &refs(&["UpToDate drug review"]),
        &ib_index(),
        None,
        Some(&literature),
    );
    assert!(result[0].found);
}

#[test]
fn literature_miss_asks_for_an_entry() {
    let result = resolve_sources(&refs(&["Medline"]), &ib_index(), None, None);
    assert!(!result[0].found);
    assert!(result[0].content.contains("ADDITIONAL DATA NEEDED"));
    assert!(result[0].content.contains("Medline"));
}

#[test]
fn unknown_refs_get_generic_placeholder() {
    let result = resolve_sources(&refs(&["Some random text"]), &ib_index(), None, None);
    let r = &result[0];
    assert_eq!(r.source, SourceRef::Unknown);
    assert!(!r.found);
    assert!(r.content.contains("could not be classified"));
}

#[test]
fn mixed_sources_resolve_independently() {
    let pbrer = ContentIndex::from([("1.3".to_string(), "PBRER 1.3 content".to_string())]);
    let literature = ContentIndex::from([(
        "UpToDate".to_string(),
        "UpToDate clinical summary".to_string(),
    )]);
    let result = resolve_sources(
        &refs(&["IB 2.3", "PBRER 1.3", "UpToDate"]),
        &ib_index(),
        Some(&pbrer),
        Some(&literature),
    );
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|r| r.found));
}

#[test]
fn compound_refs_expand_before_resolution() {
    let index = ContentIndex::from([
        ("1.2".to_string(), "Formulation details.".to_string()),
        ("3.2".to_string(), "Dosing information.".to_string()),
        ("5.1".to_string(), "Clinical trial exposure data.".to_string()),
        ("5.6".to_string(), "Post-marketing safety data.".to_string()),
    ]);

    let result = resolve_sources(&refs(&["IB Sections 1.2, 3.2"]), &index, None, None);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].content, "Formulation details.");
    assert_eq!(result[1].content, "Dosing information.");

    let result = resolve_sources(&refs(&["IB Section 5.1, 5.6"]), &index, None, None);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.found));

    let result = resolve_sources(
        &refs(&["IB Sections 1.2, 3.2 (Formulations/Dosing)"]),
        &index,
        None,
        None,
    );
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|r| r.found));
}

#[test]
fn ib_table_resolves_by_value_scan() {
    let index = ContentIndex::from([(
        "6.4.1".to_string(),
        "Table 30 Pralsetinib Treatment-Emergent Shifts in labs.".to_string(),
    )]);

    let result = resolve_sources(&refs(&["IB Table 30"]), &index, None, None);
    assert_eq!(result.len(), 1);
    assert!(result[0].found);
    assert!(result[0].content.contains("Table 30"));

    let result = resolve_sources(&refs(&["IB Table 999"]), &index, None, None);
    assert!(!result[0].found);
    assert!(result[0].content.contains("ADDITIONAL DATA NEEDED"));
    assert!(result[0].content.contains("999"));
}

#[test]
fn table_scan_follows_document_order() {
    // "9.1" precedes "10.2" in the brochure even though it sorts after it
    // lexicographically; the scan must honor the document's order.
    let index = ContentIndex::from([
        ("9.1".to_string(), "Table 7 early occurrence.".to_string()),
        ("10.2".to_string(), "Table 7 later occurrence.".to_string()),
    ]);
    let result = resolve_sources(&refs(&["IB Table 7"]), &index, None, None);
    assert!(result[0].found);
    assert_eq!(result[0].content, "Table 7 early occurrence.");
}

#[test]
fn literature_match_follows_insertion_order() {
    let mut literature = ContentIndex::new();
    literature.insert("UpToDate review".to_string(), "First entry.".to_string());
    literature.insert("UpToDate".to_string(), "Second entry.".to_string());
    let result = resolve_sources(&refs(&["UpToDate"]), &ib_index(), None, Some(&literature));
    assert!(result[0].found);
    assert_eq!(result[0].content, "First entry.");
}

#[test]
fn table_scan_requires_word_boundary() {
    // "Table 305" must not satisfy a citation of Table 30.
    let index = ContentIndex::from([(
        "6.4".to_string(),
        "Table 305 lists concomitant medications.".to_string(),
    )]);
    let result = resolve_sources(&refs(&["IB Table 30"]), &index, None, None);
    assert!(!result[0].found);
}

#[test]
fn resolved_content_is_cleaned() {
    let index = ContentIndex::from([(
        "2.3".to_string(),
        "CONFIDENTIAL\nDrug background content.\nPage 4 of 120".to_string(),
    )]);
    let result = resolve_sources(&refs(&["IB 2.3"]), &index, None, None);
    assert!(result[0].found);
    assert_eq!(result[0].content, "Drug background content.");
}

#[test]
fn placeholders_are_not_cleaned() {
    // A miss keeps its bracketed placeholder verbatim even though the
    // cleaner would strip a bare bracketed line of boilerplate shape.
    let result = resolve_sources(&refs(&["IB 9.9"]), &ContentIndex::new(), None, None);
    assert!(result[0].content.starts_with("[ADDITIONAL DATA NEEDED:"));
    assert!(result[0].content.ends_with(']'));
}
