pub mod citation;
pub mod error;
pub mod mapping;
pub mod section;

pub use citation::{ResolvedSource, SourceRef};
pub use error::{DsrError, Result};
pub use mapping::{MatchMethod, SectionMapping};
pub use section::{DsrSection, MappingTableEntry, TemplateSection};

/// Evidence content index: dotted-decimal locator (or literature keyword)
/// to extracted text. Built once per evidence document, read-only during a
/// run. Iteration follows insertion order, i.e. the evidence document's
/// own order, which the IB-table value scan and the literature key match
/// rely on for their first-match-wins rule.
pub type ContentIndex = indexmap::IndexMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_ref_kind_and_locator() {
        let table = SourceRef::IbTable {
            number: "30".to_string(),
        };
        assert_eq!(table.kind(), "ib_table");
        assert_eq!(table.locator(), Some("30"));

        let bare = SourceRef::Pbrer { section: None };
        assert_eq!(bare.kind(), "pbrer");
        assert_eq!(bare.locator(), None);
    }

    #[test]
    fn match_method_serializes_snake_case() {
        let json = serde_json::to_string(&MatchMethod::VectorSimilarity).expect("serialize");
        assert_eq!(json, "\"vector_similarity\"");
        let round: MatchMethod = serde_json::from_str("\"no_match\"").expect("deserialize");
        assert_eq!(round, MatchMethod::NoMatch);
    }

    #[test]
    fn section_mapping_round_trips() {
        let mapping = SectionMapping {
            dsr_section: "2.1".to_string(),
            dsr_title: "Background".to_string(),
            dsr_file: "dsr.pdf".to_string(),
            template_section: Some("3".to_string()),
            template_title: Some("Drug Background".to_string()),
            match_method: MatchMethod::ExactTitle,
            confidence: 1.0,
            notes: "Exact title match".to_string(),
        };
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        let round: SectionMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round, mapping);
    }

    #[test]
    fn template_section_defaults_optional_fields() {
        let section: TemplateSection =
            serde_json::from_str(r#"{"section_id": "4.1", "title": "Exposure"}"#)
                .expect("deserialize section");
        assert!(section.body.is_empty());
        assert!(section.required_sources.is_empty());
        assert!(!section.ignore);
    }
}
