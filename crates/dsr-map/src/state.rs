//! Mapping accumulator threaded between passes.
//!
//! Each pass takes the state by value and returns it, assigning at most
//! one mapping per DSR section. First assignment wins: an id already in
//! the state is untouched by every later pass, which makes the whole
//! cascade idempotent.

use std::collections::BTreeMap;

use dsr_model::{DsrSection, MatchMethod, SectionMapping};

/// Accumulated mappings keyed by DSR section number.
#[derive(Debug, Clone, Default)]
pub struct MappingState {
    mappings: BTreeMap<String, SectionMapping>,
}

impl MappingState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the DSR section already has a final mapping.
    #[must_use]
    pub fn is_mapped(&self, dsr_section: &str) -> bool {
        self.mappings.contains_key(dsr_section)
    }

    /// Number of mapped sections so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Record a mapping unless the section is already mapped.
    /// Returns true when the mapping was recorded.
    pub fn assign(&mut self, mapping: SectionMapping) -> bool {
        if self.mappings.contains_key(&mapping.dsr_section) {
            return false;
        }
        self.mappings.insert(mapping.dsr_section.clone(), mapping);
        true
    }

    /// Finalize into one record per input section, in input order.
    ///
    /// Sections without a mapping receive a synthetic no-match record so
    /// the output always has exactly one entry per input.
    #[must_use]
    pub fn into_ordered(mut self, dsr_sections: &[DsrSection]) -> Vec<SectionMapping> {
        dsr_sections
            .iter()
            .map(|d| {
                self.mappings
                    .remove(&d.section_num)
                    .unwrap_or_else(|| no_match(d))
            })
            .collect()
    }
}

fn no_match(section: &DsrSection) -> SectionMapping {
    SectionMapping {
        dsr_section: section.section_num.clone(),
        dsr_title: section.title.clone(),
        dsr_file: section.file.clone(),
        template_section: None,
        template_title: None,
        match_method: MatchMethod::NoMatch,
        confidence: 0.0,
        notes: "No template analog identified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(id: &str) -> SectionMapping {
        SectionMapping {
            dsr_section: id.to_string(),
            dsr_title: String::new(),
            dsr_file: String::new(),
            template_section: Some("1".to_string()),
            template_title: Some("Intro".to_string()),
            match_method: MatchMethod::ExactTitle,
            confidence: 1.0,
            notes: String::new(),
        }
    }

    #[test]
    fn first_assignment_wins() {
        let mut state = MappingState::new();
        assert!(state.assign(mapping("2.1")));
        let mut second = mapping("2.1");
        second.template_section = Some("9".to_string());
        assert!(!state.assign(second));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn finalize_fills_gaps_in_input_order() {
        let sections = vec![
            DsrSection {
                section_num: "1".to_string(),
                title: "A".to_string(),
                file: "a.pdf".to_string(),
                content: String::new(),
            },
            DsrSection {
                section_num: "2".to_string(),
                title: "B".to_string(),
                file: "b.pdf".to_string(),
                content: String::new(),
            },
        ];
        let mut state = MappingState::new();
        state.assign(mapping("2"));

        let out = state.into_ordered(&sections);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].dsr_section, "1");
        assert_eq!(out[0].match_method, MatchMethod::NoMatch);
        assert!(out[0].template_section.is_none());
        assert_eq!(out[1].dsr_section, "2");
        assert_eq!(out[1].match_method, MatchMethod::ExactTitle);
    }
}
