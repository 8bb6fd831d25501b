//! Section types produced by the extraction and template-parsing
//! collaborators. The core reads these; it never mutates them.

use serde::{Deserialize, Serialize};

/// One section of the target report template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Dotted-decimal id (`"3.1.2"`) or a label (`"Executive Summary"`).
    pub section_id: String,
    /// Section heading text.
    pub title: String,
    /// Template body / author instructions for this section.
    #[serde(default)]
    pub body: String,
    /// Ordered citation strings this section draws evidence from.
    #[serde(default)]
    pub required_sources: Vec<String>,
    /// True for sections the template marks as not to be populated.
    #[serde(default)]
    pub ignore: bool,
}

/// One section of the source Drug Safety Report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsrSection {
    /// Dotted-decimal section number within the DSR.
    pub section_num: String,
    /// Section heading text.
    pub title: String,
    /// File the section was extracted from.
    #[serde(default)]
    pub file: String,
    /// Extracted section text.
    #[serde(default)]
    pub content: String,
}

/// An author-declared link between a DSR section and the template,
/// carrying the citations that justify it. Highest-priority mapping input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTableEntry {
    /// DSR section id the entry is keyed by.
    pub dsr_section_id: String,
    /// Title as written in the mapping table.
    #[serde(default)]
    pub dsr_title: String,
    /// Citation strings listed for this section.
    #[serde(default)]
    pub source_refs: Vec<String>,
}
