//! JSON input loaders for the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use dsr_model::{ContentIndex, DsrSection, MappingTableEntry, TemplateSection};

/// One document for the `index` subcommand.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexDocument {
    pub text: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

pub fn load_dsr_sections(path: &Path) -> Result<Vec<DsrSection>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read DSR sections {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse DSR sections {}", path.display()))
}

pub fn load_template_sections(path: &Path) -> Result<Vec<TemplateSection>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read template sections {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parse template sections {}", path.display()))
}

pub fn load_mapping_entries(path: &Path) -> Result<Vec<MappingTableEntry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read mapping table {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse mapping table {}", path.display()))
}

/// Load a section index: a JSON object mapping section numbers (or table
/// numbers, or literature source names) to content strings.
pub fn load_content_index(path: &Path) -> Result<ContentIndex> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read index {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse index {}", path.display()))
}

/// Load literature references, tolerating absence and malformed input.
///
/// External citations degrade to placeholders when no usable index exists,
/// so a bad file is reported and treated as empty rather than failing the
/// whole resolution run.
#[must_use]
pub fn load_literature_index(path: Option<&Path>) -> ContentIndex {
    let Some(path) = path else {
        info!("no literature index provided, external refs become placeholders");
        return ContentIndex::new();
    };
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to read literature index, ignoring");
            return ContentIndex::new();
        }
    };
    match serde_json::from_str::<ContentIndex>(&raw) {
        Ok(index) => {
            info!(path = %path.display(), entries = index.len(), "loaded literature index");
            index
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "literature index is not a JSON object, ignoring");
            ContentIndex::new()
        }
    }
}

pub fn load_index_documents(path: &Path) -> Result<Vec<IndexDocument>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read documents {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse documents {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn literature_loader_accepts_object() {
        let file = write_temp(r#"{"Medline": "Search results.", "UpToDate": "Summary."}"#);
        let index = load_literature_index(Some(file.path()));
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Medline").map(String::as_str), Some("Search results."));
    }

    #[test]
    fn literature_loader_tolerates_missing_file() {
        let index = load_literature_index(Some(Path::new("/nonexistent/lit.json")));
        assert!(index.is_empty());
    }

    #[test]
    fn literature_loader_tolerates_non_object_json() {
        let file = write_temp(r#"["not", "an", "object"]"#);
        let index = load_literature_index(Some(file.path()));
        assert!(index.is_empty());
    }

    #[test]
    fn literature_loader_tolerates_absence() {
        assert!(load_literature_index(None).is_empty());
    }

    #[test]
    fn content_index_rejects_non_object_json() {
        let file = write_temp("[]");
        assert!(load_content_index(file.path()).is_err());
    }

    #[test]
    fn index_documents_default_empty_metadata() {
        let file = write_temp(r#"[{"text": "Some content"}]"#);
        let docs = load_index_documents(file.path()).expect("parse documents");
        assert_eq!(docs.len(), 1);
        assert!(docs[0].metadata.is_empty());
    }
}
