use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use dsr_index::{DeterministicEmbedder, VectorIndex, content_hash};
use dsr_map::{Pass2Strategy, map_sections};
use dsr_model::{ContentIndex, ResolvedSource, SectionMapping, TemplateSection};
use dsr_resolve::resolve_sources;

use crate::cli::{IndexArgs, MapArgs, ResolveArgs};
use dsr_cli::inputs::{
    load_content_index, load_dsr_sections, load_index_documents, load_literature_index,
    load_mapping_entries, load_template_sections,
};

/// Embedding dimension for template snapshots built by `map`.
const EMBED_DIM: usize = 256;
/// Characters of section body indexed alongside the title.
const INDEX_BODY_CHARS: usize = 200;

pub struct MapOutcome {
    pub mappings: Vec<SectionMapping>,
    pub output_path: PathBuf,
}

pub struct ResolveOutcome {
    pub resolved: BTreeMap<String, Vec<ResolvedSource>>,
    pub output_path: PathBuf,
}

pub fn run_map(args: &MapArgs) -> Result<MapOutcome> {
    let span = info_span!("map");
    let _guard = span.enter();
    let start = Instant::now();

    let dsr_sections = load_dsr_sections(&args.sections)?;
    let template_sections = load_template_sections(&args.template)?;
    let mapping_entries = match &args.mapping_table {
        Some(path) => load_mapping_entries(path)?,
        None => Vec::new(),
    };
    info!(
        dsr_sections = dsr_sections.len(),
        template_sections = template_sections.len(),
        mapping_entries = mapping_entries.len(),
        "inputs loaded"
    );

    let index = if args.no_vector {
        None
    } else {
        match &args.vector_index {
            Some(dir) => Some(template_index(dir, &template_sections)?),
            None => {
                let mut index = VectorIndex::new(Box::new(DeterministicEmbedder::new(EMBED_DIM)));
                index_templates(&mut index, &template_sections)?;
                Some(index)
            }
        }
    };
    let pass2 = match &index {
        Some(index) => Pass2Strategy::Vector(index),
        None => Pass2Strategy::Keyword,
    };

    let mappings = map_sections(
        &dsr_sections,
        &template_sections,
        &mapping_entries,
        pass2,
        None,
    );

    write_json(&args.output, &mappings)?;
    info!(
        mappings = mappings.len(),
        output = %args.output.display(),
        duration_ms = start.elapsed().as_millis(),
        "mapping complete"
    );
    Ok(MapOutcome {
        mappings,
        output_path: args.output.clone(),
    })
}

pub fn run_resolve(args: &ResolveArgs) -> Result<ResolveOutcome> {
    let span = info_span!("resolve");
    let _guard = span.enter();
    let start = Instant::now();

    let template_sections = load_template_sections(&args.template)?;
    let ib_index = load_content_index(&args.ib_index)?;
    let pbrer_index = match &args.pbrer_index {
        Some(path) => Some(load_content_index(path)?),
        None => None,
    };
    let literature = load_literature_index(args.literature.as_deref());
    info!(
        template_sections = template_sections.len(),
        ib_entries = ib_index.len(),
        pbrer_entries = pbrer_index.as_ref().map_or(0, ContentIndex::len),
        literature_entries = literature.len(),
        "inputs loaded"
    );

    let literature = if args.literature.is_some() {
        Some(&literature)
    } else {
        None
    };

    let mut resolved = BTreeMap::new();
    for section in &template_sections {
        if section.ignore || section.required_sources.is_empty() {
            continue;
        }
        let records = resolve_sources(
            &section.required_sources,
            &ib_index,
            pbrer_index.as_ref(),
            literature,
        );
        resolved.insert(section.section_id.clone(), records);
    }

    write_json(&args.output, &resolved)?;
    info!(
        sections = resolved.len(),
        output = %args.output.display(),
        duration_ms = start.elapsed().as_millis(),
        "resolution complete"
    );
    Ok(ResolveOutcome {
        resolved,
        output_path: args.output.clone(),
    })
}

pub fn run_index(args: &IndexArgs) -> Result<()> {
    let mut index = VectorIndex::new(Box::new(DeterministicEmbedder::new(args.dimension)));

    let Some(documents_path) = &args.documents else {
        if !index.load(&args.index_dir, &args.name) {
            bail!(
                "no usable snapshot named {} under {}",
                args.name,
                args.index_dir.display()
            );
        }
        println!(
            "Snapshot: {} ({} documents, dimension {})",
            args.name,
            index.ntotal(),
            index.dimension()
        );
        return Ok(());
    };

    let documents = load_index_documents(documents_path)?;
    if documents.is_empty() {
        bail!("document set {} is empty", documents_path.display());
    }
    let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
    let metadata = documents.into_iter().map(|d| d.metadata).collect();
    index.add_documents(&texts, metadata, &args.source_type)?;
    let path = index.save(&args.index_dir, &args.name)?;
    println!(
        "Saved snapshot: {} ({} documents, dimension {})",
        path.display(),
        index.ntotal(),
        index.dimension()
    );
    Ok(())
}

/// Build or reuse a template snapshot keyed by content hash.
///
/// The snapshot name carries the hash of the indexed texts, so a rerun
/// over unchanged templates loads the existing snapshot instead of
/// re-embedding.
fn template_index(dir: &Path, template_sections: &[TemplateSection]) -> Result<VectorIndex> {
    let texts: Vec<String> = template_sections.iter().map(index_text).collect();
    let name = format!("templates-{}", content_hash(&texts));
    let mut index = VectorIndex::new(Box::new(DeterministicEmbedder::new(EMBED_DIM)));
    if index.load(dir, &name) {
        info!(snapshot = %name, documents = index.ntotal(), "reusing template snapshot");
        return Ok(index);
    }
    index_templates(&mut index, template_sections)?;
    let path = index.save(dir, &name)?;
    info!(snapshot = %path.display(), documents = index.ntotal(), "built template snapshot");
    Ok(index)
}

fn index_templates(index: &mut VectorIndex, template_sections: &[TemplateSection]) -> Result<()> {
    if template_sections.is_empty() {
        warn!("no template sections to index");
        return Ok(());
    }
    let texts: Vec<String> = template_sections.iter().map(index_text).collect();
    let metadata = template_sections
        .iter()
        .map(|t| {
            let mut meta = BTreeMap::new();
            meta.insert("section_id".to_string(), t.section_id.clone());
            meta.insert("title".to_string(), t.title.clone());
            meta
        })
        .collect();
    index
        .add_documents(&texts, metadata, "template")
        .context("index template sections")?;
    Ok(())
}

/// Text indexed per template section, mirroring the query shape used by
/// the similarity pass (title plus a body prefix).
fn index_text(section: &TemplateSection) -> String {
    let prefix: String = section.body.chars().take(INDEX_BODY_CHARS).collect();
    format!("{} {}", section.title, prefix)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
