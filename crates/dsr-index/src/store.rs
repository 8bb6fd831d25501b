//! Flat inner-product vector index.
//!
//! Vectors are L2-normalized on insertion so inner product equals cosine
//! similarity. The set is append-only: there is no deletion or update, and
//! insertion order is the tie-break for equal scores.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result as AnyResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dsr_model::{DsrError, Result};

use crate::embed::{EmbeddingProvider, normalize_l2};

/// Metadata key added to every record for [`VectorIndex::search`] filtering.
pub const SOURCE_TYPE_KEY: &str = "source_type";

/// One search result: the stored metadata and its cosine similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub metadata: BTreeMap<String, String>,
    pub score: f32,
}

/// Serialized snapshot layout: vectors and metadata as a named unit.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    metadata: Vec<BTreeMap<String, String>>,
}

/// Embedding store with add/search/persist over a fixed-dimension space.
pub struct VectorIndex {
    embedder: Box<dyn EmbeddingProvider>,
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    metadata: Vec<BTreeMap<String, String>>,
}

impl VectorIndex {
    /// Create an empty index; the dimension is fixed by the provider.
    #[must_use]
    pub fn new(embedder: Box<dyn EmbeddingProvider>) -> Self {
        let dimension = embedder.dimension();
        Self {
            embedder,
            dimension,
            vectors: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Embedding dimension of this index.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn ntotal(&self) -> usize {
        self.vectors.len()
    }

    /// Embed and append documents with their metadata.
    ///
    /// Each metadata record is augmented with `source_type` for filtering.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `texts` and `metadata` lengths differ;
    /// `ProviderUnavailable` when the embedding provider fails.
    pub fn add_documents(
        &mut self,
        texts: &[String],
        metadata: Vec<BTreeMap<String, String>>,
        source_type: &str,
    ) -> Result<()> {
        if texts.is_empty() && metadata.is_empty() {
            return Ok(());
        }
        if texts.len() != metadata.len() {
            return Err(DsrError::InvalidArgument(format!(
                "texts ({}) and metadata ({}) must have the same length",
                texts.len(),
                metadata.len()
            )));
        }

        let embeddings = self.embedder.embed(texts)?;
        for (vec, mut meta) in embeddings.into_iter().zip(metadata) {
            meta.insert(SOURCE_TYPE_KEY.to_string(), source_type.to_string());
            self.vectors.push(normalize_l2(vec));
            self.metadata.push(meta);
        }
        info!(
            added = texts.len(),
            source_type,
            total = self.ntotal(),
            "added documents to vector index"
        );
        Ok(())
    }

    /// Search for the `k` nearest documents by descending cosine similarity.
    ///
    /// With `filter_source` set, `min(3k, ntotal)` candidates are ranked
    /// before filtering so the filter does not starve the result count.
    /// Equal scores keep insertion order.
    ///
    /// # Errors
    ///
    /// `ProviderUnavailable` when the query embedding fails.
    pub fn search(
        &self,
        query: &str,
        k: usize,
        filter_source: Option<&str>,
    ) -> Result<Vec<SearchHit>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embedder
            .embed(std::slice::from_ref(&query.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DsrError::ProviderUnavailable("provider returned no query vector".to_string())
            })?;
        let query_vec = normalize_l2(query_vec);

        let search_k = if filter_source.is_some() {
            (3 * k).min(self.ntotal())
        } else {
            k.min(self.ntotal())
        };

        let mut ranked: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, vec)| (idx, inner_product(&query_vec, vec)))
            .collect();
        // Stable by insertion order on ties: sort on (score desc, idx asc).
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(search_k);

        let mut hits = Vec::new();
        for (idx, score) in ranked {
            let meta = &self.metadata[idx];
            if let Some(wanted) = filter_source
                && meta.get(SOURCE_TYPE_KEY).map(String::as_str) != Some(wanted)
            {
                continue;
            }
            hits.push(SearchHit {
                metadata: meta.clone(),
                score,
            });
            if hits.len() >= k {
                break;
            }
        }
        Ok(hits)
    }

    /// Persist vectors and metadata as a named snapshot under `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory or file cannot be written.
    pub fn save(&self, dir: &Path, name: &str) -> AnyResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create snapshot dir: {}", dir.display()))?;
        let path = snapshot_path(dir, name);
        let snapshot = Snapshot {
            dimension: self.dimension,
            vectors: self.vectors.clone(),
            metadata: self.metadata.clone(),
        };
        let json = serde_json::to_string(&snapshot)
            .with_context(|| format!("Failed to serialize snapshot '{name}'"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!(name, vectors = self.ntotal(), "saved vector index snapshot");
        Ok(path)
    }

    /// Restore a named snapshot, replacing the current contents.
    ///
    /// Returns false when the snapshot is missing, unreadable, corrupt, or
    /// does not match this index's dimension; the index is left empty and
    /// usable in that case.
    pub fn load(&mut self, dir: &Path, name: &str) -> bool {
        let path = snapshot_path(dir, name);
        if !path.exists() {
            return false;
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!(name, %error, "failed to read vector index snapshot");
                return false;
            }
        };
        let snapshot: Snapshot = match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(name, %error, "failed to parse vector index snapshot");
                return false;
            }
        };
        if snapshot.dimension != self.dimension
            || snapshot.vectors.len() != snapshot.metadata.len()
            || snapshot
                .vectors
                .iter()
                .any(|vec| vec.len() != snapshot.dimension)
        {
            warn!(name, "vector index snapshot is inconsistent, ignoring");
            return false;
        }
        self.vectors = snapshot.vectors;
        self.metadata = snapshot.metadata;
        info!(name, vectors = self.ntotal(), "loaded vector index snapshot");
        true
    }
}

fn snapshot_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.index.json"))
}

fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Short content hash over a document set, for snapshot reuse checks.
#[must_use]
pub fn content_hash(texts: &[String]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            hasher.update(b"\n");
        }
        hasher.update(text.as_bytes());
    }
    hex::encode(hasher.finalize())[..16].to_string()
}
