//! Embedding providers.
//!
//! The index only ever sees unit vectors of a fixed dimension; where they
//! come from is a collaborator concern. Live API-backed providers implement
//! [`EmbeddingProvider`] in the application layer; this crate ships the
//! deterministic offline provider used for dry runs and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use dsr_model::Result;

/// Source of embedding vectors for texts.
///
/// Implementations may block on network I/O; retry/backoff is the
/// provider's responsibility, and failures surface as
/// [`dsr_model::DsrError::ProviderUnavailable`].
pub trait EmbeddingProvider {
    /// Fixed output dimension for every vector this provider returns.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per text, in order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Offline provider producing deterministic pseudo-random unit vectors.
///
/// Each text's vector is seeded from a digest of the text itself, so the
/// same text always embeds identically regardless of batching. That makes
/// add/search/persist round-trips reproducible without network calls.
#[derive(Debug, Clone, Copy)]
pub struct DeterministicEmbedder {
    dimension: usize,
}

impl DeterministicEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl EmbeddingProvider for DeterministicEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut rng = StdRng::seed_from_u64(text_seed(text));
                let vec: Vec<f32> = (0..self.dimension)
                    .map(|_| rng.random::<f32>() * 2.0 - 1.0)
                    .collect();
                normalize_l2(vec)
            })
            .collect())
    }
}

fn text_seed(text: &str) -> u64 {
    let digest = Sha256::digest(text.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Scale a vector to unit length so inner product equals cosine similarity.
/// Zero vectors are returned unchanged.
#[must_use]
pub fn normalize_l2(mut vec: Vec<f32>) -> Vec<f32> {
    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vec {
            *v /= norm;
        }
    }
    vec
}
