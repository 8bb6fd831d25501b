//! Embedding-based similarity index.
//!
//! Backs the section mapper's similarity pass. Fixed-dimension vectors,
//! cosine similarity via normalized inner product, metadata filtering,
//! and named JSON snapshots for reuse across runs.

pub mod embed;
pub mod store;

pub use embed::{DeterministicEmbedder, EmbeddingProvider};
pub use store::{SOURCE_TYPE_KEY, SearchHit, VectorIndex, content_hash};
