//! In-memory vector index using cosine distance.
//!
//! This module provides [`InMemoryIndex`], a zero-dependency [`VectorIndex`]
//! backed by a `HashMap` protected by a `tokio::sync::RwLock`. It is
//! suitable for development, testing, and small-scale use cases.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::Metadata;
use crate::error::{RagError, Result};
use crate::vectorstore::{QueryResponse, VectorIndex};

struct Entry {
    text: String,
    metadata: Metadata,
    embedding: Vec<f32>,
}

/// An in-memory [`VectorIndex`] using cosine distance for search.
///
/// One instance is one collection with a fixed embedding dimension, set
/// at construction. Adding a vector of a different length fails, which
/// keeps the equal-dimension invariant for everything stored.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::{InMemoryIndex, VectorIndex};
///
/// let index = InMemoryIndex::new(384);
/// index.add(&ids, &texts, None, &embeddings).await?;
/// let response = index.query(&query_embedding, 5).await?;
/// ```
pub struct InMemoryIndex {
    dimensions: usize,
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryIndex {
    /// Create an empty index for embeddings of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, entries: RwLock::new(HashMap::new()) }
    }

    fn backend_err(message: impl Into<String>) -> RagError {
        RagError::VectorStore { backend: "in-memory".to_string(), message: message.into() }
    }
}

/// Compute cosine distance (1 − cosine similarity) between two vectors.
///
/// Returns 1.0 (orthogonal) if either vector has zero magnitude.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn add(
        &self,
        ids: &[String],
        texts: &[String],
        metadatas: Option<&[Metadata]>,
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if ids.len() != texts.len() || embeddings.len() != texts.len() {
            return Err(Self::backend_err("ids, texts and embeddings must have equal lengths"));
        }

        // Validate every dimension up front: adds are all-or-nothing.
        if let Some(embedding) = embeddings.iter().find(|e| e.len() != self.dimensions) {
            return Err(Self::backend_err(format!(
                "embedding dimension {} does not match collection dimension {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let mut entries = self.entries.write().await;
        for (i, id) in ids.iter().enumerate() {
            let metadata = metadatas.and_then(|m| m.get(i)).cloned().unwrap_or_default();
            entries.insert(
                id.clone(),
                Entry { text: texts[i].clone(), metadata, embedding: embeddings[i].clone() },
            );
        }
        Ok(())
    }

    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<QueryResponse> {
        if embedding.len() != self.dimensions {
            return Err(Self::backend_err(format!(
                "query dimension {} does not match collection dimension {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let entries = self.entries.read().await;
        let mut scored: Vec<(&String, &Entry, f32)> = entries
            .iter()
            .map(|(id, entry)| (id, entry, cosine_distance(&entry.embedding, embedding)))
            .collect();

        scored.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        let mut response = QueryResponse::default();
        for (id, entry, distance) in scored {
            response.ids.push(id.clone());
            response.documents.push(entry.text.clone());
            response.metadatas.push(entry.metadata.clone());
            response.distances.push(distance);
        }
        Ok(response)
    }
}
