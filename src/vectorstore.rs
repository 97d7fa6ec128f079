//! Vector index boundary and the validated document store wrapper.
//!
//! The actual nearest-neighbor engine is an external collaborator behind
//! the [`VectorIndex`] trait: it persists `(id, text, metadata, vector)`
//! tuples and answers k-nearest-neighbor queries by cosine distance.
//! [`DocumentStore`] is the thin, validated, defaulted wrapper around it
//! that the pipeline talks to.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Metadata;
use crate::error::{RagError, Result};

/// Default number of results when the caller passes an out-of-range `k`.
pub const DEFAULT_TOP_K: usize = 5;

/// Largest `k` accepted before the default is substituted.
pub const MAX_TOP_K: usize = 25;

/// Raw positional-array result of a nearest-neighbor query.
///
/// Arrays are ordered by ascending cosine distance and are expected to
/// have equal lengths; consumers should still zip them defensively, since
/// a backend may omit trailing metadata or distances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Identifiers of the matched documents.
    pub ids: Vec<String>,
    /// Stored texts of the matched documents.
    pub documents: Vec<String>,
    /// Metadata of the matched documents.
    pub metadatas: Vec<Metadata>,
    /// Cosine distances to the query embedding (lower is more similar).
    pub distances: Vec<f32>,
}

/// A nearest-neighbor index over one collection of embedded documents.
///
/// One collection has one fixed embedding dimension and one distance
/// metric (cosine), set at creation and never changed. The index never
/// embeds text itself; embeddings are required at this boundary.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Add documents to the index. All slices must have equal lengths.
    async fn add(
        &self,
        ids: &[String],
        texts: &[String],
        metadatas: Option<&[Metadata]>,
        embeddings: &[Vec<f32>],
    ) -> Result<()>;

    /// Return the `top_k` nearest documents to `embedding`, ordered by
    /// ascending cosine distance.
    async fn query(&self, embedding: &[f32], top_k: usize) -> Result<QueryResponse>;
}

/// Validated wrapper around a [`VectorIndex`] for one named collection.
///
/// `add` enforces that ingestion arrays are parallel and generates
/// sequential ids when none are given; `search` clamps out-of-range `k`
/// values to a default. Similarity computation and persistence are
/// entirely the index's concern.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use ragkit::{DocumentStore, InMemoryIndex};
///
/// let store = DocumentStore::new("documents", Arc::new(InMemoryIndex::new(384)));
/// store.add(&texts, None, None, &embeddings).await?;
/// let response = store.search(&query_embedding, 5).await?;
/// ```
pub struct DocumentStore {
    collection: String,
    index: Arc<dyn VectorIndex>,
}

impl DocumentStore {
    /// Create a store for the named collection backed by the given index.
    pub fn new(collection: impl Into<String>, index: Arc<dyn VectorIndex>) -> Self {
        Self { collection: collection.into(), index }
    }

    /// Return the collection name this store writes to.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Add texts with their embeddings to the collection.
    ///
    /// If `ids` is omitted, sequential ids `doc-{i}` are generated, unique
    /// within this call. Ingestion is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Validation`] if `texts` is empty or any given
    /// parallel array's length differs from `texts`' length.
    pub async fn add(
        &self,
        texts: &[String],
        ids: Option<Vec<String>>,
        metadatas: Option<Vec<Metadata>>,
        embeddings: &[Vec<f32>],
    ) -> Result<()> {
        if texts.is_empty() {
            return Err(RagError::Validation("texts must not be empty".to_string()));
        }
        if let Some(ids) = &ids {
            if ids.len() != texts.len() {
                return Err(RagError::Validation(format!(
                    "ids length ({}) must equal texts length ({})",
                    ids.len(),
                    texts.len()
                )));
            }
        }
        if let Some(metadatas) = &metadatas {
            if metadatas.len() != texts.len() {
                return Err(RagError::Validation(format!(
                    "metadatas length ({}) must equal texts length ({})",
                    metadatas.len(),
                    texts.len()
                )));
            }
        }
        if embeddings.len() != texts.len() {
            return Err(RagError::Validation(format!(
                "embeddings length ({}) must equal texts length ({})",
                embeddings.len(),
                texts.len()
            )));
        }

        let ids = ids.unwrap_or_else(|| (0..texts.len()).map(|i| format!("doc-{i}")).collect());

        debug!(collection = %self.collection, count = texts.len(), "adding documents");
        self.index.add(&ids, texts, metadatas.as_deref(), embeddings).await
    }

    /// Search the collection for the `k` nearest documents.
    ///
    /// `k == 0` or `k > 25` silently substitutes the default of 5; this is
    /// a deliberate permissive policy, not an error. Returns at most the
    /// effective `k` results, ordered by ascending cosine distance.
    pub async fn search(&self, query_embedding: &[f32], k: usize) -> Result<QueryResponse> {
        let k = if k == 0 || k > MAX_TOP_K { DEFAULT_TOP_K } else { k };
        debug!(collection = %self.collection, top_k = k, "querying index");
        self.index.query(query_embedding, k).await
    }
}
