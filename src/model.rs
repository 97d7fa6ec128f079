//! Model-backed embedding provider.
//!
//! [`ModelEmbeddingProvider`] delegates to a pluggable sentence-embedding
//! model behind the [`EmbeddingModel`] trait. The model handle is
//! constructed once by the caller and injected; sharing it across several
//! providers is done explicitly with an `Arc` rather than through hidden
//! process-global state, so expensive initialization happens at most once
//! and the loaded model is read-only thereafter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// A loaded sentence-embedding model.
///
/// Implementations must return L2-normalized vectors, one per input, in
/// input order. The trait is the crate's boundary to the actual model
/// runtime (ONNX, a local server, a remote embeddings API, ...).
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Encode a batch of texts into unit-norm embedding vectors.
    async fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Return the dimensionality of vectors produced by this model.
    fn dimensions(&self) -> usize;
}

/// An [`EmbeddingProvider`] backed by an injected [`EmbeddingModel`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use ragkit::ModelEmbeddingProvider;
///
/// let model: Arc<dyn EmbeddingModel> = Arc::new(load_model()?);
/// // The same handle can back several providers.
/// let provider = ModelEmbeddingProvider::new(Arc::clone(&model));
/// let embedding = provider.embed("hello world").await?;
/// ```
pub struct ModelEmbeddingProvider {
    model: Arc<dyn EmbeddingModel>,
}

impl ModelEmbeddingProvider {
    /// Create a provider around a constructed model handle.
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self { model }
    }

    /// Trim inputs, rejecting any that are blank.
    fn trimmed<'a>(texts: &[&'a str]) -> Result<Vec<&'a str>> {
        texts
            .iter()
            .map(|t| {
                let trimmed = t.trim();
                if trimmed.is_empty() {
                    Err(RagError::InvalidInput("empty text for embedding".to_string()))
                } else {
                    Ok(trimmed)
                }
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for ModelEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RagError::InvalidInput("empty text for embedding".to_string()));
        }

        debug!(text_len = trimmed.len(), "embedding single text via model");

        let vectors = self.model.encode(&[trimmed]).await?;
        vectors.into_iter().next().ok_or_else(|| RagError::Embedding {
            provider: "model".into(),
            message: "model returned no vectors".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(RagError::InvalidInput("empty text batch for embedding".to_string()));
        }

        let trimmed = Self::trimmed(texts)?;
        debug!(batch_size = trimmed.len(), "embedding batch via model");
        self.model.encode(&trimmed).await
    }

    fn dimensions(&self) -> usize {
        self.model.dimensions()
    }
}
