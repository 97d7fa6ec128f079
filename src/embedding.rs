//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap a specific embedding strategy (deterministic
/// hashing, a sentence-embedding model, etc.) behind a unified async
/// interface. All vectors produced by one provider have the same fixed
/// dimensionality, reported by [`dimensions`](EmbeddingProvider::dimensions).
///
/// Input text is trimmed before embedding; text that is empty after
/// trimming fails with [`RagError::InvalidInput`](crate::RagError::InvalidInput),
/// as does an empty batch.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::EmbeddingProvider;
///
/// let provider = HashingEmbeddingProvider::default();
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs.
    ///
    /// Fails with [`RagError::InvalidInput`](crate::RagError::InvalidInput)
    /// on an empty batch. The default implementation calls
    /// [`embed`](EmbeddingProvider::embed) sequentially for each input;
    /// backends with native batching should override it.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(crate::error::RagError::InvalidInput(
                "empty text batch for embedding".to_string(),
            ));
        }
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
