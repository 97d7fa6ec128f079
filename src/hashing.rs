//! Deterministic bag-of-words hashed embeddings.
//!
//! [`HashingEmbeddingProvider`] needs no model download and no network:
//! it hashes whitespace tokens into a fixed-size accumulator and
//! L2-normalizes the result. Identical input always produces a
//! bit-identical vector, which makes it suitable for tests and for
//! fully offline deployments.

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Default embedding dimensionality, matching common sentence-embedding
/// models such as all-MiniLM-L6-v2.
pub const DEFAULT_DIMENSIONS: usize = 384;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the token bytes.
///
/// The hash function is fixed so that embeddings are reproducible across
/// processes and releases; `std` hashers carry no such guarantee.
fn fnv1a_64(token: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in token.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// An [`EmbeddingProvider`] producing deterministic hashed bag-of-words
/// embeddings.
///
/// Tokenization lowercases the input and splits on whitespace. Each token
/// adds `1.0` at index `fnv1a_64(token) % dimensions`; the accumulator is
/// then L2-normalized (a zero norm is treated as `1.0`). Token collisions
/// are acceptable and deterministic.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::HashingEmbeddingProvider;
///
/// let provider = HashingEmbeddingProvider::default();
/// let a = provider.embed("The sky is blue").await?;
/// let b = provider.embed("The sky is blue").await?;
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    /// Create a provider with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RagError::InvalidInput("empty text for embedding".to_string()));
        }

        let mut vec = vec![0.0f32; self.dimensions];
        for token in trimmed.to_lowercase().split_whitespace() {
            let index = (fnv1a_64(token) % self.dimensions as u64) as usize;
            vec[index] += 1.0;
        }

        let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for v in &mut vec {
            *v /= norm;
        }

        Ok(vec)
    }
}

impl Default for HashingEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_one(text)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(RagError::InvalidInput("empty text batch for embedding".to_string()));
        }
        texts.iter().map(|t| self.embed_one(t)).collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
