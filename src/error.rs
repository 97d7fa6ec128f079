//! Error types for the `ragkit` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A required text input was empty or blank.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parallel ingestion arrays had mismatched lengths, or no texts were given.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration or construction-time validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external completion call failed (network, timeout, non-success
    /// status, or an unparseable response).
    #[error("Completion error: {0}")]
    Completion(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector index backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStore {
        /// The vector index backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
