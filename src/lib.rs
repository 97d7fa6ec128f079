//! # ragkit
//!
//! Minimal retrieval-augmented generation: store documents as vector
//! embeddings, retrieve the nearest neighbors for a query, assemble a
//! bounded context with citation tracking, and ask a language model to
//! answer from that context only.
//!
//! ## Overview
//!
//! - [`EmbeddingProvider`] — text → fixed-dimension vector, with the
//!   deterministic [`HashingEmbeddingProvider`] and the injectable
//!   [`ModelEmbeddingProvider`].
//! - [`VectorIndex`] — black-box nearest-neighbor service boundary;
//!   [`InMemoryIndex`] is the bundled cosine-distance implementation and
//!   [`DocumentStore`] is the validated wrapper the pipeline uses.
//! - [`ContextBuilder`] — deterministic bounded context assembly with
//!   `[source_i]` citation labels.
//! - [`AnswerModel`] — answer strategy: [`OfflineAnswerModel`] template
//!   or the OpenRouter client (behind the `openrouter` feature).
//! - [`RagPipeline`] — the orchestrator tying the above together.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragkit::{
//!     HashingEmbeddingProvider, InMemoryIndex, OfflineAnswerModel, RagConfig, RagPipeline,
//! };
//!
//! let provider = HashingEmbeddingProvider::default();
//! let dimensions = provider.dimensions();
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(provider))
//!     .index(Arc::new(InMemoryIndex::new(dimensions)))
//!     .answer_model(Arc::new(OfflineAnswerModel))
//!     .build()?;
//!
//! pipeline.add_document("The sky is blue", None).await?;
//! let response = pipeline.chat("What color is the sky?", 5).await?;
//! println!("{} {:?}", response.answer, response.sources);
//! ```
//!
//! ## Features
//!
//! - `openrouter` (default) — enables
//!   [`openrouter::OpenRouterModel`], the reqwest-backed chat-completion
//!   client.

pub mod completion;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod hashing;
pub mod inmemory;
pub mod model;
#[cfg(feature = "openrouter")]
pub mod openrouter;
pub mod pipeline;
pub mod vectorstore;

pub use completion::{AnswerModel, NO_CONTEXT_ANSWER, OfflineAnswerModel};
pub use config::{RagConfig, RagConfigBuilder};
pub use context::{ContextBuilder, MAX_CONTEXT_CHARS};
pub use document::{ChatResponse, Match, Metadata, Source};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use hashing::HashingEmbeddingProvider;
pub use inmemory::InMemoryIndex;
pub use model::{EmbeddingModel, ModelEmbeddingProvider};
#[cfg(feature = "openrouter")]
pub use openrouter::OpenRouterModel;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use vectorstore::{DEFAULT_TOP_K, DocumentStore, MAX_TOP_K, QueryResponse, VectorIndex};
