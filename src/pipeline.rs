//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-answer workflow by
//! composing an [`EmbeddingProvider`], a [`VectorIndex`] wrapped in a
//! [`DocumentStore`], a [`ContextBuilder`], and an [`AnswerModel`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragkit::{
//!     HashingEmbeddingProvider, InMemoryIndex, OfflineAnswerModel, RagConfig, RagPipeline,
//! };
//!
//! let provider = HashingEmbeddingProvider::default();
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(provider))
//!     .index(Arc::new(InMemoryIndex::new(384)))
//!     .answer_model(Arc::new(OfflineAnswerModel))
//!     .build()?;
//!
//! pipeline.add_document("The sky is blue", None).await?;
//! let response = pipeline.chat("What color is the sky?", 5).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::completion::AnswerModel;
use crate::config::RagConfig;
use crate::context::ContextBuilder;
use crate::document::{ChatResponse, Match, Metadata};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::{DocumentStore, VectorIndex};

/// The RAG pipeline orchestrator.
///
/// Each call is a single synchronous request, independent of prior calls
/// except through the persisted collection. Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    store: DocumentStore,
    context_builder: ContextBuilder,
    answer_model: Arc<dyn AnswerModel>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Ingest a single document: trim → embed → store.
    ///
    /// A fresh id unique within the collection is generated for the
    /// document, so repeated ingestion never overwrites earlier entries.
    /// `metadata` defaults to an empty mapping. Ingestion is
    /// all-or-nothing. Returns the generated document id.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] if the text is empty after
    /// trimming; embedding and storage failures propagate as-is.
    pub async fn add_document(&self, text: &str, metadata: Option<Metadata>) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RagError::InvalidInput("empty document text".to_string()));
        }

        let embedding = self.embedding_provider.embed(text).await.map_err(|e| {
            error!(error = %e, "embedding failed during ingestion");
            e
        })?;

        let id = Uuid::new_v4().to_string();
        self.store
            .add(
                &[text.to_string()],
                Some(vec![id.clone()]),
                Some(vec![metadata.unwrap_or_default()]),
                &[embedding],
            )
            .await?;

        info!(
            collection = %self.store.collection(),
            document.id = %id,
            text_len = text.len(),
            "ingested document"
        );
        Ok(id)
    }

    /// Retrieve the `k` nearest documents for a query.
    ///
    /// Embeds the query, searches the store, and reshapes the raw
    /// positional arrays into [`Match`] records by zipping positions.
    /// Optional arrays shorter than the documents array are filled
    /// defensively with `None` ids/scores and empty metadata.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<Match>> {
        let query_embedding = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            e
        })?;

        let response = self.store.search(&query_embedding, k).await.map_err(|e| {
            error!(collection = %self.store.collection(), error = %e, "vector index query failed");
            e
        })?;

        let matches: Vec<Match> = response
            .documents
            .iter()
            .enumerate()
            .map(|(i, text)| Match {
                id: response.ids.get(i).cloned(),
                text: text.clone(),
                metadata: response.metadatas.get(i).cloned().unwrap_or_default(),
                score: response.distances.get(i).copied(),
            })
            .collect();

        info!(result_count = matches.len(), "query completed");
        Ok(matches)
    }

    /// Answer a question grounded on retrieved context.
    ///
    /// Runs [`search`](RagPipeline::search), assembles the bounded context
    /// with its citation sources, and delegates to the configured
    /// [`AnswerModel`]. The returned sources are exactly the ones the
    /// context builder produced, in order.
    pub async fn chat(&self, question: &str, k: usize) -> Result<ChatResponse> {
        let matches = self.search(question, k).await?;
        let (context, sources) = self.context_builder.build(&matches);

        let answer =
            self.answer_model.answer(question, &context, &sources).await.map_err(|e| {
                error!(error = %e, "answer generation failed");
                e
            })?;

        Ok(ChatResponse { answer, sources })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config` is optional and defaults to [`RagConfig::default()`]; the
/// embedding provider, index, and answer model are required. Call
/// [`build()`](RagPipelineBuilder::build) to validate and produce the
/// pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    index: Option<Arc<dyn VectorIndex>>,
    answer_model: Option<Arc<dyn AnswerModel>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector index backend.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the answer generation strategy.
    pub fn answer_model(mut self, model: Arc<dyn AnswerModel>) -> Self {
        self.answer_model = Some(model);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::Config("embedding_provider is required".to_string()))?;
        let index =
            self.index.ok_or_else(|| RagError::Config("index is required".to_string()))?;
        let answer_model = self
            .answer_model
            .ok_or_else(|| RagError::Config("answer_model is required".to_string()))?;

        let store = DocumentStore::new(config.collection.clone(), index);
        let context_builder = ContextBuilder::new(config.max_context_chars);

        Ok(RagPipeline { config, embedding_provider, store, context_builder, answer_model })
    }
}
