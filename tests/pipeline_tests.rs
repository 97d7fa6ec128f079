//! End-to-end pipeline tests in fully deterministic (offline) mode.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ragkit::document::Metadata;
use ragkit::vectorstore::QueryResponse;
use ragkit::{
    EmbeddingProvider, HashingEmbeddingProvider, InMemoryIndex, NO_CONTEXT_ANSWER,
    OfflineAnswerModel, RagConfig, RagError, RagPipeline, Result, VectorIndex,
};
use serde_json::json;

fn offline_pipeline() -> RagPipeline {
    let provider = HashingEmbeddingProvider::default();
    let dimensions = provider.dimensions();
    RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(provider))
        .index(Arc::new(InMemoryIndex::new(dimensions)))
        .answer_model(Arc::new(OfflineAnswerModel))
        .build()
        .unwrap()
}

fn doc1_metadata() -> Metadata {
    HashMap::from([("source".to_string(), json!("doc1"))])
}

#[tokio::test]
async fn ingest_then_search_finds_the_document() {
    let pipeline = offline_pipeline();
    pipeline.add_document("The sky is blue", Some(doc1_metadata())).await.unwrap();

    let matches = pipeline.search("sky color", 1).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "The sky is blue");
    assert_eq!(matches[0].metadata.get("source"), Some(&json!("doc1")));
    assert!(matches[0].score.is_some());
}

#[tokio::test]
async fn chat_cites_the_ingested_source() {
    let pipeline = offline_pipeline();
    pipeline.add_document("The sky is blue", Some(doc1_metadata())).await.unwrap();

    let response = pipeline.chat("sky color", 1).await.unwrap();
    assert_eq!(response.sources.len(), 1);
    assert_eq!(response.sources[0].id, "doc1");
    assert_eq!(response.sources[0].label, "source_0");
    assert!(response.answer.contains("sky color"));
    assert!(response.answer.contains("source_0"));
}

#[tokio::test]
async fn every_ingested_document_is_retained() {
    let pipeline = offline_pipeline();
    let first = pipeline.add_document("The sky is blue", Some(doc1_metadata())).await.unwrap();
    let second = pipeline.add_document("Grass is green", None).await.unwrap();
    assert_ne!(first, second);

    let matches = pipeline.search("sky color", 5).await.unwrap();
    assert_eq!(matches.len(), 2, "second ingest must not replace the first");

    let texts: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
    assert!(texts.contains(&"The sky is blue"));
    assert!(texts.contains(&"Grass is green"));
}

#[tokio::test]
async fn multiple_documents_are_ranked_by_similarity() {
    let pipeline = offline_pipeline();
    pipeline.add_document("The sky is blue", Some(doc1_metadata())).await.unwrap();
    pipeline.add_document("Grass is green", None).await.unwrap();

    let matches = pipeline.search("sky color", 5).await.unwrap();
    assert_eq!(matches[0].text, "The sky is blue");
    assert!(matches[0].score.unwrap() <= matches[1].score.unwrap());
}

#[tokio::test]
async fn chat_on_empty_collection_says_dont_know() {
    let pipeline = offline_pipeline();
    let response = pipeline.chat("anything at all", 5).await.unwrap();
    assert_eq!(response.answer, NO_CONTEXT_ANSWER);
    assert!(response.sources.is_empty());
}

#[tokio::test]
async fn empty_document_fails_with_invalid_input() {
    let pipeline = offline_pipeline();
    assert!(matches!(
        pipeline.add_document("   ", None).await,
        Err(RagError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn blank_query_fails_with_invalid_input() {
    let pipeline = offline_pipeline();
    assert!(matches!(pipeline.search("  ", 5).await, Err(RagError::InvalidInput(_))));
}

#[tokio::test]
async fn missing_metadata_defaults_to_empty_mapping() {
    let pipeline = offline_pipeline();
    pipeline.add_document("plain document", None).await.unwrap();

    let matches = pipeline.search("plain document", 1).await.unwrap();
    assert!(matches[0].metadata.is_empty());
}

#[tokio::test]
async fn builder_rejects_missing_components() {
    let provider = HashingEmbeddingProvider::default();
    let result = RagPipeline::builder().embedding_provider(Arc::new(provider)).build();
    assert!(matches!(result, Err(RagError::Config(_))));
}

// ── defensive reshaping of raw index responses ─────────────────────

/// An index whose query response has metadata and distance arrays shorter
/// than the documents array, as a misbehaving backend might return.
struct RaggedIndex;

#[async_trait]
impl VectorIndex for RaggedIndex {
    async fn add(
        &self,
        _ids: &[String],
        _texts: &[String],
        _metadatas: Option<&[Metadata]>,
        _embeddings: &[Vec<f32>],
    ) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _embedding: &[f32], _top_k: usize) -> Result<QueryResponse> {
        Ok(QueryResponse {
            ids: vec!["id-0".to_string()],
            documents: vec!["first".to_string(), "second".to_string()],
            metadatas: vec![HashMap::from([("source".to_string(), json!("doc0"))])],
            distances: vec![0.25],
        })
    }
}

#[tokio::test]
async fn short_optional_arrays_are_filled_defensively() {
    let pipeline = RagPipeline::builder()
        .embedding_provider(Arc::new(HashingEmbeddingProvider::default()))
        .index(Arc::new(RaggedIndex))
        .answer_model(Arc::new(OfflineAnswerModel))
        .build()
        .unwrap();

    let matches = pipeline.search("query", 5).await.unwrap();
    assert_eq!(matches.len(), 2);

    assert_eq!(matches[0].id.as_deref(), Some("id-0"));
    assert_eq!(matches[0].metadata.get("source"), Some(&json!("doc0")));
    assert_eq!(matches[0].score, Some(0.25));

    assert_eq!(matches[1].id, None);
    assert!(matches[1].metadata.is_empty());
    assert_eq!(matches[1].score, None);
}

#[tokio::test]
async fn chat_over_ragged_index_still_labels_positionally() {
    let pipeline = RagPipeline::builder()
        .embedding_provider(Arc::new(HashingEmbeddingProvider::default()))
        .index(Arc::new(RaggedIndex))
        .answer_model(Arc::new(OfflineAnswerModel))
        .build()
        .unwrap();

    let response = pipeline.chat("query", 5).await.unwrap();
    assert_eq!(response.sources.len(), 2);
    assert_eq!(response.sources[0].id, "doc0");
    // Second match has no metadata.source and no id: synthetic chunk id.
    assert_eq!(response.sources[1].id, "chunk_1");
    assert_eq!(response.sources[1].label, "source_1");
}
