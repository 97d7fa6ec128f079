//! Tests for the validated document store wrapper and the in-memory index.

use std::collections::HashMap;
use std::sync::Arc;

use ragkit::document::Metadata;
use ragkit::{DocumentStore, InMemoryIndex, RagError, VectorIndex};
use serde_json::json;

const DIM: usize = 4;

fn store() -> DocumentStore {
    DocumentStore::new("documents", Arc::new(InMemoryIndex::new(DIM)))
}

fn unit(axis: usize) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[axis % DIM] = 1.0;
    v
}

/// A normalized vector leaning toward the x axis by `weight`.
fn leaning(weight: f32) -> Vec<f32> {
    let v = [weight, 1.0 - weight, 0.0, 0.0];
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    v.iter().map(|x| x / norm).collect()
}

fn texts(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("text {i}")).collect()
}

#[tokio::test]
async fn empty_texts_fail_with_validation_error() {
    let result = store().add(&[], None, None, &[]).await;
    assert!(matches!(result, Err(RagError::Validation(_))));
}

#[tokio::test]
async fn mismatched_ids_fail_with_validation_error() {
    let result = store()
        .add(&texts(2), Some(vec!["only-one".to_string()]), None, &[unit(0), unit(1)])
        .await;
    assert!(matches!(result, Err(RagError::Validation(_))));
}

#[tokio::test]
async fn mismatched_metadatas_fail_with_validation_error() {
    let metadatas: Vec<Metadata> = vec![HashMap::new()];
    let result = store().add(&texts(2), None, Some(metadatas), &[unit(0), unit(1)]).await;
    assert!(matches!(result, Err(RagError::Validation(_))));
}

#[tokio::test]
async fn mismatched_embeddings_fail_with_validation_error() {
    let result = store().add(&texts(2), None, None, &[unit(0)]).await;
    assert!(matches!(result, Err(RagError::Validation(_))));
}

#[tokio::test]
async fn omitted_ids_are_generated_unique_per_text() {
    let store = store();
    store.add(&texts(3), None, None, &[unit(0), unit(1), unit(2)]).await.unwrap();

    let response = store.search(&unit(0), 5).await.unwrap();
    assert_eq!(response.ids.len(), 3);
    let mut ids = response.ids.clone();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.starts_with("doc-")));
}

#[tokio::test]
async fn out_of_range_k_defaults_to_five() {
    let store = store();
    let embeddings: Vec<Vec<f32>> = (0..8).map(|i| leaning(i as f32 / 8.0)).collect();
    store.add(&texts(8), None, None, &embeddings).await.unwrap();

    for k in [0, 26, 100] {
        let response = store.search(&unit(0), k).await.unwrap();
        assert_eq!(response.documents.len(), 5, "k={k} should behave like k=5");
    }
    let response = store.search(&unit(0), 3).await.unwrap();
    assert_eq!(response.documents.len(), 3);
    let response = store.search(&unit(0), 25).await.unwrap();
    assert_eq!(response.documents.len(), 8);
}

#[tokio::test]
async fn results_are_ordered_by_ascending_distance() {
    let store = store();
    let embeddings: Vec<Vec<f32>> = (0..6).map(|i| leaning(i as f32 / 6.0)).collect();
    store.add(&texts(6), None, None, &embeddings).await.unwrap();

    let response = store.search(&unit(0), 6).await.unwrap();
    for pair in response.distances.windows(2) {
        assert!(pair[0] <= pair[1], "distances not ascending: {} > {}", pair[0], pair[1]);
    }
}

#[tokio::test]
async fn response_arrays_are_parallel() {
    let store = store();
    let metadatas: Vec<Metadata> = (0..3)
        .map(|i| HashMap::from([("source".to_string(), json!(format!("doc{i}")))]))
        .collect();
    store.add(&texts(3), None, Some(metadatas), &[unit(0), unit(1), unit(2)]).await.unwrap();

    let response = store.search(&unit(1), 5).await.unwrap();
    assert_eq!(response.ids.len(), response.documents.len());
    assert_eq!(response.metadatas.len(), response.documents.len());
    assert_eq!(response.distances.len(), response.documents.len());
}

#[tokio::test]
async fn explicit_ids_and_metadata_round_trip() {
    let store = store();
    let metadata: Metadata = HashMap::from([("source".to_string(), json!("doc1"))]);
    store
        .add(
            &["The sky is blue".to_string()],
            Some(vec!["sky-doc".to_string()]),
            Some(vec![metadata]),
            &[unit(0)],
        )
        .await
        .unwrap();

    let response = store.search(&unit(0), 1).await.unwrap();
    assert_eq!(response.ids, vec!["sky-doc".to_string()]);
    assert_eq!(response.documents, vec!["The sky is blue".to_string()]);
    assert_eq!(response.metadatas[0].get("source"), Some(&json!("doc1")));
}

#[tokio::test]
async fn failed_add_leaves_no_partial_state() {
    let index = InMemoryIndex::new(DIM);
    let ids = vec!["a".to_string(), "b".to_string()];
    let result = index.add(&ids, &texts(2), None, &[unit(0), vec![1.0, 0.0]]).await;
    assert!(matches!(result, Err(RagError::VectorStore { .. })));

    // The valid first entry must not have been inserted.
    let response = index.query(&unit(0), 5).await.unwrap();
    assert!(response.ids.is_empty());
}

#[tokio::test]
async fn wrong_embedding_dimension_is_a_store_error() {
    let index = InMemoryIndex::new(DIM);
    let result = index
        .add(&["a".to_string()], &["text".to_string()], None, &[vec![1.0, 0.0]])
        .await;
    assert!(matches!(result, Err(RagError::VectorStore { .. })));

    let result = index.query(&[1.0, 0.0], 5).await;
    assert!(matches!(result, Err(RagError::VectorStore { .. })));
}
