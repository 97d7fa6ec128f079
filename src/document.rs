//! Data types for retrieval matches, citation sources, and chat responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Arbitrary key-value metadata attached to a stored document.
pub type Metadata = HashMap<String, serde_json::Value>;

/// A single retrieval result for a query.
///
/// Matches are ordered ascending by `score` (cosine distance, lower is
/// more similar). `id` and `score` are optional because the raw index
/// response is a set of positional arrays that may be shorter than the
/// documents array; missing positions are filled with `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    /// Identifier of the matched document, if the index reported one.
    pub id: Option<String>,
    /// The stored text of the matched document.
    pub text: String,
    /// Metadata stored alongside the document.
    #[serde(default)]
    pub metadata: Metadata,
    /// Cosine distance to the query embedding (lower is more similar).
    pub score: Option<f32>,
}

/// A citation record for one context-contributing [`Match`].
///
/// Produced by [`ContextBuilder::build`](crate::ContextBuilder::build) in
/// the same order as the context snippets. The `label` is the positional
/// tag (`source_0`, `source_1`, ...) that the answer is asked to cite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// Stable identifier: the match's `metadata.source`, else its id,
    /// else a synthetic `chunk_{i}`.
    pub id: String,
    /// Positional citation tag of the form `source_{i}`.
    pub label: String,
    /// Metadata of the originating match.
    #[serde(default)]
    pub metadata: Metadata,
}

/// The answer returned by [`RagPipeline::chat`](crate::RagPipeline::chat).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// The answer text.
    pub answer: String,
    /// Citation sources, in the same order as the context snippets the
    /// answer was grounded on.
    pub sources: Vec<Source>,
}
