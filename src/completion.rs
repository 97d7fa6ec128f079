//! Answer generation strategies.
//!
//! The pipeline delegates the final answer to an [`AnswerModel`]: either
//! the network-free [`OfflineAnswerModel`] template, or a remote
//! chat-completion service such as
//! [`OpenRouterModel`](crate::openrouter::OpenRouterModel). The strategy
//! is selected at pipeline construction time, not by runtime flags.

use async_trait::async_trait;

use crate::document::Source;
use crate::error::Result;

/// The fixed answer returned offline when no context is available.
pub const NO_CONTEXT_ANSWER: &str = "I don't know based on the available context.";

/// A strategy that produces an answer from a question and its assembled
/// retrieval context.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Answer `question` using only `context`, citing the given sources
    /// by their `source_i` labels.
    async fn answer(&self, question: &str, context: &str, sources: &[Source]) -> Result<String>;
}

/// A deterministic, network-free [`AnswerModel`].
///
/// Returns the fixed [`NO_CONTEXT_ANSWER`] when the context is blank,
/// otherwise a templated answer embedding the question and the list of
/// source labels. Useful for tests and offline deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAnswerModel;

#[async_trait]
impl AnswerModel for OfflineAnswerModel {
    async fn answer(&self, question: &str, context: &str, sources: &[Source]) -> Result<String> {
        if context.trim().is_empty() {
            return Ok(NO_CONTEXT_ANSWER.to_string());
        }
        let labels: Vec<&str> = sources.iter().map(|s| s.label.as_str()).collect();
        Ok(format!("Based on the context, the answer is: {question} (see {})", labels.join(", ")))
    }
}
