//! OpenRouter chat-completion answer model.
//!
//! This module is only available when the `openrouter` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::completion::AnswerModel;
use crate::document::Source;
use crate::error::{RagError, Result};

/// The OpenRouter chat completions endpoint.
const OPENROUTER_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// The default completion model slug.
const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Total request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection timeout, shorter than the total.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 500;

const SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user based ONLY on the \
provided context.\nIf the answer is not in the context, say you don't know. Respond objectively \
and cite the sources.";

/// An [`AnswerModel`] backed by the OpenRouter chat completions API.
///
/// Sends a fixed system instruction plus a user message containing the
/// question and the assembled context, and returns the trimmed completion
/// text. Failures are never retried; a timeout, non-success status, or
/// malformed response surfaces as [`RagError::Completion`].
///
/// # Configuration
///
/// - `model` – defaults to `openai/gpt-3.5-turbo`.
/// - `api_key` – from the constructor or the `OPENROUTER_API_KEY`
///   environment variable. Required; select
///   [`OfflineAnswerModel`](crate::OfflineAnswerModel) instead for
///   key-free operation.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::openrouter::OpenRouterModel;
///
/// let model = OpenRouterModel::new("sk-or-...")?.with_model("openai/gpt-4o-mini");
/// let answer = model.answer("What color is the sky?", context, &sources).await?;
/// ```
#[derive(Debug)]
pub struct OpenRouterModel {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenRouterModel {
    /// Create a new model with the given API key and the default model slug.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Config`] if the key is empty or the HTTP client
    /// cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Config("OpenRouter API key must not be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| RagError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_key, model: DEFAULT_MODEL.into() })
    }

    /// Create a new model using the `OPENROUTER_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY").map_err(|_| {
            RagError::Config("OPENROUTER_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the model slug (e.g. `openai/gpt-4o-mini`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Format the user message from the question and the assembled context.
fn user_prompt(question: &str, context: &str) -> String {
    format!(
        "Question: {question}\n\nContext:\n{context}\n\nInstructions:\n\
         - Use only the context to answer.\n\
         - Cite sources as [source_i] at the end."
    )
}

// ── OpenRouter API request/response types ──────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponseBody {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Extract the trimmed completion text from a response body.
fn content_from_body(body: &str) -> Result<String> {
    let parsed: ChatResponseBody = serde_json::from_str(body)
        .map_err(|e| RagError::Completion(format!("failed to parse response: {e}")))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| RagError::Completion("response contained no choices".to_string()))?;
    Ok(content.trim().to_string())
}

// ── AnswerModel implementation ─────────────────────────────────────

#[async_trait]
impl AnswerModel for OpenRouterModel {
    async fn answer(&self, question: &str, context: &str, _sources: &[Source]) -> Result<String> {
        let user = user_prompt(question, context);
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message { role: "system", content: SYSTEM_PROMPT },
                Message { role: "user", content: &user },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, context_len = context.len(), "sending completion request");

        let response = self
            .client
            .post(OPENROUTER_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "completion request failed");
                RagError::Completion(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "completion API error");
            return Err(RagError::Completion(format!("API returned {status}: {detail}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RagError::Completion(format!("failed to read response: {e}")))?;
        content_from_body(&body)
    }
}
