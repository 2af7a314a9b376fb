//! OpenAI-compatible chat-completions adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{
    extract_text, post_json, ChatMessage, Completion, CompletionParams, GenerationResult,
    PromptPair, ProviderAdapter, ProviderKind, REQUEST_TIMEOUT,
};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Adapter for endpoints that speak the OpenAI chat-completions format.
pub struct OpenAiStyleAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl OpenAiStyleAdapter {
    /// Create an adapter sharing the given HTTP client.
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Shorten the request timeout. Used by tests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiStyleAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAiStyle
    }

    async fn complete(&self, prompt: &PromptPair, params: CompletionParams) -> GenerationResult {
        let request = OpenAiRequest {
            model: &self.model,
            messages: prompt.messages(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(
            "Sending OpenAI-style request: model={}, temperature={}",
            self.model,
            params.temperature
        );

        let raw = post_json(
            &self.client,
            &self.endpoint,
            &self.api_key,
            &request,
            self.timeout,
        )
        .await?;
        let text = extract_text(
            &raw,
            "/choices/0/message/content",
            "choices[0].message.content",
        )?;

        Ok(Completion { text, raw })
    }
}

/// OpenAI chat-completions request body.
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u64,
}
