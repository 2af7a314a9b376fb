//! Dashscope (Alibaba Cloud Bailian) text-generation adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{
    extract_text, post_json, ChatMessage, Completion, CompletionParams, GenerationResult,
    PromptPair, ProviderAdapter, ProviderKind, REQUEST_TIMEOUT,
};

pub const DEFAULT_DASHSCOPE_MODEL: &str = "qwen-turbo";

/// Adapter for Dashscope endpoints.
///
/// Messages travel under `input`, sampling options under `parameters`, and
/// the answer comes back in `output.text`.
pub struct DashscopeStyleAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl DashscopeStyleAdapter {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: DEFAULT_DASHSCOPE_MODEL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderAdapter for DashscopeStyleAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DashscopeStyle
    }

    async fn complete(&self, prompt: &PromptPair, params: CompletionParams) -> GenerationResult {
        let request = DashscopeRequest {
            model: &self.model,
            input: DashscopeInput {
                messages: prompt.messages(),
            },
            parameters: params,
        };

        tracing::debug!("Sending Dashscope request: model={}", self.model);

        let raw = post_json(
            &self.client,
            &self.endpoint,
            &self.api_key,
            &request,
            self.timeout,
        )
        .await?;
        let text = extract_text(&raw, "/output/text", "output.text")?;

        Ok(Completion { text, raw })
    }
}

#[derive(Debug, Serialize)]
struct DashscopeRequest<'a> {
    model: &'a str,
    input: DashscopeInput,
    parameters: CompletionParams,
}

#[derive(Debug, Serialize)]
struct DashscopeInput {
    messages: Vec<ChatMessage>,
}
