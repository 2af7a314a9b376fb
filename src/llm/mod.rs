//! LLM provider module for producing free-text completions.
//!
//! This module provides a trait-based abstraction over upstream providers.
//! Two request envelopes are supported: the OpenAI chat-completions shape and
//! the Dashscope (Alibaba Cloud Bailian) shape. [`select_provider`] decides
//! which one to use for a given configuration, or that none should be used.
//!
//! Each call is a single round trip with a fixed timeout. There is no retry;
//! a failure is classified into an [`LlmError`] and handed back as-is.
//! Dropping the returned future abandons the in-flight request.

mod dashscope;
mod error;
mod openai;
mod selector;

#[cfg(test)]
pub(crate) mod stub;

pub use dashscope::DashscopeStyleAdapter;
pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAiStyleAdapter;
pub use selector::{build_adapter, select_provider, ProviderKind};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Fixed per-call timeout for provider requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Role in a chat conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }
}

/// System instruction plus user request for one completion.
#[derive(Debug, Clone)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }

    /// The `[system, user]` message list both envelopes embed.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::System, self.system.clone()),
            ChatMessage::new(Role::User, self.user.clone()),
        ]
    }
}

/// What a completion is for. Decides the sampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// Itinerary generation (creative).
    Itinerary,
    /// Budget report rendering (close to deterministic).
    BudgetAnalysis,
}

impl Purpose {
    pub fn params(&self) -> CompletionParams {
        match self {
            Self::Itinerary => CompletionParams {
                temperature: 0.7,
                max_tokens: 2000,
            },
            Self::BudgetAnalysis => CompletionParams {
                temperature: 0.3,
                max_tokens: 1500,
            },
        }
    }
}

/// Sampling parameters sent with a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionParams {
    pub temperature: f64,
    pub max_tokens: u64,
}

/// A successful completion.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Narrative text extracted from the provider response.
    pub text: String,
    /// The full decoded response body.
    pub raw: Value,
}

/// Outcome of a single provider call.
pub type GenerationResult = Result<Completion, LlmError>;

/// Capability shared by every upstream provider.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which request envelope this adapter speaks.
    fn kind(&self) -> ProviderKind;

    /// Produce a completion for the prompt pair in one round trip.
    ///
    /// Never panics and never returns a raw transport error; all faults are
    /// classified into [`LlmError`].
    async fn complete(&self, prompt: &PromptPair, params: CompletionParams) -> GenerationResult;
}

/// POST a JSON body with bearer auth and decode the JSON answer.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    body: &B,
    timeout: Duration,
) -> Result<Value, LlmError> {
    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .timeout(timeout)
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::from_reqwest(&e))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| LlmError::from_reqwest(&e))?;

    if !status.is_success() {
        return Err(LlmError::http_status(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|e| {
        LlmError::unclassified(format!("AI service returned a body that is not JSON: {}", e))
    })
}

/// Pull a string out of a decoded response by JSON pointer.
pub(crate) fn extract_text(raw: &Value, pointer: &str, field: &str) -> Result<String, LlmError> {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| LlmError::format(format!("AI service response is missing '{}'", field)))
}
