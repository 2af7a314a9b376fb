//! Process configuration.
//!
//! Values come from the environment (and an optional `.env` file). An empty
//! variable counts as absent, so a bare environment yields "no provider
//! configured" and every call takes the mock path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials and endpoint for the upstream text-generation provider.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Overrides the per-provider default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: non_empty(api_key.into()),
            endpoint: non_empty(endpoint.into()),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = non_empty(model.into());
        self
    }

    /// Read `AI_API_KEY`, `AI_API_ENDPOINT` and `AI_MODEL`.
    pub fn from_env() -> Self {
        Self {
            api_key: env_var("AI_API_KEY"),
            endpoint: env_var("AI_API_ENDPOINT"),
            model: env_var("AI_MODEL"),
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

/// Language the narrative should be written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeLanguage {
    #[default]
    English,
    Chinese,
}

impl NarrativeLanguage {
    /// Name used inside prompt instructions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Chinese => "Simplified Chinese",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Self::English),
            "chinese" | "zh" | "zh-cn" => Some(Self::Chinese),
            _ => None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub language: NarrativeLanguage,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let language = match env_var("NARRATIVE_LANGUAGE") {
            Some(raw) => NarrativeLanguage::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown NARRATIVE_LANGUAGE '{}', using English", raw);
                NarrativeLanguage::English
            }),
            None => NarrativeLanguage::default(),
        };

        Self {
            provider: ProviderConfig::from_env(),
            language,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(non_empty)
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
