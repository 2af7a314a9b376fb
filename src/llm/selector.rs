//! Provider selection from configuration.
//!
//! Selection is a pure function of [`ProviderConfig`] and is re-run on every
//! call, so a settings change takes effect on the next request.

use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::{DashscopeStyleAdapter, OpenAiStyleAdapter, ProviderAdapter};
use crate::config::ProviderConfig;

/// Endpoint substring marking an unconfigured placeholder.
const PLACEHOLDER_DOMAIN: &str = "example.com";

/// Endpoint substrings identifying Dashscope.
const DASHSCOPE_MARKERS: &[&str] = &["dashscope", "aliyuncs"];

/// Which path a call should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// No usable provider; use the deterministic generator.
    Mock,
    OpenAiStyle,
    DashscopeStyle,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Mock => "mock",
            Self::OpenAiStyle => "openai",
            Self::DashscopeStyle => "dashscope",
        };
        write!(f, "{}", s)
    }
}

/// Decide the provider path for a configuration.
///
/// 1. Missing key, missing endpoint, or a placeholder endpoint → `Mock`.
/// 2. Endpoint mentioning `dashscope` or `aliyuncs` → `DashscopeStyle`.
/// 3. Anything else → `OpenAiStyle`.
pub fn select_provider(config: &ProviderConfig) -> ProviderKind {
    let (Some(_), Some(endpoint)) = (present(&config.api_key), present(&config.endpoint)) else {
        return ProviderKind::Mock;
    };

    if endpoint.contains(PLACEHOLDER_DOMAIN) {
        ProviderKind::Mock
    } else if DASHSCOPE_MARKERS.iter().any(|m| endpoint.contains(m)) {
        ProviderKind::DashscopeStyle
    } else {
        ProviderKind::OpenAiStyle
    }
}

/// Build the adapter for a configuration, or `None` when the mock path applies.
pub fn build_adapter(
    config: &ProviderConfig,
    client: &Client,
    timeout: Duration,
) -> Option<Box<dyn ProviderAdapter>> {
    let kind = select_provider(config);
    let (Some(api_key), Some(endpoint)) = (present(&config.api_key), present(&config.endpoint))
    else {
        return None;
    };
    let (api_key, endpoint) = (api_key.to_string(), endpoint.to_string());

    match kind {
        ProviderKind::Mock => None,
        ProviderKind::OpenAiStyle => {
            let mut adapter = OpenAiStyleAdapter::new(client.clone(), endpoint, api_key)
                .with_request_timeout(timeout);
            if let Some(model) = &config.model {
                adapter = adapter.with_model(model.clone());
            }
            Some(Box::new(adapter))
        }
        ProviderKind::DashscopeStyle => {
            let mut adapter = DashscopeStyleAdapter::new(client.clone(), endpoint, api_key)
                .with_request_timeout(timeout);
            if let Some(model) = &config.model {
                adapter = adapter.with_model(model.clone());
            }
            Some(Box::new(adapter))
        }
    }
}

/// Settings files may carry blank strings; treat them as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
