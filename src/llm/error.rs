//! Error classification for provider calls.
//!
//! Every fault raised while talking to an upstream provider is folded into an
//! [`LlmError`] at the adapter boundary. Nothing above the adapter ever sees a
//! raw `reqwest` or `serde_json` error.

use std::fmt;

/// Classified failure kind for a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmErrorKind {
    /// The request did not complete within the fixed timeout.
    Timeout,
    /// Connection, DNS or TLS failure.
    Transport,
    /// 2xx response that lacks the expected text field.
    Format,
    /// Anything else, including non-2xx status codes.
    Unclassified,
}

impl fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Timeout => "timeout",
            Self::Transport => "transport_error",
            Self::Format => "format_error",
            Self::Unclassified => "unclassified",
        };
        write!(f, "{}", s)
    }
}

/// A failed provider call, ready to be reported to the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status code, when the upstream answered at all.
    pub status: Option<u16>,
}

impl LlmError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Timeout,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Format,
            message: message.into(),
            status: None,
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Self {
            kind: LlmErrorKind::Unclassified,
            message: message.into(),
            status: None,
        }
    }

    /// Non-2xx answer from the upstream.
    pub fn http_status(status: u16, body: &str) -> Self {
        Self {
            kind: LlmErrorKind::Unclassified,
            message: format!("AI service returned HTTP {}: {}", status, truncate(body, 200)),
            status: Some(status),
        }
    }

    /// Classify a `reqwest` error raised while sending or reading a response.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("AI service request timed out, please try again later")
        } else if err.is_connect() || err.is_request() {
            Self::transport(format!("Network request failed: {}", err))
        } else {
            Self::unclassified(format!("Unexpected error while calling AI service: {}", err))
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_unclassified() {
        let err = LlmError::http_status(503, "upstream overloaded");
        assert_eq!(err.kind, LlmErrorKind::Unclassified);
        assert_eq!(err.status, Some(503));
        assert!(err.message.contains("503"));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(500);
        let err = LlmError::http_status(500, &body);
        assert!(err.message.len() < 300);
        assert!(err.message.ends_with("..."));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(LlmErrorKind::Format.to_string(), "format_error");
        assert_eq!(LlmErrorKind::Timeout.to_string(), "timeout");
    }
}
