//! Local stub of an upstream provider for adapter tests.

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned answer returned for every POST.
#[derive(Debug, Clone)]
pub(crate) enum StubResponse {
    Json(Value),
    Status(u16, String),
    Delayed(Duration, Value),
}

impl StubResponse {
    pub(crate) fn json(body: Value) -> Self {
        Self::Json(body)
    }

    pub(crate) fn status(code: u16, body: &str) -> Self {
        Self::Status(code, body.to_string())
    }

    pub(crate) fn delayed(delay: Duration, body: Value) -> Self {
        Self::Delayed(delay, body)
    }

    async fn respond(self) -> Response {
        match self {
            Self::Json(body) => Json(body).into_response(),
            Self::Status(code, body) => {
                let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, body).into_response()
            }
            Self::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                Json(body).into_response()
            }
        }
    }
}

/// What the stub saw on its most recent request.
#[derive(Debug, Clone)]
pub(crate) struct SeenRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

pub(crate) struct StubServer {
    base: String,
    seen: Arc<Mutex<Option<SeenRequest>>>,
    hits: Arc<Mutex<usize>>,
}

impl StubServer {
    pub(crate) fn url(&self) -> String {
        self.url_with_path("/v1/chat")
    }

    pub(crate) fn url_with_path(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub(crate) fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn hits(&self) -> usize {
        *self.hits.lock().unwrap()
    }
}

/// Start a stub on an ephemeral port answering every path.
pub(crate) async fn spawn(response: StubResponse) -> StubServer {
    let seen = Arc::new(Mutex::new(None));
    let hits = Arc::new(Mutex::new(0usize));

    let seen_handle = seen.clone();
    let hits_handle = hits.clone();
    let router = Router::new().fallback(
        move |headers: HeaderMap, Json(body): Json<Value>| {
            let seen = seen_handle.clone();
            let hits = hits_handle.clone();
            let response = response.clone();
            async move {
                let authorization = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *seen.lock().unwrap() = Some(SeenRequest {
                    authorization,
                    body,
                });
                *hits.lock().unwrap() += 1;
                response.respond().await
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    StubServer {
        base: format!("http://{}", addr),
        seen,
        hits,
    }
}

/// A URL on a port nothing listens on.
pub(crate) async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/chat", addr)
}
