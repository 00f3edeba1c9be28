//! Backend forwarding client.
//!
//! # Responsibilities
//! - Build the outbound request: same method, same path on the backend base
//! - Attach the caller's JSON body verbatim for body-carrying methods
//! - Buffer the backend's status, content type and body for relaying
//! - Classify failures: timeout vs transport vs malformed target
//!
//! # Design Decisions
//! - One pooled hyper client per configuration generation
//! - The deadline covers connect, send and the full response body
//! - Backend error statuses are NOT errors here; they are relayed as-is

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, Method, Request, Response, StatusCode, Uri};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use crate::config::BackendConfig;
use crate::http::request::X_REQUEST_ID;
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;

/// Reasons the backend could not be asked.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid forward target: {0}")]
    InvalidTarget(String),

    #[error("backend transport failure: {0}")]
    Transport(String),

    #[error("backend did not answer within {0:?}")]
    Timeout(Duration),
}

/// A fully buffered backend answer.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Forwards whitelisted catalog/order calls to the backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    timeout: Duration,
    max_response_bytes: usize,
    client: Client<HttpConnector, Body>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ProxyError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProxyError::InvalidTarget(format!("{}: {e}", config.base_url)))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_millis(config.request_timeout_ms)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.request_timeout_ms),
            max_response_bytes: config.max_response_bytes,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Backend URI for an edge path: the backend base replaces the edge's own.
    pub fn target_uri(&self, path: &str) -> Result<Uri, ProxyError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let target = format!("{base}{path}");
        target
            .parse::<Uri>()
            .map_err(|e| ProxyError::InvalidTarget(format!("{target}: {e}")))
    }

    /// Forward one request and buffer the answer, whatever its status.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
        request_id: Option<&str>,
    ) -> Result<BackendResponse, ProxyError> {
        let start = Instant::now();
        let uri = self.target_uri(path)?;

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if let Some(id) = request_id {
            builder = builder.header(X_REQUEST_ID, id);
        }
        let body = match body {
            Some(bytes) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;

        let exchange = async {
            let response: Response<Incoming> = self
                .client
                .request(request)
                .await
                .map_err(|e| ProxyError::Transport(e.to_string()))?;
            let (parts, incoming) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(incoming), self.max_response_bytes)
                .await
                .map_err(|e| ProxyError::Transport(e.to_string()))?;
            Ok::<_, ProxyError>(BackendResponse {
                status: parts.status,
                content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
                body,
            })
        };

        let result = match with_deadline(self.timeout, exchange).await {
            Ok(result) => result,
            Err(elapsed) => Err(ProxyError::Timeout(elapsed.0)),
        };

        let outcome = match &result {
            Ok(r) if r.status.is_success() => "ok",
            Ok(_) => "rejected",
            Err(ProxyError::Timeout(_)) => "timeout",
            Err(_) => "unreachable",
        };
        metrics::record_backend_call(outcome, start);

        match &result {
            Ok(r) => tracing::debug!(
                method = %method,
                path = %path,
                status = %r.status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Backend answered"
            ),
            Err(e) => tracing::error!(method = %method, path = %path, error = %e, "Backend error"),
        }

        result
    }
}

/// Methods whose inbound body is forwarded to the backend.
pub fn carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::DELETE && *method != Method::HEAD
}
