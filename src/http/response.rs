//! Response envelopes.
//!
//! # Responsibilities
//! - Relay backend answers unchanged (status, content type, body)
//! - Map edge-side failures to the fixed JSON error shapes
//!
//! # Design Decisions
//! - Backend rejections are relayed, never translated
//! - Transport failures and faults collapse into generic bodies; the cause is
//!   logged only

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

use crate::proxy::{BackendResponse, ProxyError};

/// Body returned when the backend could not be asked.
pub const BACKEND_FAILURE_MESSAGE: &str = "Internal server error";
/// Body returned for uncaught faults.
pub const FAULT_MESSAGE: &str = "Something went wrong!";
pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Edge-side request failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend was unreachable, timed out, or the target was malformed.
    #[error(transparent)]
    Backend(#[from] ProxyError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("internal fault: {0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Backend(e) => {
                tracing::error!(error = %e, "Backend unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, BACKEND_FAILURE_MESSAGE.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::Internal(cause) => {
                tracing::error!(cause = %cause, "Request fault");
                (StatusCode::INTERNAL_SERVER_ERROR, FAULT_MESSAGE.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl IntoResponse for BackendResponse {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        (self.status, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

/// Fallback for unmatched paths and methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Response for a handler that panicked.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(detail).into_response()
}
