//! Catalog and order pass-through handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
};

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::proxy::{carries_body, BackendResponse};

/// Forward the request to the same path on the backend and relay its answer.
pub async fn forward_to_backend(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<BackendResponse, ApiError> {
    let runtime = state.runtime();
    let payload = carries_body(&method).then_some(body);

    let response = runtime
        .backend
        .forward(method, uri.path(), payload, request_id(&headers).as_deref())
        .await?;
    Ok(response)
}
