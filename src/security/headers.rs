//! Response hardening headers and cross-origin policy.
//!
//! # Responsibilities
//! - Add `X-Content-Type-Options` and `X-Frame-Options` to every response
//! - Allow the storefront and admin UIs to call the edge from other origins
//!
//! # Design Decisions
//! - Headers set by a handler or relayed from the backend are never overridden
//! - Both behaviors are switchable in `[security]`

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::config::SecurityConfig;

/// Wrap `router` with the configured security layers.
pub fn apply(router: Router, config: &SecurityConfig) -> Router {
    let mut router = router;

    if config.enable_headers {
        router = router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ));
    }

    if config.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
