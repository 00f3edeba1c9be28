//! Route table and dispatch.
//!
//! # Responsibilities
//! - Declare every public endpoint with its method
//! - Send catalog/order routes to the pass-through handler
//! - Send cart routes to the cart handlers
//! - Answer everything else with the fixed not-found envelope
//!
//! # Design Decisions
//! - The proxy whitelist is exactly this table; nothing else is forwarded
//! - Wrong method on a known path is treated like an unknown path

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::http::server::AppState;
use crate::http::{cart, catalog::forward_to_backend, health, response::not_found};

/// Build the public router (without middleware).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Catalog
        .route("/api/products", get(forward_to_backend).post(forward_to_backend))
        .route(
            "/api/products/{id}",
            get(forward_to_backend)
                .put(forward_to_backend)
                .delete(forward_to_backend),
        )
        // Orders
        .route("/api/orders", get(forward_to_backend).post(forward_to_backend))
        // Cart
        .route(
            "/api/cart/{session_id}",
            get(cart::get_cart)
                .post(cart::add_line)
                .delete(cart::clear_cart),
        )
        // Literal segments win over `{product_id}`, so they carry its
        // PUT/DELETE as no-ops too.
        .route(
            "/api/cart/{session_id}/summary",
            get(cart::summary)
                .put(cart::set_quantity_reserved)
                .delete(cart::remove_reserved),
        )
        .route(
            "/api/cart/{session_id}/checkout",
            post(cart::checkout)
                .put(cart::set_quantity_reserved)
                .delete(cart::remove_reserved),
        )
        .route(
            "/api/cart/{session_id}/{product_id}",
            put(cart::set_quantity).delete(cart::remove_line),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}
