//! Catalog/order pass-through to the backend service.
//!
//! # Data Flow
//! ```text
//! Whitelisted /api/products*, /api/orders request
//!     → http::catalog handler (method, path, raw body)
//!     → client.rs (BackendClient::forward under a deadline)
//!     → Backend answered: status + body relayed unchanged
//!     → Backend unreachable / timed out: generic 500
//! ```
//!
//! # Design Decisions
//! - No schema knowledge: bodies are bytes, never parsed
//! - No retries, no caching, no transformation
//! - Transport causes are logged but never leaked to the caller

pub mod client;

pub use client::{carries_body, BackendClient, BackendResponse, ProxyError};
