//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned / propagated)
//!     → routing::router (path + method dispatch)
//!         → catalog.rs → proxy::BackendClient → backend
//!         → cart.rs    → cart::CartStore
//!         → health.rs
//!     → response.rs (relay or fixed error envelope)
//!     → Send to client
//! ```

pub mod cart;
pub mod catalog;
pub mod health;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeEdgeRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
