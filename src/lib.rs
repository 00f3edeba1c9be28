//! Storefront edge service.
//!
//! Proxies catalog/order calls to the backend service and owns the
//! session-keyed shopping cart in process memory.

pub mod admin;
pub mod cart;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod resilience;
pub mod routing;
pub mod security;

pub use cart::{Cart, CartLine, CartStore};
pub use config::EdgeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
