//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route table: proxy whitelist, cart, health)
//!     → matcher.rs (path-prefix class for logs and metrics)
//!     → Return: handler response or fixed not-found
//! ```
//!
//! # Design Decisions
//! - Routes are declared at startup, immutable at runtime
//! - Catalog/order and cart routes never call each other
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use matcher::{classify, RouteClass};
pub use router::build_router;
