//! Session-scoped shopping cart state.
//!
//! # Data Flow
//! ```text
//! /api/cart/{session_id}[/...]
//!     → http::cart handlers (extract session, product, body)
//!     → store.rs (CartStore: per-session locked mutation)
//!     → model.rs (Cart snapshot returned to the caller)
//! ```
//!
//! # Design Decisions
//! - The registry lives only in process memory; a restart forgets every cart
//! - Every operation is total: unknown sessions read as empty carts
//! - Mutations return the full post-change snapshot, never a partial view
//! - Same-session mutations are serialized by the registry's entry lock

pub mod model;
pub mod store;

pub use model::{Cart, CartLine, CartSummary};
pub use store::{CartStats, CartStore};
