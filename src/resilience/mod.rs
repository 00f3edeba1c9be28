//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (bounded wait on the whole exchange)
//!     → On expiry: generic internal error to the caller
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every backend call has a deadline
//! - No retries at any layer: forwarded writes are not idempotent and the
//!   caller decides whether to try again

pub mod timeouts;
