//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (hardening headers, CORS)
//! Incoming request:
//!     → body size cap (DefaultBodyLimit, configured in [security])
//! ```
//!
//! # Design Decisions
//! - Sessions are not authenticated; the cart id is an opaque client token
//! - The admin API is the only authenticated surface (see `admin::auth`)

pub mod headers;
