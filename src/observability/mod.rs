//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, request spans)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty for development, JSON for log aggregation)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the inbound request to the backend call
//! - Metric updates are cheap no-ops when no exporter is installed
//! - Request class labels come from the path-prefix classifier, never the raw
//!   path, to keep label cardinality bounded

pub mod logging;
pub mod metrics;
