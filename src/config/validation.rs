//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the backend URL
//! - Validate value ranges (timeouts > 0, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EdgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system, including on reload

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::{EdgeConfig, PLACEHOLDER_API_KEY};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("backend.base_url: {0}")]
    InvalidBackendUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error(
        "timeouts.request_secs ({request_ms} ms) must exceed backend.request_timeout_ms ({backend_ms} ms)"
    )]
    TimeoutOrder { request_ms: u64, backend_ms: u64 },

    #[error("observability.log_format: expected 'pretty' or 'json', got '{0}'")]
    UnknownLogFormat(String),

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &EdgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }

    if let Err(reason) = check_backend_url(&config.backend.base_url) {
        errors.push(ValidationError::InvalidBackendUrl(reason));
    }
    if config.backend.request_timeout_ms == 0 {
        errors.push(ValidationError::Zero("backend.request_timeout_ms"));
    }
    if config.backend.max_response_bytes == 0 {
        errors.push(ValidationError::Zero("backend.max_response_bytes"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    // The backend deadline must expire before the request timeout layer.
    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    let backend_ms = config.backend.request_timeout_ms;
    if request_ms > 0 && backend_ms > 0 && request_ms <= backend_ms {
        errors.push(ValidationError::TimeoutOrder {
            request_ms,
            backend_ms,
        });
    }

    let format = config.observability.log_format.to_ascii_lowercase();
    if format != "pretty" && format != "json" {
        errors.push(ValidationError::UnknownLogFormat(
            config.observability.log_format.clone(),
        ));
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        let key = config.admin.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            errors.push(ValidationError::MissingAdminKey);
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

// The forwarding client speaks plain HTTP only.
fn check_backend_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("'{raw}' is not a URL ({e})"))?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}', expected http", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err(format!("'{raw}' has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(format!("'{raw}' must not carry a query or fragment"));
    }
    Ok(())
}
