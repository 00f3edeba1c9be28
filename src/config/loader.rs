//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::EdgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listener port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding `backend.base_url`.
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the running configuration: optional file, then environment
/// overrides, then validation.
pub fn load_effective_config(path: Option<&Path>) -> Result<EdgeConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => EdgeConfig::default(),
    };

    let config = apply_overrides(
        config,
        std::env::var(ENV_PORT).ok().as_deref(),
        std::env::var(ENV_BACKEND_URL).ok().as_deref(),
    )?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `PORT` / `BACKEND_URL` style overrides to a parsed configuration.
pub fn apply_overrides(
    mut config: EdgeConfig,
    port: Option<&str>,
    backend_url: Option<&str>,
) -> Result<EdgeConfig, ConfigError> {
    if let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) {
        let port: u16 = raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
        config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
            Ok(mut addr) => {
                addr.set_port(port);
                addr.to_string()
            }
            Err(_) => format!("0.0.0.0:{port}"),
        };
    }

    if let Some(url) = backend_url.map(str::trim).filter(|u| !u.is_empty()) {
        config.backend.base_url = url.to_string();
    }

    Ok(config)
}
