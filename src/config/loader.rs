//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "FORMS_PROXY_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read a TOML file into a configuration without validating it.
///
/// Validation runs once environment overrides have been applied.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Apply environment overrides on top of `config`.
///
/// `lookup` resolves a variable name to its value; the process environment is
/// used in production and a map in tests.
pub fn apply_env_overrides<F>(mut config: ServiceConfig, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = parse_var("PORT", port)?;
    }
    if let Some(host) = lookup("HOST") {
        config.listener.host = host;
    }
    if let Some(bind) = lookup("BIND_ADDRESS") {
        config.listener.bind_address = bind;
    }
    if let Some(url) = lookup("UPSTREAM_BASE_URL") {
        config.upstream.base_url = url;
    }
    if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECS") {
        config.upstream.timeout_secs = parse_var("UPSTREAM_TIMEOUT_SECS", secs)?;
    }
    if let Some(limit) = lookup("DEFAULT_PAGE_LIMIT") {
        config.pagination.default_limit = parse_var("DEFAULT_PAGE_LIMIT", limit)?;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(addr) = lookup("METRICS_ADDRESS") {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = addr;
    }
    Ok(config)
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

/// Build the startup configuration: defaults, then the optional file named by
/// `FORMS_PROXY_CONFIG`, then environment overrides, then validation.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    let base = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => read_config(Path::new(&path))?,
        Err(_) => ServiceConfig::default(),
    };

    let config = apply_env_overrides(base, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
