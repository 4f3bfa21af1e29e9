//! Configuration loading from disk and from the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::XuiConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_HOST: &str = "XUI_HOST";
pub const ENV_USERNAME: &str = "XUI_USERNAME";
pub const ENV_PASSWORD: &str = "XUI_PASSWORD";
pub const ENV_TOKEN: &str = "XUI_TOKEN";
pub const ENV_TWO_FACTOR_CODE: &str = "XUI_TWO_FACTOR_CODE";
pub const ENV_TLS_VERIFY: &str = "XUI_TLS_VERIFY";
pub const ENV_CA_CERT_PATH: &str = "XUI_CA_CERT_PATH";
pub const ENV_MAX_RETRIES: &str = "XUI_MAX_RETRIES";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

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

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<XuiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: XuiConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), host = %config.panel.host, "Configuration loaded");
    Ok(config)
}

/// Build and validate configuration from `XUI_*` process environment variables.
pub fn from_env() -> Result<XuiConfig, ConfigError> {
    from_env_with(|key| std::env::var(key).ok())
}

/// Build configuration from an arbitrary variable lookup.
pub fn from_env_with<F>(lookup: F) -> Result<XuiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv(name));

    let mut config = XuiConfig::new(
        required(ENV_HOST)?,
        required(ENV_USERNAME)?,
        required(ENV_PASSWORD)?,
    );
    config.panel.token = lookup(ENV_TOKEN).filter(|t| !t.is_empty());
    config.panel.two_factor_code = lookup(ENV_TWO_FACTOR_CODE).filter(|c| !c.is_empty());

    if let Some(value) = lookup(ENV_TLS_VERIFY) {
        config.tls.verify = parse_flag(&value).ok_or(ConfigError::InvalidEnv {
            name: ENV_TLS_VERIFY,
            value,
        })?;
    }
    config.tls.ca_cert_path = lookup(ENV_CA_CERT_PATH).filter(|p| !p.is_empty());

    if let Some(value) = lookup(ENV_MAX_RETRIES) {
        config.retries.max_attempts = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: ENV_MAX_RETRIES,
            value,
        })?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
