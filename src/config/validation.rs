//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the panel host is an absolute http(s) URL
//! - Validate value ranges (attempts > 0, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: XuiConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::XuiConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("panel.host is empty")]
    EmptyHost,

    #[error("panel.host '{0}' is not an http(s) URL")]
    InvalidHost(String),

    #[error("panel.username is empty")]
    EmptyUsername,

    #[error("retries.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroRequestTimeout,

    #[error("tls.ca_cert_path is set but tls.verify is false")]
    CaWithoutVerify,
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &XuiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.panel.host.trim();
    if host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    } else {
        match url::Url::parse(host) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => errors.push(ValidationError::InvalidHost(host.to_string())),
        }
    }

    if config.panel.username.is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if !config.tls.verify && config.tls.ca_cert_path.is_some() {
        errors.push(ValidationError::CaWithoutVerify);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
