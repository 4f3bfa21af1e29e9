//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the panel client.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::Credentials;
use crate::net::TlsMode;

/// Root configuration for the panel client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct XuiConfig {
    /// Panel address and login credentials.
    pub panel: PanelConfig,

    /// Server certificate verification.
    pub tls: TlsConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl XuiConfig {
    /// Minimal configuration for a panel with default TLS, retry and timeout settings.
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            panel: PanelConfig {
                host: host.into(),
                username: username.into(),
                password: password.into(),
                ..PanelConfig::default()
            },
            ..Self::default()
        }
    }

    /// Credentials used by `login()`.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.panel.username.clone(),
            password: self.panel.password.clone(),
            login_secret: self.panel.token.clone(),
            two_factor_code: self.panel.two_factor_code.clone(),
        }
    }
}

/// Panel connection settings.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel base URL, including any secret web base path
    /// (e.g., "https://panel.example.com:2053/secret").
    pub host: String,

    pub username: String,

    pub password: String,

    /// Pre-shared login secret, sent as `loginSecret`.
    pub token: Option<String>,

    /// One-time code for panels with two-factor login enabled.
    pub two_factor_code: Option<String>,
}

impl std::fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("two_factor_code", &self.two_factor_code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// TLS verification for the panel connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Verify the panel certificate. Disabling this is only meant for lab
    /// panels with self-signed certificates.
    pub verify: bool,

    /// Path to a PEM CA certificate used instead of the system trust store.
    pub ca_cert_path: Option<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            ca_cert_path: None,
        }
    }
}

impl TlsConfig {
    pub fn mode(&self) -> TlsMode {
        if !self.verify {
            TlsMode::Insecure
        } else if let Some(path) = &self.ca_cert_path {
            TlsMode::CustomCa(PathBuf::from(path))
        } else {
            TlsMode::System
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per request, the first one included.
    pub max_attempts: u32,

    /// Linear backoff unit in milliseconds. The delay before attempt N is N units.
    pub backoff_unit_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit_ms: 1000,
        }
    }
}

impl RetryConfig {
    pub fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.backoff_unit_ms)
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for a single attempt (request + response body) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
