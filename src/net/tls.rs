//! Server certificate verification modes.

use std::path::{Path, PathBuf};

use reqwest::{Certificate, ClientBuilder};

use crate::net::transport::TransportError;

/// How the panel certificate is verified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// System trust store.
    #[default]
    System,
    /// A caller-supplied PEM CA certificate.
    CustomCa(PathBuf),
    /// No verification at all. Only for lab panels with self-signed certificates.
    Insecure,
}

impl TlsMode {
    /// Apply this mode to a reqwest client builder.
    pub fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, TransportError> {
        match self {
            TlsMode::System => Ok(builder),
            TlsMode::CustomCa(path) => {
                let cert = load_certificate(path)?;
                Ok(builder.add_root_certificate(cert))
            }
            TlsMode::Insecure => {
                tracing::warn!("TLS certificate verification is disabled for the panel connection");
                Ok(builder.danger_accept_invalid_certs(true))
            }
        }
    }
}

/// Load a PEM CA certificate from disk.
pub fn load_certificate(path: &Path) -> Result<Certificate, TransportError> {
    if !path.exists() {
        return Err(TransportError::Tls(format!(
            "Certificate file not found: {:?}",
            path
        )));
    }
    let pem = std::fs::read(path)
        .map_err(|e| TransportError::Tls(format!("Failed to read {:?}: {}", path, e)))?;
    Certificate::from_pem(&pem)
        .map_err(|e| TransportError::Tls(format!("Invalid PEM certificate {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_certificate_file() {
        let err = load_certificate(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, TransportError::Tls(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_insecure_and_system_apply() {
        assert!(TlsMode::System.apply(reqwest::Client::builder()).is_ok());
        assert!(TlsMode::Insecure.apply(reqwest::Client::builder()).is_ok());
    }
}
