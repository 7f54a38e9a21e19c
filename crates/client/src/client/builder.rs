//! Client builder for constructing [`EsClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, certificate checks, CA bundle,
//!   client certificate)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`EsClient`] methods)
//! - Verifying the URL scheme (done by `curator_config::verify_url_schema` before building)
//!
//! # Invariants
//! - `base_url` is required and is always normalized to have no trailing slashes
//! - `verify_certs = false` only affects HTTPS connections; HTTP connections log a warning
//! - A client key without a client certificate is ignored with a warning

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::client::EsClient;
use crate::error::{ClientError, Result};
use curator_config::{
    AuthStrategy, Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`EsClient`].
#[derive(Debug)]
pub struct EsClientBuilder {
    base_url: Option<String>,
    auth_strategy: AuthStrategy,
    verify_certs: bool,
    timeout: Duration,
    max_retries: usize,
    ca_certs: Option<PathBuf>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
}

impl Default for EsClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: AuthStrategy::None,
            verify_certs: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            ca_certs: None,
            client_cert: None,
            client_key: None,
        }
    }
}

impl EsClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster URL, e.g. `https://localhost:9200`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy. Defaults to no credentials.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = strategy;
        self
    }

    /// Set whether to verify the server certificate.
    pub fn verify_certs(mut self, verify: bool) -> Self {
        self.verify_certs = verify;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Trust the CA bundle at `path` (PEM).
    pub fn ca_certs(mut self, path: Option<PathBuf>) -> Self {
        self.ca_certs = path;
        self
    }

    /// Present the client certificate at `cert` (PEM), with its key at `key`.
    ///
    /// `key` may be omitted when the certificate file also holds the key.
    pub fn client_identity(mut self, cert: Option<PathBuf>, key: Option<PathBuf>) -> Self {
        self.client_cert = cert;
        self.client_key = key;
        self
    }

    /// Create a client builder from the loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.hosts.clone());
        self.auth_strategy = config.auth.strategy();
        self.verify_certs = config.connection.verify_certs;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.ca_certs = config.connection.tls.ca_certs.clone();
        self.client_cert = config.connection.tls.client_cert.clone();
        self.client_key = config.connection.tls.client_key.clone();
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    fn read_pem(path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| ClientError::CertificateRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the [`EsClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided,
    /// [`ClientError::CertificateRead`] / [`ClientError::TlsError`] for unusable
    /// certificate material, and `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<EsClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        let is_https = base_url.starts_with("https://");

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if !self.verify_certs {
            if is_https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                warn!(
                    "verify_certs=false has no effect on HTTP URLs. Certificate verification only applies to HTTPS connections."
                );
            }
        }

        if let Some(path) = &self.ca_certs {
            let pem = Self::read_pem(path)?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| ClientError::TlsError(format!("invalid CA bundle: {e}")))?;
            http_builder = http_builder.add_root_certificate(cert);
        }

        match (&self.client_cert, &self.client_key) {
            (Some(cert_path), key_path) => {
                let mut pem = Self::read_pem(cert_path)?;
                if let Some(key_path) = key_path {
                    pem.push(b'\n');
                    pem.extend(Self::read_pem(key_path)?);
                }
                let identity = reqwest::Identity::from_pem(&pem)
                    .map_err(|e| ClientError::TlsError(format!("invalid client certificate: {e}")))?;
                http_builder = http_builder.identity(identity);
            }
            (None, Some(_)) => {
                warn!("client_key is set without client_cert; ignoring it");
            }
            (None, None) => {}
        }

        let http = http_builder.build()?;

        Ok(EsClient {
            http,
            base_url,
            auth: self.auth_strategy,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_config::ConfigLoader;

    #[test]
    fn test_from_config_preserves_settings() {
        let config = ConfigLoader::new()
            .with_hosts("https://search.example.com:9243".to_string())
            .with_api_key("key".to_string())
            .with_skip_verify(true)
            .with_timeout(Duration::from_secs(120))
            .with_max_retries(5)
            .build()
            .unwrap();

        let builder = EsClient::builder().from_config(&config);
        assert_eq!(
            builder.base_url.as_deref(),
            Some("https://search.example.com:9243")
        );
        assert!(!builder.verify_certs);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 5);
        assert!(matches!(builder.auth_strategy, AuthStrategy::ApiKey { .. }));

        let client = builder.build().unwrap();
        assert_eq!(client.base_url(), "https://search.example.com:9243");
    }

    #[test]
    fn test_missing_ca_file_is_certificate_read_error() {
        let err = EsClient::builder()
            .base_url("https://localhost:9200".to_string())
            .ca_certs(Some(PathBuf::from("/nonexistent/ca.pem")))
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::CertificateRead { .. }));
    }
}
