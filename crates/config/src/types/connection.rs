//! Connection configuration types.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS material, timeouts, retries).
//! - Define the main `Config` structure combining connection, auth and logging.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Default values come from `constants`, not magic numbers.
//! - `hosts` is stored as given; it is verified when the loader builds the config.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_HOSTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::AuthConfig;
use crate::types::logging::LoggingConfig;

/// TLS material for a connection. All paths point at PEM files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    /// CA bundle used to verify the server certificate.
    pub ca_certs: Option<PathBuf>,
    /// Client certificate (public part).
    pub client_cert: Option<PathBuf>,
    /// Client private key.
    pub client_key: Option<PathBuf>,
}

/// Connection configuration for a cluster.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Cluster URL (e.g., https://localhost:9200)
    pub hosts: String,
    /// Whether to verify the server certificate
    pub verify_certs: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for transient failures
    pub max_retries: usize,
    /// TLS material
    pub tls: TlsConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.to_string(),
            verify_certs: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            tls: TlsConfig::default(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}
