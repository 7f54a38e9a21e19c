//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` merging file, environment and explicit overrides.
//! - Verify the cluster URL and numeric bounds when building the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Reading and validating the YAML file (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Each source overwrites only the values it sets; later calls win.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.
//! - `build()` stores the normalized cluster URL produced by `verify_url_schema`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::file::apply_file;
use crate::cluster_url::verify_url_schema;
use crate::constants::{
    DEFAULT_HOSTS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES,
    MAX_TIMEOUT_SECS,
};
use crate::error::ConfigError;
use crate::types::{AuthConfig, Config, ConnectionConfig, LogFormat, LoggingConfig, TlsConfig};

/// Configuration loader that builds config from the config file, env vars and flags.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    hosts: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    api_key: Option<SecretString>,
    verify_certs: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    ca_certs: Option<PathBuf>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
    loglevel: Option<String>,
    logformat: Option<LogFormat>,
    logfile: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    pub(crate) fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use an explicit client config file instead of `~/.curator/curator.yml`.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Read the client configuration file.
    ///
    /// A missing file at the default location is ignored; a missing explicit
    /// path is an error.
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        apply_file(&mut self)?;
        Ok(self)
    }

    /// Read configuration from `CURATOR_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the cluster URL.
    pub fn with_hosts(mut self, hosts: String) -> Self {
        self.hosts = Some(hosts);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: String) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.verify_certs = Some(!skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the log level (`DEBUG`, `INFO`, `WARNING`, ...).
    pub fn with_loglevel(mut self, level: String) -> Self {
        self.loglevel = Some(level);
        self
    }

    /// Set the log format.
    pub fn with_logformat(mut self, format: LogFormat) -> Self {
        self.logformat = Some(format);
        self
    }

    /// Write log lines to a file instead of stderr.
    pub fn with_logfile(mut self, path: PathBuf) -> Self {
        self.logfile = Some(path);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let raw_hosts = self.hosts.as_deref().unwrap_or(DEFAULT_HOSTS);
        if raw_hosts.trim().is_empty() {
            return Err(ConfigError::MissingHosts);
        }
        let hosts = verify_url_schema(raw_hosts)?.as_str().to_string();

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self::validate_timeout(timeout)?;

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, max_retries
                ),
            });
        }

        Ok(Config {
            connection: ConnectionConfig {
                hosts,
                verify_certs: self.verify_certs.unwrap_or(true),
                timeout,
                max_retries,
                tls: TlsConfig {
                    ca_certs: self.ca_certs,
                    client_cert: self.client_cert,
                    client_key: self.client_key,
                },
            },
            auth: AuthConfig {
                username: self.username,
                password: self.password,
                api_key: self.api_key,
            },
            logging: LoggingConfig {
                loglevel: self
                    .loglevel
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                logformat: self.logformat.unwrap_or_default(),
                logfile: self.logfile,
            },
        })
    }

    fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
        let timeout_secs = timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }
        Ok(())
    }

    // Internal accessors for the other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_hosts(&mut self, hosts: Option<String>) {
        self.hosts = hosts;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_key(&mut self, key: Option<SecretString>) {
        self.api_key = key;
    }

    pub(crate) fn set_verify_certs(&mut self, verify: Option<bool>) {
        self.verify_certs = verify;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_ca_certs(&mut self, path: Option<PathBuf>) {
        self.ca_certs = path;
    }

    pub(crate) fn set_client_cert(&mut self, path: Option<PathBuf>) {
        self.client_cert = path;
    }

    pub(crate) fn set_client_key(&mut self, path: Option<PathBuf>) {
        self.client_key = path;
    }

    pub(crate) fn set_loglevel(&mut self, level: Option<String>) {
        self.loglevel = level;
    }

    pub(crate) fn set_logformat(&mut self, format: Option<LogFormat>) {
        self.logformat = format;
    }

    pub(crate) fn set_logfile(&mut self, path: Option<PathBuf>) {
        self.logfile = path;
    }
}
