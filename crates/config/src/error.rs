//! Error types for configuration loading and validation.
//!
//! Responsibilities:
//! - Define error variants for all configuration failures (files, env, URLs, schemas).
//!
//! Does NOT handle:
//! - Errors raised while talking to a cluster (see the client crate).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.
//! - Schema violations carry the `what` / `location` pair supplied by the caller.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Cluster URL is required. Set CURATOR_HOSTS or `client.hosts` in the config file.")]
    MissingHosts,

    #[error("URL Schema invalid for {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigFileParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file at {path} is not a valid document: {message}")]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Unable to determine the home directory: {0}")]
    ConfigDirUnavailable(String),

    #[error(
        "Configuration: {what}: Location: {location}: Bad Value: \"{bad_value}\", {message}. Check configuration file."
    )]
    SchemaViolation {
        what: String,
        location: String,
        bad_value: String,
        message: String,
    },

    #[error("Invalid schema definition: {0}")]
    InvalidSchema(String),

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid max_retries: {message}")]
    InvalidMaxRetries { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
