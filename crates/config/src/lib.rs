//! Configuration management for curator.
//!
//! This crate provides the client connection configuration (file, environment
//! and flag layers), URL verification, the JSON Schema validator used for
//! every configuration block, and the action file model.

pub mod action_file;
mod cluster_url;
pub mod constants;
mod error;
mod loader;
pub mod schema;
pub mod schemas;
pub mod types;

pub use action_file::{ActionDefinition, ActionFile, ActionKind, CommonOptions};
pub use cluster_url::{ClusterUrl, verify_url_schema};
pub use error::ConfigError;
pub use loader::{ConfigLoader, default_config_path, env_var_or_none, read_yaml_document};
pub use schema::{Schema, UNDETERMINED_VALUE, validate};
pub use types::{
    AuthConfig, AuthStrategy, Config, ConnectionConfig, LogFormat, LoggingConfig, TlsConfig,
};
