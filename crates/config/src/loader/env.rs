//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read the `CURATOR_*` variables and apply them to a `ConfigLoader`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading the config file (see file.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use crate::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(hosts) = env_var_or_none("CURATOR_HOSTS") {
        loader.set_hosts(Some(hosts));
    }
    if let Some(username) = env_var_or_none("CURATOR_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("CURATOR_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(key) = env_var_or_none("CURATOR_API_KEY") {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }
    if let Some(secs) = parse_env::<u64>("CURATOR_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>("CURATOR_MAX_RETRIES", "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if let Some(skip) = parse_env::<bool>("CURATOR_SKIP_VERIFY", "must be true or false")? {
        loader.set_verify_certs(Some(!skip));
    }
    if let Some(ca_certs) = env_var_or_none("CURATOR_CA_CERTS") {
        loader.set_ca_certs(Some(PathBuf::from(ca_certs)));
    }
    Ok(())
}
