//! Client configuration file loading.
//!
//! Responsibilities:
//! - Read YAML documents from disk into `serde_json::Value`.
//! - Validate the client file against the built-in schema and apply it to a `ConfigLoader`.
//! - Resolve the default config path (`~/.curator/curator.yml`).
//!
//! Does NOT handle:
//! - Environment variables (see env.rs).
//! - Building the final Config (see builder.rs).
//!
//! Invariants:
//! - An empty document is treated as an empty mapping.
//! - When `hosts` is a list, only the first entry is used.
//! - A missing file at the default path is not an error; a missing explicit path is.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::builder::ConfigLoader;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::ConfigError;
use crate::schema::{Schema, validate};
use crate::schemas;
use crate::types::LogFormat;

/// Returns `~/.curator/curator.yml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = directories::BaseDirs::new().ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for the current user".to_string())
    })?;
    Ok(dirs.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Read a YAML file and convert it into a JSON value.
///
/// YAML mapping keys that are numbers (e.g. action ids) become strings.
pub fn read_yaml_document(path: &Path) -> Result<Value, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;
    if yaml.is_null() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::to_value(yaml).map_err(|e| ConfigError::InvalidDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Hosts {
    One(String),
    Many(Vec<String>),
}

impl Hosts {
    fn first(self) -> Option<String> {
        match self {
            Hosts::One(host) => Some(host),
            Hosts::Many(hosts) => hosts.into_iter().next(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClientSection {
    hosts: Option<Hosts>,
    request_timeout: Option<u64>,
    verify_certs: Option<bool>,
    ca_certs: Option<PathBuf>,
    client_cert: Option<PathBuf>,
    client_key: Option<PathBuf>,
    max_retries: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OtherSettings {
    username: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    loglevel: Option<String>,
    logformat: Option<LogFormat>,
    logfile: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClientFile {
    client: ClientSection,
    other_settings: OtherSettings,
    logging: LoggingSection,
}

/// Apply the config file to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.config_path() {
        Some(path) => (path.clone(), true),
        None => (default_config_path()?, false),
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::ConfigFileRead {
                path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        debug!(path = %path.display(), "No client configuration file found");
        return Ok(());
    }

    let document = read_yaml_document(&path)?;
    let schema = Schema::compile(schemas::client_config_file())?;
    let location = path.display().to_string();
    let document = validate(document, &schema, "Client Configuration", &location)?;
    let file: ClientFile =
        serde_json::from_value(document).map_err(|e| ConfigError::InvalidDocument {
            path: path.clone(),
            message: e.to_string(),
        })?;

    debug!(path = %path.display(), "Loaded client configuration file");
    apply_client_file(loader, file);
    Ok(())
}

fn apply_client_file(loader: &mut ConfigLoader, file: ClientFile) {
    let ClientFile {
        client,
        other_settings,
        logging,
    } = file;

    if let Some(host) = client.hosts.and_then(Hosts::first) {
        loader.set_hosts(Some(host));
    }
    if let Some(secs) = client.request_timeout {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if client.verify_certs.is_some() {
        loader.set_verify_certs(client.verify_certs);
    }
    if client.ca_certs.is_some() {
        loader.set_ca_certs(client.ca_certs);
    }
    if client.client_cert.is_some() {
        loader.set_client_cert(client.client_cert);
    }
    if client.client_key.is_some() {
        loader.set_client_key(client.client_key);
    }
    if client.max_retries.is_some() {
        loader.set_max_retries(client.max_retries);
    }

    if other_settings.username.is_some() {
        loader.set_username(other_settings.username);
    }
    if let Some(password) = other_settings.password {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(key) = other_settings.api_key {
        loader.set_api_key(Some(SecretString::new(key.into())));
    }

    if logging.loglevel.is_some() {
        loader.set_loglevel(logging.loglevel);
    }
    if logging.logformat.is_some() {
        loader.set_logformat(logging.logformat);
    }
    if logging.logfile.is_some() {
        loader.set_logfile(logging.logfile);
    }
}
