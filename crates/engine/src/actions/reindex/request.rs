//! Typed reindex request body.
//!
//! Responsibilities:
//! - Parse the `request_body` mapping into [`ReindexRequest`], turning the
//!   `REINDEX_SELECTION` and `MIGRATION` literals into variants.
//! - Render the wire body for one concrete (source, dest) pair.
//!
//! Does NOT handle:
//! - Resolving the current selection (see the parent module).
//!
//! Invariants:
//! - Remote mode is detected solely by the presence of `source.remote`.
//! - Passwords are only ever rendered in clear text on the wire body.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::error::ActionError;

/// Source literal meaning "the indices selected by the filters".
pub const REINDEX_SELECTION: &str = "REINDEX_SELECTION";

/// Source literal treated as "nothing selected" by `sources()`.
///
/// This differs from [`REINDEX_SELECTION`]; the two are kept distinct.
pub const REINDEX_SELECTED: &str = "REINDEX_SELECTED";

/// Dest literal enabling migration mode.
pub const MIGRATION: &str = "MIGRATION";

/// Stands in for passwords in logs and dry-run output.
pub const REDACTED: &str = "REDACTED";

/// Top-level keys forwarded to the wire body when present.
const OPTIONAL_KEYS: [&str; 5] = ["conflicts", "max_docs", "size", "_source", "script"];

/// One index name or a list of them, as written in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexNames {
    One(String),
    Many(Vec<String>),
}

impl IndexNames {
    /// The names as a list.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            IndexNames::One(name) => vec![name.clone()],
            IndexNames::Many(names) => names.clone(),
        }
    }

    /// The names as written: a string or an array.
    pub fn to_value(&self) -> Value {
        match self {
            IndexNames::One(name) => Value::String(name.clone()),
            IndexNames::Many(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// `source.index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIndex {
    Names(IndexNames),
    /// The `REINDEX_SELECTION` literal.
    CurrentSelection,
}

/// `dest.index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestIndex {
    Named(String),
    /// The `MIGRATION` literal.
    Migration,
}

/// `source.remote`.
#[derive(Debug, Clone, Default)]
pub struct RemoteDescriptor {
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    /// Other keys (`socket_timeout`, `headers`, ...) passed through untouched.
    pub extra: Map<String, Value>,
}

impl RemoteDescriptor {
    fn to_value(&self, redact: bool) -> Value {
        let mut remote = Map::new();
        if let Some(host) = &self.host {
            remote.insert("host".into(), Value::String(host.clone()));
        }
        if let Some(username) = &self.username {
            remote.insert("username".into(), Value::String(username.clone()));
        }
        if let Some(password) = &self.password {
            let shown = if redact {
                REDACTED.to_string()
            } else {
                password.expose_secret().to_string()
            };
            remote.insert("password".into(), Value::String(shown));
        }
        remote.extend(self.extra.clone());
        Value::Object(remote)
    }
}

#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub index: SourceIndex,
    pub remote: Option<RemoteDescriptor>,
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct DestSpec {
    pub index: DestIndex,
    pub extra: Map<String, Value>,
}

/// A validated reindex request body.
#[derive(Debug, Clone)]
pub struct ReindexRequest {
    pub source: SourceSpec,
    pub dest: DestSpec,
    /// Recognized optional top-level keys (see [`OPTIONAL_KEYS`]).
    pub optional: Map<String, Value>,
    /// Unrecognized top-level keys. Kept for diagnostics, never sent.
    pub extra: Map<String, Value>,
}

fn configuration(message: impl Into<String>) -> ActionError {
    ActionError::Configuration(message.into())
}

fn take_object(
    parent: &mut Map<String, Value>,
    key: &str,
) -> Result<Map<String, Value>, ActionError> {
    match parent.remove(key) {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(configuration(format!(
            "\"{key}\" must be a mapping, got {other}"
        ))),
        None => Err(configuration(format!("request_body is missing \"{key}\""))),
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>, ActionError> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(configuration(format!(
            "\"{key}\" must be a string, got {other}"
        ))),
    }
}

impl ReindexRequest {
    /// Parse a `request_body` mapping.
    pub fn parse(body: &Value) -> Result<Self, ActionError> {
        let Value::Object(body) = body else {
            return Err(configuration("\"request_body\" is not of type dictionary"));
        };
        let mut body = body.clone();

        let mut source = take_object(&mut body, "source")?;
        let index = match source.remove("index") {
            Some(Value::String(name)) if name == REINDEX_SELECTION => SourceIndex::CurrentSelection,
            Some(Value::String(name)) => SourceIndex::Names(IndexNames::One(name)),
            Some(Value::Array(items)) => {
                let names = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(name),
                        other => Err(configuration(format!(
                            "source.index entries must be strings, got {other}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                SourceIndex::Names(IndexNames::Many(names))
            }
            Some(other) => {
                return Err(configuration(format!(
                    "source.index must be a string or a list of strings, got {other}"
                )));
            }
            None => return Err(configuration("request_body is missing \"source.index\"")),
        };
        let remote = match source.remove("remote") {
            None => None,
            Some(Value::Object(mut remote)) => Some(RemoteDescriptor {
                host: take_string(&mut remote, "host")?,
                username: take_string(&mut remote, "username")?,
                password: take_string(&mut remote, "password")?
                    .map(|password| SecretString::new(password.into())),
                extra: remote,
            }),
            Some(other) => {
                return Err(configuration(format!(
                    "source.remote must be a mapping, got {other}"
                )));
            }
        };

        let mut dest = take_object(&mut body, "dest")?;
        let dest_index = match take_string(&mut dest, "index")? {
            Some(name) if name == MIGRATION => DestIndex::Migration,
            Some(name) => DestIndex::Named(name),
            None => return Err(configuration("request_body is missing \"dest.index\"")),
        };

        let mut optional = Map::new();
        for key in OPTIONAL_KEYS {
            if let Some(value) = body.remove(key) {
                optional.insert(key.to_string(), value);
            }
        }

        Ok(Self {
            source: SourceSpec {
                index,
                remote,
                extra: source,
            },
            dest: DestSpec {
                index: dest_index,
                extra: dest,
            },
            optional,
            extra: body,
        })
    }

    pub fn is_remote(&self) -> bool {
        self.source.remote.is_some()
    }

    pub fn is_migration(&self) -> bool {
        self.dest.index == DestIndex::Migration
    }

    /// Wire body for one (source, dest) pair. With `redact`, remote
    /// passwords are replaced by [`REDACTED`].
    pub fn to_body(&self, source: &IndexNames, dest: &str, redact: bool) -> Value {
        let mut source_map = Map::new();
        source_map.insert("index".into(), source.to_value());
        if let Some(remote) = &self.source.remote {
            source_map.insert("remote".into(), remote.to_value(redact));
        }
        source_map.extend(self.source.extra.clone());

        let mut dest_map = Map::new();
        dest_map.insert("index".into(), Value::String(dest.to_string()));
        dest_map.extend(self.dest.extra.clone());

        let mut body = Map::new();
        body.insert("source".into(), Value::Object(source_map));
        body.insert("dest".into(), Value::Object(dest_map));
        body.extend(self.optional.clone());
        Value::Object(body)
    }
}
