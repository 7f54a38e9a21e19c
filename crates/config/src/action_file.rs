//! Action file parsing.
//!
//! Responsibilities:
//! - Load the YAML action file and validate it against the built-in schemas.
//! - Order actions by their numeric id.
//! - Split the options shared by every action from the action-specific ones.
//!
//! Does NOT handle:
//! - Running actions or building index lists (see the engine crate).
//!
//! Invariants:
//! - Every action's options and filters have passed schema validation before
//!   an `ActionDefinition` is handed out.
//! - `options` never contains `disable_action`, `continue_if_exception` or
//!   `ignore_empty_list`; those live in `CommonOptions`.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ConfigError;
use crate::loader::read_yaml_document;
use crate::schema::{Schema, validate};
use crate::schemas;

/// Actions this tool knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Reindex,
    Replicas,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Reindex => "reindex",
            ActionKind::Replicas => "replicas",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by every action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommonOptions {
    pub disable_action: bool,
    pub continue_if_exception: bool,
    pub ignore_empty_list: bool,
}

/// One validated entry under `actions:`.
#[derive(Debug, Clone)]
pub struct ActionDefinition {
    pub id: u64,
    pub action: ActionKind,
    pub description: Option<String>,
    pub common: CommonOptions,
    /// Action-specific options, schema-checked.
    pub options: Value,
    /// Filter list, schema-checked.
    pub filters: Value,
}

impl ActionDefinition {
    /// `actions.{id}`, used as the location in error messages.
    pub fn location(&self) -> String {
        format!("actions.{}", self.id)
    }
}

/// A parsed action file.
#[derive(Debug, Clone, Default)]
pub struct ActionFile {
    pub actions: Vec<ActionDefinition>,
}

#[derive(Deserialize)]
struct RawAction {
    action: ActionKind,
    description: Option<String>,
    #[serde(default)]
    options: Map<String, Value>,
    #[serde(default)]
    filters: Vec<Value>,
}

const COMMON_KEYS: [&str; 3] = ["disable_action", "continue_if_exception", "ignore_empty_list"];

impl ActionFile {
    /// Read and validate an action file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = read_yaml_document(path)?;
        Self::from_value(document, &path.display().to_string())
    }

    /// Validate an already-parsed action document.
    pub fn from_value(document: Value, location: &str) -> Result<Self, ConfigError> {
        let schema = Schema::compile(schemas::action_file())?;
        let document = validate(document, &schema, "Actions File", location)?;

        let Value::Object(mut top) = document else {
            return Err(ConfigError::InvalidSchema(
                "action file root must be a mapping".to_string(),
            ));
        };
        let Some(Value::Object(entries)) = top.remove("actions") else {
            return Err(ConfigError::InvalidSchema(
                "`actions` must be a mapping".to_string(),
            ));
        };

        let mut actions = entries
            .into_iter()
            .map(|(key, raw)| Self::parse_action(&key, raw))
            .collect::<Result<Vec<_>, _>>()?;
        actions.sort_by_key(|action| action.id);

        debug!(count = actions.len(), "Loaded action file");
        Ok(Self { actions })
    }

    fn parse_action(key: &str, raw: Value) -> Result<ActionDefinition, ConfigError> {
        let location = format!("actions.{key}");
        let id: u64 = key.parse().map_err(|_| ConfigError::InvalidValue {
            var: location.clone(),
            message: "action ids must be positive integers".to_string(),
        })?;

        let raw: RawAction = serde_json::from_value(raw).map_err(|e| ConfigError::InvalidValue {
            var: location.clone(),
            message: e.to_string(),
        })?;

        let options_schema = schemas::action_options(raw.action.as_str()).ok_or_else(|| {
            ConfigError::InvalidValue {
                var: location.clone(),
                message: format!("unsupported action '{}'", raw.action),
            }
        })?;
        let options_schema = Schema::compile(options_schema)?;
        let options = validate(
            Value::Object(raw.options),
            &options_schema,
            raw.action.as_str(),
            &location,
        )?;

        let filters_schema = Schema::compile(schemas::filters())?;
        let filters = validate(
            Value::Array(raw.filters),
            &filters_schema,
            "filters",
            &location,
        )?;

        let (common, options) = split_common(options, &location)?;

        Ok(ActionDefinition {
            id,
            action: raw.action,
            description: raw.description,
            common,
            options,
            filters,
        })
    }
}

fn split_common(options: Value, location: &str) -> Result<(CommonOptions, Value), ConfigError> {
    let Value::Object(mut map) = options else {
        return Ok((CommonOptions::default(), options));
    };
    let mut common = Map::new();
    for key in COMMON_KEYS {
        if let Some(value) = map.remove(key) {
            common.insert(key.to_string(), value);
        }
    }
    let common: CommonOptions =
        serde_json::from_value(Value::Object(common)).map_err(|e| ConfigError::InvalidValue {
            var: location.to_string(),
            message: e.to_string(),
        })?;
    Ok((common, Value::Object(map)))
}
