//! Schema validation for configuration blocks.
//!
//! Responsibilities:
//! - Compile JSON Schema (draft 7) definitions.
//! - Validate a configuration mapping and report the offending value on failure.
//!
//! Does NOT handle:
//! - Defaulting or type coercion (callers deserialize into typed structs afterwards).
//! - Loading configuration from disk (see `loader`).
//!
//! Invariants:
//! - Only the first validation error is reported.
//! - The bad value is found by walking the error's instance path into the config;
//!   when the path cannot be resolved it is reported as [`UNDETERMINED_VALUE`].

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::ConfigError;

/// Reported as the bad value when the error path does not resolve into the config.
pub const UNDETERMINED_VALUE: &str = "(could not determine)";

/// A compiled schema plus the definition it was compiled from.
pub struct Schema {
    definition: Value,
    compiled: JSONSchema,
}

impl Schema {
    /// Compile a draft 7 schema definition.
    pub fn compile(definition: Value) -> Result<Self, ConfigError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&definition)
            .map_err(|e| ConfigError::InvalidSchema(e.to_string()))?;
        Ok(Self {
            definition,
            compiled,
        })
    }

    /// The schema definition as JSON.
    pub fn definition(&self) -> &Value {
        &self.definition
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Validate `config` against `schema`.
///
/// `what` names the configuration block being checked and `location` the
/// sub-block; both only feed the error message.
///
/// # Errors
///
/// Returns [`ConfigError::SchemaViolation`] describing the first violation.
pub fn validate(
    config: Value,
    schema: &Schema,
    what: &str,
    location: &str,
) -> Result<Value, ConfigError> {
    debug!(schema = %schema.definition, "Schema");
    debug!(what, config = %config, "Validating configuration");

    let failure = match schema.compiled.validate(&config) {
        Ok(()) => None,
        Err(mut errors) => errors.next().map(|err| {
            let mut path = pointer_segments(&err.instance_path.to_string());
            match &err.kind {
                ValidationErrorKind::Required { property } => {
                    path.push(
                        property
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| property.to_string()),
                    );
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    if let Some(first) = unexpected.first() {
                        path.push(first.clone());
                    }
                }
                _ => {}
            }
            (path, err.to_string())
        }),
    };

    let Some((path, message)) = failure else {
        return Ok(config);
    };

    let bad_value = resolve_path(&config, &path)
        .map(render_value)
        .unwrap_or_else(|| UNDETERMINED_VALUE.to_string());

    error!(error = %message, path = %path.join("."), "Schema error");

    Err(ConfigError::SchemaViolation {
        what: what.to_string(),
        location: location.to_string(),
        bad_value,
        message,
    })
}

/// Split a JSON pointer (`/a/0/b`) into unescaped segments.
fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Walk mapping-key and sequence-index segments into `config`.
fn resolve_path<'a>(config: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter()
        .try_fold(config, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options_schema() -> Schema {
        Schema::compile(json!({
            "type": "object",
            "properties": {
                "slices": { "type": "integer", "minimum": 1 },
                "filters": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "value": { "type": "string" } }
                    }
                }
            },
            "required": ["slices"],
            "additionalProperties": false
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_config_is_returned_unchanged() {
        let config = json!({ "slices": 2 });
        let validated = validate(config.clone(), &options_schema(), "reindex", "options").unwrap();
        assert_eq!(validated, config);
    }

    #[test]
    fn test_bad_value_resolved_through_mapping_key() {
        let err = validate(json!({ "slices": 0 }), &options_schema(), "reindex", "options")
            .unwrap_err();
        match err {
            ConfigError::SchemaViolation {
                what,
                location,
                bad_value,
                ..
            } => {
                assert_eq!(what, "reindex");
                assert_eq!(location, "options");
                assert_eq!(bad_value, "0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_resolved_through_sequence_index() {
        let config = json!({ "slices": 1, "filters": [{ "value": "ok" }, { "value": 7 }] });
        let err = validate(config, &options_schema(), "filters", "actions.1").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SchemaViolation { ref bad_value, .. } if bad_value == "7"
        ));
    }

    #[test]
    fn test_missing_key_reports_undetermined_value() {
        let err = validate(json!({}), &options_schema(), "reindex", "options").unwrap_err();
        let message = err.to_string();
        assert!(message.contains(UNDETERMINED_VALUE), "{message}");
        assert!(message.starts_with("Configuration: reindex: Location: options: Bad Value:"));
        assert!(message.ends_with("Check configuration file."));
    }

    #[test]
    fn test_unexpected_key_reports_its_value() {
        let err = validate(
            json!({ "slices": 1, "slicez": "typo" }),
            &options_schema(),
            "reindex",
            "options",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SchemaViolation { ref bad_value, .. } if bad_value == "typo"
        ));
    }

    #[test]
    fn test_invalid_schema_definition() {
        let err = Schema::compile(json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSchema(_)));
    }

    #[test]
    fn test_resolve_path_stops_on_scalars() {
        let config = json!({ "a": 1 });
        assert!(resolve_path(&config, &["a".to_string(), "b".to_string()]).is_none());
        assert_eq!(resolve_path(&config, &[]), Some(&config));
    }
}
