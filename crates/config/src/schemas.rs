//! Built-in schema definitions.
//!
//! Responsibilities:
//! - Describe the shape of the client config file, the action file, each
//!   action's options block and filter lists as JSON Schema (draft 7).
//!
//! Does NOT handle:
//! - Semantic checks that need more than one field (e.g. migration naming);
//!   those live in the actions themselves.

use serde_json::{Value, json};

/// Options every action accepts in addition to its own.
fn common_action_options() -> Value {
    json!({
        "disable_action": { "type": "boolean" },
        "continue_if_exception": { "type": "boolean" },
        "ignore_empty_list": { "type": "boolean" }
    })
}

fn wait_options() -> Value {
    json!({
        "wait_for_completion": { "type": "boolean" },
        "wait_interval": { "type": "integer", "minimum": 1, "maximum": 30 },
        "max_wait": { "type": "integer", "minimum": -1 }
    })
}

fn merge(objects: &[Value]) -> Value {
    let mut merged = serde_json::Map::new();
    for object in objects {
        if let Value::Object(map) = object {
            merged.extend(map.clone());
        }
    }
    Value::Object(merged)
}

fn optional_path() -> Value {
    json!({ "type": ["string", "null"] })
}

/// Schema for a list of filter definitions.
pub fn filters() -> Value {
    let exclude = json!({ "type": "boolean" });
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["filtertype"],
            "properties": {
                "filtertype": {
                    "enum": ["none", "pattern", "age", "closed", "empty", "count"]
                }
            },
            "allOf": [
                {
                    "if": { "properties": { "filtertype": { "const": "none" } } },
                    "then": {
                        "properties": { "filtertype": {} },
                        "additionalProperties": false
                    }
                },
                {
                    "if": { "properties": { "filtertype": { "const": "pattern" } } },
                    "then": {
                        "required": ["kind", "value"],
                        "properties": {
                            "filtertype": {},
                            "kind": { "enum": ["prefix", "suffix", "regex", "timestring"] },
                            "value": { "type": "string" },
                            "exclude": exclude
                        },
                        "additionalProperties": false
                    }
                },
                {
                    "if": { "properties": { "filtertype": { "const": "age" } } },
                    "then": {
                        "required": ["direction", "unit", "unit_count"],
                        "properties": {
                            "filtertype": {},
                            "source": { "enum": ["creation_date", "name"] },
                            "direction": { "enum": ["older", "younger"] },
                            "unit": {
                                "enum": ["seconds", "minutes", "hours", "days", "weeks", "months", "years"]
                            },
                            "unit_count": { "type": "integer", "minimum": 0 },
                            "epoch": { "type": ["integer", "null"] },
                            "timestring": { "type": "string" },
                            "exclude": exclude
                        },
                        "additionalProperties": false
                    }
                },
                {
                    "if": { "properties": { "filtertype": { "enum": ["closed", "empty"] } } },
                    "then": {
                        "properties": { "filtertype": {}, "exclude": exclude },
                        "additionalProperties": false
                    }
                },
                {
                    "if": { "properties": { "filtertype": { "const": "count" } } },
                    "then": {
                        "required": ["count"],
                        "properties": {
                            "filtertype": {},
                            "count": { "type": "integer", "minimum": 1 },
                            "reverse": { "type": "boolean" },
                            "use_age": { "type": "boolean" },
                            "exclude": exclude
                        },
                        "additionalProperties": false
                    }
                }
            ]
        }
    })
}

/// Schema for the `request_body` of a reindex action.
pub fn reindex_request_body() -> Value {
    json!({
        "type": "object",
        "required": ["source", "dest"],
        "properties": {
            "source": {
                "type": "object",
                "required": ["index"],
                "properties": {
                    "index": {
                        "anyOf": [
                            { "type": "string" },
                            { "type": "array", "items": { "type": "string" } }
                        ]
                    },
                    "remote": { "type": "object" }
                }
            },
            "dest": {
                "type": "object",
                "required": ["index"],
                "properties": { "index": { "type": "string" } }
            },
            "conflicts": { "enum": ["abort", "proceed"] },
            "max_docs": { "type": "integer", "minimum": 1 },
            "size": { "type": "integer", "minimum": 1 }
        }
    })
}

/// Schema for the options block of a reindex action.
pub fn reindex_options() -> Value {
    let own = json!({
        "request_body": reindex_request_body(),
        "refresh": { "type": "boolean" },
        "requests_per_second": {
            "anyOf": [
                { "type": "number", "minimum": -1 },
                { "const": "unlimited" }
            ]
        },
        "slices": { "type": "integer", "minimum": 1 },
        "timeout": { "type": "integer", "minimum": 1 },
        "wait_for_active_shards": {
            "anyOf": [
                { "type": "integer", "minimum": 0 },
                { "const": "all" }
            ]
        },
        "remote_certificate": optional_path(),
        "remote_client_cert": optional_path(),
        "remote_client_key": optional_path(),
        "remote_filters": filters(),
        "migration_prefix": { "type": "string" },
        "migration_suffix": { "type": "string" }
    });

    json!({
        "type": "object",
        "required": ["request_body"],
        "properties": merge(&[own, wait_options(), common_action_options()]),
        "additionalProperties": false
    })
}

/// Schema for the options block of a replicas action.
pub fn replicas_options() -> Value {
    let own = json!({
        "count": { "type": "integer", "minimum": 0 }
    });

    json!({
        "type": "object",
        "properties": merge(&[own, wait_options(), common_action_options()]),
        "additionalProperties": false
    })
}

/// Schema for the options block of `action`, if the action is known.
pub fn action_options(action: &str) -> Option<Value> {
    match action {
        "reindex" => Some(reindex_options()),
        "replicas" => Some(replicas_options()),
        _ => None,
    }
}

/// Schema for the top level of an action file.
pub fn action_file() -> Value {
    json!({
        "type": "object",
        "required": ["actions"],
        "properties": {
            "actions": {
                "type": "object",
                "minProperties": 1,
                "patternProperties": {
                    "^[0-9]+$": {
                        "type": "object",
                        "required": ["action"],
                        "properties": {
                            "action": { "enum": ["reindex", "replicas"] },
                            "description": { "type": "string" },
                            "options": { "type": "object" },
                            "filters": { "type": "array" }
                        },
                        "additionalProperties": false
                    }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the client configuration file.
pub fn client_config_file() -> Value {
    json!({
        "type": "object",
        "properties": {
            "client": {
                "type": "object",
                "properties": {
                    "hosts": {
                        "anyOf": [
                            { "type": "string" },
                            { "type": "array", "items": { "type": "string" }, "minItems": 1 }
                        ]
                    },
                    "request_timeout": { "type": "integer", "minimum": 1 },
                    "verify_certs": { "type": "boolean" },
                    "ca_certs": optional_path(),
                    "client_cert": optional_path(),
                    "client_key": optional_path(),
                    "max_retries": { "type": "integer", "minimum": 0 }
                },
                "additionalProperties": false
            },
            "other_settings": {
                "type": "object",
                "properties": {
                    "username": { "type": ["string", "null"] },
                    "password": { "type": ["string", "null"] },
                    "api_key": { "type": ["string", "null"] }
                },
                "additionalProperties": false
            },
            "logging": {
                "type": "object",
                "properties": {
                    "loglevel": {
                        "enum": ["TRACE", "DEBUG", "INFO", "WARNING", "WARN", "ERROR",
                                 "trace", "debug", "info", "warning", "warn", "error"]
                    },
                    "logformat": { "enum": ["default", "json"] },
                    "logfile": optional_path()
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}
