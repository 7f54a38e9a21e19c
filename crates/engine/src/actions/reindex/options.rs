//! Scalar options of a reindex action.

use std::path::PathBuf;

use curator_client::{ActiveShards, ReindexParams, RequestsPerSecond};
use curator_config::constants::{
    DEFAULT_REINDEX_TIMEOUT_SECS, DEFAULT_WAIT_INTERVAL_SECS, WAIT_FOREVER,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ActionError;
use crate::index_list::FilterSpec;
use crate::waiter::WaitBudget;

/// Everything in a reindex `options` block except `request_body`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReindexOptions {
    pub refresh: bool,
    pub requests_per_second: RequestsPerSecond,
    pub slices: u32,
    /// Per-bulk-request timeout in seconds.
    pub timeout: u64,
    pub wait_for_active_shards: ActiveShards,
    pub wait_for_completion: bool,
    pub wait_interval: u64,
    /// `-1` waits indefinitely.
    pub max_wait: i64,
    pub remote_certificate: Option<PathBuf>,
    pub remote_client_cert: Option<PathBuf>,
    pub remote_client_key: Option<PathBuf>,
    pub remote_filters: Vec<FilterSpec>,
    pub migration_prefix: String,
    pub migration_suffix: String,
}

impl Default for ReindexOptions {
    fn default() -> Self {
        Self {
            refresh: true,
            requests_per_second: RequestsPerSecond::Unlimited,
            slices: 1,
            timeout: DEFAULT_REINDEX_TIMEOUT_SECS,
            wait_for_active_shards: ActiveShards::Count(1),
            wait_for_completion: true,
            wait_interval: DEFAULT_WAIT_INTERVAL_SECS,
            max_wait: WAIT_FOREVER,
            remote_certificate: None,
            remote_client_cert: None,
            remote_client_key: None,
            remote_filters: Vec::new(),
            migration_prefix: String::new(),
            migration_suffix: String::new(),
        }
    }
}

/// Keys of an action's options block that are not reindex options.
const FOREIGN_KEYS: [&str; 4] = [
    "request_body",
    "disable_action",
    "continue_if_exception",
    "ignore_empty_list",
];

impl ReindexOptions {
    /// Split an action's options block into the request body and the typed
    /// options. Missing keys take their defaults.
    pub fn from_action_options(options: &Value) -> Result<(Value, Self), ActionError> {
        let Value::Object(map) = options else {
            return Err(ActionError::Configuration(
                "reindex options must be a mapping".to_string(),
            ));
        };
        let mut map = map.clone();
        let body = map.remove("request_body").ok_or_else(|| {
            ActionError::Configuration("reindex requires \"request_body\"".to_string())
        })?;
        for key in FOREIGN_KEYS {
            map.remove(key);
        }
        let options = serde_json::from_value(Value::Object(map))
            .map_err(|e| ActionError::Configuration(format!("Invalid reindex options: {e}")))?;
        Ok((body, options))
    }

    /// Query parameters sent with every dispatch.
    pub fn params(&self) -> ReindexParams {
        ReindexParams {
            refresh: self.refresh,
            requests_per_second: self.requests_per_second,
            slices: self.slices,
            timeout: format!("{}s", self.timeout),
            wait_for_active_shards: self.wait_for_active_shards,
        }
    }

    pub fn wait_budget(&self) -> WaitBudget {
        WaitBudget::new(self.wait_interval, self.max_wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let (body, options) =
            ReindexOptions::from_action_options(&json!({ "request_body": { "a": 1 } })).unwrap();
        assert_eq!(body, json!({ "a": 1 }));
        assert_eq!(options, ReindexOptions::default());
        assert!(options.refresh);
        assert!(options.wait_for_completion);
        assert_eq!(options.params().timeout, "60s");
        assert_eq!(options.wait_budget().max_wait(), None);
    }

    #[test]
    fn test_common_options_are_ignored() {
        let (_, options) = ReindexOptions::from_action_options(&json!({
            "request_body": {},
            "continue_if_exception": true,
            "slices": 4,
            "requests_per_second": "unlimited",
            "wait_for_active_shards": "all",
            "remote_filters": [{ "filtertype": "closed" }],
            "migration_suffix": "-new"
        }))
        .unwrap();
        assert_eq!(options.slices, 4);
        assert_eq!(options.wait_for_active_shards, ActiveShards::All);
        assert_eq!(options.remote_filters, vec![FilterSpec::Closed { exclude: true }]);
        assert_eq!(options.migration_suffix, "-new");
    }

    #[test]
    fn test_missing_request_body() {
        let err = ReindexOptions::from_action_options(&json!({ "slices": 2 })).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }
}
