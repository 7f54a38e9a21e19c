//! Reindex request parameters and dispatch response.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Throttle for a reindex task. `-1` and `"unlimited"` both mean no throttle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RequestsPerSecond {
    #[default]
    Unlimited,
    PerSecond(f64),
}

impl fmt::Display for RequestsPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestsPerSecond::Unlimited => f.write_str("-1"),
            RequestsPerSecond::PerSecond(n) => write!(f, "{n}"),
        }
    }
}

impl<'de> Deserialize<'de> for RequestsPerSecond {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n == -1.0 => Ok(RequestsPerSecond::Unlimited),
            Raw::Number(n) if n > 0.0 => Ok(RequestsPerSecond::PerSecond(n)),
            Raw::Number(n) => Err(de::Error::custom(format!(
                "requests_per_second must be -1 or greater than 0 (got {n})"
            ))),
            Raw::Text(s) if s == "unlimited" => Ok(RequestsPerSecond::Unlimited),
            Raw::Text(s) => Err(de::Error::custom(format!(
                "requests_per_second must be a number or \"unlimited\" (got {s:?})"
            ))),
        }
    }
}

/// Shard copies that must be active before a write proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveShards {
    All,
    Count(u32),
}

impl Default for ActiveShards {
    fn default() -> Self {
        ActiveShards::Count(1)
    }
}

impl fmt::Display for ActiveShards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveShards::All => f.write_str("all"),
            ActiveShards::Count(n) => write!(f, "{n}"),
        }
    }
}

impl<'de> Deserialize<'de> for ActiveShards {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(ActiveShards::Count(n)),
            Raw::Text(s) if s == "all" => Ok(ActiveShards::All),
            Raw::Text(s) => s.parse().map(ActiveShards::Count).map_err(|_| {
                de::Error::custom(format!(
                    "wait_for_active_shards must be an integer or \"all\" (got {s:?})"
                ))
            }),
        }
    }
}

/// Query parameters for `POST /_reindex`.
///
/// `wait_for_completion` is always sent as `false`; completion is tracked
/// through the returned task id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReindexParams {
    pub refresh: bool,
    pub requests_per_second: RequestsPerSecond,
    pub slices: u32,
    /// Per-bulk-request timeout, e.g. `"60s"`.
    pub timeout: String,
    pub wait_for_active_shards: ActiveShards,
}

impl ReindexParams {
    /// Render as query pairs, in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("refresh", self.refresh.to_string()),
            ("requests_per_second", self.requests_per_second.to_string()),
            ("slices", self.slices.to_string()),
            ("timeout", self.timeout.clone()),
            (
                "wait_for_active_shards",
                self.wait_for_active_shards.to_string(),
            ),
            ("wait_for_completion", "false".to_string()),
        ]
    }
}

/// Response of an asynchronous `POST /_reindex`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReindexResponse {
    pub task: String,
}
