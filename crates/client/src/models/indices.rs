//! Index metadata models: settings and `_cat/indices` rows.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde_helpers::opt_u64_from_string_or_number;

/// Open/closed state of an index.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    #[default]
    Open,
    Close,
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexState::Open => f.write_str("open"),
            IndexState::Close => f.write_str("close"),
        }
    }
}

/// The `settings.index` block of `GET /_settings`.
///
/// Numbers arrive as strings; unrecognized keys are kept in `other`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct IndexSettings {
    /// Creation time, epoch milliseconds.
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub creation_date: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub number_of_replicas: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub number_of_shards: Option<u64>,
    pub uuid: Option<String>,
    pub provided_name: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettingsBody {
    #[serde(default)]
    pub index: IndexSettings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettingsEnvelope {
    pub settings: SettingsBody,
}

/// One row of `GET /_cat/indices?format=json&bytes=b`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatIndex {
    pub index: String,
    pub health: Option<String>,
    pub status: Option<IndexState>,
    #[serde(
        rename = "docs.count",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub docs_count: Option<u64>,
    #[serde(
        rename = "store.size",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub store_size: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub pri: Option<u64>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub rep: Option<u64>,
}
