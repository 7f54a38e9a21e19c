//! Cluster-level models: root info and health.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version block of the root endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VersionInfo {
    #[serde(default)]
    pub number: String,
    pub distribution: Option<String>,
}

/// Response of `GET /`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ClusterInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cluster_name: String,
    pub cluster_uuid: Option<String>,
    #[serde(default)]
    pub version: VersionInfo,
}

/// Cluster health colour.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Green => "green",
            HealthStatus::Yellow => "yellow",
            HealthStatus::Red => "red",
        };
        f.write_str(s)
    }
}

/// Response of `GET /_cluster/health`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClusterHealth {
    #[serde(default)]
    pub cluster_name: String,
    pub status: HealthStatus,
    #[serde(default)]
    pub number_of_nodes: u64,
    #[serde(default)]
    pub relocating_shards: u64,
    #[serde(default)]
    pub initializing_shards: u64,
    #[serde(default)]
    pub unassigned_shards: u64,
}

impl ClusterHealth {
    pub fn is_green(&self) -> bool {
        self.status == HealthStatus::Green
    }
}
