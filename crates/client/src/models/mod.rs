//! Data models for cluster API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod cluster;
pub mod common;
pub mod indices;
pub mod reindex;
pub mod tasks;

pub use cluster::{ClusterHealth, ClusterInfo, HealthStatus, VersionInfo};
pub use common::{AcknowledgedResponse, ErrorResponse};
pub use indices::{CatIndex, IndexSettings, IndexState};
pub use reindex::{ActiveShards, ReindexParams, ReindexResponse, RequestsPerSecond};
pub use tasks::{TaskInfo, TaskResponse, TaskStatus};
