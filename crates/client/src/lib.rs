//! Cluster REST API client.
//!
//! This crate provides a typed async client for the small set of document-store
//! REST calls the curator engine needs: cluster info and health, index settings
//! and `_cat/indices`, index/alias existence, reindex dispatch, task status and
//! settings updates. Transient HTTP statuses are retried with exponential backoff.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod serde_helpers;

pub use client::EsClient;
pub use client::builder::EsClientBuilder;
pub use curator_config::AuthStrategy;
pub use error::{ClientError, Result};
pub use models::{
    AcknowledgedResponse, ActiveShards, CatIndex, ClusterHealth, ClusterInfo, HealthStatus,
    IndexSettings, IndexState, ReindexParams, ReindexResponse, RequestsPerSecond, TaskInfo,
    TaskResponse, TaskStatus, VersionInfo,
};
