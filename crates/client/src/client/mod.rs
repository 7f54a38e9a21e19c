//! Main cluster REST API client and API methods.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `cluster`: Cluster info and health methods
//! - `indices`: Index metadata, existence and settings methods
//! - `tasks`: Reindex dispatch and task status methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retry/backoff policy (delegated to [`crate::endpoints::send_request_with_retry`])
//!
//! # Invariants
//! - `base_url` never ends with a slash.
//! - Cloning a client shares the underlying connection pool.

pub mod builder;

mod cluster;
mod indices;
mod tasks;

use curator_config::AuthStrategy;

/// Cluster REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use curator_client::{EsClient, AuthStrategy};
///
/// let client = EsClient::builder()
///     .base_url("https://localhost:9200".to_string())
///     .auth_strategy(AuthStrategy::None)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct EsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: AuthStrategy,
    pub(crate) max_retries: usize,
}

impl EsClient {
    /// Create a new client builder.
    pub fn builder() -> builder::EsClientBuilder {
        builder::EsClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the retry budget used for every request.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }
}
