//! Cluster info and health endpoints.

use reqwest::Client;

use crate::auth::authorize;
use crate::endpoints::send_request_with_retry;
use crate::error::Result;
use crate::models::{ClusterHealth, ClusterInfo};
use curator_config::AuthStrategy;

/// `GET /`: cluster name and version. Also used as a connectivity check.
pub async fn info(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<ClusterInfo> {
    let url = format!("{}/", base_url);
    let builder = authorize(client.get(&url), auth);
    let response = send_request_with_retry(builder, max_retries).await?;
    Ok(response.json().await?)
}

/// `GET /_cluster/health`.
pub async fn cluster_health(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<ClusterHealth> {
    let url = format!("{}/_cluster/health", base_url);
    let builder = authorize(client.get(&url), auth);
    let response = send_request_with_retry(builder, max_retries).await?;
    Ok(response.json().await?)
}
