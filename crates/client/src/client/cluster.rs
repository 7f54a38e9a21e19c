//! Cluster info and health methods for [`EsClient`].

use crate::client::EsClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{ClusterHealth, ClusterInfo};

impl EsClient {
    /// Fetch `GET /`. Fails if the cluster cannot be reached.
    pub async fn info(&self) -> Result<ClusterInfo> {
        endpoints::info(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }

    /// Fetch cluster health.
    pub async fn cluster_health(&self) -> Result<ClusterHealth> {
        endpoints::cluster_health(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }
}
