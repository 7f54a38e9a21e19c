//! Reindex dispatch and task status methods for [`EsClient`].

use serde_json::Value;

use crate::client::EsClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{ReindexParams, TaskStatus};

impl EsClient {
    /// Start a reindex task and return its id.
    pub async fn reindex(&self, body: &Value, params: &ReindexParams) -> Result<String> {
        endpoints::reindex(
            &self.http,
            &self.base_url,
            &self.auth,
            body,
            params,
            self.max_retries,
        )
        .await
    }

    /// Fetch the status of a task.
    pub async fn get_task(&self, task_id: &str) -> Result<TaskStatus> {
        endpoints::get_task(&self.http, &self.base_url, &self.auth, task_id, self.max_retries)
            .await
    }
}
