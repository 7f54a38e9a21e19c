//! Reindex dispatch endpoint.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::auth::authorize;
use crate::endpoints::send_non_idempotent_request;
use crate::error::Result;
use crate::models::{ReindexParams, ReindexResponse};
use curator_config::AuthStrategy;

/// `POST /_reindex` as an asynchronous task. Returns the task id.
///
/// Only 429 is retried; any other failure may have started a task already.
pub async fn reindex(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    body: &Value,
    params: &ReindexParams,
    max_retries: usize,
) -> Result<String> {
    let url = format!("{}/_reindex", base_url);
    let builder = authorize(client.post(&url), auth)
        .query(&params.to_query())
        .json(body);
    let response = send_non_idempotent_request(builder, max_retries).await?;
    let dispatched: ReindexResponse = response.json().await?;
    debug!(task_id = %dispatched.task, "Reindex task dispatched");
    Ok(dispatched.task)
}
