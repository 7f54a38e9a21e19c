//! Task status endpoint.

use reqwest::Client;

use crate::auth::authorize;
use crate::endpoints::{encode_path_segment, send_request_with_retry};
use crate::error::Result;
use crate::models::TaskStatus;
use curator_config::AuthStrategy;

/// `GET /_tasks/{task_id}`.
pub async fn get_task(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    task_id: &str,
    max_retries: usize,
) -> Result<TaskStatus> {
    let url = format!("{}/_tasks/{}", base_url, encode_path_segment(task_id));
    let builder = authorize(client.get(&url), auth);
    let response = send_request_with_retry(builder, max_retries).await?;
    Ok(response.json().await?)
}
