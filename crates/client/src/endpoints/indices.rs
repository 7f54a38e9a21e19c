//! Index metadata and settings endpoints.

use std::collections::BTreeMap;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::auth::authorize;
use crate::endpoints::{encode_index_list, encode_path_segment, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::indices::SettingsEnvelope;
use crate::models::{AcknowledgedResponse, CatIndex, IndexSettings};
use curator_config::AuthStrategy;

/// Columns requested from `_cat/indices`.
const CAT_COLUMNS: &str = "index,health,status,docs.count,store.size,pri,rep";

/// `GET /_settings` for all open and closed indices, keyed by index name.
pub async fn get_settings(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<BTreeMap<String, IndexSettings>> {
    let url = format!("{}/_settings", base_url);
    let builder = authorize(client.get(&url), auth)
        .query(&[("expand_wildcards", "open,closed")]);
    let response = send_request_with_retry(builder, max_retries).await?;
    let envelopes: BTreeMap<String, SettingsEnvelope> = response.json().await?;

    Ok(envelopes
        .into_iter()
        .map(|(name, envelope)| (name, envelope.settings.index))
        .collect())
}

/// `GET /_cat/indices` for all open and closed indices, sizes in bytes.
pub async fn cat_indices(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    max_retries: usize,
) -> Result<Vec<CatIndex>> {
    let url = format!("{}/_cat/indices", base_url);
    let builder = authorize(client.get(&url), auth).query(&[
        ("format", "json"),
        ("bytes", "b"),
        ("expand_wildcards", "open,closed"),
        ("h", CAT_COLUMNS),
    ]);
    let response = send_request_with_retry(builder, max_retries).await?;
    Ok(response.json().await?)
}

/// Interpret a HEAD response: 2xx is `true`, 404 is `false`.
fn exists_from(result: Result<reqwest::Response>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(ClientError::ApiError { status: 404, .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// `HEAD /{index}`.
pub async fn index_exists(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    name: &str,
    max_retries: usize,
) -> Result<bool> {
    let url = format!("{}/{}", base_url, encode_path_segment(name));
    let builder = authorize(client.head(&url), auth);
    let exists = exists_from(send_request_with_retry(builder, max_retries).await)?;
    debug!(index = name, exists, "Index existence check");
    Ok(exists)
}

/// `HEAD /_alias/{name}`.
pub async fn alias_exists(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    name: &str,
    max_retries: usize,
) -> Result<bool> {
    let url = format!("{}/_alias/{}", base_url, encode_path_segment(name));
    let builder = authorize(client.head(&url), auth);
    let exists = exists_from(send_request_with_retry(builder, max_retries).await)?;
    debug!(alias = name, exists, "Alias existence check");
    Ok(exists)
}

/// `PUT /{indices}/_settings` with `settings` as the body.
pub async fn put_settings(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    indices: &[String],
    settings: &Value,
    max_retries: usize,
) -> Result<AcknowledgedResponse> {
    if indices.is_empty() {
        return Err(ClientError::InvalidUrl(
            "at least one index name is required".to_string(),
        ));
    }
    let url = format!("{}/{}/_settings", base_url, encode_index_list(indices));
    let builder = authorize(client.put(&url), auth).json(settings);
    let response = send_request_with_retry(builder, max_retries).await?;
    Ok(response.json().await?)
}
