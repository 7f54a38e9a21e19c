//! Retry helper for HTTP requests with exponential backoff.
//!
//! Requests answered with a transient status (429, 502, 503, 504) are retried
//! with `2^attempt` second backoff. Any other non-success status becomes
//! [`ClientError::ApiError`] carrying the cluster's error reason.
//!
//! Requests that start work on the cluster are only retried on 429: a 502,
//! 503 or 504 from a proxy may hide a request the cluster already accepted.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::ErrorResponse;

/// Sends an HTTP request, retrying transient failures.
///
/// `max_retries` is the number of retries after the first attempt; `0`
/// disables retrying.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when all retry attempts are exhausted,
/// `ClientError::ApiError` for non-retryable error statuses, and propagates
/// transport errors as `ClientError::HttpError`.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    send_with_policy(builder, max_retries, ClientError::is_retryable_status).await
}

/// Sends a request that must not run twice, retrying only when the cluster
/// refused it outright (429).
///
/// # Errors
///
/// As [`send_request_with_retry`]; 502/503/504 become `ClientError::ApiError`
/// on the first attempt.
pub async fn send_non_idempotent_request(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    send_with_policy(builder, max_retries, |status| status == 429).await
}

async fn send_with_policy(
    builder: RequestBuilder,
    max_retries: usize,
    retry_on: fn(u16) -> bool,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                return check_status(builder.send().await?).await;
            }
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if retry_on(status) {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    status,
                    backoff_secs,
                    "Transient HTTP status, retrying with exponential backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        if attempt > 0 {
            debug!(attempt = attempt + 1, "Request succeeded after retry");
        }
        return check_status(response).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Turn a non-success response into `ClientError::ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.message(),
        Err(_) if body.is_empty() => format!("HTTP {status}"),
        Err(_) => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
    })
}
