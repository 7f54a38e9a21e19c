//! Bounded polling for asynchronous work.
//!
//! Responsibilities:
//! - Poll a reindex task until it reports `completed`.
//! - Poll cluster health until it is `green` (after replica changes).
//! - Enforce the `max_wait` budget.
//!
//! Does NOT handle:
//! - Cancelling the server-side task when the budget runs out.
//!
//! Invariants:
//! - Nothing runs past the deadline. Sleeps are shortened to the remaining
//!   budget, and a check still in flight at the deadline (including the
//!   client's own retry backoff) is abandoned as a timeout.
//! - Transient cluster errors are logged and retried within the budget;
//!   client errors (4xx other than 408/429) end the wait.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use curator_client::{ClientError, EsClient};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::ActionError;

/// What is being waited for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitTarget {
    /// A reindex task, by id.
    Reindex { task_id: String },
    /// Cluster health reaching green.
    Replicas,
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTarget::Reindex { .. } => f.write_str("reindex"),
            WaitTarget::Replicas => f.write_str("replicas"),
        }
    }
}

/// Poll interval plus the total time allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitBudget {
    poll_interval: Duration,
    /// `None` waits indefinitely.
    max_wait: Option<Duration>,
}

impl WaitBudget {
    /// `max_wait_secs` of `-1` (or any negative value) waits indefinitely.
    pub fn new(wait_interval_secs: u64, max_wait_secs: i64) -> Self {
        Self {
            poll_interval: Duration::from_secs(wait_interval_secs),
            max_wait: u64::try_from(max_wait_secs).ok().map(Duration::from_secs),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }
}

/// Wait for `target` to complete on the cluster behind `client`.
pub async fn wait(
    client: &EsClient,
    target: &WaitTarget,
    budget: WaitBudget,
) -> Result<(), ActionError> {
    info!(action = %target, "Waiting for completion");
    poll_until(&target.to_string(), budget, || check(client, target)).await
}

/// One completion check. `Ok(false)` means not done yet.
async fn check(client: &EsClient, target: &WaitTarget) -> Result<bool, ActionError> {
    match target {
        WaitTarget::Reindex { task_id } => {
            let status = client.get_task(task_id).await?;
            if !status.completed {
                debug!(task_id = %task_id, status = ?status.task.status, "Task not yet complete");
                return Ok(false);
            }
            if let Some(failure) = status.failure() {
                return Err(ActionError::failed(format!(
                    "Task \"{task_id}\" completed with failures: {failure}"
                )));
            }
            info!(task_id = %task_id, description = ?status.task.description, "Task completed");
            Ok(true)
        }
        WaitTarget::Replicas => {
            let health = client.cluster_health().await?;
            debug!(status = ?health.status, "Cluster health");
            Ok(health.is_green())
        }
    }
}

/// Errors worth polling through: transport failures, retryable statuses
/// and server errors.
fn is_transient(err: &ClientError) -> bool {
    match err.status() {
        Some(status) => status >= 500 || matches!(status, 408 | 429),
        None => matches!(
            err,
            ClientError::HttpError(_) | ClientError::MaxRetriesExceeded(_)
        ),
    }
}

/// Run `check` until it returns `Ok(true)` or the budget is spent.
pub(crate) async fn poll_until<F, Fut>(
    action: &str,
    budget: WaitBudget,
    mut check: F,
) -> Result<(), ActionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ActionError>>,
{
    let start = Instant::now();
    let deadline = budget
        .max_wait
        .and_then(|max_wait| start.checked_add(max_wait).map(|at| (at, max_wait)));
    loop {
        let outcome = match deadline {
            None => check().await,
            Some((at, max_wait)) => match tokio::time::timeout_at(at, check()).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(action, "Check still running when the wait budget ran out");
                    return Err(timed_out(action, max_wait));
                }
            },
        };
        match outcome {
            Ok(true) => {
                info!(action, elapsed_secs = start.elapsed().as_secs(), "Action complete");
                return Ok(());
            }
            Ok(false) => {}
            Err(ActionError::Client(err)) if is_transient(&err) => {
                warn!(action, error = %err, "Error while checking for completion, will retry");
            }
            Err(err) => return Err(err),
        }

        let elapsed = start.elapsed();
        let pause = match budget.max_wait {
            None => budget.poll_interval,
            Some(max_wait) if elapsed >= max_wait => return Err(timed_out(action, max_wait)),
            Some(max_wait) => budget.poll_interval.min(max_wait - elapsed),
        };
        debug!(action, pause_secs = pause.as_secs_f64(), "Sleeping before next check");
        tokio::time::sleep(pause).await;
    }
}

fn timed_out(action: &str, max_wait: Duration) -> ActionError {
    ActionError::TimeoutExceeded {
        action: action.to_string(),
        max_wait: max_wait.as_secs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_at_budget_without_overshoot() {
        let calls = counter();
        let seen = calls.clone();
        let start = Instant::now();

        let err = poll_until("reindex", WaitBudget::new(3, 10), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Ok(false) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ActionError::TimeoutExceeded { max_wait: 10, .. }));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        // Checks at 0, 3, 6, 9 and the deadline.
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_when_check_succeeds() {
        let calls = counter();
        let seen = calls.clone();
        let start = Instant::now();

        poll_until("reindex", WaitBudget::new(2, 60), move || {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n >= 2) }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_budget_keeps_polling() {
        let calls = counter();
        let seen = calls.clone();

        poll_until("replicas", WaitBudget::new(9, -1), move || {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            async move { Ok(n >= 500) }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 501);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_are_retried() {
        let calls = counter();
        let seen = calls.clone();

        poll_until("reindex", WaitBudget::new(1, 30), move || {
            let n = seen.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ActionError::Client(ClientError::ApiError {
                        status: 503,
                        url: "http://localhost:9200/_tasks/x".into(),
                        message: "unavailable".into(),
                    }))
                } else {
                    Ok(true)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_check_is_cut_off_at_the_deadline() {
        let start = Instant::now();

        let err = poll_until("reindex", WaitBudget::new(1, 2), || async {
            // Stands in for a request stuck in the client's retry backoff.
            tokio::time::sleep(Duration::from_secs(7)).await;
            Ok(true)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ActionError::TimeoutExceeded { max_wait: 2, .. }));
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_budget_lets_slow_checks_finish() {
        let start = Instant::now();

        poll_until("replicas", WaitBudget::new(1, -1), || async {
            tokio::time::sleep(Duration::from_secs(7)).await;
            Ok(true)
        })
        .await
        .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_end_the_wait() {
        let err = poll_until("reindex", WaitBudget::new(1, -1), || async {
            Err(ActionError::Client(ClientError::ApiError {
                status: 404,
                url: "http://localhost:9200/_tasks/x".into(),
                message: "resource_not_found_exception".into(),
            }))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ActionError::Client(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_failure_is_not_retried() {
        let calls = counter();
        let seen = calls.clone();

        let err = poll_until("reindex", WaitBudget::new(1, 30), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            async { Err(ActionError::failed("completed with failures")) }
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::FailedExecution);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_budget_from_options() {
        let forever = WaitBudget::new(9, -1);
        assert_eq!(forever.max_wait(), None);
        assert_eq!(forever.poll_interval(), Duration::from_secs(9));
        assert_eq!(WaitBudget::new(1, 2).max_wait(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_transient_classification() {
        let api = |status| ClientError::ApiError {
            status,
            url: String::new(),
            message: String::new(),
        };
        assert!(is_transient(&api(500)));
        assert!(is_transient(&api(429)));
        assert!(!is_transient(&api(401)));
        assert!(is_transient(&ClientError::MaxRetriesExceeded(1)));
        assert!(!is_transient(&ClientError::InvalidResponse("x".into())));
    }
}
