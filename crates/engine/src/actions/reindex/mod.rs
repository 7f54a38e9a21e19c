//! Reindex action.
//!
//! Responsibilities:
//! - Resolve the request body against the current selection (local or remote)
//!   at construction, failing fast on configuration errors.
//! - Expand the request into concrete (source, dest) pairs, one per source
//!   index in migration mode.
//! - Dispatch each pair as an asynchronous task, optionally wait for it and
//!   verify the destination afterward.
//!
//! Does NOT handle:
//! - Creating destination indices or mappings (the cluster does that).
//! - Cancelling tasks that outlive `max_wait`.
//!
//! Invariants:
//! - After construction `source.index` never holds the selection literal.
//! - Pairs are dispatched one at a time, in order.
//! - The wire call always uses `wait_for_completion=false`.

mod options;
mod request;

use std::time::Duration;

use curator_client::{AuthStrategy, EsClient, ReindexParams};
use curator_config::constants::REMOTE_METADATA_TIMEOUT_SECS;
use curator_config::{ClusterUrl, verify_url_schema};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{ActionError, report_failure};
use crate::index_list::IndexList;
use crate::waiter::{WaitTarget, wait};

pub use options::ReindexOptions;
pub use request::{
    DestIndex, DestSpec, IndexNames, MIGRATION, REDACTED, REINDEX_SELECTED, REINDEX_SELECTION,
    ReindexRequest, RemoteDescriptor, SourceIndex, SourceSpec,
};

/// Task action name of a reindex task.
pub const REINDEX_TASK_ACTION: &str = "indices:data/write/reindex";

const EMPTY_SOURCE: &str =
    "Source index must be list of actual indices. It must not be an empty list.";

/// A reindex bound to a cluster and a resolved request.
#[derive(Debug)]
pub struct Reindex {
    client: EsClient,
    request: ReindexRequest,
    options: ReindexOptions,
    remote: Option<ClusterUrl>,
}

impl Reindex {
    /// Validate `request_body` and resolve `REINDEX_SELECTION`.
    ///
    /// Local selections copy `ilo`'s current indices; later filtering of `ilo`
    /// does not affect this action. Remote selections are read from the
    /// remote cluster and narrowed by `options.remote_filters`.
    pub async fn new(
        ilo: &IndexList,
        request_body: Value,
        options: ReindexOptions,
    ) -> Result<Self, ActionError> {
        debug!(request_body = %redacted(&request_body), "REQUEST_BODY");
        let mut request = ReindexRequest::parse(&request_body)?;
        if !request.extra.is_empty() {
            let keys: Vec<&String> = request.extra.keys().collect();
            warn!(?keys, "Ignoring unrecognized request_body keys");
        }

        if request.is_migration()
            && !request.is_remote()
            && options.migration_prefix.is_empty()
            && options.migration_suffix.is_empty()
        {
            return Err(ActionError::Configuration(
                "MIGRATION can only be used locally with one or both of migration_prefix or \
                 migration_suffix."
                    .to_string(),
            ));
        }

        let mut remote_url = None;
        match &request.source.remote {
            None => {
                if request.source.index == SourceIndex::CurrentSelection {
                    request.source.index =
                        SourceIndex::Names(IndexNames::Many(ilo.indices().to_vec()));
                }
            }
            Some(remote) => {
                debug!("Remote reindex request detected");
                let host = remote.host.as_deref().ok_or_else(|| {
                    ActionError::Configuration("Missing remote \"host\"".to_string())
                })?;
                let url = verify_url_schema(host)?;

                if request.source.index == SourceIndex::CurrentSelection {
                    let selected = select_remote_indices(&url, remote, &options).await?;
                    request.source.index = SourceIndex::Names(IndexNames::Many(selected));
                }
                remote_url = Some(url);
            }
        }

        debug!(source = ?request.source.index, "Reindexing indices");
        Ok(Self {
            client: ilo.client().clone(),
            request,
            options,
            remote: remote_url,
        })
    }

    pub fn request(&self) -> &ReindexRequest {
        &self.request
    }

    pub fn options(&self) -> &ReindexOptions {
        &self.options
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn is_migration(&self) -> bool {
        self.request.is_migration()
    }

    /// The (source, dest) pairs this action dispatches, in order.
    pub fn sources(&self) -> Result<Vec<(IndexNames, String)>, ActionError> {
        let names = match &self.request.source.index {
            SourceIndex::Names(names) => names.clone(),
            SourceIndex::CurrentSelection => IndexNames::Many(Vec::new()),
        };
        let source_list = names.to_vec();
        debug!(?source_list, "source_list");
        if source_list.is_empty() || source_list == [REINDEX_SELECTED] {
            return Err(ActionError::NoIndices(
                "No source indices to reindex".to_string(),
            ));
        }

        match &self.request.dest.index {
            DestIndex::Named(dest) => Ok(vec![(names, dest.clone())]),
            DestIndex::Migration => {
                let prefix = &self.options.migration_prefix;
                let suffix = &self.options.migration_suffix;
                Ok(source_list
                    .into_iter()
                    .map(|source| {
                        let dest = format!("{prefix}{source}{suffix}");
                        (IndexNames::One(source), dest)
                    })
                    .collect())
            }
        }
    }

    /// Wire body and query parameters for one pair.
    pub fn reindex_args(&self, source: &IndexNames, dest: &str) -> (Value, ReindexParams) {
        (
            self.request.to_body(source, dest, false),
            self.options.params(),
        )
    }

    /// Human-readable description of one dispatch, passwords redacted.
    pub fn show_run_args(&self, source: &IndexNames, dest: &str) -> String {
        let params = self.options.params();
        format!(
            "request body: {} with arguments: refresh={} requests_per_second={} slices={} \
             timeout={} wait_for_active_shards={} wait_for_completion={}",
            self.request.to_body(source, dest, true),
            params.refresh,
            params.requests_per_second,
            params.slices,
            params.timeout,
            params.wait_for_active_shards,
            self.options.wait_for_completion,
        )
    }

    /// Log what would run for every pair and return the logged lines.
    pub fn do_dry_run(&self) -> Result<Vec<String>, ActionError> {
        info!("DRY-RUN MODE.  No changes will be made.");
        let pairs = self.sources().map_err(clarify_no_indices)?;
        Ok(pairs
            .iter()
            .map(|(source, dest)| {
                let line = format!("DRY-RUN: REINDEX: {}", self.show_run_args(source, dest));
                info!("{line}");
                line
            })
            .collect())
    }

    /// Dispatch every pair, waiting and verifying as configured.
    pub async fn do_action(&self) -> Result<(), ActionError> {
        match self.run_pairs().await {
            Ok(()) => Ok(()),
            Err(err @ ActionError::NoIndices(_)) => Err(clarify_no_indices(err)),
            Err(err @ ActionError::TimeoutExceeded { .. }) => Err(err),
            Err(err) => Err(report_failure(err, "reindex")),
        }
    }

    async fn run_pairs(&self) -> Result<(), ActionError> {
        for (source, dest) in self.sources()? {
            info!("Commencing reindex operation");
            debug!("REINDEX: {}", self.show_run_args(&source, &dest));

            let (body, params) = self.reindex_args(&source, &dest);
            let task_id = self.client.reindex(&body, &params).await?;
            debug!(task_id = %task_id, "TASK ID");

            if self.options.wait_for_completion {
                let target = WaitTarget::Reindex {
                    task_id: task_id.clone(),
                };
                wait(&self.client, &target, self.options.wait_budget()).await?;
                self.post_run_quick_check(&dest, &task_id).await?;
            } else {
                warn!(
                    "\"wait_for_completion\" set to {}.  Remember to check task_id \"{}\" for \
                     successful completion manually.",
                    self.options.wait_for_completion, task_id
                );
            }
        }
        Ok(())
    }

    /// Documents processed by a finished reindex task, or `-1` when the task
    /// is not a reindex or has no response yet.
    pub async fn get_processed_items(&self, task_id: &str) -> Result<i64, ActionError> {
        let status = self
            .client
            .get_task(task_id)
            .await
            .map_err(|e| ActionError::FailedExecution {
                context: format!(
                    "Unable to obtain task information for task_id \"{task_id}\". Exception {e}"
                ),
                source: Some(Box::new(e)),
            })?;

        if status.task.action != REINDEX_TASK_ACTION {
            return Ok(-1);
        }
        let total = status
            .response
            .as_ref()
            .and_then(|response| response.total)
            .unwrap_or(-1);
        debug!(task_id = %task_id, total_processed_items = total, "Reindex task response");
        Ok(total)
    }

    /// Confirm `index_name` exists (as an index or alias) after the task ran,
    /// unless the task processed nothing.
    pub async fn post_run_quick_check(
        &self,
        index_name: &str,
        task_id: &str,
    ) -> Result<(), ActionError> {
        let processed_items = self.get_processed_items(task_id).await?;
        if processed_items == 0 {
            info!(
                "No items were processed. Will not check if target index \"{index_name}\" exists"
            );
            return Ok(());
        }

        let index_exists = self.client.index_exists(index_name).await?;
        let alias_instead = self.client.alias_exists(index_name).await?;
        if index_exists || alias_instead {
            return Ok(());
        }

        error!(
            "The index described as \"{index_name}\" was not found after the reindex operation. \
             Check cluster logs for more information."
        );
        if let Some(remote) = &self.remote {
            error!(
                "Did you forget to add \"reindex.remote.whitelist: {}:{}\" to the \
                 elasticsearch.yml file on the \"dest\" node?",
                remote.host(),
                remote.port()
            );
        }
        Err(ActionError::failed(format!(
            "Reindex failed. The index or alias identified by \"{index_name}\" was not found."
        )))
    }
}

fn clarify_no_indices(err: ActionError) -> ActionError {
    match err {
        ActionError::NoIndices(_) => ActionError::NoIndices(EMPTY_SOURCE.to_string()),
        other => other,
    }
}

/// `request_body` with any remote password replaced, for logging.
fn redacted(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(password) = body.pointer_mut("/source/remote/password") {
        *password = Value::String(REDACTED.to_string());
    }
    body
}

/// Read and filter the index list of a remote cluster.
async fn select_remote_indices(
    url: &ClusterUrl,
    remote: &RemoteDescriptor,
    options: &ReindexOptions,
) -> Result<Vec<String>, ActionError> {
    debug!("Filtering indices from remote");
    debug!(
        hosts = %url,
        certificate = ?options.remote_certificate,
        client_cert = ?options.remote_client_cert,
        client_key = ?options.remote_client_key,
        request_timeout = REMOTE_METADATA_TIMEOUT_SECS,
        "Remote client args (credentials REDACTED)"
    );

    let auth = match &remote.username {
        Some(username) => AuthStrategy::Basic {
            username: username.clone(),
            password: remote.password.clone(),
        },
        None => AuthStrategy::None,
    };

    let connect = async {
        let client = EsClient::builder()
            .base_url(url.to_string())
            .auth_strategy(auth)
            .timeout(Duration::from_secs(REMOTE_METADATA_TIMEOUT_SECS))
            .ca_certs(options.remote_certificate.clone())
            .client_identity(
                options.remote_client_cert.clone(),
                options.remote_client_key.clone(),
            )
            .build()?;
        client.info().await?;
        Ok::<_, curator_client::ClientError>(client)
    };
    let client = match connect.await {
        Ok(client) => client,
        Err(err) => {
            error!(
                "Unable to establish connection to remote cluster with provided \
                 credentials/certificates/settings."
            );
            return Err(report_failure(err.into(), "reindex"));
        }
    };

    let selection = async {
        let mut rio = IndexList::new(client).await?;
        rio.iterate_filters(&options.remote_filters)?;
        if rio.empty_list_check().is_err() {
            return Err(ActionError::failed(
                "No actionable remote indices selected after applying filters.",
            ));
        }
        Ok(rio.indices().to_vec())
    };
    selection.await.map_err(|err| {
        error!("Unable to get/filter list of remote indices.");
        report_failure(err, "reindex")
    })
}
