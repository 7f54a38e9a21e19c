//! Replicas action: set `number_of_replicas` on the selection.
//!
//! Responsibilities:
//! - Update the replica count of every open index in the selection.
//! - Optionally wait for the cluster to return to green health.
//!
//! Does NOT handle:
//! - Closed indices (they are skipped and logged).
//!
//! Invariants:
//! - Open/closed state is re-read right before updating, so an index closed
//!   after selection is skipped.

use curator_config::constants::{DEFAULT_WAIT_INTERVAL_SECS, WAIT_FOREVER};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{ActionError, report_failure};
use crate::index_list::{IndexList, chunk_index_list};
use crate::waiter::{WaitBudget, WaitTarget, wait};

/// Options block of a replicas action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplicasOptions {
    pub count: Option<u32>,
    pub wait_for_completion: bool,
    pub wait_interval: u64,
    /// `-1` waits indefinitely.
    pub max_wait: i64,
}

impl Default for ReplicasOptions {
    fn default() -> Self {
        Self {
            count: None,
            wait_for_completion: false,
            wait_interval: DEFAULT_WAIT_INTERVAL_SECS,
            max_wait: WAIT_FOREVER,
        }
    }
}

const FOREIGN_KEYS: [&str; 3] = ["disable_action", "continue_if_exception", "ignore_empty_list"];

impl ReplicasOptions {
    /// Read the typed options from an action's options block.
    pub fn from_action_options(options: &Value) -> Result<Self, ActionError> {
        let mut options = options.clone();
        if let Value::Object(map) = &mut options {
            for key in FOREIGN_KEYS {
                map.remove(key);
            }
        }
        serde_json::from_value(options)
            .map_err(|e| ActionError::Configuration(format!("Invalid replicas options: {e}")))
    }
}

/// A replica-count change bound to a selection.
#[derive(Debug)]
pub struct Replicas {
    index_list: IndexList,
    count: u32,
    wait_for_completion: bool,
    budget: WaitBudget,
}

impl Replicas {
    pub fn new(ilo: &IndexList, options: ReplicasOptions) -> Result<Self, ActionError> {
        let count = options.count.ok_or_else(|| {
            ActionError::Configuration("Missing value for \"count\"".to_string())
        })?;
        Ok(Self {
            index_list: ilo.clone(),
            count,
            wait_for_completion: options.wait_for_completion,
            budget: WaitBudget::new(options.wait_interval, options.max_wait),
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn index_list(&self) -> &IndexList {
        &self.index_list
    }

    /// Log what would change and return the logged lines.
    pub fn do_dry_run(&self) -> Result<Vec<String>, ActionError> {
        info!("DRY-RUN MODE.  No changes will be made.");
        self.index_list.empty_list_check()?;
        Ok(self
            .index_list
            .indices()
            .iter()
            .map(|index| {
                let closed = self
                    .index_list
                    .metadata(index)
                    .is_some_and(|meta| meta.is_closed());
                let marker = if closed { " (CLOSED)" } else { "" };
                let line = format!(
                    "DRY-RUN: replicas: {index}{marker} with arguments: count={}",
                    self.count
                );
                info!("{line}");
                line
            })
            .collect())
    }

    /// Apply the replica count, then wait for green health if configured.
    pub async fn do_action(&self) -> Result<(), ActionError> {
        self.index_list.empty_list_check()?;
        match self.apply().await {
            Ok(()) => Ok(()),
            Err(err @ ActionError::TimeoutExceeded { .. }) => Err(err),
            Err(err) => Err(report_failure(err, "replicas")),
        }
    }

    async fn apply(&self) -> Result<(), ActionError> {
        let mut current = self.index_list.clone();
        current.refresh().await?;
        let indices = open_indices(&current);
        if indices.is_empty() {
            info!("All selected indices are closed. Nothing to update.");
            return Ok(());
        }

        info!(
            count = self.count,
            indices = indices.len(),
            "Setting the replica count"
        );
        let settings = json!({ "index": { "number_of_replicas": self.count } });
        let client = self.index_list.client();
        for chunk in chunk_index_list(&indices) {
            debug!(chunk = ?chunk, "Updating replicas");
            client.put_settings(&chunk, &settings).await?;
        }

        if self.wait_for_completion && self.count > 0 {
            wait(client, &WaitTarget::Replicas, self.budget).await?;
        }
        Ok(())
    }
}

/// Open indices of `list`. Closed ones are logged and skipped.
fn open_indices(list: &IndexList) -> Vec<String> {
    list.indices()
        .iter()
        .filter(|index| {
            let closed = list.metadata(index).is_some_and(|meta| meta.is_closed());
            if closed {
                info!(index = %index, "Skipping closed index");
            }
            !closed
        })
        .cloned()
        .collect()
}
