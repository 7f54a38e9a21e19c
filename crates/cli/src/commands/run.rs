//! `run` command: execute an action file.
//!
//! Responsibilities:
//! - Run the actions of an action file in ascending id order.
//! - Apply `disable_action`, `ignore_empty_list` and `continue_if_exception`.
//!
//! Does NOT handle:
//! - Action semantics (see `curator_engine`).
//!
//! Invariants:
//! - Every action gets a freshly built `IndexList`; filters of one action
//!   never leak into the next.
//! - The first failure that is not skipped ends the run.

use std::path::Path;

use anyhow::{Context, Result};
use curator_client::EsClient;
use curator_config::{ActionDefinition, ActionFile, ActionKind, Config};
use curator_engine::{
    ActionError, ErrorKind, FilterSpec, IndexList, Reindex, ReindexOptions, Replicas,
    ReplicasOptions,
};
use tracing::{Instrument, info, info_span, warn};

/// What happened to one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Completed,
    Disabled,
    SkippedEmpty,
    SkippedFailure,
}

pub async fn run(config: &Config, action_file: &Path, dry_run: bool) -> Result<()> {
    let file = ActionFile::load(action_file)
        .with_context(|| format!("Unable to load action file {}", action_file.display()))?;
    info!(actions = file.actions.len(), "Job starting");
    if dry_run {
        info!("DRY-RUN MODE.  No changes will be made.");
    }

    let client = super::connect(config).await?;

    for action in &file.actions {
        let span = info_span!("action", id = action.id, action = %action.action);
        run_one(&client, action, dry_run).instrument(span).await?;
    }

    info!("Job completed.");
    Ok(())
}

/// Run one action and apply its skip rules.
pub(crate) async fn run_one(
    client: &EsClient,
    action: &ActionDefinition,
    dry_run: bool,
) -> Result<Outcome> {
    if action.common.disable_action {
        info!(
            "Action ID: {}: \"{}\" not performed because \"disable_action\" is set to True",
            action.id, action.action
        );
        return Ok(Outcome::Disabled);
    }

    info!("Preparing Action ID: {}, \"{}\"", action.id, action.action);
    if let Some(description) = &action.description {
        info!("Description: {description}");
    }

    match execute(client, action, dry_run).await {
        Ok(()) => {
            info!("Action ID: {}, \"{}\" completed.", action.id, action.action);
            Ok(Outcome::Completed)
        }
        Err(err) if err.kind() == ErrorKind::NoIndices && action.common.ignore_empty_list => {
            info!(
                "Skipping action \"{}\" due to empty list: {err}",
                action.action
            );
            Ok(Outcome::SkippedEmpty)
        }
        Err(err) if err.kind() == ErrorKind::NoIndices => Err(anyhow::Error::new(err).context(
            format!(
                "Unable to complete action \"{}\".  No actionable items in list",
                action.action
            ),
        )),
        Err(err) if action.common.continue_if_exception => {
            warn!(
                "Failed to complete action: {}.  {}: {err}",
                action.action,
                err.kind()
            );
            info!("\"continue_if_exception\" is set to True.  Proceeding to next action.");
            Ok(Outcome::SkippedFailure)
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!(
            "Action ID: {}, \"{}\" failed",
            action.id, action.action
        ))),
    }
}

async fn execute(
    client: &EsClient,
    action: &ActionDefinition,
    dry_run: bool,
) -> Result<(), ActionError> {
    let filters = FilterSpec::parse_list(&action.filters, &action.location())?;
    let mut ilo = IndexList::new(client.clone()).await?;
    ilo.iterate_filters(&filters)?;

    match action.action {
        ActionKind::Reindex => {
            let (request_body, options) = ReindexOptions::from_action_options(&action.options)?;
            let reindex = Reindex::new(&ilo, request_body, options).await?;
            if dry_run {
                reindex.do_dry_run()?;
            } else {
                reindex.do_action().await?;
            }
        }
        ActionKind::Replicas => {
            let options = ReplicasOptions::from_action_options(&action.options)?;
            let replicas = Replicas::new(&ilo, options)?;
            if dry_run {
                replicas.do_dry_run()?;
            } else {
                replicas.do_action().await?;
            }
        }
    }
    Ok(())
}
