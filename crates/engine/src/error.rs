//! Error taxonomy for actions.
//!
//! Responsibilities:
//! - Define [`ActionError`], the one error type every action operation returns.
//! - Classify errors into the four user-facing kinds ([`ErrorKind`]).
//! - Provide [`report_failure`], the single mapping from lower-layer errors to
//!   `FailedExecution`.
//!
//! Does NOT handle:
//! - Exit codes (the CLI maps [`ErrorKind`] to process exit codes).
//!
//! Invariants:
//! - `report_failure` never re-wraps an error that already is `FailedExecution`.
//! - The original cause is kept as the error source, never flattened away.

use std::error::Error as StdError;
use std::fmt;

use curator_client::ClientError;
use curator_config::ConfigError;
use thiserror::Error;
use tracing::error;

/// Boxed cause carried by [`ActionError::FailedExecution`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// The four failure kinds an action can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    NoIndices,
    FailedExecution,
    TimeoutExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::NoIndices => "NoIndices",
            ErrorKind::FailedExecution => "FailedExecution",
            ErrorKind::TimeoutExceeded => "TimeoutExceeded",
        };
        f.write_str(name)
    }
}

/// Errors returned by index selection, waiting and actions.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The action was configured in a way that can never succeed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A configuration value failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// There is nothing to act on.
    #[error("{0}")]
    NoIndices(String),

    /// The action started but could not be completed.
    #[error("{context}")]
    FailedExecution {
        context: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// Waiting for completion ran out of budget.
    #[error("Action \"{action}\" failed to complete in the max_wait period of {max_wait} seconds")]
    TimeoutExceeded { action: String, max_wait: u64 },

    /// A cluster call failed and has not been classified yet.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ActionError {
    /// A `FailedExecution` with no underlying cause.
    pub fn failed(context: impl Into<String>) -> Self {
        ActionError::FailedExecution {
            context: context.into(),
            source: None,
        }
    }

    /// The user-facing kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Configuration(_) | ActionError::Config(_) => ErrorKind::Configuration,
            ActionError::NoIndices(_) => ErrorKind::NoIndices,
            ActionError::FailedExecution { .. } | ActionError::Client(_) => {
                ErrorKind::FailedExecution
            }
            ActionError::TimeoutExceeded { .. } => ErrorKind::TimeoutExceeded,
        }
    }

    /// Whether the root cause is a failure to reach the cluster at all.
    pub fn is_connection_error(&self) -> bool {
        match self {
            ActionError::Client(err) => err.is_connection_error(),
            ActionError::FailedExecution {
                source: Some(cause),
                ..
            } => {
                cause
                    .downcast_ref::<ActionError>()
                    .is_some_and(ActionError::is_connection_error)
                    || cause
                        .downcast_ref::<ClientError>()
                        .is_some_and(ClientError::is_connection_error)
            }
            _ => false,
        }
    }
}

/// Map any error into `FailedExecution`, logging it once.
///
/// `context` names what was being attempted. An error that already is
/// `FailedExecution` is returned unchanged.
pub fn report_failure(err: ActionError, context: &str) -> ActionError {
    if let ActionError::FailedExecution { .. } = err {
        return err;
    }

    let kind = match &err {
        ActionError::Client(_) => "ClientError",
        ActionError::Config(_) => "ConfigError",
        _ => "ActionError",
    };
    error!(error = %err, kind, "Failed to complete action: {context}");

    ActionError::FailedExecution {
        context: format!("Failed to complete action: {context}. {kind}: {err}"),
        source: Some(Box::new(err)),
    }
}
