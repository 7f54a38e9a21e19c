//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ActionError`, `ConfigError` and `ClientError` to those codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Connection failures map to 3 no matter which layer reports them.
//! - The outermost recognised error in an anyhow chain decides the code.

use curator_client::ClientError;
use curator_config::ConfigError;
use curator_engine::{ActionError, ErrorKind};

/// Structured exit codes for curator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every enabled action completed (or was skipped as configured).
    Success = 0,

    /// General error, including failed executions.
    GeneralError = 1,

    /// Invalid configuration, action file or options.
    ConfigurationError = 2,

    /// The cluster could not be reached.
    ConnectionError = 3,

    /// An action had nothing to work on and `ignore_empty_list` was not set.
    NoIndices = 4,

    /// A wait exceeded its `max_wait`.
    TimeoutExceeded = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        if err.is_connection_error() {
            ExitCode::ConnectionError
        } else {
            ExitCode::GeneralError
        }
    }
}

impl From<&ActionError> for ExitCode {
    fn from(err: &ActionError) -> Self {
        if err.is_connection_error() {
            return ExitCode::ConnectionError;
        }
        match err.kind() {
            ErrorKind::Configuration => ExitCode::ConfigurationError,
            ErrorKind::NoIndices => ExitCode::NoIndices,
            ErrorKind::FailedExecution => ExitCode::GeneralError,
            ErrorKind::TimeoutExceeded => ExitCode::TimeoutExceeded,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<ActionError>() {
                return ExitCode::from(err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigurationError;
            }
            if let Some(err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(err);
            }
        }
        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::ConfigurationError.as_i32(), 2);
        assert_eq!(ExitCode::ConnectionError.as_i32(), 3);
        assert_eq!(ExitCode::NoIndices.as_i32(), 4);
        assert_eq!(ExitCode::TimeoutExceeded.as_i32(), 5);
    }

    #[test]
    fn test_action_error_kinds() {
        let cases = [
            (
                ActionError::Configuration("bad".to_string()),
                ExitCode::ConfigurationError,
            ),
            (
                ActionError::NoIndices("empty".to_string()),
                ExitCode::NoIndices,
            ),
            (ActionError::failed("boom"), ExitCode::GeneralError),
            (
                ActionError::TimeoutExceeded {
                    action: "reindex".to_string(),
                    max_wait: 5,
                },
                ExitCode::TimeoutExceeded,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ExitCode::from(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_exit_code_survives_context() {
        let err = anyhow::Error::new(ActionError::NoIndices("empty".to_string()))
            .context("Action ID: 1");
        assert_eq!(err.exit_code(), ExitCode::NoIndices);

        let err: anyhow::Result<()> = Err(ConfigError::MissingHosts).context("loading");
        assert_eq!(err.unwrap_err().exit_code(), ExitCode::ConfigurationError);
    }

    #[test]
    fn test_exhausted_retries_are_general_errors() {
        let err = anyhow::Error::new(curator_engine::report_failure(
            ActionError::Client(ClientError::MaxRetriesExceeded(4)),
            "replicas",
        ))
        .context("Action ID: 1");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }

    #[test]
    fn test_unknown_errors_are_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
