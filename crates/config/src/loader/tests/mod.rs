//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests touching the process environment are `#[serial]` and use `temp_env`
//!   so variables are restored afterwards.
//! - Config files live in `tempfile` directories cleaned up automatically.

mod env_tests;

/// Every variable the loader reads, unset.
pub(super) fn cleared_env() -> Vec<(&'static str, Option<&'static str>)> {
    [
        "CURATOR_HOSTS",
        "CURATOR_USERNAME",
        "CURATOR_PASSWORD",
        "CURATOR_API_KEY",
        "CURATOR_TIMEOUT",
        "CURATOR_MAX_RETRIES",
        "CURATOR_SKIP_VERIFY",
        "CURATOR_CA_CERTS",
    ]
    .into_iter()
    .map(|key| (key, None))
    .collect()
}
