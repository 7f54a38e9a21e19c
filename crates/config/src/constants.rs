//! Centralized constants for the curator workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default cluster URL used when nothing else is configured.
pub const DEFAULT_HOSTS: &str = "http://127.0.0.1:9200";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed value for max_retries.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Request timeout used for the metadata connection to a remote reindex source.
///
/// Independent of the reindex `timeout` option, which only governs the
/// reindex request itself.
pub const REMOTE_METADATA_TIMEOUT_SECS: u64 = 180;

// =============================================================================
// Action Defaults
// =============================================================================

/// Default seconds between task status checks.
pub const DEFAULT_WAIT_INTERVAL_SECS: u64 = 9;

/// `max_wait` value meaning "wait indefinitely".
pub const WAIT_FOREVER: i64 = -1;

/// Default per-bulk-request timeout for reindex, in seconds.
pub const DEFAULT_REINDEX_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// Files & Environment
// =============================================================================

/// Directory under the user's home holding the default client config.
pub const CONFIG_DIR_NAME: &str = ".curator";

/// File name of the default client config.
pub const CONFIG_FILE_NAME: &str = "curator.yml";

/// Default log level when neither the config file nor the CLI sets one.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
