//! REST API endpoint implementations.
//!
//! Each function takes the shared `reqwest::Client`, the normalized base URL,
//! the authentication strategy and the retry budget, so that the same calls
//! serve both the primary cluster client and a remote-source client.

mod cluster;
mod indices;
mod reindex;
mod request;
mod tasks;
pub mod url_encoding;

pub use cluster::{cluster_health, info};
pub use indices::{alias_exists, cat_indices, get_settings, index_exists, put_settings};
pub use reindex::reindex;
pub use request::{send_non_idempotent_request, send_request_with_retry};
pub use tasks::get_task;
pub use url_encoding::{encode_index_list, encode_path_segment};
