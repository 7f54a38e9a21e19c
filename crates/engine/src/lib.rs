//! Index selection and action orchestration.
//!
//! - [`index_list`]: the filterable working set of indices an action applies to.
//! - [`waiter`]: bounded polling of asynchronous tasks and cluster health.
//! - [`actions`]: the reindex and replicas actions built on top of both.
//! - [`error`]: the action error taxonomy and the single failure-reporting path.

pub mod actions;
pub mod error;
pub mod index_list;
pub mod waiter;

pub use actions::reindex::{Reindex, ReindexOptions, ReindexRequest};
pub use actions::replicas::{Replicas, ReplicasOptions};
pub use error::{ActionError, ErrorKind, report_failure};
pub use index_list::{FilterSpec, IndexList, IndexMetadata, IndexStats, describe};
pub use waiter::{WaitBudget, WaitTarget, wait};
