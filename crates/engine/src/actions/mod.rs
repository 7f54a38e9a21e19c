//! Actions that operate on an [`IndexList`](crate::index_list::IndexList).
//!
//! Each action is constructed from a filtered selection plus its options,
//! fails fast on configuration errors, and exposes `do_dry_run` and
//! `do_action`.

pub mod reindex;
pub mod replicas;
