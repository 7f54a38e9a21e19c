//! The working set of indices an action applies to.
//!
//! Responsibilities:
//! - Fetch index names plus settings, state and stats from a cluster.
//! - Narrow the working set in place by applying [`FilterSpec`]s in order.
//!
//! Does NOT handle:
//! - Acting on the selection (see `crate::actions`).
//!
//! Invariants:
//! - `indices` is sorted by name and never contains duplicates.
//! - Filters only ever remove names and read the metadata as last fetched.
//! - [`IndexList::refresh`] re-reads metadata for the current selection and
//!   drops names the cluster no longer has; it never adds names.

mod filters;

use std::collections::{BTreeMap, BTreeSet};

use curator_client::{CatIndex, EsClient, IndexSettings, IndexState};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::error::ActionError;

pub use filters::{
    AgeSource, Direction, FilterSpec, PatternKind, TimeUnit, parse_timestring, timestring_regex,
};

/// Longest comma-joined index list sent in one URL path.
const MAX_CHUNK_CHARS: usize = 3072;

/// Document and storage counts of one index, from `_cat/indices`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub docs_count: Option<u64>,
    pub size_in_bytes: Option<u64>,
}

/// Everything known about one index at construction time.
#[derive(Debug, Clone, Default)]
pub struct IndexMetadata {
    pub settings: IndexSettings,
    pub state: IndexState,
    pub stats: IndexStats,
}

impl IndexMetadata {
    /// Creation time in epoch seconds, if the settings carry it.
    pub fn creation_date_secs(&self) -> Option<i64> {
        self.settings
            .creation_date
            .and_then(|ms| i64::try_from(ms / 1000).ok())
    }

    pub fn is_closed(&self) -> bool {
        self.state == IndexState::Close
    }
}

/// A filterable, ordered selection of index names bound to a cluster.
#[derive(Debug, Clone)]
pub struct IndexList {
    client: EsClient,
    indices: Vec<String>,
    metadata: BTreeMap<String, IndexMetadata>,
}

impl IndexList {
    /// Build the list of every open and closed index on the cluster.
    pub async fn new(client: EsClient) -> Result<Self, ActionError> {
        let (settings, rows) = tokio::try_join!(client.get_settings(), client.cat_indices())?;
        let metadata = merge_metadata(settings, rows);
        debug!(count = metadata.len(), "Fetched index metadata");
        Ok(Self::from_metadata(client, metadata))
    }

    /// Re-read settings, state and stats for the current selection.
    pub async fn refresh(&mut self) -> Result<(), ActionError> {
        let (settings, rows) =
            tokio::try_join!(self.client.get_settings(), self.client.cat_indices())?;
        let mut fresh = merge_metadata(settings, rows);
        self.indices.retain(|index| {
            let present = fresh.contains_key(index);
            if !present {
                debug!(index = %index, "Removed from actionable list: no longer on the cluster");
            }
            present
        });
        self.metadata = self
            .indices
            .iter()
            .filter_map(|index| fresh.remove_entry(index))
            .collect();
        debug!(count = self.indices.len(), "Refreshed index metadata");
        Ok(())
    }

    /// Build a list from already-known metadata without touching the cluster.
    pub fn from_metadata(client: EsClient, metadata: BTreeMap<String, IndexMetadata>) -> Self {
        let indices = metadata.keys().cloned().collect();
        Self {
            client,
            indices,
            metadata,
        }
    }

    /// Handle to the cluster this list was built from.
    pub fn client(&self) -> &EsClient {
        &self.client
    }

    /// Current selection, sorted by name.
    pub fn indices(&self) -> &[String] {
        &self.indices
    }

    pub fn metadata(&self, index: &str) -> Option<&IndexMetadata> {
        self.metadata.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Fail with `NoIndices` if nothing is selected.
    pub fn empty_list_check(&self) -> Result<(), ActionError> {
        if self.indices.is_empty() {
            return Err(ActionError::NoIndices("index_list object is empty.".to_string()));
        }
        Ok(())
    }

    /// Apply `filters` in order, narrowing the selection in place.
    pub fn iterate_filters(&mut self, filters: &[FilterSpec]) -> Result<(), ActionError> {
        if filters.is_empty() {
            debug!("No filters to apply");
        }
        for filter in filters {
            let filtertype = filter.filtertype();
            debug!(filtertype, before = self.indices.len(), "Applying filter");
            self.apply(filter)?;
            debug!(filtertype, after = self.indices.len(), "Filter applied");
        }
        Ok(())
    }

    fn apply(&mut self, filter: &FilterSpec) -> Result<(), ActionError> {
        match filter {
            FilterSpec::None => {
                debug!("\"none\" filter selected. No filtering will be done.");
                Ok(())
            }
            FilterSpec::Pattern {
                kind,
                value,
                exclude,
            } => self.filter_by_pattern(*kind, value, *exclude),
            FilterSpec::Age {
                source,
                direction,
                unit,
                unit_count,
                epoch,
                timestring,
                exclude,
            } => {
                let span = unit
                    .seconds()
                    .saturating_mul(i64::try_from(*unit_count).unwrap_or(i64::MAX));
                let epoch = epoch.unwrap_or_else(|| chrono::Utc::now().timestamp());
                let point_of_reference = epoch.saturating_sub(span);
                self.filter_by_age(
                    *source,
                    *direction,
                    point_of_reference,
                    timestring.as_deref(),
                    *exclude,
                )
            }
            FilterSpec::Closed { exclude } => {
                self.retain_where("is closed", *exclude, |_, meta| meta.is_closed());
                Ok(())
            }
            FilterSpec::Empty { exclude } => {
                self.retain_where("has no documents", *exclude, |_, meta| {
                    meta.stats.docs_count == Some(0)
                });
                Ok(())
            }
            FilterSpec::Count {
                count,
                reverse,
                use_age,
                exclude,
            } => self.filter_by_count(*count, *reverse, *use_age, *exclude),
        }
    }

    /// Keep an index iff `condition(index) != exclude`.
    fn retain_where<F>(&mut self, reason: &str, exclude: bool, condition: F)
    where
        F: Fn(&str, &IndexMetadata) -> bool,
    {
        let default = IndexMetadata::default();
        let metadata = &self.metadata;
        self.indices.retain(|index| {
            let meta = metadata.get(index).unwrap_or(&default);
            let keep = condition(index, meta) != exclude;
            if !keep {
                if exclude {
                    debug!(index = %index, "Removed from actionable list: {reason}");
                } else {
                    debug!(index = %index, "Removed from actionable list: does not match: {reason}");
                }
            }
            keep
        });
    }

    fn filter_by_pattern(
        &mut self,
        kind: PatternKind,
        value: &str,
        exclude: bool,
    ) -> Result<(), ActionError> {
        let pattern = match kind {
            PatternKind::Prefix => format!("^{}.*$", regex::escape(value)),
            PatternKind::Suffix => format!("^.*{}$", regex::escape(value)),
            PatternKind::Regex => value.to_string(),
            PatternKind::Timestring => format!("^.*{}.*$", timestring_regex(value)),
        };
        let regex = compile(&pattern)?;
        let reason = format!("matches pattern \"{pattern}\"");
        self.retain_where(&reason, exclude, |index, _| regex.is_match(index));
        Ok(())
    }

    fn filter_by_age(
        &mut self,
        source: AgeSource,
        direction: Direction,
        point_of_reference: i64,
        timestring: Option<&str>,
        exclude: bool,
    ) -> Result<(), ActionError> {
        let name_regex = match source {
            AgeSource::CreationDate => None,
            AgeSource::Name => {
                let timestring = timestring.ok_or_else(|| {
                    ActionError::Configuration(
                        "age filter with source \"name\" requires a timestring".to_string(),
                    )
                })?;
                Some((compile(&timestring_regex(timestring))?, timestring))
            }
        };

        let ages: BTreeMap<String, i64> = self
            .indices
            .iter()
            .filter_map(|index| {
                let age = match &name_regex {
                    None => self.metadata.get(index).and_then(IndexMetadata::creation_date_secs),
                    Some((regex, timestring)) => regex
                        .find(index)
                        .and_then(|m| parse_timestring(m.as_str(), timestring)),
                };
                age.map(|age| (index.clone(), age))
            })
            .collect();

        self.indices.retain(|index| {
            let resolved = ages.contains_key(index);
            if !resolved {
                debug!(index = %index, "Removed from actionable list: no resolvable timestamp");
            }
            resolved
        });

        let relation = match direction {
            Direction::Older => "older than",
            Direction::Younger => "younger than",
        };
        let reason = format!("{relation} {point_of_reference}");
        self.retain_where(&reason, exclude, |index, _| {
            let age = ages.get(index).copied().unwrap_or_default();
            match direction {
                Direction::Older => age < point_of_reference,
                Direction::Younger => age > point_of_reference,
            }
        });
        Ok(())
    }

    fn filter_by_count(
        &mut self,
        count: usize,
        reverse: bool,
        use_age: bool,
        exclude: bool,
    ) -> Result<(), ActionError> {
        if use_age {
            let metadata = &self.metadata;
            self.indices.retain(|index| {
                let resolved = metadata
                    .get(index)
                    .and_then(IndexMetadata::creation_date_secs)
                    .is_some();
                if !resolved {
                    debug!(index = %index, "Removed from actionable list: no creation_date");
                }
                resolved
            });
        }

        let mut ordered = self.indices.clone();
        if use_age {
            ordered.sort_by_key(|index| {
                (
                    self.metadata
                        .get(index)
                        .and_then(IndexMetadata::creation_date_secs),
                    index.clone(),
                )
            });
        } else {
            ordered.sort();
        }
        if reverse {
            ordered.reverse();
        }

        let within: BTreeSet<String> = ordered.into_iter().take(count).collect();
        let reason = format!("is within the first {count}");
        self.retain_where(&reason, exclude, |index, _| within.contains(index));
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex, ActionError> {
    Regex::new(pattern)
        .map_err(|e| ActionError::Configuration(format!("Invalid regex \"{pattern}\": {e}")))
}

/// Join settings and `_cat/indices` rows. Names present in only one keep
/// defaulted metadata for the other half.
fn merge_metadata(
    settings: BTreeMap<String, IndexSettings>,
    rows: Vec<CatIndex>,
) -> BTreeMap<String, IndexMetadata> {
    let mut metadata: BTreeMap<String, IndexMetadata> = settings
        .into_iter()
        .map(|(name, settings)| {
            (
                name,
                IndexMetadata {
                    settings,
                    ..IndexMetadata::default()
                },
            )
        })
        .collect();

    for row in rows {
        let entry = metadata.entry(row.index).or_default();
        entry.state = row.status.unwrap_or_default();
        entry.stats = IndexStats {
            docs_count: row.docs_count,
            size_in_bytes: row.store_size,
        };
    }
    metadata
}

/// Split `indices` into groups whose comma-joined length stays below the
/// URL limit.
pub fn chunk_index_list(indices: &[String]) -> Vec<Vec<String>> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut length = 0;

    for index in indices {
        let added = index.len() + usize::from(!current.is_empty());
        if !current.is_empty() && length + added > MAX_CHUNK_CHARS {
            chunks.push(std::mem::take(&mut current));
            length = 0;
        }
        length += index.len() + usize::from(!current.is_empty());
        current.push(index.clone());
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Summary line per index for display: name, state, docs and creation date.
pub fn describe(list: &IndexList) -> Vec<Value> {
    list.indices()
        .iter()
        .map(|index| {
            let meta = list.metadata(index).cloned().unwrap_or_default();
            serde_json::json!({
                "index": index,
                "state": meta.state.to_string(),
                "docs_count": meta.stats.docs_count,
                "size_in_bytes": meta.stats.size_in_bytes,
                "creation_date": meta.settings.creation_date,
            })
        })
        .collect()
}
