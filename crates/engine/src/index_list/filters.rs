//! Filter definitions for [`IndexList`](super::IndexList).
//!
//! Responsibilities:
//! - Model each `filtertype` mapping as a typed [`FilterSpec`].
//! - Validate raw filter lists against the built-in filter schema before
//!   deserializing them.
//! - Translate strftime-style timestrings into matching regexes and parse
//!   timestamps out of index names.
//!
//! Does NOT handle:
//! - Applying filters to a working set (see the parent module).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use curator_config::{Schema, schemas, validate};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ActionError;

fn default_true() -> bool {
    true
}

/// How a `pattern` filter interprets its `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Prefix,
    Suffix,
    Regex,
    Timestring,
}

/// Where an `age` filter reads an index's timestamp from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeSource {
    #[default]
    CreationDate,
    Name,
}

/// Which side of the point of reference an `age` filter matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Older,
    Younger,
}

/// Unit of an `age` filter's `unit_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Length of one unit in seconds. Months are 30 days and years 365 days.
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
            TimeUnit::Weeks => 7 * 86_400,
            TimeUnit::Months => 30 * 86_400,
            TimeUnit::Years => 365 * 86_400,
        }
    }
}

/// One entry of a filter list.
///
/// Each filter computes a per-index condition; an index survives the filter
/// iff `condition != exclude`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "filtertype", rename_all = "lowercase")]
pub enum FilterSpec {
    /// Keeps everything.
    None,
    Pattern {
        kind: PatternKind,
        value: String,
        #[serde(default)]
        exclude: bool,
    },
    Age {
        #[serde(default)]
        source: AgeSource,
        direction: Direction,
        unit: TimeUnit,
        unit_count: u64,
        /// Point in time (epoch seconds) ages are measured from. Defaults to now.
        #[serde(default)]
        epoch: Option<i64>,
        #[serde(default)]
        timestring: Option<String>,
        #[serde(default)]
        exclude: bool,
    },
    Closed {
        #[serde(default = "default_true")]
        exclude: bool,
    },
    Empty {
        #[serde(default)]
        exclude: bool,
    },
    Count {
        count: usize,
        #[serde(default = "default_true")]
        reverse: bool,
        #[serde(default)]
        use_age: bool,
        #[serde(default = "default_true")]
        exclude: bool,
    },
}

impl FilterSpec {
    /// Validate a raw filter list and deserialize it.
    ///
    /// `location` only feeds the error message (e.g. `actions.1`).
    pub fn parse_list(filters: &Value, location: &str) -> Result<Vec<FilterSpec>, ActionError> {
        let schema = Schema::compile(schemas::filters())?;
        let filters = validate(filters.clone(), &schema, "filters", location)?;
        serde_json::from_value(filters)
            .map_err(|e| ActionError::Configuration(format!("Invalid filters at {location}: {e}")))
    }

    /// The `filtertype` name, for log lines.
    pub fn filtertype(&self) -> &'static str {
        match self {
            FilterSpec::None => "none",
            FilterSpec::Pattern { .. } => "pattern",
            FilterSpec::Age { .. } => "age",
            FilterSpec::Closed { .. } => "closed",
            FilterSpec::Empty { .. } => "empty",
            FilterSpec::Count { .. } => "count",
        }
    }
}

/// Regex fragment for one strftime token, if it is a supported digit token.
fn token_regex(token: char) -> Option<&'static str> {
    match token {
        'Y' => Some(r"\d{4}"),
        'y' | 'm' | 'd' | 'H' | 'M' | 'S' | 'W' | 'U' => Some(r"\d{2}"),
        'j' => Some(r"\d{3}"),
        _ => None,
    }
}

/// Convert a strftime-style timestring (e.g. `%Y.%m.%d`) into a regex that
/// matches it. Literal characters are escaped.
pub fn timestring_regex(timestring: &str) -> String {
    let mut pattern = String::new();
    let mut chars = timestring.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%'
            && let Some(fragment) = chars.peek().copied().and_then(token_regex)
        {
            chars.next();
            pattern.push_str(fragment);
            continue;
        }
        pattern.push_str(&regex::escape(&c.to_string()));
    }
    pattern
}

/// Parse `text` (already matched by [`timestring_regex`]) into epoch seconds.
///
/// Missing day/month components default to the first, missing minutes to
/// zero. Week-number formats resolve to the Monday of that week.
pub fn parse_timestring(text: &str, timestring: &str) -> Option<i64> {
    let mut text = text.to_string();
    let mut format = timestring.to_string();

    if format.contains("%W") || format.contains("%U") {
        format.push_str(" %u");
        text.push_str(" 1");
    } else if !format.contains("%j") {
        if !format.contains("%m") {
            format.push_str(" %m");
            text.push_str(" 01");
        }
        if !format.contains("%d") {
            format.push_str(" %d");
            text.push_str(" 01");
        }
    }
    if format.contains("%H") && !format.contains("%M") {
        format.push_str(" %M");
        text.push_str(" 00");
    }

    NaiveDateTime::parse_from_str(&text, &format)
        .or_else(|_| NaiveDate::parse_from_str(&text, &format).map(|d| d.and_time(NaiveTime::MIN)))
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}
