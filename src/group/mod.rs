//! Grouping engine
//!
//! Buckets the entries of a collection by a key extracted from each entry.
//! Every grouping call is synchronous and keeps its state local: entries
//! are only borrowed, and the result map is fresh per call.
//!
//! # Examples
//!
//! ```
//! use bucketry::group::group_by;
//! use serde_json::json;
//!
//! let entries = vec![
//!     json!({"Env": {"VIRTUAL_HOST": "a.example"}}),
//!     json!({"Env": {"VIRTUAL_HOST": "b.example"}}),
//!     json!({"Env": {"VIRTUAL_HOST": "a.example"}}),
//!     json!({"Env": {}}),
//! ];
//!
//! let groups = group_by(&entries, "Env.VIRTUAL_HOST").unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups["a.example"].len(), 2);
//! assert_eq!(groups["b.example"].len(), 1);
//! ```

pub mod policy;

pub use policy::AggregationPolicy;

use crate::entries::Entries;
use crate::error::Result;
use crate::extract::{label_key, path_key, HasLabels, KeyLookup, PathLookup};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Buckets keyed by group key, each holding entries in collection order
///
/// A key is only present when its bucket is non-empty.
pub type GroupingResult<'a, E> = HashMap<String, Vec<&'a E>>;

/// Names reported in errors and used for template functions
pub mod operation {
    pub const GROUP_BY: &str = "groupBy";
    pub const GROUP_BY_KEYS: &str = "groupByKeys";
    pub const GROUP_BY_LABEL: &str = "groupByLabel";
    pub const GROUP_BY_MULTI: &str = "groupByMulti";
    pub const GROUP_BY_MULTI_KEY_VALUE_PAIRS: &str = "groupByMultiKeyValuePairs";
    pub const SPLIT_KEY_VALUE_PAIRS: &str = "splitKeyValuePairs";
}

/// Group `entries` using `extract` to find each entry's key and `policy` to
/// place it
///
/// Entries whose key is absent are skipped. The first extractor error
/// aborts the call and no partial result is returned.
pub fn group_entries<'a, S, X>(
    operation: &str,
    entries: &'a S,
    extract: X,
    policy: &AggregationPolicy,
) -> Result<GroupingResult<'a, S::Entry>>
where
    S: Entries + ?Sized,
    X: Fn(&S::Entry) -> Result<KeyLookup>,
{
    let count = entries.entry_count();
    debug!(operation, entries = count, ?policy, "Grouping entries");

    let mut groups = GroupingResult::new();
    for index in 0..count {
        let Some(entry) = entries.entry_at(index) else {
            break;
        };
        match extract(entry)? {
            KeyLookup::Found(key) => policy.assign(&mut groups, &key, entry),
            KeyLookup::Absent => trace!(operation, index, "Entry has no key, skipping"),
        }
    }

    debug!(operation, buckets = groups.len(), "Grouping complete");
    Ok(groups)
}

/// Group entries by the string found at the dotted `path`
pub fn group_by<'a, S>(entries: &'a S, path: &str) -> Result<GroupingResult<'a, S::Entry>>
where
    S: Entries + ?Sized,
    S::Entry: PathLookup,
{
    group_entries(
        operation::GROUP_BY,
        entries,
        path_key(operation::GROUP_BY, path),
        &AggregationPolicy::Single,
    )
}

/// Distinct keys `group_by` would produce, in no particular order
pub fn group_by_keys<S>(entries: &S, path: &str) -> Result<Vec<String>>
where
    S: Entries + ?Sized,
    S::Entry: PathLookup,
{
    let groups = group_entries(
        operation::GROUP_BY_KEYS,
        entries,
        path_key(operation::GROUP_BY_KEYS, path),
        &AggregationPolicy::Single,
    )?;
    Ok(groups.into_keys().collect())
}

/// Group entries by the value of `label` in their label map
///
/// Fails with a type mismatch on the first entry that carries no label map.
pub fn group_by_label<'a, S>(entries: &'a S, label: &str) -> Result<GroupingResult<'a, S::Entry>>
where
    S: Entries + ?Sized,
    S::Entry: HasLabels,
{
    group_entries(
        operation::GROUP_BY_LABEL,
        entries,
        label_key(operation::GROUP_BY_LABEL, label),
        &AggregationPolicy::Single,
    )
}

/// Group entries under every `separator`-delimited piece of the string at
/// `path`
///
/// Repeated pieces add the entry to the same bucket more than once.
pub fn group_by_multi<'a, S>(
    entries: &'a S,
    path: &str,
    separator: &str,
) -> Result<GroupingResult<'a, S::Entry>>
where
    S: Entries + ?Sized,
    S::Entry: PathLookup,
{
    group_entries(
        operation::GROUP_BY_MULTI,
        entries,
        path_key(operation::GROUP_BY_MULTI, path),
        &AggregationPolicy::multi(separator),
    )
}

/// Group entries under every key of the key=value list found at `path`
///
/// See [`crate::kvp::split_key_value_pairs`] for the parsing rules.
pub fn group_by_multi_key_value_pairs<'a, S>(
    entries: &'a S,
    path: &str,
    list_sep: &str,
    kvp_sep: &str,
    default_key: Option<&str>,
) -> Result<GroupingResult<'a, S::Entry>>
where
    S: Entries + ?Sized,
    S::Entry: PathLookup,
{
    group_entries(
        operation::GROUP_BY_MULTI_KEY_VALUE_PAIRS,
        entries,
        path_key(operation::GROUP_BY_MULTI_KEY_VALUE_PAIRS, path),
        &AggregationPolicy::key_value_pairs(list_sep, kvp_sep, default_key),
    )
}
