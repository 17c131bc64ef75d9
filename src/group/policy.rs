//! Aggregation policies
//!
//! A policy turns one extracted key into one or more bucket assignments.

use super::GroupingResult;
use crate::kvp::{split_key_value_pairs, split_list};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// The key itself names the bucket
    #[default]
    Single,
    /// The key is split on `separator`; the entry joins every piece's bucket
    ///
    /// Pieces are neither trimmed nor deduplicated, so a key such as
    /// `"a,b,a"` puts the entry into bucket `a` twice.
    Multi { separator: String },
    /// The key is parsed as a key=value list; the entry joins one bucket per
    /// distinct parsed key
    KeyValuePairs {
        list_separator: String,
        pair_separator: String,
        #[serde(default)]
        default_key: Option<String>,
    },
}

impl AggregationPolicy {
    pub fn multi(separator: impl Into<String>) -> Self {
        Self::Multi {
            separator: separator.into(),
        }
    }

    pub fn key_value_pairs(
        list_separator: impl Into<String>,
        pair_separator: impl Into<String>,
        default_key: Option<&str>,
    ) -> Self {
        Self::KeyValuePairs {
            list_separator: list_separator.into(),
            pair_separator: pair_separator.into(),
            default_key: default_key.map(str::to_string),
        }
    }

    /// Place `entry` into the buckets derived from `key`
    pub fn assign<'a, E>(&self, groups: &mut GroupingResult<'a, E>, key: &str, entry: &'a E) {
        match self {
            Self::Single => push(groups, key, entry),
            Self::Multi { separator } => {
                for piece in split_list(key, separator) {
                    push(groups, piece, entry);
                }
            }
            Self::KeyValuePairs {
                list_separator,
                pair_separator,
                default_key,
            } => {
                let pairs = split_key_value_pairs(
                    key,
                    list_separator,
                    pair_separator,
                    default_key.as_deref(),
                );
                for pair_key in pairs.keys() {
                    push(groups, pair_key, entry);
                }
            }
        }
    }
}

fn push<'a, E>(groups: &mut GroupingResult<'a, E>, key: &str, entry: &'a E) {
    groups.entry(key.to_string()).or_default().push(entry);
}
