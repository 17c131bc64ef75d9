//! Declarative grouping specs
//!
//! A [`GroupSpec`] names where the key comes from (a dotted path or a label)
//! and which [`AggregationPolicy`] places entries. Specs are loaded from YAML
//! or TOML files:
//!
//! ```yaml
//! path: Env.VIRTUAL_HOST
//! policy:
//!   kind: multi
//!   separator: ","
//! ```

pub mod loader;

pub use loader::{load_group_spec, parse_group_spec, SpecFormat};

use crate::entries::Entries;
use crate::error::{ErrorCode, GroupingError, Result};
use crate::extract::{label_key, path_key, HasLabels, PathLookup};
use crate::group::{group_entries, operation, AggregationPolicy, GroupingResult};
use serde::{Deserialize, Serialize};

/// Where a grouping key is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource<'a> {
    Path(&'a str),
    Label(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub policy: AggregationPolicy,
}

impl GroupSpec {
    pub fn by_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn by_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Key source named by this spec
    ///
    /// Exactly one of `path` and `label` must be set and non-empty.
    pub fn source(&self) -> Result<KeySource<'_>> {
        match (self.path.as_deref(), self.label.as_deref()) {
            (Some(path), None) if !path.is_empty() => Ok(KeySource::Path(path)),
            (None, Some(label)) if !label.is_empty() => Ok(KeySource::Label(label)),
            (Some(_), Some(_)) => Err(GroupingError::invalid_spec(
                ErrorCode::SPEC_AMBIGUOUS_SOURCE,
                "set either 'path' or 'label', not both",
            )),
            (None, None) => Err(GroupingError::invalid_spec(
                ErrorCode::SPEC_AMBIGUOUS_SOURCE,
                "one of 'path' or 'label' is required",
            )),
            _ => Err(GroupingError::invalid_spec(
                ErrorCode::SPEC_EMPTY_SOURCE,
                "'path' and 'label' must not be empty",
            )),
        }
    }

    /// Check the spec before any entries are grouped
    pub fn validate(&self) -> Result<()> {
        self.source()?;
        match &self.policy {
            AggregationPolicy::Single => Ok(()),
            AggregationPolicy::Multi { separator } if separator.is_empty() => {
                Err(GroupingError::invalid_spec(
                    ErrorCode::SPEC_EMPTY_SEPARATOR,
                    "'separator' must not be empty",
                ))
            }
            AggregationPolicy::KeyValuePairs {
                list_separator,
                pair_separator,
                ..
            } if list_separator.is_empty() || pair_separator.is_empty() => {
                Err(GroupingError::invalid_spec(
                    ErrorCode::SPEC_EMPTY_SEPARATOR,
                    "'list_separator' and 'pair_separator' must not be empty",
                ))
            }
            _ => Ok(()),
        }
    }

    /// Operation name reported for this spec
    pub fn operation_name(&self) -> &'static str {
        match (&self.policy, self.label.is_some()) {
            (_, true) => operation::GROUP_BY_LABEL,
            (AggregationPolicy::Single, false) => operation::GROUP_BY,
            (AggregationPolicy::Multi { .. }, false) => operation::GROUP_BY_MULTI,
            (AggregationPolicy::KeyValuePairs { .. }, false) => {
                operation::GROUP_BY_MULTI_KEY_VALUE_PAIRS
            }
        }
    }

    /// Group `entries` as described by this spec
    ///
    /// A label source may be combined with any policy.
    pub fn apply<'a, S>(&self, entries: &'a S) -> Result<GroupingResult<'a, S::Entry>>
    where
        S: Entries + ?Sized,
        S::Entry: PathLookup + HasLabels,
    {
        self.validate()?;
        let operation = self.operation_name();
        match self.source()? {
            KeySource::Path(path) => {
                group_entries(operation, entries, path_key(operation, path), &self.policy)
            }
            KeySource::Label(label) => {
                group_entries(operation, entries, label_key(operation, label), &self.policy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::RuntimeContainer;
    use serde_json::json;

    #[test]
    fn test_source_requires_exactly_one() {
        assert_eq!(
            GroupSpec::by_path("Env.HOST").source().unwrap(),
            KeySource::Path("Env.HOST")
        );
        assert_eq!(
            GroupSpec::by_label("tier").source().unwrap(),
            KeySource::Label("tier")
        );

        let err = GroupSpec::default().source().unwrap_err();
        assert_eq!(err.code(), ErrorCode::SPEC_AMBIGUOUS_SOURCE);

        let both = GroupSpec {
            path: Some("a".into()),
            label: Some("b".into()),
            ..GroupSpec::default()
        };
        assert_eq!(
            both.source().unwrap_err().code(),
            ErrorCode::SPEC_AMBIGUOUS_SOURCE
        );

        let empty = GroupSpec::by_path("");
        assert_eq!(
            empty.source().unwrap_err().code(),
            ErrorCode::SPEC_EMPTY_SOURCE
        );
    }

    #[test]
    fn test_validate_rejects_empty_separators() {
        let spec = GroupSpec::by_path("Hosts").with_policy(AggregationPolicy::multi(""));
        assert_eq!(
            spec.validate().unwrap_err().code(),
            ErrorCode::SPEC_EMPTY_SEPARATOR
        );

        let spec = GroupSpec::by_path("Hosts")
            .with_policy(AggregationPolicy::key_value_pairs(",", "", None));
        assert_eq!(
            spec.validate().unwrap_err().code(),
            ErrorCode::SPEC_EMPTY_SEPARATOR
        );
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(GroupSpec::by_path("a").operation_name(), "groupBy");
        assert_eq!(GroupSpec::by_label("a").operation_name(), "groupByLabel");
        assert_eq!(
            GroupSpec::by_path("a")
                .with_policy(AggregationPolicy::multi(","))
                .operation_name(),
            "groupByMulti"
        );
    }

    #[test]
    fn test_apply_path_multi() {
        let entries = vec![json!({"Hosts": "a,b"}), json!({"Hosts": "b"})];
        let spec = GroupSpec::by_path("Hosts").with_policy(AggregationPolicy::multi(","));
        let groups = spec.apply(&entries).unwrap();
        assert_eq!(groups["a"].len(), 1);
        assert_eq!(groups["b"].len(), 2);
    }

    #[test]
    fn test_apply_label_with_split_policy() {
        let entries = vec![
            RuntimeContainer::new("web").with_label("networks", "front,back"),
            RuntimeContainer::new("db").with_label("networks", "back"),
        ];
        let spec = GroupSpec::by_label("networks").with_policy(AggregationPolicy::multi(","));
        let groups = spec.apply(&entries).unwrap();
        assert_eq!(groups["front"].len(), 1);
        assert_eq!(groups["back"].len(), 2);
    }

    #[test]
    fn test_apply_invalid_spec_groups_nothing() {
        let entries = vec![json!({"a": "b"})];
        assert!(GroupSpec::default().apply(&entries).is_err());
    }
}
