//! Key extractors
//!
//! An extractor maps one entry to a [`KeyLookup`] or fails the grouping
//! call. Absent keys are reported as [`KeyLookup::Absent`], never as errors.

pub mod labels;
pub mod path;

pub use labels::{HasLabels, LabelLookup, LABELS_FIELD};
pub use path::{deep_get, parse_path, PathLookup};

use crate::error::{GroupingError, Result};
use serde_json::Value;

/// Key produced for a single entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    Found(String),
    Absent,
}

/// Extract the string found at `path`
///
/// Missing steps and `null` terminals are absent. Any other non-string
/// terminal fails with [`GroupingError::KeyNotString`].
pub fn path_key<E>(operation: &'static str, path: &str) -> impl Fn(&E) -> Result<KeyLookup>
where
    E: PathLookup + ?Sized,
{
    let path = path.to_string();
    let segments = parse_path(&path);
    move |entry| match entry.lookup_path(&segments).as_deref() {
        None | Some(Value::Null) => Ok(KeyLookup::Absent),
        Some(Value::String(key)) => Ok(KeyLookup::Found(key.clone())),
        Some(other) => Err(GroupingError::key_not_string(operation, &path, other)),
    }
}

/// Extract the value of `label` from the entry's label map
///
/// Entries without a usable label map fail with
/// [`GroupingError::TypeMismatch`]; entries missing only the label are absent.
pub fn label_key<E>(operation: &'static str, label: &str) -> impl Fn(&E) -> Result<KeyLookup>
where
    E: HasLabels + ?Sized,
{
    let label = label.to_string();
    move |entry| match entry.label(&label) {
        LabelLookup::Present(value) => Ok(KeyLookup::Found(value.to_string())),
        LabelLookup::Missing => Ok(KeyLookup::Absent),
        LabelLookup::Unsupported => {
            Err(GroupingError::type_mismatch(operation, entry.describe()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_key_found() {
        let extract = path_key::<Value>("groupBy", "Env.VIRTUAL_HOST");
        let entry = json!({"Env": {"VIRTUAL_HOST": "a.example"}});
        assert_eq!(
            extract(&entry).unwrap(),
            KeyLookup::Found("a.example".to_string())
        );
    }

    #[test]
    fn test_path_key_absent_and_null() {
        let extract = path_key::<Value>("groupBy", "Env.VIRTUAL_HOST");
        assert_eq!(extract(&json!({})).unwrap(), KeyLookup::Absent);
        assert_eq!(
            extract(&json!({"Env": {"VIRTUAL_HOST": null}})).unwrap(),
            KeyLookup::Absent
        );
    }

    #[test]
    fn test_path_key_rejects_non_strings() {
        let extract = path_key::<Value>("groupBy", "Port");
        let err = extract(&json!({"Port": 8080})).unwrap_err();
        assert_eq!(
            err,
            GroupingError::KeyNotString {
                operation: "groupBy".to_string(),
                path: "Port".to_string(),
                received: "8080".to_string(),
            }
        );
    }

    #[test]
    fn test_label_key_outcomes() {
        let extract = label_key::<Value>("groupByLabel", "tier");
        assert_eq!(
            extract(&json!({"Labels": {"tier": "web"}})).unwrap(),
            KeyLookup::Found("web".to_string())
        );
        assert_eq!(
            extract(&json!({"Labels": {}})).unwrap(),
            KeyLookup::Absent
        );

        let err = extract(&json!({"Name": "db"})).unwrap_err();
        assert!(matches!(err, GroupingError::TypeMismatch { .. }));
        assert!(err.to_string().contains("groupByLabel"));
        assert!(err.to_string().contains(r#"received {"Name":"db"}"#));
    }
}
