//! Collection adapter
//!
//! Normalizes ordered collections into an indexable sequence of entries.
//! Typed collections implement [`Entries`] directly; dynamic JSON input goes
//! through [`array_values`], which rejects anything that is not an array.

use crate::error::{GroupingError, Result};
use serde_json::Value;
use std::collections::VecDeque;

/// An ordered, indexable collection of entries
///
/// Iteration order is index order and is preserved by every grouping
/// operation.
pub trait Entries {
    type Entry;

    /// Number of entries in the collection
    fn entry_count(&self) -> usize;

    /// Entry at `index`, or `None` past the end
    fn entry_at(&self, index: usize) -> Option<&Self::Entry>;
}

impl<T> Entries for [T] {
    type Entry = T;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T, const N: usize> Entries for [T; N] {
    type Entry = T;

    fn entry_count(&self) -> usize {
        N
    }

    fn entry_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> Entries for Vec<T> {
    type Entry = T;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> Entries for VecDeque<T> {
    type Entry = T;

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn entry_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

/// View a dynamic value as an array of entries
///
/// Fails with [`GroupingError::ArrayExpected`] naming `operation` and the
/// rejected value when `value` is not a JSON array.
pub fn array_values<'a>(operation: &str, value: &'a Value) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(GroupingError::array_expected(
            operation,
            format!("{other}; kind {}", value_kind(other)),
        )),
    }
}

/// Short name of a JSON value's kind, used in error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vec_entries_preserve_order() {
        let items = vec!["a", "b", "c"];
        assert_eq!(items.entry_count(), 3);
        assert_eq!(items.entry_at(0), Some(&"a"));
        assert_eq!(items.entry_at(2), Some(&"c"));
        assert_eq!(items.entry_at(3), None);
    }

    #[test]
    fn test_vec_deque_entries() {
        let mut items = VecDeque::new();
        items.push_back(2);
        items.push_front(1);
        assert_eq!(items.entry_at(0), Some(&1));
        assert_eq!(items.entry_at(1), Some(&2));
    }

    #[test]
    fn test_array_and_slice_entries() {
        let items = [10, 20];
        assert_eq!(items.entry_count(), 2);
        assert_eq!(items.entry_at(1), Some(&20));

        let slice: &[i32] = &[];
        assert_eq!(slice.entry_count(), 0);
        assert_eq!(slice.entry_at(0), None);
    }

    #[test]
    fn test_array_values_accepts_arrays() {
        let value = json!([{"a": 1}, {"a": 2}]);
        let items = array_values("groupBy", &value).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_array_values_rejects_non_arrays() {
        let value = json!({"a": 1});
        let err = array_values("groupByMulti", &value).unwrap_err();
        match err {
            GroupingError::ArrayExpected {
                operation,
                received,
            } => {
                assert_eq!(operation, "groupByMulti");
                assert!(received.contains("kind object"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
