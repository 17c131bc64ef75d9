//! Dotted-path traversal over nested values

use serde_json::Value;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Entries whose nested fields can be reached by a dotted path
pub trait PathLookup {
    /// Resolve `segments` against this entry
    ///
    /// Returns `None` when any step of the path does not exist. An empty
    /// segment list resolves to the entry itself.
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>>;
}

impl PathLookup for Value {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        deep_get(self, segments).map(Cow::Borrowed)
    }
}

impl<T: PathLookup + ?Sized> PathLookup for &T {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        (**self).lookup_path(segments)
    }
}

impl<T: PathLookup + ?Sized> PathLookup for Box<T> {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        (**self).lookup_path(segments)
    }
}

impl<T: PathLookup + ?Sized> PathLookup for Rc<T> {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        (**self).lookup_path(segments)
    }
}

impl<T: PathLookup + ?Sized> PathLookup for Arc<T> {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        (**self).lookup_path(segments)
    }
}

/// Split a dotted path into segments
///
/// A single leading `.` is ignored and an empty path yields no segments.
pub fn parse_path(path: &str) -> Vec<String> {
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').map(str::to_string).collect()
}

/// Walk `segments` down from `value`
///
/// Object steps prefer the longest run of remaining segments that, joined
/// with `.`, names an existing key. This lets keys such as
/// `com.example.role` be reached inside a label map. Array steps take a
/// decimal index. Any other step is absent.
pub fn deep_get<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    if segments.is_empty() {
        return Some(value);
    }

    match value {
        Value::Object(map) => {
            let (next, consumed) = (1..=segments.len()).rev().find_map(|end| {
                let key = segments[..end].join(".");
                map.get(&key).map(|next| (next, end))
            })?;
            deep_get(next, &segments[consumed..])
        }
        Value::Array(items) => {
            let index = segments[0].parse::<usize>().ok()?;
            deep_get(items.get(index)?, &segments[1..])
        }
        _ => None,
    }
}
