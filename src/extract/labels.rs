//! Label map capability

use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;

/// Field holding the label map on JSON container records
pub const LABELS_FIELD: &str = "Labels";

/// Outcome of looking up one label on an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelLookup<'a> {
    /// The entry carries the label
    Present(&'a str),
    /// The entry carries a label map without this label
    Missing,
    /// The entry carries no label map at all
    Unsupported,
}

/// Entries that may expose a string-to-string label map
pub trait HasLabels {
    fn label(&self, name: &str) -> LabelLookup<'_>;

    /// Rendering of the entry used in error messages
    fn describe(&self) -> String;
}

/// JSON objects expose their `Labels` field when it is an object.
///
/// A `null` label map is an empty one. A label holding anything but a
/// string is unsupported; other labels on the same entry are unaffected.
impl HasLabels for Value {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        let labels = match self.get(LABELS_FIELD) {
            Some(Value::Object(labels)) => labels,
            Some(Value::Null) => return LabelLookup::Missing,
            _ => return LabelLookup::Unsupported,
        };

        match labels.get(name) {
            Some(Value::String(value)) => LabelLookup::Present(value),
            None | Some(Value::Null) => LabelLookup::Missing,
            Some(_) => LabelLookup::Unsupported,
        }
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T: HasLabels + ?Sized> HasLabels for &T {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        (**self).label(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: HasLabels + ?Sized> HasLabels for Box<T> {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        (**self).label(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: HasLabels + ?Sized> HasLabels for Rc<T> {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        (**self).label(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: HasLabels + ?Sized> HasLabels for Arc<T> {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        (**self).label(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
