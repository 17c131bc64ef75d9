//! Runtime container record
//!
//! The minimal view of a running container needed for grouping: identity,
//! image, environment and labels. Serializes with the PascalCase field names
//! templates use in paths such as `Env.VIRTUAL_HOST` or `Labels.com.example.role`.

use crate::extract::{HasLabels, LabelLookup, PathLookup};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeContainer {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl RuntimeContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// JSON form of the record, with the same field names as its serde form
    pub fn to_json(&self) -> Value {
        json!({
            "ID": self.id,
            "Name": self.name,
            "Image": self.image,
            "Env": string_map(&self.env),
            "Labels": string_map(&self.labels),
        })
    }
}

fn string_map(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<String, Value>>(),
    )
}

fn field_value(value: &str, rest: &[String]) -> Option<Cow<'static, Value>> {
    rest.is_empty().then(|| Cow::Owned(Value::String(value.to_string())))
}

/// Keys may contain dots, so the remaining segments name a single key.
fn map_value(map: &BTreeMap<String, String>, rest: &[String]) -> Option<Cow<'static, Value>> {
    if rest.is_empty() {
        return Some(Cow::Owned(string_map(map)));
    }
    map.get(&rest.join(".")).map(|value| Cow::Owned(Value::String(value.clone())))
}

impl HasLabels for RuntimeContainer {
    fn label(&self, name: &str) -> LabelLookup<'_> {
        match self.labels.get(name) {
            Some(value) => LabelLookup::Present(value),
            None => LabelLookup::Missing,
        }
    }

    fn describe(&self) -> String {
        self.to_json().to_string()
    }
}

/// Paths use the serialized field names and resolve against the fields
/// directly.
impl PathLookup for RuntimeContainer {
    fn lookup_path(&self, segments: &[String]) -> Option<Cow<'_, Value>> {
        let Some((field, rest)) = segments.split_first() else {
            return Some(Cow::Owned(self.to_json()));
        };
        match field.as_str() {
            "ID" => field_value(&self.id, rest),
            "Name" => field_value(&self.name, rest),
            "Image" => field_value(&self.image, rest),
            "Env" => map_value(&self.env, rest),
            "Labels" => map_value(&self.labels, rest),
            _ => None,
        }
    }
}
