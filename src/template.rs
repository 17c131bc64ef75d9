//! Template functions
//!
//! Exposes the grouping operations to `tera` templates under their template
//! names. Arguments are passed by name:
//!
//! ```text
//! {% set hosts = groupByMulti(entries=containers, path="Env.VIRTUAL_HOST", sep=",") %}
//! {% for host, members in hosts %}
//! upstream {{ host }} { {% for c in members %}server {{ c.Name }};{% endfor %} }
//! {% endfor %}
//! ```

use crate::entries::array_values;
use crate::error::GroupingError;
use crate::group::{self, operation, GroupingResult};
use crate::kvp::split_key_value_pairs;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tera::Tera;

type Args = HashMap<String, Value>;

/// Register every grouping function on `tera`
pub fn register_functions(tera: &mut Tera) {
    tera.register_function(operation::GROUP_BY, group_by_fn);
    tera.register_function(operation::GROUP_BY_KEYS, group_by_keys_fn);
    tera.register_function(operation::GROUP_BY_LABEL, group_by_label_fn);
    tera.register_function(operation::GROUP_BY_MULTI, group_by_multi_fn);
    tera.register_function(
        operation::GROUP_BY_MULTI_KEY_VALUE_PAIRS,
        group_by_multi_key_value_pairs_fn,
    );
    tera.register_function(operation::SPLIT_KEY_VALUE_PAIRS, split_key_value_pairs_fn);
}

/// A `Tera` instance with the grouping functions registered and autoescape off
pub fn engine() -> Tera {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    register_functions(&mut tera);
    tera
}

fn group_by_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::GROUP_BY;
    let entries = entries_arg(name, args)?;
    let path = string_arg(name, args, "path")?;
    let groups = group::group_by(entries, path).map_err(to_tera)?;
    Ok(groups_to_value(groups))
}

fn group_by_keys_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::GROUP_BY_KEYS;
    let entries = entries_arg(name, args)?;
    let path = string_arg(name, args, "path")?;
    let keys = group::group_by_keys(entries, path).map_err(to_tera)?;
    Ok(Value::Array(keys.into_iter().map(Value::String).collect()))
}

fn group_by_label_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::GROUP_BY_LABEL;
    let entries = entries_arg(name, args)?;
    let label = string_arg(name, args, "label")?;
    let groups = group::group_by_label(entries, label).map_err(to_tera)?;
    Ok(groups_to_value(groups))
}

fn group_by_multi_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::GROUP_BY_MULTI;
    let entries = entries_arg(name, args)?;
    let path = string_arg(name, args, "path")?;
    let sep = string_arg(name, args, "sep")?;
    let groups = group::group_by_multi(entries, path, sep).map_err(to_tera)?;
    Ok(groups_to_value(groups))
}

fn group_by_multi_key_value_pairs_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::GROUP_BY_MULTI_KEY_VALUE_PAIRS;
    let entries = entries_arg(name, args)?;
    let path = string_arg(name, args, "path")?;
    let list_sep = string_arg(name, args, "list_sep")?;
    let kvp_sep = string_arg(name, args, "kvp_sep")?;
    let default_key = optional_string_arg(name, args, "default_key")?;
    let groups =
        group::group_by_multi_key_value_pairs(entries, path, list_sep, kvp_sep, default_key)
            .map_err(to_tera)?;
    Ok(groups_to_value(groups))
}

fn split_key_value_pairs_fn(args: &Args) -> tera::Result<Value> {
    let name = operation::SPLIT_KEY_VALUE_PAIRS;
    let input = string_arg(name, args, "input")?;
    let list_sep = string_arg(name, args, "list_sep")?;
    let kvp_sep = string_arg(name, args, "kvp_sep")?;
    let default_key = optional_string_arg(name, args, "default_key")?;

    let pairs = split_key_value_pairs(input, list_sep, kvp_sep, default_key);
    Ok(Value::Object(
        pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    ))
}

fn entries_arg<'a>(name: &str, args: &'a Args) -> tera::Result<&'a [Value]> {
    let value = args.get("entries").ok_or_else(|| missing_arg(name, "entries"))?;
    array_values(name, value).map_err(to_tera)
}

fn string_arg<'a>(name: &str, args: &'a Args, key: &str) -> tera::Result<&'a str> {
    optional_string_arg(name, args, key)?.ok_or_else(|| missing_arg(name, key))
}

fn optional_string_arg<'a>(
    name: &str,
    args: &'a Args,
    key: &str,
) -> tera::Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(tera::Error::msg(format!(
            "Function `{name}` received {key}={other} but `{key}` must be a string"
        ))),
    }
}

fn missing_arg(name: &str, key: &str) -> tera::Error {
    tera::Error::msg(format!("Function `{name}` was called without a `{key}` argument"))
}

fn to_tera(err: GroupingError) -> tera::Error {
    tera::Error::msg(err.to_string())
}

fn groups_to_value(groups: GroupingResult<'_, Value>) -> Value {
    let buckets: Map<String, Value> = groups
        .into_iter()
        .map(|(key, members)| (key, Value::Array(members.into_iter().cloned().collect())))
        .collect();
    Value::Object(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: Value) -> Args {
        serde_json::from_value(pairs).unwrap()
    }

    #[test]
    fn test_group_by_fn_builds_buckets() {
        let result = group_by_fn(&args(json!({
            "entries": [{"k": "a"}, {"k": "b"}, {"k": "a"}],
            "path": "k"
        })))
        .unwrap();
        assert_eq!(result["a"], json!([{"k": "a"}, {"k": "a"}]));
        assert_eq!(result["b"], json!([{"k": "b"}]));
    }

    #[test]
    fn test_group_by_fn_rejects_non_array() {
        let err = group_by_fn(&args(json!({"entries": "nope", "path": "k"}))).unwrap_err();
        assert!(err.to_string().contains("must pass an array to 'groupBy'"));
    }

    #[test]
    fn test_missing_argument() {
        let err = group_by_multi_fn(&args(json!({"entries": [], "path": "k"}))).unwrap_err();
        assert!(err.to_string().contains("without a `sep` argument"));
    }

    #[test]
    fn test_non_string_argument() {
        let err = group_by_fn(&args(json!({"entries": [], "path": 3}))).unwrap_err();
        assert!(err.to_string().contains("`path` must be a string"));
    }

    #[test]
    fn test_split_key_value_pairs_fn() {
        let result = split_key_value_pairs_fn(&args(json!({
            "input": "x,y,z=1",
            "list_sep": ",",
            "kvp_sep": "=",
            "default_key": "d"
        })))
        .unwrap();
        assert_eq!(result, json!({"d": "y", "z": "1"}));
    }

    #[test]
    fn test_group_by_keys_fn() {
        let result = group_by_keys_fn(&args(json!({
            "entries": [{"k": "a"}, {"k": "a"}],
            "path": "k"
        })))
        .unwrap();
        assert_eq!(result, json!(["a"]));
    }
}
