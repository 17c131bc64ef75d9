//! Key=value list parsing
//!
//! Parses strings such as `"a=1,b=2"` into a map. List items that carry no
//! pair separator are filed under a default key when one is given, or mapped
//! onto themselves otherwise.

use std::collections::HashMap;

/// Mapping produced by [`split_key_value_pairs`]
pub type KeyValueMap = HashMap<String, String>;

/// Split `input` into key/value pairs
///
/// `input` is split on `list_sep` into items. For each item, in order:
///
/// * an item containing `kvp_sep` is split on it; the first segment is the
///   key and the second the value, further segments are dropped
/// * otherwise, without a (non-empty) `default_key`, the item is both key
///   and value
/// * otherwise the item becomes the value of `default_key`
///
/// Later items overwrite earlier ones with the same key, so only the last
/// item filed under `default_key` survives.
///
/// # Examples
///
/// ```
/// use bucketry::kvp::split_key_value_pairs;
///
/// let pairs = split_key_value_pairs("a=1,b=2", ",", "=", None);
/// assert_eq!(pairs["a"], "1");
/// assert_eq!(pairs["b"], "2");
///
/// let pairs = split_key_value_pairs("x,y", ",", "=", Some("d"));
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs["d"], "y");
/// ```
pub fn split_key_value_pairs(
    input: &str,
    list_sep: &str,
    kvp_sep: &str,
    default_key: Option<&str>,
) -> KeyValueMap {
    let default_key = default_key.filter(|key| !key.is_empty());

    let mut output = KeyValueMap::new();
    for item in split_list(input, list_sep) {
        let (key, value) = split_item(item, kvp_sep, default_key);
        output.insert(key.to_string(), value.to_string());
    }
    output
}

/// Split `input` on `sep`, keeping empty items
///
/// An empty separator splits after each character.
pub(crate) fn split_list<'a>(input: &'a str, sep: &str) -> Vec<&'a str> {
    if sep.is_empty() {
        return input
            .char_indices()
            .map(|(start, ch)| &input[start..start + ch.len_utf8()])
            .collect();
    }
    input.split(sep).collect()
}

fn split_item<'a>(
    item: &'a str,
    kvp_sep: &str,
    default_key: Option<&'a str>,
) -> (&'a str, &'a str) {
    if !kvp_sep.is_empty() && item.contains(kvp_sep) {
        let mut segments = item.split(kvp_sep);
        let key = segments.next().unwrap_or_default();
        let value = segments.next().unwrap_or_default();
        return (key, value);
    }

    match default_key {
        Some(key) => (key, item),
        None => (item, item),
    }
}
