//! Bracket-notation query strings: `age[gte]=18&age[lte]=30`.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::domain::filter::{
    entities::condition::json_to_text,
    value_objects::{FilterObject, INSENSITIVE, MODE_KEY},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Drops `mode: "insensitive"` leaves; the backend applies it anyway.
    pub omit_insensitive_mode: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            omit_insensitive_mode: true,
        }
    }
}

/// Flattens `value` into `key[child][grandchild]=value` pairs joined by `&`.
///
/// Key segments and values are percent-encoded, brackets are not. Arrays
/// use index segments and nulls are skipped. An empty object is written as
/// a bare key without `=`. `parent_key` prefixes every pair when non-empty.
pub fn serialize(value: &Value, parent_key: &str, options: &SerializeOptions) -> String {
    let mut pairs = Vec::new();
    let root = urlencoding::encode(parent_key);
    flatten(value, &root, options, &mut pairs);
    pairs.join("&")
}

fn child_key(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}[{segment}]")
    }
}

fn flatten(value: &Value, key: &str, options: &SerializeOptions, pairs: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Object(map) if map.is_empty() => {
            if !key.is_empty() {
                pairs.push(key.to_string());
            }
        }
        Value::Object(map) => {
            for (name, child) in map {
                if options.omit_insensitive_mode
                    && name == MODE_KEY
                    && child.as_str() == Some(INSENSITIVE)
                {
                    continue;
                }
                flatten(child, &child_key(key, &urlencoding::encode(name)), options, pairs);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten(child, &child_key(key, &index.to_string()), options, pairs);
            }
        }
        scalar => {
            if key.is_empty() {
                return;
            }
            pairs.push(format!("{key}={}", urlencoding::encode(&json_to_text(scalar))));
        }
    }
}

/// Parses a bracket-notation query string back into a nested object.
///
/// Every leaf is a string. Returns `None` for empty input; a leading `?` is
/// ignored. Keys that are not well-formed bracket notation are used
/// verbatim as a single top-level key.
pub fn deserialize(query: &str) -> Option<FilterObject> {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.is_empty() {
        return None;
    }

    let mut root = Map::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        match pair.split_once('=') {
            Some((raw_key, raw_value)) => {
                let leaf = Value::String(decode(raw_value).into_owned());
                insert(&mut root, &parse_key(raw_key), leaf);
            }
            // `staff[some]` with no value is an empty object
            None => insert(&mut root, &parse_key(pair), Value::Object(Map::new())),
        }
    }
    Some(root)
}

fn decode(raw: &str) -> Cow<'_, str> {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    let decoded = urlencoding::decode(&spaced).map(Cow::into_owned);
    match decoded {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => spaced,
    }
}

fn parse_key(raw: &str) -> Vec<String> {
    let literal = || vec![decode(raw).into_owned()];

    let (head, mut rest) = match raw.find('[') {
        Some(0) => return literal(),
        Some(start) => (&raw[..start], &raw[start..]),
        None => return literal(),
    };

    let mut segments = vec![decode(head).into_owned()];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return literal();
        };
        let Some(end) = inner.find(']') else {
            return literal();
        };
        segments.push(decode(&inner[..end]).into_owned());
        rest = &inner[end + 1..];
    }
    segments
}

fn insert(target: &mut FilterObject, path: &[String], value: Value) {
    let Some((head, rest)) = path.split_first() else {
        return;
    };
    // `tags[in][]=a` appends at the next index.
    let head = if head.is_empty() {
        target.len().to_string()
    } else {
        head.clone()
    };

    if rest.is_empty() {
        let keeps_existing = value.as_object().is_some_and(Map::is_empty)
            && target.get(&head).is_some_and(Value::is_object);
        if !keeps_existing {
            target.insert(head, value);
        }
        return;
    }

    let entry = target
        .entry(head)
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(inner) = entry {
        insert(inner, rest, value);
    }
}
