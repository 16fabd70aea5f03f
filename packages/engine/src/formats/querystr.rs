//! URL-encoded query string decoding
//!
//! Percent-decoding and pair splitting come from `url::form_urlencoded`;
//! on top of that, bracketed keys nest the way web frameworks expect:
//! `user[name]=x` builds a nested map, `tags[]=a&tags[]=b` appends to a
//! list, and a repeated plain key is last-write-wins. Values are always
//! strings — query strings carry no type information.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::DecodeResult;

use super::Decoder;

/// Query-string decoder
///
/// Total: any input decodes to a map (possibly empty). The
/// `Failed To Parse Query String` error exists only for replacement
/// decoders registered over this content type.
pub struct QueryStrDecoder;

impl Decoder for QueryStrDecoder {
    fn format(&self) -> &'static str {
        "Query String"
    }

    fn decode(&self, raw: &str) -> DecodeResult<Value> {
        let mut root = Map::new();
        for (key, value) in form_urlencoded::parse(raw.trim().as_bytes()) {
            insert_pair(&mut root, &key, value.into_owned());
        }
        Ok(Value::Object(root))
    }
}

fn insert_pair(root: &mut Map<String, Value>, key: &str, value: String) {
    match split_brackets(key) {
        Some((head, parts)) => {
            let slot = root.entry(head.to_string()).or_insert(Value::Null);
            set_nested(slot, &parts, value);
        }
        // malformed bracket syntax: the whole key is literal
        None => {
            root.insert(key.to_string(), Value::String(value));
        }
    }
}

/// Split `a[b][]` into `("a", ["b", ""])`; plain keys have no parts.
/// Returns `None` when brackets are unbalanced or text trails them.
fn split_brackets(key: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = key.find('[') else {
        return Some((key, Vec::new()));
    };

    let (head, mut rest) = key.split_at(open);
    let mut parts = Vec::new();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return None;
        }
        let close = rest.find(']')?;
        parts.push(&rest[1..close]);
        rest = &rest[close + 1..];
    }
    Some((head, parts))
}

fn set_nested(slot: &mut Value, parts: &[&str], value: String) {
    let Some((head, rest)) = parts.split_first() else {
        *slot = Value::String(value);
        return;
    };

    if head.is_empty() {
        // "[]" appends; deeper parts nest inside the appended element
        if !matches!(slot, Value::Array(_)) {
            *slot = Value::Array(Vec::new());
        }
        if let Value::Array(items) = slot {
            items.push(Value::Null);
            if let Some(last) = items.last_mut() {
                set_nested(last, rest, value);
            }
        }
    } else {
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(map) = slot {
            let entry = map.entry((*head).to_string()).or_insert(Value::Null);
            set_nested(entry, rest, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_brackets() {
        assert_eq!(split_brackets("plain"), Some(("plain", vec![])));
        assert_eq!(split_brackets("a[b]"), Some(("a", vec!["b"])));
        assert_eq!(split_brackets("a[b][]"), Some(("a", vec!["b", ""])));
        assert_eq!(split_brackets("a[b"), None);
        assert_eq!(split_brackets("a[b]x"), None);
    }
}
