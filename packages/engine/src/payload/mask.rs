//! Shape-directed projection
//!
//! `mask` is driven by a template tree instead of path strings: the
//! result has exactly the shape of the template, with values copied or
//! null-filled from the payload.

use serde_json::{Map, Value};

use super::{is_empty_value, Payload};

/// Template leaves equal to this marker copy the payload value verbatim
const COPY_MARKER: &str = "*";

impl Payload {
    /// Project the payload through a template tree
    ///
    /// For each `(key, template)` entry: a `"*"` leaf copies whatever
    /// value the payload holds at that location — scalar, list or map —
    /// or `null` if absent or empty; a nested map recurses when the
    /// payload holds a map there and produces `null` otherwise. Template
    /// leaves of any other shape are skipped.
    ///
    /// ```rust
    /// use quarry_engine::Payload;
    /// use serde_json::json;
    ///
    /// let payload = Payload::new(json!({
    ///     "message": {"title": "Hello World", "body": "Some content"}
    /// }));
    ///
    /// assert_eq!(
    ///     payload.mask(&json!({"message": {"title": "*"}, "posts": "*"})),
    ///     json!({"message": {"title": "Hello World"}, "posts": null}),
    /// );
    /// ```
    #[must_use]
    pub fn mask(&self, template: &Value) -> Value {
        let mut result = Map::new();
        if let Value::Object(entries) = template {
            mask_level(entries, Some(self.all()), &mut result);
        }
        Value::Object(result)
    }
}

fn mask_level(template: &Map<String, Value>, payload: Option<&Value>, out: &mut Map<String, Value>) {
    for (key, entry) in template {
        let found = payload
            .and_then(Value::as_object)
            .and_then(|map| map.get(key));

        match entry {
            Value::String(marker) if marker == COPY_MARKER => {
                let value = match found {
                    Some(v) if !is_empty_value(v) => v.clone(),
                    _ => Value::Null,
                };
                out.insert(key.clone(), value);
            }
            Value::Object(nested) => {
                if matches!(found, Some(Value::Object(_))) {
                    let mut inner = Map::new();
                    mask_level(nested, found, &mut inner);
                    out.insert(key.clone(), Value::Object(inner));
                } else {
                    out.insert(key.clone(), Value::Null);
                }
            }
            // anything else in the template is not a selection
            _ => {}
        }
    }
}
