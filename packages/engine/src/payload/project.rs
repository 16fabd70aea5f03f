//! Derived projections: `only` and `except`
//!
//! Both replay path sets against the resolver and build new trees; the
//! source payload is never touched. `only` grafts resolved values into a
//! fresh map, `except` removes addressed elements from a deep clone.

use serde_json::{Map, Value};

use crate::path::{resolve_mut, PathExpr, Segment};

use super::Payload;

impl Payload {
    /// Build a new tree containing only the requested paths
    ///
    /// For each path the value is computed with full [`get`](Self::get)
    /// semantics — so a path that is missing or empty grafts `null` —
    /// and placed in the result at the same location, creating
    /// intermediate maps as needed. Grafting is additive: paths sharing
    /// a prefix merge into the same intermediate map. This makes `only`
    /// usable for presence-shaping an output contract, not just
    /// filtering:
    ///
    /// ```rust
    /// use quarry_engine::Payload;
    /// use serde_json::json;
    ///
    /// let payload = Payload::new(json!({"id": 123, "note": {"body": "hi"}}));
    /// assert_eq!(
    ///     payload.only(&["note.body", "id", "status"]),
    ///     json!({"note": {"body": "hi"}, "id": 123, "status": null}),
    /// );
    /// ```
    #[must_use]
    pub fn only(&self, paths: &[&str]) -> Value {
        let mut result = Value::Object(Map::new());
        for path in paths {
            graft(&mut result, path, self.get(path));
        }
        result
    }

    /// Build a new tree with the addressed elements removed
    ///
    /// The full tree is cloned, then each path is re-walked with the
    /// resolver's segment semantics up to the parent container, and the
    /// element addressed by the final segment is removed — a map key by
    /// name, a position by index (map removal preserves the order of
    /// the remaining keys; list removal shifts later elements down).
    /// A path that fails to resolve leaves the clone untouched. Paths
    /// apply independently and cumulatively.
    #[must_use]
    pub fn except(&self, paths: &[&str]) -> Value {
        let mut result = self.all().clone();
        for path in paths {
            let expr = PathExpr::parse(path);
            let Some((last, parents)) = expr.segments().split_last() else {
                continue;
            };
            if let Some(parent) = resolve_mut(&mut result, parents) {
                remove_at(parent, last);
            }
        }
        result
    }
}

/// Graft `value` into `target` at the raw dot-components of `path`
///
/// Components are literal map keys here, reserved spellings included;
/// an intermediate component that exists as a non-map is replaced by a
/// map, the final component overwrites.
fn graft(target: &mut Value, path: &str, value: Value) {
    let components: Vec<&str> = path.split('.').collect();
    let Some((leaf, branches)) = components.split_last() else {
        return;
    };

    let mut current = target;
    for component in branches {
        let Value::Object(map) = current else { return };
        let slot = map
            .entry((*component).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot;
    }

    if let Value::Object(map) = current {
        map.insert((*leaf).to_string(), value);
    }
}

fn remove_at(parent: &mut Value, segment: &Segment) {
    match segment {
        Segment::Key(key) => {
            if let Value::Object(map) = parent {
                map.shift_remove(key);
            }
        }
        Segment::Wildcard | Segment::First => remove_position(parent, 0),
        Segment::Last => {
            if let Some(last) = container_len(parent).checked_sub(1) {
                remove_position(parent, last);
            }
        }
        Segment::Index(n) => remove_position(parent, *n),
    }
}

fn remove_position(parent: &mut Value, position: usize) {
    match parent {
        Value::Object(map) => {
            if let Some(key) = map.keys().nth(position).cloned() {
                map.shift_remove(&key);
            }
        }
        Value::Array(items) => {
            if position < items.len() {
                items.remove(position);
            }
        }
        _ => {}
    }
}

fn container_len(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}
