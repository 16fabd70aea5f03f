//! Path resolution over value trees
//!
//! Walks a [`PathExpr`] against a `serde_json::Value`, one segment at a
//! time. Any segment that cannot advance aborts the walk immediately;
//! remaining segments are not evaluated. Positional segments treat maps
//! and lists uniformly: a map is addressed by insertion order, keys are
//! not considered.

use serde_json::Value;

use super::ast::{PathExpr, Segment};

/// Resolve a path against a tree, returning the addressed node
///
/// Returns `None` when any segment along the way fails to resolve —
/// a missing key, an out-of-bounds position, an empty container, or a
/// scalar where a container was required.
#[must_use]
pub fn resolve<'a>(root: &'a Value, path: &PathExpr) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Mutable twin of [`resolve`] with identical semantics
///
/// Drives in-place removal for `except`: the caller resolves the parent
/// container, then removes the element the final segment addresses.
pub fn resolve_mut<'a>(root: &'a mut Value, segments: &[Segment]) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in segments {
        current = step_mut(current, segment)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match segment {
        Segment::Key(key) => value.as_object()?.get(key),
        Segment::Wildcard | Segment::First => match value {
            Value::Object(map) => map.values().next(),
            Value::Array(items) => items.first(),
            _ => None,
        },
        Segment::Last => match value {
            Value::Object(map) => map.values().last(),
            Value::Array(items) => items.last(),
            _ => None,
        },
        Segment::Index(n) => match value {
            Value::Object(map) => map.values().nth(*n),
            Value::Array(items) => items.get(*n),
            _ => None,
        },
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match segment {
        Segment::Key(key) => value.as_object_mut()?.get_mut(key),
        Segment::Wildcard | Segment::First => match value {
            Value::Object(map) => map.values_mut().next(),
            Value::Array(items) => items.first_mut(),
            _ => None,
        },
        Segment::Last => match value {
            Value::Object(map) => {
                let last = map.len().checked_sub(1)?;
                map.values_mut().nth(last)
            }
            Value::Array(items) => items.last_mut(),
            _ => None,
        },
        Segment::Index(n) => match value {
            Value::Object(map) => map.values_mut().nth(*n),
            Value::Array(items) => items.get_mut(*n),
            _ => None,
        },
    }
}
