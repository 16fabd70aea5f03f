//! Decoded payload and the query surface over it
//!
//! [`Payload`] owns one decoded value tree per logical request. All
//! operations are pure reads (`get`, `has`) or copy-on-write derivations
//! (`only`, `except`, `mask`); the underlying tree is never mutated.

mod mask;
mod project;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};
use crate::path::{self, PathExpr};

/// A decoded payload and the query operations over it
///
/// Construct directly from any value tree — no body-fetch or
/// content-type machinery involved — which is also how tests exercise
/// the engine:
///
/// ```rust
/// use quarry_engine::Payload;
/// use serde_json::json;
///
/// let payload = Payload::new(json!({"status": false, "code": 123, "note": ""}));
///
/// assert!(payload.has(&["status", "code"]));
/// assert!(!payload.has(&["note"]));
/// assert_eq!(payload.get_or("note", json!("abc")), json!("abc"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    tree: Value,
}

impl Payload {
    /// Wrap a decoded value tree
    ///
    /// The root of a payload is always a container: a `null` root
    /// normalizes to an empty map and any other scalar root to a
    /// one-element list.
    #[must_use]
    pub fn new(tree: Value) -> Self {
        let tree = match tree {
            Value::Null => Value::Object(Map::new()),
            root @ (Value::Object(_) | Value::Array(_)) => root,
            scalar => Value::Array(vec![scalar]),
        };
        Self { tree }
    }

    /// Build a payload from any serializable value
    pub fn from_data<T: Serialize>(data: &T) -> DecodeResult<Self> {
        let tree = serde_json::to_value(data).map_err(DecodeError::Json)?;
        Ok(Self::new(tree))
    }

    /// The entire decoded tree
    #[must_use]
    pub fn all(&self) -> &Value {
        &self.tree
    }

    /// Consume the payload, returning the tree
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.tree
    }

    /// Resolve a path to a node, without the emptiness policy
    ///
    /// Structural lookup only: `null` and empty-string values are still
    /// `Some`. Use [`get`](Self::get) / [`has`](Self::has) for the
    /// emptiness-aware accessors.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Value> {
        path::resolve(&self.tree, &PathExpr::parse(path))
    }

    /// Value at `path`, or `Null`
    ///
    /// Equivalent to `get_or(path, Value::Null)`.
    #[must_use]
    pub fn get(&self, path: &str) -> Value {
        self.get_or(path, Value::Null)
    }

    /// Value at `path`, or `default`
    ///
    /// The default is substituted when the path fails to resolve, and
    /// also when it resolves to `null` or an empty string — empty values
    /// count as absent. Boolean `false` and numeric `0` are NOT empty.
    /// Resolved values are returned unchanged, with no coercion.
    #[must_use]
    pub fn get_or(&self, path: &str, default: Value) -> Value {
        match self.find(path) {
            Some(found) if !is_empty_value(found) => found.clone(),
            _ => default,
        }
    }

    /// Whether every supplied path resolves to a non-empty value
    ///
    /// Each path is tested independently with the same emptiness policy
    /// as [`get`](Self::get). An empty path list is vacuously true;
    /// duplicate paths AND idempotently.
    #[must_use]
    pub fn has(&self, paths: &[&str]) -> bool {
        paths
            .iter()
            .all(|path| self.find(path).is_some_and(|v| !is_empty_value(v)))
    }
}

/// The engine's emptiness policy: `null` and `""` count as absent
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
