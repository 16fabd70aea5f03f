//! Quarry Public API
//!
//! Format-agnostic accessor over semi-structured request data. Decode a
//! raw payload once — JSON, YAML, XML, PHP-serialized or query string —
//! then query it with a compact dot-notation path language supporting
//! wildcards, positional indexing and first/last selection, plus the
//! derived projections `only`, `except` and `mask`.
//!
//! ```rust
//! use quarry::Quarry;
//!
//! let payload = Quarry::json(r#"{
//!     "email": {
//!         "to": "jane.doe@example.com",
//!         "from": "john.doe@example.com",
//!         "subject": "Hello World"
//!     }
//! }"#).expect("valid JSON");
//!
//! assert_eq!(payload.get("email.to"), serde_json::json!("jane.doe@example.com"));
//! assert_eq!(payload.get("email.:index[1]"), serde_json::json!("john.doe@example.com"));
//! assert!(payload.has(&["email.subject"]));
//! ```
//!
//! For request-style usage — body source plus declared content type —
//! build a [`Parser`] through [`Quarry::builder`]; the body is decoded
//! at most once, on first access.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::ParserBuilder;

// Re-export the engine surface
pub use quarry_engine::{
    BodySource, DecodeError, DecodeResult, Decoder, FormatRegistry, JsonDecoder, Parser, PathExpr,
    Payload, QueryStrDecoder, Segment, SerializeDecoder, StaticBody, XmlDecoder, YamlDecoder,
};

use serde::Serialize;
use serde_json::Value;

/// Main entry point providing static decode shorthands
pub struct Quarry;

impl Quarry {
    /// Decode raw JSON into a queryable payload
    ///
    /// Shorthand for `Parser::json(raw)`
    ///
    /// # Errors
    ///
    /// `"Failed To Parse JSON"` when the input is malformed.
    pub fn json(raw: &str) -> DecodeResult<Payload> {
        Parser::json(raw)
    }

    /// Decode raw YAML into a queryable payload
    ///
    /// Empty input decodes to an empty map.
    ///
    /// # Errors
    ///
    /// `"Failed To Parse YAML"` when the input is malformed.
    pub fn yaml(raw: &str) -> DecodeResult<Payload> {
        Parser::yaml(raw)
    }

    /// Decode raw XML into a queryable payload
    ///
    /// # Errors
    ///
    /// `"Failed To Parse XML"` when the input is not well-formed.
    pub fn xml(raw: &str) -> DecodeResult<Payload> {
        Parser::xml(raw)
    }

    /// Decode a URL-encoded form body into a queryable payload
    ///
    /// # Errors
    ///
    /// The built-in query-string decoder is total; this only fails for
    /// replacement decoders.
    pub fn form(raw: &str) -> DecodeResult<Payload> {
        Parser::querystr(raw)
    }

    /// Decode PHP-serialized data into a queryable payload
    ///
    /// # Errors
    ///
    /// `"Failed To Parse Serialized Data"` when the input is malformed.
    pub fn serialized(raw: &str) -> DecodeResult<Payload> {
        Parser::serialized(raw)
    }

    /// Wrap an already-decoded value tree
    #[must_use]
    pub fn from_value(value: Value) -> Payload {
        Payload::new(value)
    }

    /// Build a payload from any serializable value
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as a tree (for
    /// example a map with non-string keys).
    pub fn from_data<T: Serialize>(data: &T) -> DecodeResult<Payload> {
        Payload::from_data(data)
    }

    /// Configure a request-level [`Parser`]
    #[must_use]
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }
}
