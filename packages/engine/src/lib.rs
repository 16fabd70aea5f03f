//! # Quarry Engine
//!
//! Format-agnostic accessor over semi-structured request payloads. A raw
//! body is decoded exactly once (JSON, YAML, XML, PHP-serialized or
//! URL-encoded query string) into a single value tree, which is then
//! queried with a compact dot-notation path language supporting
//! wildcards, positional indexing and first/last selection, plus the
//! derived projections `only`, `except` and `mask`.
//!
//! ## Path language
//!
//! - `email.to` — exact key lookup, one map level per dot
//! - `email.*` / `email.%` — first positional element of a container
//! - `comments.:first` / `comments.:last` — positional selection
//! - `comments.:index[1].title` — zero-based positional index
//!
//! Maps and lists are treated uniformly as positionally-ordered
//! containers, so every positional segment works against both.
//!
//! ## Examples
//!
//! ```rust
//! use quarry_engine::Payload;
//! use serde_json::json;
//!
//! let payload = Payload::new(json!({
//!     "comments": [
//!         {"title": "hello"},
//!         {"title": "world"},
//!     ]
//! }));
//!
//! assert_eq!(payload.get("comments.:last.title"), json!("world"));
//! assert!(payload.has(&["comments.:index[1].title"]));
//! assert!(!payload.has(&["comments.:index[99]"]));
//! ```
//!
//! Query failures are never errors: a path that does not resolve (or
//! resolves to `null` or an empty string) substitutes a default instead.
//! Only decoding a malformed raw payload fails, with an error naming the
//! offending format.

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod formats;
pub mod parser;
pub mod path;
pub mod payload;

pub use self::{
    error::{DecodeError, DecodeResult},
    formats::{
        Decoder, FormatRegistry, JsonDecoder, QueryStrDecoder, SerializeDecoder, XmlDecoder,
        YamlDecoder,
    },
    parser::{BodySource, Parser, StaticBody},
    path::{PathExpr, Segment},
    payload::Payload,
};
