//! Request-level parsing
//!
//! [`Parser`] ties the pieces together for one logical request: a
//! [`BodySource`], the declared content type, and a [`FormatRegistry`].
//! The body is fetched and decoded at most once; every query method
//! reads the cached [`Payload`]. Decoding is the only failure mode —
//! path misses never error.

mod source;

pub use self::source::{BodySource, StaticBody};

use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::debug;

use crate::error::DecodeResult;
use crate::formats::{
    Decoder, FormatRegistry, JsonDecoder, QueryStrDecoder, SerializeDecoder, XmlDecoder,
    YamlDecoder,
};
use crate::payload::Payload;

/// One request's payload access: body source, content type, registry,
/// and the decode-once cache
///
/// ```rust
/// use quarry_engine::{Parser, StaticBody};
///
/// let parser = Parser::new(
///     StaticBody::new(r#"{"email": {"to": "jane@example.com"}}"#),
///     Some("application/json"),
/// );
///
/// assert_eq!(
///     parser.get("email.to").expect("decodes"),
///     serde_json::json!("jane@example.com"),
/// );
/// ```
pub struct Parser {
    source: Box<dyn BodySource>,
    content_type: Option<String>,
    registry: FormatRegistry,
    decoded: OnceCell<Payload>,
}

impl Parser {
    /// Parser over a body source with a declared content type
    ///
    /// Content types absent from the registry (or `None`) decode as
    /// JSON.
    pub fn new(source: impl BodySource + 'static, content_type: Option<&str>) -> Self {
        Self::with_registry(source, content_type, FormatRegistry::new())
    }

    /// Parser with a caller-supplied registry
    pub fn with_registry(
        source: impl BodySource + 'static,
        content_type: Option<&str>,
        registry: FormatRegistry,
    ) -> Self {
        Self {
            source: Box::new(source),
            content_type: content_type.map(str::to_string),
            registry,
            decoded: OnceCell::new(),
        }
    }

    /// The decoded payload, decoding on first access
    ///
    /// # Errors
    ///
    /// Returns the decoder's [`DecodeError`](crate::DecodeError) when
    /// the raw body is not valid for the resolved format.
    pub fn payload(&self) -> DecodeResult<&Payload> {
        self.decoded.get_or_try_init(|| {
            let decoder = self.registry.resolve(self.content_type.as_deref());
            debug!(format = decoder.format(), "decoding request payload");
            let raw = self.source.raw_body();
            decoder.decode(&raw).map(Payload::new)
        })
    }

    /// Value at `path`, or `Null` — see [`Payload::get`]
    pub fn get(&self, path: &str) -> DecodeResult<Value> {
        Ok(self.payload()?.get(path))
    }

    /// Value at `path`, or `default` — see [`Payload::get_or`]
    pub fn get_or(&self, path: &str, default: Value) -> DecodeResult<Value> {
        Ok(self.payload()?.get_or(path, default))
    }

    /// Whether every path resolves non-empty — see [`Payload::has`]
    pub fn has(&self, paths: &[&str]) -> DecodeResult<bool> {
        Ok(self.payload()?.has(paths))
    }

    /// The entire decoded tree
    pub fn all(&self) -> DecodeResult<&Value> {
        Ok(self.payload()?.all())
    }

    /// Projection keeping only the given paths — see [`Payload::only`]
    pub fn only(&self, paths: &[&str]) -> DecodeResult<Value> {
        Ok(self.payload()?.only(paths))
    }

    /// Projection removing the given paths — see [`Payload::except`]
    pub fn except(&self, paths: &[&str]) -> DecodeResult<Value> {
        Ok(self.payload()?.except(paths))
    }

    /// Template-shaped projection — see [`Payload::mask`]
    pub fn mask(&self, template: &Value) -> DecodeResult<Value> {
        Ok(self.payload()?.mask(template))
    }

    /// Decode raw JSON into a payload, bypassing content-type dispatch
    pub fn json(raw: &str) -> DecodeResult<Payload> {
        JsonDecoder.decode(raw).map(Payload::new)
    }

    /// Decode raw YAML into a payload
    pub fn yaml(raw: &str) -> DecodeResult<Payload> {
        YamlDecoder.decode(raw).map(Payload::new)
    }

    /// Decode raw XML into a payload
    pub fn xml(raw: &str) -> DecodeResult<Payload> {
        XmlDecoder.decode(raw).map(Payload::new)
    }

    /// Decode a raw query string into a payload
    pub fn querystr(raw: &str) -> DecodeResult<Payload> {
        QueryStrDecoder.decode(raw).map(Payload::new)
    }

    /// Decode raw serialized data into a payload
    pub fn serialized(raw: &str) -> DecodeResult<Payload> {
        SerializeDecoder.decode(raw).map(Payload::new)
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("content_type", &self.content_type)
            .field("decoded", &self.decoded.get().is_some())
            .finish_non_exhaustive()
    }
}
