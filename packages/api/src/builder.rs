//! Fluent configuration for request-level parsing
//!
//! Collects the declared content type and any custom format
//! registrations, then produces a [`Parser`] once a body source is
//! attached.

use std::sync::Arc;

use quarry_engine::{BodySource, Decoder, FormatRegistry, Parser, StaticBody};

/// Builder for a request-level [`Parser`]
///
/// ```rust
/// use quarry::Quarry;
///
/// let parser = Quarry::builder()
///     .content_type("application/x-www-form-urlencoded")
///     .body("status=123&message=hello");
///
/// assert_eq!(parser.get("status").expect("decodes"), serde_json::json!("123"));
/// ```
#[derive(Default)]
pub struct ParserBuilder {
    content_type: Option<String>,
    registry: FormatRegistry,
}

impl ParserBuilder {
    /// Builder with built-in format mappings and no content type
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the request's content type
    ///
    /// Content types not present in the registry decode as JSON.
    #[must_use]
    pub fn content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Map a content type to a custom decoder, shadowing built-ins
    #[must_use]
    pub fn register_format(
        mut self,
        content_type: &str,
        decoder: Arc<dyn Decoder>,
    ) -> Self {
        self.registry.register(content_type, decoder);
        self
    }

    /// Finish with a body captured up front
    #[must_use]
    pub fn body(self, raw: impl Into<String>) -> Parser {
        self.source(StaticBody::new(raw))
    }

    /// Finish with a lazy body source
    ///
    /// The source is consulted at most once, on first payload access.
    #[must_use]
    pub fn source(self, source: impl BodySource + 'static) -> Parser {
        Parser::with_registry(source, self.content_type.as_deref(), self.registry)
    }
}
