//! Content-type to decoder registry
//!
//! A lookup table from declared content types to decoder instances.
//! Built-in mappings cover the five supported formats; runtime
//! registrations take precedence over them. Unknown or absent content
//! types fall back to the JSON decoder.

use std::sync::Arc;

use hashbrown::HashMap;
use tracing::debug;

use super::{Decoder, JsonDecoder, QueryStrDecoder, SerializeDecoder, XmlDecoder, YamlDecoder};

/// Registry of content-type → decoder mappings
///
/// Lookup keys are normalized first: anything after a `;` (charset and
/// other parameters) is stripped, surrounding whitespace removed, and
/// the remainder ASCII-lowercased.
#[derive(Default, Clone)]
pub struct FormatRegistry {
    custom: HashMap<String, Arc<dyn Decoder>>,
}

impl FormatRegistry {
    /// Registry with only the built-in mappings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a content type to a decoder, shadowing any built-in mapping
    pub fn register(&mut self, content_type: impl Into<String>, decoder: Arc<dyn Decoder>) {
        let normalized = normalize(&content_type.into());
        debug!(
            content_type = %normalized,
            format = decoder.format(),
            "registering custom format mapping"
        );
        self.custom.insert(normalized, decoder);
    }

    /// Decoder for a declared content type
    ///
    /// Custom registrations are consulted first, then the built-in
    /// table; everything else resolves to the JSON decoder.
    #[must_use]
    pub fn resolve(&self, content_type: Option<&str>) -> Arc<dyn Decoder> {
        let Some(raw) = content_type else {
            return Arc::new(JsonDecoder);
        };
        let normalized = normalize(raw);
        if let Some(decoder) = self.custom.get(&normalized) {
            debug!(content_type = %normalized, format = decoder.format(), "resolved custom format");
            return Arc::clone(decoder);
        }
        builtin(&normalized).unwrap_or_else(|| Arc::new(JsonDecoder))
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn normalize(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

fn builtin(content_type: &str) -> Option<Arc<dyn Decoder>> {
    let decoder: Arc<dyn Decoder> = match content_type {
        "application/json"
        | "application/x-javascript"
        | "text/javascript"
        | "text/x-javascript"
        | "text/x-json" => Arc::new(JsonDecoder),
        "application/xml" | "text/xml" => Arc::new(XmlDecoder),
        "text/yaml" | "text/x-yaml" | "application/yaml" | "application/x-yaml" => {
            Arc::new(YamlDecoder)
        }
        "application/vnd.php.serialized" => Arc::new(SerializeDecoder),
        "application/x-www-form-urlencoded" => Arc::new(QueryStrDecoder),
        _ => return None,
    };
    Some(decoder)
}
