//! Format decoders and the content-type registry
//!
//! Each supported format is a single-pass decoder from raw text to one
//! value tree. Decoders either succeed or fail with an error naming the
//! format; nothing here retains state between calls. The registry maps
//! declared content types to decoders and supports runtime registration
//! of additional mappings.

mod json;
mod querystr;
mod registry;
mod serialize;
mod xml;
mod yaml;

pub use self::{
    json::JsonDecoder, querystr::QueryStrDecoder, registry::FormatRegistry,
    serialize::SerializeDecoder, xml::XmlDecoder, yaml::YamlDecoder,
};

use serde_json::Value;

use crate::error::DecodeResult;

/// A single-format decoder turning raw request text into a value tree
///
/// Implementations must be pure: one input, one decode, no state. A
/// failed decode reports [`DecodeError`](crate::error::DecodeError) with
/// the format's name in the message.
pub trait Decoder: Send + Sync {
    /// Human-readable format name, as it appears in decode errors
    fn format(&self) -> &'static str;

    /// Decode raw text into a value tree
    fn decode(&self, raw: &str) -> DecodeResult<Value>;
}
