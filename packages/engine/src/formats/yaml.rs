//! YAML decoding

use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};

use super::Decoder;

/// YAML decoder
///
/// Empty or whitespace-only input decodes to an empty map rather than
/// failing; an empty request body is not an error.
pub struct YamlDecoder;

impl Decoder for YamlDecoder {
    fn format(&self) -> &'static str {
        "YAML"
    }

    fn decode(&self, raw: &str) -> DecodeResult<Value> {
        if raw.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_yaml::from_str(raw).map_err(DecodeError::Yaml)
    }
}
