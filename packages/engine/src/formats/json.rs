//! JSON decoding

use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};

use super::Decoder;

/// JSON decoder, also the fallback for unknown content types
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn format(&self) -> &'static str {
        "JSON"
    }

    fn decode(&self, raw: &str) -> DecodeResult<Value> {
        if raw.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(raw).map_err(DecodeError::Json)
    }
}
