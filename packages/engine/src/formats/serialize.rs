//! PHP-serialized data decoding
//!
//! Recursive-descent reader over the `serialize()` wire grammar:
//! `N;`, `b:0;`/`b:1;`, `i:n;`, `d:f;`, `s:len:"…";` and
//! `a:count:{key value …}`. String lengths count bytes. An array whose
//! keys are exactly the integers `0..n-1` in order decodes as a list,
//! any other array as a map with stringified keys, matching how the
//! originating runtime distinguishes the two.

use serde_json::{Map, Number, Value};

use crate::error::{DecodeError, DecodeResult};

use super::Decoder;

/// Serialized-data decoder
pub struct SerializeDecoder;

impl Decoder for SerializeDecoder {
    fn format(&self) -> &'static str {
        "Serialized Data"
    }

    fn decode(&self, raw: &str) -> DecodeResult<Value> {
        let mut reader = Reader::new(raw.trim());
        let value = reader.read_value()?;
        reader.expect_end()?;
        Ok(value)
    }
}

/// Byte cursor over one serialized value
struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn fail(&self, detail: &str) -> DecodeError {
        DecodeError::Serialized(format!("{detail} at byte {}", self.pos))
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> DecodeResult<u8> {
        let byte = self.peek().ok_or_else(|| self.fail("unexpected end of input"))?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> DecodeResult<()> {
        let byte = self.bump()?;
        if byte != expected {
            self.pos -= 1;
            return Err(self.fail(&format!("expected '{}'", expected as char)));
        }
        Ok(())
    }

    fn expect_end(&self) -> DecodeResult<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.fail("trailing data after value"))
        }
    }

    fn read_value(&mut self) -> DecodeResult<Value> {
        match self.bump()? {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let flag = self.bump()?;
                self.expect(b';')?;
                match flag {
                    b'0' => Ok(Value::Bool(false)),
                    b'1' => Ok(Value::Bool(true)),
                    _ => Err(self.fail("invalid boolean")),
                }
            }
            b'i' => {
                self.expect(b':')?;
                let n = self.read_int()?;
                self.expect(b';')?;
                Ok(Value::Number(Number::from(n)))
            }
            b'd' => {
                self.expect(b':')?;
                let f = self.read_float()?;
                self.expect(b';')?;
                Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| self.fail("non-finite float"))
            }
            b's' => {
                let s = self.read_string_body()?;
                Ok(Value::String(s))
            }
            b'a' => self.read_array(),
            _ => {
                self.pos -= 1;
                Err(self.fail("unsupported token"))
            }
        }
    }

    fn read_array(&mut self) -> DecodeResult<Value> {
        self.expect(b':')?;
        let count = self.read_len()?;
        self.expect(b':')?;
        self.expect(b'{')?;

        // count is attacker-controlled, cap the upfront reservation
        let mut entries: Vec<(ArrayKey, Value)> = Vec::with_capacity(count.min(256));
        for _ in 0..count {
            let key = self.read_key()?;
            let value = self.read_value()?;
            entries.push((key, value));
        }
        self.expect(b'}')?;

        // integer keys 0..n-1 in order mean a list, anything else a map
        let sequential = entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, ArrayKey::Int(n) if *n == i as i64));

        if sequential {
            Ok(Value::Array(entries.into_iter().map(|(_, v)| v).collect()))
        } else {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key.into_string(), value);
            }
            Ok(Value::Object(map))
        }
    }

    fn read_key(&mut self) -> DecodeResult<ArrayKey> {
        match self.bump()? {
            b'i' => {
                self.expect(b':')?;
                let n = self.read_int()?;
                self.expect(b';')?;
                Ok(ArrayKey::Int(n))
            }
            b's' => Ok(ArrayKey::Str(self.read_string_body()?)),
            _ => {
                self.pos -= 1;
                Err(self.fail("invalid array key"))
            }
        }
    }

    /// `:len:"bytes";` — the leading `s` has already been consumed
    fn read_string_body(&mut self) -> DecodeResult<String> {
        self.expect(b':')?;
        let len = self.read_len()?;
        self.expect(b':')?;
        self.expect(b'"')?;

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or_else(|| self.fail("string length out of range"))?;
        let bytes = &self.input[self.pos..end];
        let s = std::str::from_utf8(bytes)
            .map_err(|_| self.fail("string is not valid UTF-8"))?
            .to_string();
        self.pos = end;

        self.expect(b'"')?;
        self.expect(b';')?;
        Ok(s)
    }

    fn read_int(&mut self) -> DecodeResult<i64> {
        let digits = self.take_while(|b| b == b'-' || b.is_ascii_digit());
        digits
            .parse()
            .map_err(|_| self.fail("invalid integer"))
    }

    fn read_len(&mut self) -> DecodeResult<usize> {
        let digits = self.take_while(|b| b.is_ascii_digit());
        digits.parse().map_err(|_| self.fail("invalid length"))
    }

    fn read_float(&mut self) -> DecodeResult<f64> {
        let text = self.take_while(|b| b != b';');
        text.parse().map_err(|_| self.fail("invalid float"))
    }

    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&keep) {
            self.pos += 1;
        }
        // the grammar only feeds ASCII spans here, slicing is char-safe
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }
}

enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    fn into_string(self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_productions() {
        let decoder = SerializeDecoder;
        assert_eq!(decoder.decode("N;").expect("null"), Value::Null);
        assert_eq!(decoder.decode("b:1;").expect("bool"), Value::Bool(true));
        assert_eq!(decoder.decode("i:-42;").expect("int"), serde_json::json!(-42));
        assert_eq!(
            decoder.decode("s:5:\"hello\";").expect("string"),
            serde_json::json!("hello")
        );
    }

    #[test]
    fn test_trailing_garbage_fails() {
        assert!(SerializeDecoder.decode("i:1;i:2;").is_err());
    }
}
