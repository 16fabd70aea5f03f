//! XML decoding
//!
//! Single-pass element parser, no external XML machinery. The root
//! element's children become the top-level map (the root tag itself is
//! discarded), a text-only element becomes a string, repeated sibling
//! tags collapse into a list, and attributes land under `@attributes`.
//! Prologs, comments, DOCTYPE declarations and CDATA sections are
//! handled; namespaces are not interpreted, prefixed names stay literal.

use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeResult};

use super::Decoder;

/// Attribute maps are keyed under this name, alongside child elements
const ATTRIBUTES_KEY: &str = "@attributes";

/// XML decoder
pub struct XmlDecoder;

impl Decoder for XmlDecoder {
    fn format(&self) -> &'static str {
        "XML"
    }

    fn decode(&self, raw: &str) -> DecodeResult<Value> {
        let mut reader = XmlReader::new(raw);
        reader.skip_misc();
        let (_root, value) = reader.read_element()?;
        reader.skip_misc();
        reader.expect_end()?;
        Ok(value)
    }
}

/// Byte cursor over one XML document
///
/// Structure characters are all ASCII, so byte positions stay on char
/// boundaries wherever the input is sliced.
struct XmlReader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> XmlReader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn fail(&self, detail: &str) -> DecodeError {
        DecodeError::Xml(format!("{detail} at byte {}", self.pos))
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.rest().bytes().next()
    }

    fn expect(&mut self, expected: u8) -> DecodeResult<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.fail(&format!("expected '{}'", expected as char)))
        }
    }

    fn expect_end(&self) -> DecodeResult<()> {
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(self.fail("trailing data after document element"))
        }
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    /// Whitespace, XML/processing-instruction prologs, comments and
    /// DOCTYPE declarations — everything allowed around elements
    fn skip_misc(&mut self) {
        loop {
            self.skip_ws();
            if self.rest().starts_with("<?") {
                self.skip_until("?>");
            } else if self.rest().starts_with("<!--") {
                self.skip_until("-->");
            } else if self.rest().starts_with("<!DOCTYPE") {
                self.skip_until(">");
            } else {
                return;
            }
        }
    }

    /// Advance past the next occurrence of `marker`, or to end of input
    fn skip_until(&mut self, marker: &str) {
        match self.rest().find(marker) {
            Some(offset) => self.pos += offset + marker.len(),
            None => self.pos = self.input.len(),
        }
    }

    /// `<name attr="…" …>content</name>` or `<name …/>`
    fn read_element(&mut self) -> DecodeResult<(&'a str, Value)> {
        self.expect(b'<')?;
        let name = self.read_name()?;
        let attributes = self.read_attributes()?;

        if self.rest().starts_with("/>") {
            self.pos += 2;
            return Ok((name, build_element(attributes, Vec::new(), String::new())));
        }
        self.expect(b'>')?;

        let mut children: Vec<(String, Value)> = Vec::new();
        let mut text = String::new();
        loop {
            if self.rest().starts_with("</") {
                self.pos += 2;
                let close = self.read_name()?;
                if close != name {
                    return Err(self.fail(&format!("mismatched closing tag '{close}'")));
                }
                self.skip_ws();
                self.expect(b'>')?;
                return Ok((name, build_element(attributes, children, text)));
            }

            match self.peek() {
                None => return Err(self.fail("unexpected end of input inside element")),
                Some(b'<') if self.rest().starts_with("<!--") => self.skip_until("-->"),
                Some(b'<') if self.rest().starts_with("<![CDATA[") => {
                    self.pos += "<![CDATA[".len();
                    let end = self
                        .rest()
                        .find("]]>")
                        .ok_or_else(|| self.fail("unterminated CDATA section"))?;
                    text.push_str(&self.rest()[..end]);
                    self.pos += end + "]]>".len();
                }
                Some(b'<') => {
                    let (child_name, child) = self.read_element()?;
                    push_child(&mut children, child_name, child);
                }
                Some(_) => {
                    let chunk_end = self.rest().find('<').unwrap_or(self.rest().len());
                    text.push_str(&decode_entities(&self.rest()[..chunk_end], self.pos)?);
                    self.pos += chunk_end;
                }
            }
        }
    }

    fn read_name(&mut self) -> DecodeResult<&'a str> {
        let rest = self.rest();
        let end = rest
            .bytes()
            .position(|b| !is_name_byte(b))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.fail("expected a tag name"));
        }
        self.pos += end;
        Ok(&rest[..end])
    }

    fn read_attributes(&mut self) -> DecodeResult<Vec<(String, String)>> {
        let mut attributes = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'>') | Some(b'/') => return Ok(attributes),
                None => return Err(self.fail("unexpected end of input inside tag")),
                Some(_) => {
                    let name = self.read_name()?;
                    self.skip_ws();
                    self.expect(b'=')?;
                    self.skip_ws();
                    let quote = match self.peek() {
                        Some(q @ (b'"' | b'\'')) => q,
                        _ => return Err(self.fail("expected a quoted attribute value")),
                    };
                    self.pos += 1;
                    let end = self
                        .rest()
                        .find(quote as char)
                        .ok_or_else(|| self.fail("unterminated attribute value"))?;
                    let value = decode_entities(&self.rest()[..end], self.pos)?;
                    self.pos += end + 1;
                    attributes.push((name.to_string(), value));
                }
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.')
}

/// Assemble an element's decoded value from its parts
///
/// Text-only elements decode to a string; elements with children (or
/// attributes) decode to a map, with interleaved non-whitespace text
/// kept under `"0"` when there are no children to attach it to.
fn build_element(
    attributes: Vec<(String, String)>,
    children: Vec<(String, Value)>,
    text: String,
) -> Value {
    let text = text.trim().to_string();

    if attributes.is_empty() && children.is_empty() {
        return if text.is_empty() {
            Value::Object(Map::new())
        } else {
            Value::String(text)
        };
    }

    let mut map = Map::new();
    if !attributes.is_empty() {
        let mut attr_map = Map::new();
        for (name, value) in attributes {
            attr_map.insert(name, Value::String(value));
        }
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attr_map));
    }
    if children.is_empty() {
        if !text.is_empty() {
            map.insert("0".to_string(), Value::String(text));
        }
    } else {
        for (name, value) in children {
            map.insert(name, value);
        }
    }
    Value::Object(map)
}

/// Coalesce repeated sibling tags into a list at first-occurrence order
fn push_child(children: &mut Vec<(String, Value)>, name: &str, value: Value) {
    if let Some((_, existing)) = children.iter_mut().find(|(n, _)| n == name) {
        if let Value::Array(items) = existing {
            items.push(value);
        } else {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    } else {
        children.push((name.to_string(), value));
    }
}

/// Decode the predefined entities plus numeric character references
fn decode_entities(text: &str, base: usize) -> DecodeResult<String> {
    if !text.contains('&') {
        return Ok(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let semi = rest
            .find(';')
            .filter(|&i| i <= 10)
            .ok_or_else(|| DecodeError::Xml(format!("unterminated entity at byte {base}")))?;
        let entity = &rest[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => out.push(numeric_entity(entity).ok_or_else(|| {
                DecodeError::Xml(format!("unknown entity '&{entity};' at byte {base}"))
            })?),
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entities() {
        assert_eq!(
            decode_entities("a &amp; b &lt;c&gt; &#33;", 0).expect("valid entities"),
            "a & b <c> !"
        );
        assert!(decode_entities("bad &nope; entity", 0).is_err());
    }

    #[test]
    fn test_repeated_tags_collapse_into_list() {
        let value = XmlDecoder
            .decode("<xml><tag>one</tag><tag>two</tag></xml>")
            .expect("well-formed");
        assert_eq!(value, json!({"tag": ["one", "two"]}));
    }
}
