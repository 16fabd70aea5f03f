//! Path expression parsing
//!
//! Splits a path string on `.` and classifies each component. Parsing is
//! total: a component that is not one of the reserved spellings — and
//! that includes malformed `:index[…]` syntax — degrades to a literal
//! key segment, which will simply fail to resolve. There is no escaping
//! mechanism for literal dots inside keys.

use super::ast::{PathExpr, Segment};

impl PathExpr {
    /// Parse a dot-notation path string
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quarry_engine::{PathExpr, Segment};
    ///
    /// let expr = PathExpr::parse("comments.:index[1].title");
    /// assert_eq!(expr.segments().len(), 3);
    /// assert_eq!(expr.segments()[1], Segment::Index(1));
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(classify).collect(),
        }
    }
}

fn classify(component: &str) -> Segment {
    match component {
        "*" | "%" => Segment::Wildcard,
        ":first" => Segment::First,
        ":last" => Segment::Last,
        _ => index_segment(component)
            .unwrap_or_else(|| Segment::Key(component.to_string())),
    }
}

/// `:index[n]` with a non-negative integer literal, or `None` for
/// anything that deviates from that shape
fn index_segment(component: &str) -> Option<Segment> {
    let digits = component.strip_prefix(":index[")?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(Segment::Index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_spellings() {
        assert_eq!(classify("*"), Segment::Wildcard);
        assert_eq!(classify("%"), Segment::Wildcard);
        assert_eq!(classify(":first"), Segment::First);
        assert_eq!(classify(":last"), Segment::Last);
        assert_eq!(classify(":index[42]"), Segment::Index(42));
    }

    #[test]
    fn test_malformed_index_degrades_to_key() {
        for raw in [":index[", ":index[]", ":index[abc]", ":index[1", ":index[-1]"] {
            assert_eq!(classify(raw), Segment::Key(raw.to_string()));
        }
    }

    #[test]
    fn test_unusual_literal_keys_pass_through() {
        assert_eq!(classify("with spaces"), Segment::Key("with spaces".into()));
        assert_eq!(classify(":index"), Segment::Key(":index".into()));
        assert_eq!(classify(""), Segment::Key(String::new()));
    }
}
