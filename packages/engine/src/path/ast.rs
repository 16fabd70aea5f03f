//! Path expression AST
//!
//! Type definitions for the parsed form of a dot-notation path.

/// One atomic step of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact map-key lookup (`email`, `title`)
    Key(String),

    /// First positional element, spelled `*` or `%`
    Wildcard,

    /// First positional element, spelled `:first`
    ///
    /// Semantically identical to [`Segment::Wildcard`]; the spelling is
    /// preserved so expressions round-trip faithfully.
    First,

    /// Last positional element, spelled `:last`
    Last,

    /// Zero-based positional element, spelled `:index[n]`
    Index(usize),
}

/// A parsed dot-notation path
///
/// Segment order is fixed by the path string; the resolver walks them
/// front to back with no reordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    pub(crate) segments: Vec<Segment>,
}

impl PathExpr {
    /// Segments in evaluation order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
