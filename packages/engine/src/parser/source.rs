//! Raw body acquisition

/// Source of the raw, undecoded request body
///
/// The parser pulls the body through this trait at most once per
/// logical request — the decoded tree is cached afterwards. Injecting a
/// source is also how tests exercise the parser without any transport
/// machinery: implement the trait on a stub and hand it to
/// [`Parser::new`](crate::Parser::new).
pub trait BodySource: Send + Sync {
    /// The raw payload text
    fn raw_body(&self) -> String;
}

/// A body captured up front
///
/// ```rust
/// use quarry_engine::{Parser, StaticBody};
///
/// let parser = Parser::new(StaticBody::new(r#"{"status": 123}"#), None);
/// assert_eq!(parser.get("status").expect("decodes"), serde_json::json!(123));
/// ```
pub struct StaticBody {
    body: String,
}

impl StaticBody {
    /// Wrap an already-read body
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl BodySource for StaticBody {
    fn raw_body(&self) -> String {
        self.body.clone()
    }
}
