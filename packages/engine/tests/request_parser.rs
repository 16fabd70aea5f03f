//! Request-level parser tests: content-type dispatch, decode-once
//! caching, and delegation to the payload operations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quarry_engine::{BodySource, FormatRegistry, Parser, StaticBody};
use serde_json::json;

/// Body stub that counts how often it is read
struct CountingBody {
    calls: Arc<AtomicUsize>,
    body: &'static str,
}

impl BodySource for CountingBody {
    fn raw_body(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body.to_string()
    }
}

#[test]
fn test_content_type_selects_the_decoder() {
    let parser = Parser::new(
        StaticBody::new("---\nstatus: 123\nmessage: \"hello world\""),
        Some("application/x-yaml"),
    );
    assert_eq!(
        parser.all().expect("valid YAML"),
        &json!({"status": 123, "message": "hello world"})
    );
}

#[test]
fn test_unknown_content_type_decodes_as_json() {
    let parser = Parser::new(
        StaticBody::new(r#"{"status": 123, "message": "hello world"}"#),
        Some("somerandomstuff"),
    );
    assert_eq!(
        parser.all().expect("valid JSON"),
        &json!({"status": 123, "message": "hello world"})
    );
}

#[test]
fn test_body_is_fetched_and_decoded_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let parser = Parser::new(
        CountingBody {
            calls: Arc::clone(&calls),
            body: r#"{"comments": [{"title": "hello"}, {"title": "world"}]}"#,
        },
        None,
    );

    assert_eq!(
        parser.get("comments.:last.title").expect("decodes"),
        json!("world")
    );
    assert!(parser.has(&["comments.:index[1].title"]).expect("decodes"));
    assert_eq!(
        parser.only(&["comments"]).expect("decodes")["comments"]
            .as_array()
            .expect("comments is a list")
            .len(),
        2
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_decode_failure_surfaces_the_format_error() {
    // a serialized-data content type with an XML body cannot decode
    let parser = Parser::new(
        StaticBody::new(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><xml><status>123</status></xml>",
        ),
        Some("application/vnd.php.serialized"),
    );
    let err = parser.payload().expect_err("mismatched content type");
    assert_eq!(err.to_string(), "Failed To Parse Serialized Data");
}

#[test]
fn test_query_failures_are_not_errors() {
    let parser = Parser::new(StaticBody::new(r#"{"status": 123}"#), None);
    assert_eq!(parser.get("missing.path").expect("decodes"), json!(null));
    assert_eq!(
        parser.get_or("missing", json!("fallback")).expect("decodes"),
        json!("fallback")
    );
    assert!(!parser.has(&["missing"]).expect("decodes"));
}

#[test]
fn test_projections_delegate_to_the_payload() {
    let parser = Parser::new(
        StaticBody::new(r#"{"status": 123, "message": "hello world"}"#),
        Some("application/json"),
    );

    assert_eq!(parser.only(&["status"]).expect("decodes"), json!({"status": 123}));
    assert_eq!(
        parser.except(&["message"]).expect("decodes"),
        json!({"status": 123})
    );
    assert_eq!(
        parser.mask(&json!({"message": "*"})).expect("decodes"),
        json!({"message": "hello world"})
    );
}

#[test]
fn test_custom_registry_rides_along() {
    struct Upper;
    impl quarry_engine::Decoder for Upper {
        fn format(&self) -> &'static str {
            "Upper"
        }
        fn decode(&self, raw: &str) -> quarry_engine::DecodeResult<serde_json::Value> {
            Ok(json!({"shout": raw.to_uppercase()}))
        }
    }

    let mut registry = FormatRegistry::new();
    registry.register("application/x-shout", Arc::new(Upper));
    let parser = Parser::with_registry(
        StaticBody::new("hello"),
        Some("application/x-shout"),
        registry,
    );
    assert_eq!(parser.get("shout").expect("decodes"), json!("HELLO"));
}

#[test]
fn test_direct_format_entry_points() {
    assert_eq!(
        Parser::json(r#"{"status": 123}"#).expect("valid JSON").get("status"),
        json!(123)
    );
    assert_eq!(
        Parser::yaml("status: 123").expect("valid YAML").get("status"),
        json!(123)
    );
    assert_eq!(
        Parser::xml("<xml><status>123</status></xml>")
            .expect("well-formed XML")
            .get("status"),
        json!("123")
    );
    assert_eq!(
        Parser::querystr("status=123").expect("decodes").get("status"),
        json!("123")
    );
    assert_eq!(
        Parser::serialized(r#"a:1:{s:6:"status";i:123;}"#)
            .expect("valid serialized data")
            .get("status"),
        json!(123)
    );
}
