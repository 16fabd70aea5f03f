//! Public API facade tests

use std::sync::Arc;

use quarry::{Decoder, Quarry};
use serde::Serialize;
use serde_json::json;

#[test]
fn test_json_shorthand() {
    let payload = Quarry::json(r#"{"status": 123, "message": "hello world"}"#)
        .expect("valid JSON");
    assert_eq!(payload.get("status"), json!(123));
    assert_eq!(payload.all(), &json!({"status": 123, "message": "hello world"}));
}

#[test]
fn test_yaml_shorthand_accepts_empty_documents() {
    assert_eq!(Quarry::yaml("").expect("empty body").all(), &json!({}));
    let err = Quarry::yaml("items: [1, 2").expect_err("malformed YAML");
    assert_eq!(err.to_string(), "Failed To Parse YAML");
}

#[test]
fn test_form_shorthand() {
    let payload = Quarry::form("status=123&message=hello+world").expect("decodes");
    assert_eq!(payload.get("message"), json!("hello world"));
}

#[test]
fn test_from_value_wraps_existing_trees() {
    let payload = Quarry::from_value(json!({"email": {"to": "jane@example.com"}}));
    assert_eq!(payload.get("email.*"), json!("jane@example.com"));
}

#[test]
fn test_from_data_serializes_typed_input() {
    #[derive(Serialize)]
    struct Note {
        title: String,
        tags: Vec<String>,
    }

    let payload = Quarry::from_data(&Note {
        title: "hello".to_string(),
        tags: vec!["a".to_string(), "b".to_string()],
    })
    .expect("serializable");

    assert_eq!(payload.get("title"), json!("hello"));
    assert_eq!(payload.get("tags.:last"), json!("b"));
}

#[test]
fn test_builder_wires_content_type_and_body() {
    let parser = Quarry::builder()
        .content_type("text/yaml")
        .body("status: 123");
    assert_eq!(parser.get("status").expect("decodes"), json!(123));
}

#[test]
fn test_builder_registers_custom_formats() {
    struct Csvish;
    impl Decoder for Csvish {
        fn format(&self) -> &'static str {
            "Csvish"
        }
        fn decode(&self, raw: &str) -> quarry::DecodeResult<serde_json::Value> {
            let fields: Vec<serde_json::Value> =
                raw.trim().split(',').map(|f| json!(f)).collect();
            Ok(json!({"fields": fields}))
        }
    }

    let parser = Quarry::builder()
        .register_format("application/x-custom-format", Arc::new(Csvish))
        .content_type("application/x-custom-format")
        .body("a,b,c");

    assert_eq!(
        parser.get("fields").expect("decodes"),
        json!(["a", "b", "c"])
    );
    assert_eq!(parser.get("fields.:index[1]").expect("decodes"), json!("b"));
}

#[test]
fn test_projections_through_the_facade() {
    let payload = Quarry::json(
        r#"{"id": 123, "note": {"headers": {"to": "a@x.com", "from": "b@x.com"}, "body": "B"}}"#,
    )
    .expect("valid JSON");

    assert_eq!(
        payload.only(&["note.headers.to", "id"]),
        json!({"note": {"headers": {"to": "a@x.com"}}, "id": 123})
    );
    assert_eq!(
        payload.except(&["note.headers.to"]),
        json!({"id": 123, "note": {"headers": {"from": "b@x.com"}, "body": "B"}})
    );
    assert_eq!(
        payload.mask(&json!({"note": {"body": "*"}})),
        json!({"note": {"body": "B"}})
    );
}
