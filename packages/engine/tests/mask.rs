//! Template-shaped projection tests

use quarry_engine::Payload;
use serde_json::json;

fn blog_payload() -> Payload {
    Payload::new(json!({
        "message": {"title": "Hello World", "body": "Some message content"},
        "comments": [
            {"title": "hello", "message": "hello world", "tags": ["one", "two"]},
            {"title": "world", "message": "hello world", "tags": ["red", "green"]}
        ]
    }))
}

#[test]
fn test_mask_copies_selected_leaves() {
    let payload = blog_payload();
    assert_eq!(
        payload.mask(&json!({"message": {"title": "*"}})),
        json!({"message": {"title": "Hello World"}})
    );
}

#[test]
fn test_mask_copies_whole_subtrees_verbatim() {
    let payload = blog_payload();
    assert_eq!(
        payload.mask(&json!({"comments": "*"})),
        json!({"comments": [
            {"title": "hello", "message": "hello world", "tags": ["one", "two"]},
            {"title": "world", "message": "hello world", "tags": ["red", "green"]}
        ]})
    );
}

#[test]
fn test_mask_null_fills_absent_keys() {
    let payload = blog_payload();
    assert_eq!(payload.mask(&json!({"posts": "*"})), json!({"posts": null}));
    assert_eq!(
        payload.mask(&json!({"posts": {"title": "*"}})),
        json!({"posts": null})
    );
}

#[test]
fn test_mask_nested_recursion_requires_a_map() {
    let payload = blog_payload();
    // comments is a list, so a nested template cannot recurse into it
    assert_eq!(
        payload.mask(&json!({"comments": {"title": "*"}})),
        json!({"comments": null})
    );
}

#[test]
fn test_mask_result_has_exactly_the_template_shape() {
    let payload = blog_payload();
    let masked = payload.mask(&json!({
        "message": {"title": "*", "missing": "*"},
        "absent": {"deep": "*"}
    }));
    assert_eq!(
        masked,
        json!({
            "message": {"title": "Hello World", "missing": null},
            "absent": null
        })
    );
}

#[test]
fn test_mask_skips_non_selector_template_leaves() {
    let payload = blog_payload();
    // only "*" leaves and nested maps select; other leaves are ignored
    assert_eq!(
        payload.mask(&json!({"message": {"title": 1, "body": "*"}})),
        json!({"message": {"body": "Some message content"}})
    );
}

#[test]
fn test_mask_treats_empty_values_as_absent() {
    let payload = Payload::new(json!({"note": "", "gone": null, "kept": "x"}));
    assert_eq!(
        payload.mask(&json!({"note": "*", "gone": "*", "kept": "*"})),
        json!({"note": null, "gone": null, "kept": "x"})
    );
}

#[test]
fn test_mask_never_mutates_the_payload() {
    let payload = blog_payload();
    let before = payload.all().clone();
    let _ = payload.mask(&json!({"message": {"title": "*"}, "comments": "*"}));
    assert_eq!(payload.all(), &before);
}
