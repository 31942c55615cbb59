//! Tests for output shape construction and its JSON form.

use coursewright_structured::{OutputShape, ShapeField};
use serde_json::json;

#[test]
fn test_declaration_order_is_kept() {
    let shape = OutputShape::new()
        .text("zeta", "last letter")
        .text("alpha", "first letter");
    assert_eq!(shape.to_json_string(), r#"{"zeta":"last letter","alpha":"first letter"}"#);
}

#[test]
fn test_replacing_a_field_keeps_position() {
    let shape = OutputShape::new()
        .text("a", "one")
        .text("b", "two")
        .one_of("a", ["x", "y"]);
    let keys: Vec<_> = shape.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(shape.get("a"), Some(&ShapeField::OneOf(vec!["x".into(), "y".into()])));
}

#[test]
fn test_required_keys_skip_placeholders() {
    let shape = OutputShape::new()
        .text("<location>", "description of location")
        .text("name", "name of the place");
    let keys: Vec<_> = shape.required_keys().collect();
    assert_eq!(keys, vec!["name"]);
    assert!(shape.has_dynamic_fields());
}

#[test]
fn test_placeholder_in_value_is_dynamic() {
    let shape = OutputShape::new().text("directions", "Go to <location>");
    assert!(shape.has_dynamic_fields());
}

#[test]
fn test_nested_list_fields_detected() {
    let shape = OutputShape::new()
        .text("title", "title")
        .nested("meta", OutputShape::new().one_of("level", ["easy", "hard"]));
    assert!(shape.has_list_fields());
    assert!(!OutputShape::new().text("a", "b").has_list_fields());
}

#[test]
fn test_from_json() {
    let shape = OutputShape::try_from(json!({
        "summary": "summary text",
        "sentiment": ["positive", "negative"],
        "meta": {"author": "who wrote it"}
    }))
    .expect("valid shape");

    assert_eq!(shape.len(), 3);
    assert_eq!(shape.get("summary"), Some(&ShapeField::Text("summary text".into())));
    assert!(matches!(shape.get("meta"), Some(ShapeField::Nested(_))));
}

#[test]
fn test_from_json_rejects_numbers() {
    assert!(OutputShape::try_from(json!({"count": 3})).is_err());
    assert!(OutputShape::try_from(json!({"tags": ["a", 1]})).is_err());
    assert!(OutputShape::try_from(json!(["a"])).is_err());
}

#[test]
fn test_serde_uses_json_form() {
    let shape: OutputShape =
        serde_json::from_str(r#"{"question":"question","level":["easy","hard"]}"#)
            .expect("deserializes");
    assert_eq!(
        serde_json::to_string(&shape).expect("serializes"),
        r#"{"question":"question","level":["easy","hard"]}"#
    );
}
