// tests/document_tests.rs
use jsonquill::document::{
    DocumentError, DocumentSeed, DuplicateKeys, JsonObject, JsonType, JsonValue, ObjectBuilder,
};
use serde::de::DeserializeSeed;
use serde_json::json;

// ============================================================================
// Value Model Tests
// ============================================================================

#[test]
fn test_value_types() {
    let cases = [
        (JsonValue::Null, JsonType::Null, "null"),
        (JsonValue::from(true), JsonType::Boolean, "boolean"),
        (JsonValue::from(1.5), JsonType::Number, "number"),
        (JsonValue::from("s"), JsonType::String, "string"),
        (JsonValue::from(Vec::<JsonValue>::new()), JsonType::Array, "array"),
        (JsonValue::Object(JsonObject::new()), JsonType::Object, "object"),
    ];
    for (value, kind, name) in cases {
        assert_eq!(value.value_type(), kind);
        assert_eq!(kind.to_string(), name);
    }
}

#[test]
fn test_accessors() {
    let value = JsonValue::from(json!({"s": "text", "n": 2, "b": false, "a": [1, 2]}));
    assert_eq!(value.get("s").and_then(JsonValue::as_str), Some("text"));
    assert_eq!(value.get("n").and_then(JsonValue::as_f64), Some(2.0));
    assert_eq!(value.get("b").and_then(JsonValue::as_bool), Some(false));
    assert_eq!(
        value.get("a").and_then(|a| a.get_index(1)),
        Some(&JsonValue::Number(2.0))
    );
    assert_eq!(value.get("missing"), None);
    assert_eq!(value.get("s").and_then(JsonValue::as_f64), None);
    assert!(value.is_container());
    assert!(!JsonValue::Null.is_container());
}

#[test]
fn test_children_in_document_order() {
    let value = JsonValue::from(json!({"z": 1, "a": 2, "m": 3}));
    let children: Vec<f64> = value
        .children()
        .into_iter()
        .filter_map(JsonValue::as_f64)
        .collect();
    assert_eq!(children, vec![1.0, 2.0, 3.0]);
    assert!(JsonValue::from("leaf").children().is_empty());
}

// ============================================================================
// Equality Tests
// ============================================================================

#[test]
fn test_structural_equality_ignores_key_order() {
    let left = JsonValue::from(json!({"a": 1, "b": [1, {"c": null}]}));
    let right = JsonValue::from(json!({"b": [1, {"c": null}], "a": 1.0}));
    assert_eq!(left, right);
}

#[test]
fn test_array_order_matters() {
    assert_ne!(JsonValue::from(json!([1, 2])), JsonValue::from(json!([2, 1])));
}

#[test]
fn test_distinct_types_are_unequal() {
    assert_ne!(JsonValue::from(json!(0)), JsonValue::from(json!(false)));
    assert_ne!(JsonValue::from(json!("1")), JsonValue::from(json!(1)));
    assert_ne!(JsonValue::Null, JsonValue::from(json!({})));
}

// ============================================================================
// Duplicate Key Policy Tests
// ============================================================================

#[test]
fn test_builder_overwrite() {
    let mut builder = ObjectBuilder::new(DuplicateKeys::Overwrite);
    builder.insert("x", 1).unwrap().insert("y", 2).unwrap();
    builder.insert("x", 3).unwrap();
    let value = builder.build();

    assert_eq!(value, JsonValue::from(json!({"x": 3, "y": 2})));
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["x", "y"]);
}

#[test]
fn test_builder_reject() {
    let mut builder = ObjectBuilder::new(DuplicateKeys::Reject);
    builder.insert("x", 1).unwrap();
    let error = builder.insert("x", 2).unwrap_err();
    assert_eq!(error, DocumentError::DuplicateKey("x".to_string()));
}

#[test]
fn test_from_entries_policies() {
    let entries = || vec![("k", JsonValue::from(1)), ("k", JsonValue::from(2))];
    assert_eq!(
        JsonValue::from_entries(entries(), DuplicateKeys::Overwrite),
        Ok(JsonValue::from(json!({"k": 2})))
    );
    assert!(JsonValue::from_entries(entries(), DuplicateKeys::Reject).is_err());
}

#[test]
fn test_seed_applies_policy_at_every_depth() {
    let text = r#"[{"ok": 1}, {"deep": {"k": 1, "k": 2}}]"#;

    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = DocumentSeed(DuplicateKeys::Overwrite)
        .deserialize(&mut deserializer)
        .unwrap();
    assert_eq!(value.pointer("/1/deep/k"), Some(&JsonValue::Number(2.0)));

    let mut deserializer = serde_json::Deserializer::from_str(text);
    assert!(DocumentSeed(DuplicateKeys::Reject)
        .deserialize(&mut deserializer)
        .is_err());
}

#[test]
fn test_policy_serde_names() {
    assert_eq!(
        serde_json::to_value(DuplicateKeys::Reject).unwrap(),
        json!("reject")
    );
    assert_eq!(
        serde_json::from_value::<DuplicateKeys>(json!("overwrite")).unwrap(),
        DuplicateKeys::Overwrite
    );
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn test_serde_json_round_trip_keeps_order() {
    let original = json!({"b": 1, "a": {"d": [true, null], "c": "x"}});
    let value = JsonValue::from(original.clone());
    let text = serde_json::to_string(&value).unwrap();
    assert_eq!(text, r#"{"b":1,"a":{"d":[true,null],"c":"x"}}"#);
    assert_eq!(serde_json::Value::from(value), original);
}

#[test]
fn test_non_finite_number_serializes_as_null() {
    let value = JsonValue::from(vec![JsonValue::Number(f64::NAN), JsonValue::Number(1.25)]);
    assert_eq!(serde_json::Value::from(value), json!([null, 1.25]));
}

#[test]
fn test_collect_into_array() {
    let value: JsonValue = (1..=3i32).map(JsonValue::from).collect();
    assert_eq!(value, JsonValue::from(json!([1, 2, 3])));
}
