//! JSONPath edge cases through the public API.

use std::borrow::Cow;

use jsonquill::document::JsonValue;
use jsonquill::jsonpath::{ArrayQuery, Expression, JsonPath, JsonPathError, Slice};
use serde_json::json;

fn run(path: &str, doc: serde_json::Value) -> Vec<serde_json::Value> {
    let doc = JsonValue::from(doc);
    JsonPath::parse(path)
        .unwrap()
        .evaluate(&doc)
        .into_iter()
        .map(serde_json::Value::from)
        .collect()
}

#[test]
fn test_current_root_at_top_level_starts_at_document() {
    assert_eq!(run("@.a", json!({"a": 1})), vec![json!(1)]);
}

#[test]
fn test_negative_index_out_of_range() {
    assert!(run("$[-5]", json!([1, 2])).is_empty());
}

#[test]
fn test_slice_with_step_and_negative_bounds() {
    let doc = json!([0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(run("$[1:6:2]", doc.clone()), vec![json!(1), json!(3), json!(5)]);
    assert_eq!(run("$[-3:-1]", doc.clone()), vec![json!(4), json!(5)]);
    assert_eq!(run("$[5:1:-2]", doc), vec![json!(5), json!(3)]);
}

#[test]
fn test_slice_lists_concatenate_in_order() {
    assert_eq!(
        run("$[2,0,0]", json!(["a", "b", "c"])),
        vec![json!("c"), json!("a"), json!("a")]
    );
}

#[test]
fn test_wildcard_on_scalar_is_empty() {
    assert!(run("$.*", json!(42)).is_empty());
    assert!(run("$[*]", json!("text")).is_empty());
}

#[test]
fn test_quoted_names_with_special_characters() {
    let doc = json!({"a.b": 1, "c'd": 2, "": 3, "ünï": 4});
    assert_eq!(run("$['a.b']", doc.clone()), vec![json!(1)]);
    assert_eq!(run(r#"$["c'd"]"#, doc.clone()), vec![json!(2)]);
    assert_eq!(run("$['']", doc.clone()), vec![json!(3)]);
    assert_eq!(run("$['\\u00fcn\\u00ef']", doc), vec![json!(4)]);
}

#[test]
fn test_member_named_length_needs_quotes() {
    let doc = json!({"length": 7, "items": [1, 2]});
    assert_eq!(run("$['length']", doc.clone()), vec![json!(7)]);
    assert!(run("$.length", doc.clone()).is_empty());
    assert_eq!(run("$.items.length", doc), vec![json!(2)]);
}

#[test]
fn test_filter_on_object_members() {
    let doc = json!({"a": {"on": true}, "b": {"on": false}, "c": {"on": true}});
    assert_eq!(
        run("$[?(@.on)]", doc),
        vec![json!({"on": true}), json!({"on": true})]
    );
}

#[test]
fn test_filter_with_arithmetic() {
    let doc = json!([{"w": 2, "h": 3}, {"w": 5, "h": 5}, {"w": 1, "h": 1}]);
    assert_eq!(
        run("$[?(@.w * @.h > 5)].w", doc.clone()),
        vec![json!(2), json!(5)]
    );
    assert_eq!(run("$[?(@.w % 2 == 1)].h", doc), vec![json!(5), json!(1)]);
}

#[test]
fn test_filter_with_string_concatenation() {
    let doc = json!([{"first": "a", "last": "b"}, {"first": "x", "last": "y"}]);
    assert_eq!(
        run("$[?(@.first + @.last == 'xy')].first", doc),
        vec![json!("x")]
    );
}

#[test]
fn test_filter_sub_path_with_many_matches_compares_as_array() {
    let doc = json!({
        "want": ["a", "b"],
        "rows": [{"id": 1, "tags": ["a", "b"]}, {"id": 2, "tags": ["c"]}]
    });
    assert_eq!(
        run("$.rows[?(@.tags[*] == $.want)].id", doc),
        vec![json!(1)]
    );
}

#[test]
fn test_nested_filters() {
    let doc = json!([
        {"name": "one", "items": [{"n": 1}, {"n": 9}]},
        {"name": "two", "items": [{"n": 2}]}
    ]);
    assert_eq!(
        run("$[?(@.items[?(@.n > 5)])].name", doc),
        vec![json!("one")]
    );
}

#[test]
fn test_search_then_filter_then_name() {
    let doc = json!({"a": {"list": [{"id": 1, "ok": true}]}, "b": [{"list": [{"id": 2, "ok": true}, {"id": 3}]}]});
    assert_eq!(
        run("$..list[?(@.ok == true)].id", doc),
        vec![json!(1), json!(2)]
    );
}

#[test]
fn test_select_returns_borrowed_document_nodes() {
    let doc = JsonValue::from(json!({"a": {"b": [1, 2]}}));
    let path = JsonPath::parse("$.a.b[*]").unwrap();
    let matches = path.select(&doc);
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|hit| matches!(hit, Cow::Borrowed(_))));
}

#[test]
fn test_parse_structure() {
    let path = JsonPath::parse("$.a[1:2,?(@)]");
    assert!(path.is_err(), "filters cannot be mixed into slice lists");

    let path = JsonPath::parse("$.a[ 1 : 2 ]").unwrap();
    assert_eq!(
        path,
        JsonPath::root().name("a").array(ArrayQuery::Slices(vec![Slice::Range {
            start: Some(1),
            end: Some(2),
            step: None
        }]))
    );
}

#[test]
fn test_parse_error_kinds() {
    let error = JsonPath::parse("$.a[0").unwrap_err();
    assert!(matches!(error.error(), JsonPathError::UnexpectedEnd { .. }));

    let error = JsonPath::parse("$.a[?(@.b ==)]").unwrap_err();
    assert!(matches!(
        error.error(),
        JsonPathError::UnexpectedToken { position: 12, .. }
    ));

    let error = JsonPath::parse("$ .a").unwrap_err();
    assert_eq!(error.position(), Some(1));
}

#[test]
fn test_expression_display_in_path() {
    let path = JsonPath::root().filter(Expression::Boolean(true));
    assert_eq!(path.to_string(), "$[?(true)]");
}
