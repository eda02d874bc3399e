//! JSON value representation.
//!
//! This module provides the core data structure shared by the pointer, path and
//! patch engines. Every JSON value is a `JsonValue`; objects keep their keys in
//! insertion order so that wildcard queries and serialization reproduce the
//! order in which the document was built.
//!
//! # Example
//!
//! ```
//! use jsonquill::document::node::{JsonType, JsonValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonValue::from("jsonquill"));
//! map.insert("version".to_string(), JsonValue::from(1));
//! let object = JsonValue::Object(map);
//!
//! assert_eq!(object.value_type(), JsonType::Object);
//! assert_eq!(object.get("name").and_then(JsonValue::as_str), Some("jsonquill"));
//! ```

use std::fmt;

use indexmap::IndexMap;

/// An ordered JSON object.
pub type JsonObject = IndexMap<String, JsonValue>;

/// A JSON value.
///
/// Equality is structural: two independently built trees with the same shape
/// and values compare equal. Object comparison ignores key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// JSON `null`
    #[default]
    Null,
    /// JSON `true` / `false`
    Boolean(bool),
    /// A JSON number
    Number(f64),
    /// A JSON string
    String(String),
    /// An ordered sequence of values
    Array(Vec<JsonValue>),
    /// Key-value pairs in insertion order
    Object(JsonObject),
}

/// The tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(name)
    }
}

impl JsonValue {
    /// Returns the type tag of this value.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonquill::document::node::{JsonType, JsonValue};
    ///
    /// assert_eq!(JsonValue::Null.value_type(), JsonType::Null);
    /// assert_eq!(JsonValue::from(1.5).value_type(), JsonType::Number);
    /// ```
    pub fn value_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Looks up a key when this value is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up an element when this value is an array.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Returns the children of a container in document order.
    ///
    /// Object values come back in insertion order, array elements in index
    /// order. Scalars have no children.
    pub fn children(&self) -> Vec<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.values().collect(),
            JsonValue::Array(items) => items.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Number(f64::from(value))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(value as f64)
    }
}

impl From<usize> for JsonValue {
    fn from(value: usize) -> Self {
        JsonValue::Number(value as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(items: Vec<JsonValue>) -> Self {
        JsonValue::Array(items)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(map: JsonObject) -> Self {
        JsonValue::Object(map)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JsonValue {
        let mut map = JsonObject::new();
        map.insert("b".to_string(), JsonValue::from(1));
        map.insert("a".to_string(), JsonValue::from(vec![JsonValue::Null]));
        JsonValue::Object(map)
    }

    #[test]
    fn test_value_type_display() {
        assert_eq!(JsonType::Object.to_string(), "object");
        assert_eq!(JsonType::Boolean.to_string(), "boolean");
        assert_eq!(JsonValue::from("x").value_type().to_string(), "string");
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let value = sample();
        let children = value.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], &JsonValue::Number(1.0));
        assert!(children[1].is_array());
    }

    #[test]
    fn test_structural_equality_ignores_identity() {
        assert_eq!(sample(), sample());

        let mut reordered = JsonObject::new();
        reordered.insert("a".to_string(), JsonValue::from(vec![JsonValue::Null]));
        reordered.insert("b".to_string(), JsonValue::from(1));
        assert_eq!(sample(), JsonValue::Object(reordered));
    }

    #[test]
    fn test_scalars_have_no_children() {
        assert!(JsonValue::from(true).children().is_empty());
        assert!(JsonValue::Null.children().is_empty());
    }

    #[test]
    fn test_accessors() {
        let value = sample();
        assert_eq!(value.get("b").and_then(JsonValue::as_f64), Some(1.0));
        assert!(value.get("missing").is_none());
        assert_eq!(
            value.get("a").and_then(|a| a.get_index(0)),
            Some(&JsonValue::Null)
        );
        assert!(JsonValue::from(2).get("b").is_none());
    }
}
