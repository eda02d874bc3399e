//! serde integration for [`JsonValue`].
//!
//! `JsonValue` serializes like any other JSON value, so documents can be read
//! and written with `serde_json` (or any other serde format) and embedded in
//! larger serde models. Conversions to and from `serde_json::Value` keep object
//! key order.

use std::fmt;

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::node::{JsonObject, JsonValue};
use super::{DocumentError, DuplicateKeys};

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

fn as_integer(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// Deserializes a [`JsonValue`] under a duplicate-key policy.
///
/// The plain `Deserialize` impl overwrites repeated keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSeed(pub DuplicateKeys);

impl<'de> DeserializeSeed<'de> for DocumentSeed {
    type Value = JsonValue;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        deserializer.deserialize_any(JsonValueVisitor { duplicates: self.0 })
    }
}

struct JsonValueVisitor {
    duplicates: DuplicateKeys,
}

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<JsonValue, E> {
        Ok(JsonValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<JsonValue, E> {
        Ok(JsonValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<JsonValue, E> {
        Ok(JsonValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<JsonValue, E> {
        Ok(JsonValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<JsonValue, D::Error> {
        DocumentSeed(self.duplicates).deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<JsonValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(DocumentSeed(self.duplicates))? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<JsonValue, A::Error> {
        let mut map = JsonObject::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            let value = access.next_value_seed(DocumentSeed(self.duplicates))?;
            if self.duplicates == DuplicateKeys::Reject && map.contains_key(&key) {
                return Err(de::Error::custom(DocumentError::DuplicateKey(key)));
            }
            map.insert(key, value);
        }
        Ok(JsonValue::Object(map))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DocumentSeed(DuplicateKeys::Overwrite).deserialize(deserializer)
    }
}

impl JsonValue {
    /// Parses JSON text, applying `duplicates` to repeated object keys.
    pub fn from_json_str(text: &str, duplicates: DuplicateKeys) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let value = DocumentSeed(duplicates).deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(value)
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Boolean(b),
            serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Boolean(b) => serde_json::Value::Bool(b),
            JsonValue::Number(n) => match as_integer(n) {
                Some(i) => serde_json::Value::from(i),
                // Non-finite numbers have no JSON representation.
                None => serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_serde_json_keeps_key_order() {
        let value = JsonValue::from(json!({"z": 1, "a": [true, null, "s"], "m": {"x": 2.5}}));
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(
            value.get("a"),
            Some(&JsonValue::Array(vec![
                JsonValue::Boolean(true),
                JsonValue::Null,
                JsonValue::String("s".to_string()),
            ]))
        );
    }

    #[test]
    fn test_integers_serialize_without_fraction() {
        let value = JsonValue::from(json!({"count": 3, "ratio": 0.5}));
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"count":3,"ratio":0.5}"#);
    }

    #[test]
    fn test_deserialize_from_text() {
        let value: JsonValue = serde_json::from_str(r#"[1, {"b": false}]"#).unwrap();
        assert_eq!(value, JsonValue::from(json!([1, {"b": false}])));
    }

    #[test]
    fn test_back_to_serde_json() {
        let original = json!({"a": [1, 2.25, "x"], "b": null});
        let converted = serde_json::Value::from(JsonValue::from(original.clone()));
        assert_eq!(converted, original);
    }

    #[test]
    fn test_from_json_str_rejects_duplicates() {
        let error = JsonValue::from_json_str(r#"{"a": 1, "b": {"a": 2, "a": 3}}"#, DuplicateKeys::Reject)
            .unwrap_err();
        assert!(error.to_string().contains("Duplicate key 'a' in object"));
    }

    #[test]
    fn test_from_json_str_overwrites_duplicates() {
        let value = JsonValue::from_json_str(r#"{"a": 1, "a": 2}"#, DuplicateKeys::Overwrite).unwrap();
        assert_eq!(value, JsonValue::from(json!({"a": 2})));
    }

    #[test]
    fn test_from_json_str_rejects_trailing_input() {
        assert!(JsonValue::from_json_str("[1] 2", DuplicateKeys::Overwrite).is_err());
    }
}
