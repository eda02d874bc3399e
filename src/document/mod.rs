//! The JSON value model consumed by the pointer, path and patch engines.
//!
//! Values are built in memory, either programmatically or by converting a
//! `serde_json::Value`. Text parsing and printing is left to serde.

pub mod convert;
pub mod node;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use convert::DocumentSeed;
pub use node::{JsonObject, JsonType, JsonValue};

/// How repeated keys are handled when an object is built from entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeys {
    /// The last occurrence wins, keeping the position of the first.
    #[default]
    Overwrite,
    /// A repeated key is an error.
    Reject,
}

/// Errors raised while building documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A key appeared twice while duplicates are rejected.
    DuplicateKey(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::DuplicateKey(key) => {
                write!(f, "Duplicate key '{}' in object", key)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// Incrementally builds an object under a [`DuplicateKeys`] policy.
///
/// # Example
///
/// ```
/// use jsonquill::document::{DuplicateKeys, ObjectBuilder};
///
/// let mut builder = ObjectBuilder::new(DuplicateKeys::Reject);
/// builder.insert("a", 1).unwrap();
/// assert!(builder.insert("a", 2).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    entries: JsonObject,
    duplicates: DuplicateKeys,
}

impl ObjectBuilder {
    pub fn new(duplicates: DuplicateKeys) -> Self {
        Self {
            entries: JsonObject::new(),
            duplicates,
        }
    }

    /// Adds an entry, applying the duplicate-key policy.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Result<&mut Self, DocumentError> {
        let key = key.into();
        if self.duplicates == DuplicateKeys::Reject && self.entries.contains_key(&key) {
            return Err(DocumentError::DuplicateKey(key));
        }
        self.entries.insert(key, value.into());
        Ok(self)
    }

    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.entries)
    }
}

impl JsonValue {
    /// Builds an object from key-value pairs, honouring the duplicate-key policy.
    pub fn from_entries<I, K>(entries: I, duplicates: DuplicateKeys) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = (K, JsonValue)>,
        K: Into<String>,
    {
        let mut builder = ObjectBuilder::new(duplicates);
        for (key, value) in entries {
            builder.insert(key, value)?;
        }
        Ok(builder.build())
    }
}
