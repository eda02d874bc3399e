//! JSONPath query parser and evaluator for structural JSON search.
//!
//! A path is parsed once into a [`JsonPath`] and can then be evaluated against
//! any number of documents. Parsed paths print back to equivalent source.
//!
//! # Supported Syntax
//!
//! - `$` - Root node, `@` - current node inside expressions
//! - `.property` or `['property']` - Named property access
//! - `[index]` - Array index (negative counts from the end)
//! - `[start:end:step]` - Array slicing, `[0,2,4:6]` - lists of slices
//! - `[*]` or `.*` - All children (wildcard)
//! - `..property`, `..*`, `..[...]`, `..length` - Recursive search
//! - `[?(expr)]` - Filter, `[(expr)]` - computed index
//! - `.length` - Array length, `.indexOf(expr)` - position in an array
//!
//! # Examples
//!
//! ```
//! use jsonquill::document::JsonValue;
//! use jsonquill::jsonpath::JsonPath;
//! use serde_json::json;
//!
//! let doc = JsonValue::from(json!({"items": [{"n": 1}, {"n": 7}]}));
//! let path = JsonPath::parse("$.items[?(@.n > 5)].n").unwrap();
//! assert_eq!(path.evaluate(&doc), vec![JsonValue::Number(7.0)]);
//! assert_eq!(path.to_string(), "$.items[?(@.n > 5)].n");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod parser;

use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub use ast::{ArrayQuery, JsonPath, Operator, PathRoot, SearchParameter, Slice};
pub use error::{JsonPathError, PathSyntaxError};
pub use evaluator::{Evaluator, Match};
pub use expression::{BinaryOp, Expression};
pub use parser::Parser;

impl JsonPath {
    /// Parses a JSONPath string.
    pub fn parse(source: &str) -> Result<Self, PathSyntaxError> {
        Parser::parse(source)
    }
}

impl FromStr for JsonPath {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for JsonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::parse(&source).map_err(de::Error::custom)
    }
}
