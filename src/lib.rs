//! JSONQuill - query, address and edit JSON documents.
//!
//! - [`jsonpath`] - JSONPath queries with a filter expression language
//! - [`pointer`] - JSON Pointer (RFC 6901) resolution
//! - [`patch`] - JSON Patch (RFC 6902) application on top of pointers
//! - [`document`] - the ordered JSON value tree all three operate on
//! - [`config`] - user configuration
//!
//! # Example
//!
//! ```
//! use jsonquill::{JsonPatch, JsonPath, JsonPointer, JsonValue, PatchAction};
//! use serde_json::json;
//!
//! let doc = JsonValue::from(json!({"store": {"book": [{"price": 8}, {"price": 12}]}}));
//!
//! let cheap = JsonPath::parse("$..book[?(@.price < 10)]").unwrap();
//! assert_eq!(cheap.evaluate(&doc).len(), 1);
//!
//! let pointer = JsonPointer::parse("/store/book/1/price");
//! assert_eq!(pointer.evaluate(&doc), Ok(&JsonValue::Number(12.0)));
//!
//! let patch: JsonPatch = vec![PatchAction::replace("/store/book/1/price", 9)].into();
//! let patched = patch.apply(&doc).into_result().unwrap();
//! assert_eq!(cheap.evaluate(&patched).len(), 2);
//! ```

pub mod config;
pub mod document;
pub mod jsonpath;
pub mod patch;
pub mod pointer;

pub use document::{JsonValue, JsonType};
pub use jsonpath::JsonPath;
pub use patch::{JsonPatch, PatchAction, PatchResult};
pub use pointer::JsonPointer;
