//! JSON Pointer (RFC 6901) parsing and evaluation.
//!
//! A pointer addresses exactly one location in a document through a sequence
//! of reference tokens.
//!
//! # Supported Syntax
//!
//! - `` (empty) - the whole document
//! - `/foo/0` - key `foo`, then element `0`
//! - `/a~1b` - key `a/b` (`~1` escapes `/`, `~0` escapes `~`)
//! - `/items/-` - last element when reading, append position when patching
//! - `#/foo%20bar` - URI fragment form, percent-decoded
//!
//! # Examples
//!
//! ```
//! use jsonquill::document::JsonValue;
//! use jsonquill::pointer::JsonPointer;
//! use serde_json::json;
//!
//! let doc = JsonValue::from(json!({"a": {"b": [10, 20]}}));
//! let pointer = JsonPointer::parse("/a/b/1");
//! assert_eq!(pointer.evaluate(&doc), Ok(&JsonValue::Number(20.0)));
//!
//! let missing = JsonPointer::parse("/a/c/0");
//! assert_eq!(
//!     missing.evaluate(&doc).unwrap_err().to_string(),
//!     "No value found at '/a/c'"
//! );
//! ```

pub mod error;
pub mod resolve;

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::document::JsonValue;

pub use error::PointerError;
pub use resolve::{Key, Location};

/// Characters escaped when a pointer is printed in URI fragment form.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A parsed JSON Pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
    uses_hash: bool,
}

impl JsonPointer {
    /// The pointer to the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a pointer from already unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            uses_hash: false,
        }
    }

    /// Parses a pointer string.
    ///
    /// Parsing never fails: the segment before the first `/` is dropped (it is
    /// normally empty, or `#` for the fragment form) and every other segment
    /// becomes a token. Malformed pointers simply fail to resolve.
    pub fn parse(source: &str) -> Self {
        let mut segments = source.split('/');
        let uses_hash = segments.next() == Some("#");
        let tokens = segments
            .map(|segment| unescape(segment, uses_hash))
            .collect();
        Self { tokens, uses_hash }
    }

    /// Returns the unescaped reference tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns true if this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true if the pointer was written in URI fragment form.
    pub fn uses_hash(&self) -> bool {
        self.uses_hash
    }

    /// Switches between the plain and URI fragment forms.
    pub fn with_hash(mut self, uses_hash: bool) -> Self {
        self.uses_hash = uses_hash;
        self
    }

    /// Appends an unescaped token.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Returns a copy of this pointer with one more token.
    pub fn clone_and_append(&self, token: impl Into<String>) -> Self {
        let mut pointer = self.clone();
        pointer.push(token);
        pointer
    }

    /// Returns the pointer to the parent location, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.tokens.split_last()?;
        Some(Self {
            tokens: parent.to_vec(),
            uses_hash: self.uses_hash,
        })
    }

    /// Returns the last token, or `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Returns the first `len` tokens as a pointer of the same form.
    pub(crate) fn prefix(&self, len: usize) -> Self {
        Self {
            tokens: self.tokens[..len.min(self.tokens.len())].to_vec(),
            uses_hash: self.uses_hash,
        }
    }

    /// Resolves this pointer against `root`.
    ///
    /// On an array, `-` reads the last element. A numeric token must be `0` or
    /// have no leading zero. The error carries the tokens consumed up to and
    /// including the first one that could not be resolved.
    pub fn evaluate<'a>(&self, root: &'a JsonValue) -> Result<&'a JsonValue, PointerError> {
        let mut current = root;
        for (consumed, token) in self.tokens.iter().enumerate() {
            current = match step(current, token) {
                Some(next) => next,
                None => {
                    let error = PointerError::not_found(self, consumed + 1);
                    tracing::trace!(pointer = %self, %error, "pointer evaluation failed");
                    return Err(error);
                }
            };
        }
        Ok(current)
    }
}

/// Moves one token down from `value` with read semantics.
fn step<'a>(value: &'a JsonValue, token: &str) -> Option<&'a JsonValue> {
    match value {
        JsonValue::Object(map) => map.get(token),
        JsonValue::Array(items) if token == "-" => items.last(),
        JsonValue::Array(items) => parse_index(token).and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Parses an array index token: ASCII digits with no leading zero.
pub(crate) fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

fn unescape(segment: &str, fragment: bool) -> String {
    let decoded = if fragment {
        percent_decode_str(segment).decode_utf8_lossy()
    } else {
        Cow::Borrowed(segment)
    };
    if decoded.contains('~') {
        decoded.replace("~1", "/").replace("~0", "~")
    } else {
        decoded.into_owned()
    }
}

fn escape(token: &str) -> Cow<'_, str> {
    if token.contains('~') || token.contains('/') {
        Cow::Owned(token.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(token)
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uses_hash {
            f.write_str("#")?;
        }
        for token in &self.tokens {
            f.write_str("/")?;
            let escaped = escape(token);
            if self.uses_hash {
                write!(f, "{}", utf8_percent_encode(&escaped, FRAGMENT))?;
            } else {
                f.write_str(&escaped)?;
            }
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for JsonPointer {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JsonPointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Ok(Self::parse(&source))
    }
}

impl JsonValue {
    /// Looks up a value by JSON Pointer string.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonquill::document::JsonValue;
    /// use serde_json::json;
    ///
    /// let doc = JsonValue::from(json!({"a/b": 1}));
    /// assert_eq!(doc.pointer("/a~1b"), Some(&JsonValue::Number(1.0)));
    /// assert_eq!(doc.pointer("/missing"), None);
    /// ```
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        JsonPointer::parse(pointer).evaluate(self).ok()
    }
}
