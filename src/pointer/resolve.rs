//! Pointer resolution for in-place edits.
//!
//! Patch operations need the container that holds the addressed location, not
//! the value itself. `resolve_mut` walks every token but the last with read
//! semantics and reports the parent together with the final key or index.

use super::{parse_index, JsonPointer, PointerError};
use crate::document::JsonValue;

/// The final step of a resolved pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// An object member name. Also used when the parent is a scalar, so the
    /// caller can report the parent's type.
    Name(String),
    /// An array position. May equal or exceed the array length: `-` resolves
    /// to the append position and numeric tokens are not bounds checked.
    Index(usize),
}

/// Where a pointer lands inside a mutable document.
#[derive(Debug)]
pub enum Location<'a> {
    /// The empty pointer: the document itself.
    Root(&'a mut JsonValue),
    /// A member of `parent`.
    Child {
        parent: &'a mut JsonValue,
        key: Key,
    },
}

impl JsonPointer {
    /// Resolves this pointer for mutation.
    ///
    /// Unlike [`JsonPointer::evaluate`], a final `-` token against an array
    /// means "one past the end" rather than "the last element".
    pub fn resolve_mut<'a>(&self, root: &'a mut JsonValue) -> Result<Location<'a>, PointerError> {
        let Some((last, ancestors)) = self.tokens.split_last() else {
            return Ok(Location::Root(root));
        };

        let mut current = root;
        for (consumed, token) in ancestors.iter().enumerate() {
            current = step_mut(current, token)
                .ok_or_else(|| PointerError::not_found(self, consumed + 1))?;
        }

        let key = match &*current {
            JsonValue::Array(items) if last == "-" => Key::Index(items.len()),
            JsonValue::Array(_) => Key::Index(
                parse_index(last).ok_or_else(|| PointerError::not_found(self, self.tokens.len()))?,
            ),
            _ => Key::Name(last.clone()),
        };

        Ok(Location::Child {
            parent: current,
            key,
        })
    }
}

fn step_mut<'a>(value: &'a mut JsonValue, token: &str) -> Option<&'a mut JsonValue> {
    match value {
        JsonValue::Object(map) => map.get_mut(token),
        JsonValue::Array(items) => {
            if token == "-" {
                items.last_mut()
            } else {
                parse_index(token).and_then(move |index| items.get_mut(index))
            }
        }
        _ => None,
    }
}
