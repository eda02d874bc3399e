//! Error types for JSON Pointer evaluation.

use std::fmt;

use super::JsonPointer;

/// Errors that can occur while walking a pointer through a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// No value exists at `pointer`, which holds the tokens consumed up to and
    /// including the one that failed.
    NotFound { pointer: JsonPointer },
}

impl PointerError {
    pub(crate) fn not_found(pointer: &JsonPointer, consumed: usize) -> Self {
        PointerError::NotFound {
            pointer: pointer.prefix(consumed),
        }
    }

    /// The partial pointer that could not be resolved.
    pub fn pointer(&self) -> &JsonPointer {
        match self {
            PointerError::NotFound { pointer } => pointer,
        }
    }
}

impl fmt::Display for PointerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerError::NotFound { pointer } => {
                write!(f, "No value found at '{}'", pointer)
            }
        }
    }
}

impl std::error::Error for PointerError {}
