//! Error types for JSONPath parsing.

use std::fmt;

use super::ast::JsonPath;

/// Errors that can occur during JSONPath parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    /// Unexpected token at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { position: usize, message: String },
}

impl JsonPathError {
    /// Byte offset of the error, or `None` when input ran out.
    pub fn position(&self) -> Option<usize> {
        match self {
            JsonPathError::UnexpectedToken { position, .. }
            | JsonPathError::InvalidSyntax { position, .. } => Some(*position),
            JsonPathError::UnexpectedEnd { .. } => None,
        }
    }
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPathError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            JsonPathError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            JsonPathError::InvalidSyntax { position, message } => {
                write!(
                    f,
                    "Invalid JSONPath syntax at position {}: {}",
                    position, message
                )
            }
        }
    }
}

impl std::error::Error for JsonPathError {}

/// A failed [`JsonPath::parse`], carrying whatever was parsed before the error.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSyntaxError {
    path: JsonPath,
    error: JsonPathError,
}

impl PathSyntaxError {
    pub(crate) fn new(path: JsonPath, error: JsonPathError) -> Self {
        Self { path, error }
    }

    /// The operators parsed before the error.
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// The positioned parse error.
    pub fn error(&self) -> &JsonPathError {
        &self.error
    }

    pub fn position(&self) -> Option<usize> {
        self.error.position()
    }
}

impl fmt::Display for PathSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (parsed so far: '{}')", self.error, self.path)
    }
}

impl std::error::Error for PathSyntaxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
