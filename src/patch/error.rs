//! Error types for patch construction and application.

use std::fmt;

use super::action::PatchOperation;
use crate::document::JsonType;
use crate::pointer::JsonPointer;

/// Why a patch action could not be built or applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A field the operation requires was absent.
    MissingField {
        operation: PatchOperation,
        field: &'static str,
    },
    /// Every problem found while validating one action.
    Invalid(Vec<PatchError>),
    /// The parent of the target location is not a container.
    CannotAdd { target: JsonType },
    CannotRemove { target: JsonType },
    RemoveRoot,
    PathNotFound { path: JsonPointer },
    TestFailed { path: JsonPointer },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::MissingField { operation, field } => write!(
                f,
                "The '{}' field is required for '{}' operations",
                field, operation
            ),
            PatchError::Invalid(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", error)?;
                }
                Ok(())
            }
            PatchError::CannotAdd { target } => {
                write!(f, "Cannot add a value to a '{}'", target)
            }
            PatchError::CannotRemove { target } => {
                write!(f, "Cannot remove a value from a '{}'", target)
            }
            PatchError::RemoveRoot => f.write_str("Cannot remove the document root"),
            PatchError::PathNotFound { path } => {
                write!(f, "The path '{}' does not exist.", path)
            }
            PatchError::TestFailed { path } => {
                write!(f, "The value at '{}' is not the expected value.", path)
            }
        }
    }
}

impl std::error::Error for PatchError {}

pub(crate) fn not_found(path: &JsonPointer) -> PatchError {
    PatchError::PathNotFound { path: path.clone() }
}
