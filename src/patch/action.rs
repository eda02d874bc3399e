//! Patch actions and their validation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::PatchError;
use crate::document::JsonValue;
use crate::pointer::JsonPointer;

/// The `op` of a patch action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl PatchOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            PatchOperation::Add => "add",
            PatchOperation::Remove => "remove",
            PatchOperation::Replace => "replace",
            PatchOperation::Move => "move",
            PatchOperation::Copy => "copy",
            PatchOperation::Test => "test",
        }
    }

    fn needs_from(self) -> bool {
        matches!(self, PatchOperation::Move | PatchOperation::Copy)
    }

    fn needs_value(self) -> bool {
        matches!(
            self,
            PatchOperation::Add | PatchOperation::Replace | PatchOperation::Test
        )
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One edit of a [`JsonPatch`](super::JsonPatch).
///
/// Actions are validated when built, so an action always carries the fields
/// its operation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPatchAction", into = "RawPatchAction")]
pub struct PatchAction {
    operation: PatchOperation,
    path: JsonPointer,
    from: Option<JsonPointer>,
    value: Option<JsonValue>,
}

impl PatchAction {
    /// Builds an action, reporting every required field that is missing.
    pub fn new(
        operation: PatchOperation,
        path: JsonPointer,
        from: Option<JsonPointer>,
        value: Option<JsonValue>,
    ) -> Result<Self, PatchError> {
        validate(operation, Some(path), from, value)
    }

    pub fn add(path: impl Into<JsonPointer>, value: impl Into<JsonValue>) -> Self {
        Self::unchecked(PatchOperation::Add, path.into(), None, Some(value.into()))
    }

    pub fn remove(path: impl Into<JsonPointer>) -> Self {
        Self::unchecked(PatchOperation::Remove, path.into(), None, None)
    }

    pub fn replace(path: impl Into<JsonPointer>, value: impl Into<JsonValue>) -> Self {
        Self::unchecked(PatchOperation::Replace, path.into(), None, Some(value.into()))
    }

    /// Named `move_from` because `move` is a keyword.
    pub fn move_from(from: impl Into<JsonPointer>, path: impl Into<JsonPointer>) -> Self {
        Self::unchecked(PatchOperation::Move, path.into(), Some(from.into()), None)
    }

    pub fn copy(from: impl Into<JsonPointer>, path: impl Into<JsonPointer>) -> Self {
        Self::unchecked(PatchOperation::Copy, path.into(), Some(from.into()), None)
    }

    pub fn test(path: impl Into<JsonPointer>, value: impl Into<JsonValue>) -> Self {
        Self::unchecked(PatchOperation::Test, path.into(), None, Some(value.into()))
    }

    fn unchecked(
        operation: PatchOperation,
        path: JsonPointer,
        from: Option<JsonPointer>,
        value: Option<JsonValue>,
    ) -> Self {
        Self {
            operation,
            path,
            from,
            value,
        }
    }

    pub fn operation(&self) -> PatchOperation {
        self.operation
    }

    pub fn path(&self) -> &JsonPointer {
        &self.path
    }

    /// The source location of a `move` or `copy`.
    pub fn from(&self) -> Option<&JsonPointer> {
        self.from.as_ref()
    }

    /// The value of an `add`, `replace` or `test`.
    pub fn value(&self) -> Option<&JsonValue> {
        self.value.as_ref()
    }

    pub(crate) fn required_from(&self) -> Result<&JsonPointer, PatchError> {
        self.from.as_ref().ok_or(PatchError::MissingField {
            operation: self.operation,
            field: "from",
        })
    }

    pub(crate) fn required_value(&self) -> Result<&JsonValue, PatchError> {
        self.value.as_ref().ok_or(PatchError::MissingField {
            operation: self.operation,
            field: "value",
        })
    }
}

fn validate(
    operation: PatchOperation,
    path: Option<JsonPointer>,
    from: Option<JsonPointer>,
    value: Option<JsonValue>,
) -> Result<PatchAction, PatchError> {
    let mut missing = Vec::new();
    if path.is_none() {
        missing.push("path");
    }
    if operation.needs_from() && from.is_none() {
        missing.push("from");
    }
    if operation.needs_value() && value.is_none() {
        missing.push("value");
    }

    match path {
        Some(path) if missing.is_empty() => Ok(PatchAction::unchecked(operation, path, from, value)),
        _ => Err(PatchError::Invalid(
            missing
                .into_iter()
                .map(|field| PatchError::MissingField { operation, field })
                .collect(),
        )),
    }
}

/// The RFC 6902 wire shape of an action.
#[derive(Serialize, Deserialize)]
struct RawPatchAction {
    op: PatchOperation,
    #[serde(default)]
    path: Option<JsonPointer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<JsonPointer>,
    /// An explicit `null` is a value; only an absent field is `None`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    value: Option<JsonValue>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

impl TryFrom<RawPatchAction> for PatchAction {
    type Error = PatchError;

    fn try_from(raw: RawPatchAction) -> Result<Self, Self::Error> {
        validate(raw.op, raw.path, raw.from, raw.value)
    }
}

impl From<PatchAction> for RawPatchAction {
    fn from(action: PatchAction) -> Self {
        Self {
            op: action.operation,
            path: Some(action.path),
            from: action.from,
            value: action.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_accepts_complete_action() {
        let action = PatchAction::new(
            PatchOperation::Copy,
            JsonPointer::parse("/b"),
            Some(JsonPointer::parse("/a")),
            None,
        )
        .unwrap();
        assert_eq!(action, PatchAction::copy("/a", "/b"));
    }

    #[test]
    fn test_new_reports_missing_value() {
        let error = PatchAction::new(PatchOperation::Add, JsonPointer::parse("/a"), None, None)
            .unwrap_err();
        assert_eq!(
            error,
            PatchError::Invalid(vec![PatchError::MissingField {
                operation: PatchOperation::Add,
                field: "value"
            }])
        );
        assert_eq!(
            error.to_string(),
            "The 'value' field is required for 'add' operations"
        );
    }

    #[test]
    fn test_null_value_counts_as_present() {
        let action: PatchAction =
            serde_json::from_value(json!({"op": "add", "path": "/a", "value": null})).unwrap();
        assert_eq!(action.value(), Some(&JsonValue::Null));
    }

    #[test]
    fn test_deserialize_reports_every_missing_field() {
        let error = serde_json::from_value::<PatchAction>(json!({"op": "move"})).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("The 'path' field is required for 'move' operations"));
        assert!(message.contains("The 'from' field is required for 'move' operations"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_op() {
        let result = serde_json::from_value::<PatchAction>(json!({"op": "merge", "path": "/a"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_wire_shape() {
        let action = PatchAction::move_from("/a", "/b");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"op": "move", "path": "/b", "from": "/a"})
        );

        let action = PatchAction::replace("/x", JsonValue::Null);
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"op": "replace", "path": "/x", "value": null})
        );
    }
}
