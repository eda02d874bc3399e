//! JSON Patch: ordered structural edits applied through JSON Pointers.
//!
//! A [`JsonPatch`] is applied to a copy of the input document. Actions run in
//! order and the first failure stops the patch; the caller's document is never
//! modified.
//!
//! # Examples
//!
//! ```
//! use jsonquill::document::JsonValue;
//! use jsonquill::patch::JsonPatch;
//! use serde_json::json;
//!
//! let patch: JsonPatch = serde_json::from_value(json!([
//!     {"op": "test", "path": "/version", "value": 1},
//!     {"op": "replace", "path": "/version", "value": 2},
//!     {"op": "add", "path": "/tags/-", "value": "new"}
//! ]))
//! .unwrap();
//!
//! let doc = JsonValue::from(json!({"version": 1, "tags": []}));
//! let result = patch.apply(&doc);
//! assert!(result.is_success());
//! assert_eq!(
//!     result.patched.map(serde_json::Value::from),
//!     Some(json!({"version": 2, "tags": ["new"]}))
//! );
//! ```

pub mod action;
pub mod apply;
pub mod error;

use serde::{Deserialize, Serialize};

use crate::document::JsonValue;

pub use action::{PatchAction, PatchOperation};
pub use error::PatchError;

/// An ordered list of patch actions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPatch {
    actions: Vec<PatchAction>,
}

/// The outcome of [`JsonPatch::apply`]. Exactly one field is set.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchResult {
    pub patched: Option<JsonValue>,
    pub error: Option<PatchError>,
}

impl PatchResult {
    pub fn success(patched: JsonValue) -> Self {
        Self {
            patched: Some(patched),
            error: None,
        }
    }

    pub fn failure(error: PatchError) -> Self {
        Self {
            patched: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<JsonValue, PatchError> {
        match (self.patched, self.error) {
            (_, Some(error)) => Err(error),
            (Some(patched), None) => Ok(patched),
            (None, None) => Ok(JsonValue::Null),
        }
    }
}

impl JsonPatch {
    pub fn new(actions: Vec<PatchAction>) -> Self {
        Self { actions }
    }

    pub fn push(&mut self, action: PatchAction) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[PatchAction] {
        &self.actions
    }

    /// Applies every action in order to a copy of `document`.
    pub fn apply(&self, document: &JsonValue) -> PatchResult {
        let mut working = document.clone();
        for (index, action) in self.actions.iter().enumerate() {
            if let Err(error) = action.apply_to(&mut working) {
                tracing::debug!(
                    index,
                    op = %action.operation(),
                    path = %action.path(),
                    %error,
                    "patch action failed"
                );
                return PatchResult::failure(error);
            }
            tracing::trace!(index, op = %action.operation(), path = %action.path(), "applied patch action");
        }
        tracing::debug!(actions = self.actions.len(), "patch applied");
        PatchResult::success(working)
    }
}

impl From<Vec<PatchAction>> for JsonPatch {
    fn from(actions: Vec<PatchAction>) -> Self {
        Self::new(actions)
    }
}

impl FromIterator<PatchAction> for JsonPatch {
    fn from_iter<I: IntoIterator<Item = PatchAction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for JsonPatch {
    type Item = PatchAction;
    type IntoIter = std::vec::IntoIter<PatchAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonPatch {
    type Item = &'a PatchAction;
    type IntoIter = std::slice::Iter<'a, PatchAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_patch_returns_copy() {
        let doc = JsonValue::from(json!({"a": 1}));
        let result = JsonPatch::default().apply(&doc);
        assert_eq!(result.into_result(), Ok(doc));
    }

    #[test]
    fn test_failure_discards_earlier_edits() {
        let doc = JsonValue::from(json!({"a": 1}));
        let patch: JsonPatch = vec![PatchAction::add("/b", 2), PatchAction::remove("/zz")].into();
        let result = patch.apply(&doc);
        assert!(!result.is_success());
        assert_eq!(result.patched, None);
        assert_eq!(
            result.error.map(|error| error.to_string()),
            Some("The path '/zz' does not exist.".to_string())
        );
        assert_eq!(doc, JsonValue::from(json!({"a": 1})));
    }

    #[test]
    fn test_collect_and_iterate() {
        let patch: JsonPatch = ["/a", "/b"].into_iter().map(PatchAction::remove).collect();
        assert_eq!(patch.len(), 2);
        let paths: Vec<String> = patch.actions().iter().map(|a| a.path().to_string()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
        assert_eq!(patch.into_iter().count(), 2);
    }

    #[test]
    fn test_serde_array_shape() {
        let wire = json!([
            {"op": "add", "path": "/a", "value": [1]},
            {"op": "copy", "path": "/b", "from": "/a"}
        ]);
        let patch: JsonPatch = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(patch.len(), 2);
        assert_eq!(serde_json::to_value(&patch).unwrap(), wire);
    }
}
