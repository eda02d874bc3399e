//! Applying actions to a working copy through pointer resolution.

use super::action::{PatchAction, PatchOperation};
use super::error::{not_found, PatchError};
use crate::document::JsonValue;
use crate::pointer::{JsonPointer, Key, Location};

impl PatchAction {
    /// Applies this action to `document` in place.
    ///
    /// On failure the document may be partially edited; [`JsonPatch::apply`]
    /// works on a copy and discards it.
    ///
    /// [`JsonPatch::apply`]: super::JsonPatch::apply
    pub fn apply_to(&self, document: &mut JsonValue) -> Result<(), PatchError> {
        let path = self.path();
        match self.operation() {
            PatchOperation::Add => add(document, path, self.required_value()?.clone()),
            PatchOperation::Remove => remove(document, path).map(drop),
            PatchOperation::Replace => {
                let value = self.required_value()?.clone();
                if path.is_root() {
                    *document = value;
                    return Ok(());
                }
                remove(document, path)?;
                add(document, path, value)
            }
            PatchOperation::Move => {
                let from = self.required_from()?;
                copy(document, from, path)?;
                remove(document, from).map(drop)
            }
            PatchOperation::Copy => copy(document, self.required_from()?, path),
            PatchOperation::Test => {
                let actual = path.evaluate(document).map_err(|_| not_found(path))?;
                if actual == self.required_value()? {
                    Ok(())
                } else {
                    Err(PatchError::TestFailed { path: path.clone() })
                }
            }
        }
    }
}

fn add(document: &mut JsonValue, path: &JsonPointer, value: JsonValue) -> Result<(), PatchError> {
    match path.resolve_mut(document).map_err(|_| not_found(path))? {
        Location::Root(root) => {
            *root = value;
            Ok(())
        }
        Location::Child { parent, key } => match (parent, key) {
            (JsonValue::Object(map), Key::Name(name)) => {
                map.insert(name, value);
                Ok(())
            }
            (JsonValue::Array(items), Key::Index(index)) => {
                let index = index.min(items.len());
                items.insert(index, value);
                Ok(())
            }
            (parent, _) => Err(PatchError::CannotAdd {
                target: parent.value_type(),
            }),
        },
    }
}

fn remove(document: &mut JsonValue, path: &JsonPointer) -> Result<JsonValue, PatchError> {
    match path.resolve_mut(document).map_err(|_| not_found(path))? {
        Location::Root(_) => Err(PatchError::RemoveRoot),
        Location::Child { parent, key } => match (parent, key) {
            (JsonValue::Object(map), Key::Name(name)) => {
                map.shift_remove(&name).ok_or_else(|| not_found(path))
            }
            (JsonValue::Array(items), Key::Index(index)) if index < items.len() => {
                Ok(items.remove(index))
            }
            (JsonValue::Array(_), _) => Err(not_found(path)),
            (parent, _) => Err(PatchError::CannotRemove {
                target: parent.value_type(),
            }),
        },
    }
}

fn copy(document: &mut JsonValue, from: &JsonPointer, path: &JsonPointer) -> Result<(), PatchError> {
    let value = from.evaluate(document).map_err(|_| not_found(from))?.clone();
    add(document, path, value)
}
