//! Pending Write Descriptions
//!
//! An [`Update`] describes one write that will be applied as part of an
//! atomic batch (see `DataService::batch_update`). Instances are immutable
//! once constructed; the payload invariant is enforced at construction time
//! rather than at commit time so a malformed batch fails before any network
//! round-trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Intended effect of a pending write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateKind {
    /// Set/overwrite the full document contents
    Create,
    /// Merge the payload fields into an existing document
    Update,
    /// Remove the document
    Delete,
}

/// Update construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// Create and Update writes carry the data to apply; Delete does not
    #[error("update of kind {kind:?} for '{path}' requires a payload")]
    MissingPayload { path: String, kind: UpdateKind },
}

/// One pending write operation targeting a single document
///
/// Invariant: an `Update` of kind [`UpdateKind::Create`] or
/// [`UpdateKind::Update`] always carries a payload; one of kind
/// [`UpdateKind::Delete`] never requires one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UpdateWire")]
pub struct Update {
    path: String,
    kind: UpdateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

/// Interchange shape for [`Update`]; validated on conversion
#[derive(Deserialize)]
struct UpdateWire {
    path: String,
    kind: UpdateKind,
    #[serde(default)]
    payload: Option<Value>,
}

impl TryFrom<UpdateWire> for Update {
    type Error = UpdateError;

    fn try_from(wire: UpdateWire) -> Result<Self, Self::Error> {
        Update::new(wire.path, wire.kind, wire.payload)
    }
}

impl Update {
    /// Build an update of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::MissingPayload`] when `kind` is Create or
    /// Update and `payload` is `None`.
    pub fn new(
        path: impl Into<String>,
        kind: UpdateKind,
        payload: Option<Value>,
    ) -> Result<Self, UpdateError> {
        let path = path.into();
        match kind {
            UpdateKind::Create | UpdateKind::Update if payload.is_none() => {
                Err(UpdateError::MissingPayload { path, kind })
            }
            _ => Ok(Self {
                path,
                kind,
                payload,
            }),
        }
    }

    /// Build a Create update (infallible: the payload is always present)
    pub fn create(path: impl Into<String>, payload: Value) -> Self {
        Self {
            path: path.into(),
            kind: UpdateKind::Create,
            payload: Some(payload),
        }
    }

    /// Build an Update (merge) update
    pub fn merge(path: impl Into<String>, payload: Value) -> Self {
        Self {
            path: path.into(),
            kind: UpdateKind::Update,
            payload: Some(payload),
        }
    }

    /// Build a Delete update
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: UpdateKind::Delete,
            payload: None,
        }
    }

    /// Target document path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Intended effect
    pub fn kind(&self) -> UpdateKind {
        self.kind
    }

    /// Data to apply (always `Some` for Create/Update)
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_without_payload_is_rejected() {
        let result = Update::new("users/alice", UpdateKind::Create, None);
        assert_eq!(
            result,
            Err(UpdateError::MissingPayload {
                path: "users/alice".to_string(),
                kind: UpdateKind::Create,
            })
        );
    }

    #[test]
    fn update_without_payload_is_rejected() {
        let result = Update::new("users/alice", UpdateKind::Update, None);
        assert!(matches!(
            result,
            Err(UpdateError::MissingPayload {
                kind: UpdateKind::Update,
                ..
            })
        ));
    }

    #[test]
    fn delete_never_requires_a_payload() {
        let without = Update::new("users/alice", UpdateKind::Delete, None).unwrap();
        assert_eq!(without.kind(), UpdateKind::Delete);
        assert!(without.payload().is_none());

        // A payload on a Delete is accepted and carried as-is
        let with = Update::new("users/alice", UpdateKind::Delete, Some(json!({"x": 1}))).unwrap();
        assert!(with.payload().is_some());
    }

    #[test]
    fn convenience_constructors_set_kind_and_payload() {
        let create = Update::create("a/1", json!({"x": 1}));
        assert_eq!(create.kind(), UpdateKind::Create);
        assert_eq!(create.payload(), Some(&json!({"x": 1})));

        let merge = Update::merge("a/1", json!({"y": 2}));
        assert_eq!(merge.kind(), UpdateKind::Update);

        let delete = Update::delete("a/1");
        assert_eq!(delete.kind(), UpdateKind::Delete);
        assert_eq!(delete.path(), "a/1");
    }

    #[test]
    fn deserialization_enforces_the_payload_invariant() {
        let valid: Result<Update, _> =
            serde_json::from_value(json!({"path": "a/1", "kind": "Create", "payload": {"x": 1}}));
        assert!(valid.is_ok());

        let invalid: Result<Update, _> =
            serde_json::from_value(json!({"path": "a/1", "kind": "Create"}));
        assert!(invalid.is_err());

        let delete: Result<Update, _> =
            serde_json::from_value(json!({"path": "a/1", "kind": "Delete"}));
        assert!(delete.is_ok());
    }
}
