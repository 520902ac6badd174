//! Fetched Document Envelope
//!
//! Every document read through `DataService` comes back wrapped in a
//! [`Record`] that carries the storage-assigned id, a [`DocumentRef`] handle
//! usable for later writes, and an untouched copy of the stored payload
//! alongside the typed view.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque handle to a document's storage location
///
/// Holds the collection path and the document id; `path()` rebuilds the full
/// document path accepted by every `DataService` write operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    collection: String,
    id: String,
}

impl DocumentRef {
    pub(crate) fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Collection path this document lives under
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Storage-assigned document id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full document path (`collection/id`)
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A fetched document: typed view plus storage metadata
#[derive(Debug, Clone)]
pub struct Record<T> {
    /// Storage-assigned document id
    pub id: String,
    /// Handle back to the document's storage location
    pub doc_ref: DocumentRef,
    /// Untouched copy of the stored payload
    pub raw_data: Value,
    /// Stored payload deserialized into the caller's shape
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ref_rebuilds_the_full_path() {
        let doc_ref = DocumentRef::new("teams/red/members", "bob");
        assert_eq!(doc_ref.collection(), "teams/red/members");
        assert_eq!(doc_ref.id(), "bob");
        assert_eq!(doc_ref.path(), "teams/red/members/bob");
        assert_eq!(doc_ref.to_string(), "teams/red/members/bob");
    }
}
