//! Data-Access Error Types
//!
//! The facade performs no local recovery: every engine failure surfaces to
//! the caller unchanged through [`DataError::Storage`]. The remaining
//! variants are raised locally, before anything is sent over the wire.

use crate::models::UpdateError;
use thiserror::Error;

/// Data-access operation errors
#[derive(Error, Debug)]
pub enum DataError {
    /// Credential string failed to parse as structured data
    #[error("failed to parse service credentials: {source}")]
    CredentialParse {
        #[source]
        source: serde_json::Error,
    },

    /// Path does not address a document or collection
    #[error("invalid path: '{path}'")]
    InvalidPath { path: String },

    /// Field name unusable in a filter or update statement
    #[error("invalid field name: '{field}'")]
    InvalidField { field: String },

    /// Merge payloads must be JSON objects (field name to value)
    #[error("update payload must be a JSON object")]
    PayloadNotObject,

    /// Merge targeted a document that does not exist
    #[error("document not found: '{path}'")]
    DocumentNotFound { path: String },

    /// Pending-write construction invariant violated
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// Engine failure, passed through verbatim
    #[error("storage operation failed: {0}")]
    Storage(#[from] surrealdb::Error),

    /// Payload serialization or record deserialization failed
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DataError {
    /// Create a credential parse error
    pub fn credential_parse(source: serde_json::Error) -> Self {
        Self::CredentialParse { source }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create an invalid field name error
    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    /// Create a document-not-found error
    pub fn document_not_found(path: impl Into<String>) -> Self {
        Self::DocumentNotFound { path: path.into() }
    }
}
