//! Service Credentials
//!
//! Connection settings arrive as one structured JSON blob (service-account
//! style), typically injected through the environment or a secret store.
//! Malformed input fails immediately at parse time, before any connection
//! attempt.

use crate::db::error::DataError;
use serde::Deserialize;

/// Parsed credential payload for the document store
///
/// The endpoint selects the engine: `rocksdb://<dir>` for an embedded
/// database, `http://host:port` (or `https://`) for a remote server. Remote
/// endpoints sign in with the root username/password pair; embedded ones
/// leave both unset.
///
/// # Examples
///
/// ```
/// use docbase_core::db::ServiceCredentials;
///
/// let credentials = ServiceCredentials::from_json(
///     r#"{
///         "endpoint": "http://127.0.0.1:8000",
///         "namespace": "docbase",
///         "database": "main",
///         "username": "root",
///         "password": "root"
///     }"#,
/// ).unwrap();
/// assert_eq!(credentials.namespace, "docbase");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    /// Engine endpoint, e.g. `rocksdb:///var/data/docbase` or `http://127.0.0.1:8000`
    pub endpoint: String,
    /// Namespace to select after connecting
    pub namespace: String,
    /// Database to select after connecting
    pub database: String,
    /// Root username for remote endpoints
    #[serde(default)]
    pub username: Option<String>,
    /// Root password for remote endpoints
    #[serde(default)]
    pub password: Option<String>,
}

impl ServiceCredentials {
    /// Parse a credential JSON blob
    ///
    /// # Errors
    ///
    /// Returns [`DataError::CredentialParse`] when the string is not valid
    /// JSON or is missing required fields.
    pub fn from_json(raw: &str) -> Result<Self, DataError> {
        serde_json::from_str(raw).map_err(DataError::credential_parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_embedded_endpoint_without_auth() {
        let credentials = ServiceCredentials::from_json(
            r#"{"endpoint": "rocksdb:///tmp/db", "namespace": "ns", "database": "db"}"#,
        )
        .unwrap();
        assert_eq!(credentials.endpoint, "rocksdb:///tmp/db");
        assert!(credentials.username.is_none());
        assert!(credentials.password.is_none());
    }

    #[test]
    fn malformed_json_fails_at_parse_time() {
        let result = ServiceCredentials::from_json("not json at all");
        assert!(matches!(result, Err(DataError::CredentialParse { .. })));
    }

    #[test]
    fn missing_required_fields_fail_at_parse_time() {
        let result = ServiceCredentials::from_json(r#"{"endpoint": "rocksdb:///tmp/db"}"#);
        assert!(matches!(result, Err(DataError::CredentialParse { .. })));
    }
}
