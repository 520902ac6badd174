//! DataService - Document-Store Facade
//!
//! Sole adapter between application code and the document database. Every
//! operation is one or more statements sent to the engine; there is no local
//! caching, retry, or error translation — engine failures surface to the
//! caller verbatim as [`DataError::Storage`].
//!
//! # Construction
//!
//! `DataService` is built explicitly from [`ServiceCredentials`] and can be
//! passed to consumers like any other handle. For callers that want a
//! process-wide instance, [`DataService::instance`] lazily initializes one
//! behind a `tokio::sync::OnceCell`; the first initialization wins and later
//! calls return the existing instance, whatever credentials they carry.
//!
//! # Examples
//!
//! ```rust,no_run
//! use docbase_core::db::{DataService, Filter, QueryOptions};
//! use serde_json::{json, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = DataService::from_credentials_json(
//!         r#"{"endpoint": "rocksdb://./data", "namespace": "docbase", "database": "main"}"#,
//!     )
//!     .await?;
//!
//!     service.set_document("users/alice", &json!({"name": "Alice"})).await?;
//!     let records = service
//!         .get_collection::<Value>("users", Some(Filter::equals("name", "Alice")), None)
//!         .await?;
//!     println!("{} match", records.len());
//!     Ok(())
//! }
//! ```

use crate::db::credentials::ServiceCredentials;
use crate::db::error::DataError;
use crate::db::mutation::{self, SetClause};
use crate::db::path;
use crate::db::query::{Filter, QueryOptions};
use crate::models::{DocumentRef, Record, Update, UpdateKind};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use surrealdb::sql::Thing;
use surrealdb::Surreal;
use tokio::sync::OnceCell;

/// Process-wide instance backing [`DataService::instance`]
static INSTANCE: OnceCell<DataService> = OnceCell::const_new();

/// Internal row shape returned by the engine: record id plus the stored fields
#[derive(Debug, Deserialize)]
struct DocumentRow {
    id: Thing,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Document-store facade
///
/// Cheap to clone; all operations take `&self` and are safe to issue
/// concurrently — the only shared state is the engine connection handle.
#[derive(Debug, Clone)]
pub struct DataService {
    /// Engine connection (embedded RocksDB or remote HTTP, per credentials)
    db: Arc<Surreal<Any>>,
    /// Endpoint this service connected to
    endpoint: String,
}

impl DataService {
    /// Connect using already-parsed credentials
    ///
    /// Remote endpoints sign in as root when a username/password pair is
    /// present; embedded endpoints skip authentication.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Storage`] when the connection, sign-in, or
    /// namespace selection fails.
    pub async fn connect(credentials: ServiceCredentials) -> Result<Self, DataError> {
        let db = any::connect(credentials.endpoint.as_str()).await?;

        if let (Some(username), Some(password)) = (&credentials.username, &credentials.password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await?;
        }

        db.use_ns(credentials.namespace.as_str())
            .use_db(credentials.database.as_str())
            .await?;

        tracing::debug!(endpoint = %credentials.endpoint, "connected to document store");

        Ok(Self {
            db: Arc::new(db),
            endpoint: credentials.endpoint,
        })
    }

    /// Endpoint this service connected to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parse a credential JSON blob and connect
    ///
    /// # Errors
    ///
    /// Returns [`DataError::CredentialParse`] on malformed input, otherwise
    /// whatever [`DataService::connect`] returns.
    pub async fn from_credentials_json(raw: &str) -> Result<Self, DataError> {
        let credentials = ServiceCredentials::from_json(raw)?;
        Self::connect(credentials).await
    }

    /// Process-wide instance, initialized exactly once
    ///
    /// The first call connects with the supplied credentials; every later
    /// call returns that same instance. Calling again with different
    /// credentials does NOT reconnect — the supplied credentials are ignored
    /// and a warning is logged. Known caller-visible surprise, kept for
    /// compatibility; prefer [`DataService::connect`] and dependency
    /// injection where practical.
    pub async fn instance(credentials_json: &str) -> Result<&'static DataService, DataError> {
        if let Some(service) = INSTANCE.get() {
            match ServiceCredentials::from_json(credentials_json) {
                Ok(credentials) if credentials.endpoint == service.endpoint => {
                    tracing::debug!("data service already initialized");
                }
                _ => {
                    tracing::warn!(
                        "data service already initialized; supplied credentials ignored"
                    );
                }
            }
            return Ok(service);
        }
        INSTANCE
            .get_or_try_init(|| async { Self::from_credentials_json(credentials_json).await })
            .await
    }

    /// Fetch all documents in a collection
    ///
    /// # Arguments
    ///
    /// * `path` - Collection path
    /// * `filter` - Optional single equality predicate
    /// * `options` - Optional result-count limit
    ///
    /// # Returns
    ///
    /// One [`Record`] per document, each carrying the storage-assigned `id`,
    /// a [`DocumentRef`] handle, and an untouched `raw_data` copy of the
    /// stored payload. Order is whatever the engine returns for an unordered
    /// query — not stable across calls.
    pub async fn get_collection<T>(
        &self,
        path: &str,
        filter: Option<Filter>,
        options: Option<QueryOptions>,
    ) -> Result<Vec<Record<T>>, DataError>
    where
        T: DeserializeOwned,
    {
        let table = path::collection_table(path)?;
        let limit = options.and_then(|o| o.limit);

        let mut sql = String::from("SELECT * FROM type::table($tb)");
        if let Some(filter) = &filter {
            mutation::validate_field(&filter.field)?;
            sql.push_str(&format!(" WHERE {} = $filter_value", filter.field));
        }
        if limit.is_some() {
            sql.push_str(" LIMIT $limit");
        }
        sql.push(';');

        let mut query = self.db.query(sql).bind(("tb", table.clone()));
        if let Some(filter) = filter {
            query = query.bind(("filter_value", filter.equals));
        }
        if let Some(limit) = limit {
            query = query.bind(("limit", limit as i64));
        }

        let mut response = query.await?;
        let rows: Vec<DocumentRow> = response.take(0)?;

        rows.into_iter()
            .map(|row| materialize(&table, row))
            .collect()
    }

    /// Same fetch as [`get_collection`](Self::get_collection), folded into a
    /// map keyed by each record's `id`
    ///
    /// Ids are unique within a collection, so keys never collide; insertion
    /// order follows the underlying fetch order.
    pub async fn get_collection_as_map<T>(
        &self,
        path: &str,
        filter: Option<Filter>,
        options: Option<QueryOptions>,
    ) -> Result<IndexMap<String, Record<T>>, DataError>
    where
        T: DeserializeOwned,
    {
        let records = self.get_collection(path, filter, options).await?;
        Ok(records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect())
    }

    /// Fetch one document by full path
    ///
    /// Returns `Ok(None)` when the document does not exist — absence is a
    /// value here, never an error.
    pub async fn get_document<T>(&self, path: &str) -> Result<Option<T>, DataError>
    where
        T: DeserializeOwned,
    {
        let (collection, id) = path::split_document_path(path)?;
        let mut response = self
            .db
            .query("SELECT * FROM type::thing($tb, $id);")
            .bind(("tb", collection))
            .bind(("id", id))
            .await?;

        let rows: Vec<DocumentRow> = response.take(0)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(Value::Object(row.fields))?)),
            None => Ok(None),
        }
    }

    /// Fully overwrite a document's contents (replace, not merge)
    ///
    /// Creates the document when it does not exist; fields present before
    /// but absent from `data` disappear.
    pub async fn set_document<T>(&self, path: &str, data: &T) -> Result<(), DataError>
    where
        T: Serialize,
    {
        let (collection, id) = path::split_document_path(path)?;
        let value = serde_json::to_value(data)?;

        tracing::debug!(path, "set document");
        self.db
            .query("UPSERT type::thing($tb, $id) CONTENT $data;")
            .bind(("tb", collection))
            .bind(("id", id))
            .bind(("data", value))
            .await?
            .check()?;
        Ok(())
    }

    /// Merge fields into an existing document
    ///
    /// Each top-level field named in `data` is replaced; fields not named
    /// are preserved. Sentinel values built with
    /// [`array_union`](crate::db::array_union) /
    /// [`array_remove`](crate::db::array_remove) compile to the engine's
    /// native array mutations.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DocumentNotFound`] when the target does not
    /// exist, [`DataError::PayloadNotObject`] when `data` does not serialize
    /// to a JSON object.
    pub async fn update_document<T>(&self, path: &str, data: &T) -> Result<(), DataError>
    where
        T: Serialize,
    {
        let (collection, id) = path::split_document_path(path)?;
        let payload = serde_json::to_value(data)?;
        let clause = mutation::compile_set(&payload, "f")?;

        let sql = if clause.assignments.is_empty() {
            String::from("UPDATE type::thing($tb, $id);")
        } else {
            format!("UPDATE type::thing($tb, $id) SET {};", clause.assignments)
        };

        let mut query = self
            .db
            .query(sql)
            .bind(("tb", collection))
            .bind(("id", id));
        for (name, value) in clause.bindings {
            query = query.bind((name, value));
        }

        tracing::debug!(path, "update document");
        let mut response = query.await?.check()?;
        let rows: Vec<DocumentRow> = response.take(0)?;
        if rows.is_empty() {
            return Err(DataError::document_not_found(path));
        }
        Ok(())
    }

    /// Remove a document; absent targets are not an error
    pub async fn delete_document(&self, path: &str) -> Result<(), DataError> {
        let (collection, id) = path::split_document_path(path)?;

        tracing::debug!(path, "delete document");
        self.db
            .query("DELETE type::thing($tb, $id);")
            .bind(("tb", collection))
            .bind(("id", id))
            .await?
            .check()?;
        Ok(())
    }

    /// Apply every [`Update`] as one atomic transaction
    ///
    /// All effects commit together or none do. Dispatch by kind: Create →
    /// set/overwrite, Update → per-field merge, Delete → remove. An empty
    /// sequence is a no-op.
    pub async fn batch_update(&self, updates: &[Update]) -> Result<(), DataError> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut sql = String::from("BEGIN TRANSACTION;");
        let mut bindings: Vec<(String, Value)> = Vec::new();

        for (i, update) in updates.iter().enumerate() {
            let (collection, id) = path::split_document_path(update.path())?;
            bindings.push((format!("tb{i}"), Value::String(collection)));
            bindings.push((format!("id{i}"), Value::String(id)));

            match update.kind() {
                UpdateKind::Create => {
                    sql.push_str(&format!(" UPSERT type::thing($tb{i}, $id{i}) CONTENT $val{i};"));
                    // Construction invariant guarantees a payload for Create
                    let payload = update.payload().cloned().unwrap_or(Value::Null);
                    bindings.push((format!("val{i}"), payload));
                }
                UpdateKind::Update => {
                    let payload = update.payload().cloned().unwrap_or(Value::Null);
                    let SetClause {
                        assignments,
                        bindings: clause_bindings,
                    } = mutation::compile_set(&payload, &format!("u{i}_"))?;
                    if assignments.is_empty() {
                        sql.push_str(&format!(" UPDATE type::thing($tb{i}, $id{i});"));
                    } else {
                        sql.push_str(&format!(
                            " UPDATE type::thing($tb{i}, $id{i}) SET {assignments};"
                        ));
                    }
                    bindings.extend(clause_bindings);
                }
                UpdateKind::Delete => {
                    sql.push_str(&format!(" DELETE type::thing($tb{i}, $id{i});"));
                }
            }
        }

        sql.push_str(" COMMIT TRANSACTION;");

        let mut query = self.db.query(sql);
        for (name, value) in bindings {
            query = query.bind((name, value));
        }

        tracing::debug!(count = updates.len(), "commit batch update");
        query.await?.check()?;
        Ok(())
    }
}

/// Wrap an engine row into the public envelope
fn materialize<T>(collection: &str, row: DocumentRow) -> Result<Record<T>, DataError>
where
    T: DeserializeOwned,
{
    let id = row.id.id.to_raw();
    let raw_data = Value::Object(row.fields);
    let data = serde_json::from_value(raw_data.clone())?;
    Ok(Record {
        doc_ref: DocumentRef::new(collection, id.as_str()),
        id,
        raw_data,
        data,
    })
}
