//! Database Layer
//!
//! This module contains the [`DataService`] facade and everything it needs to
//! talk to the document store:
//!
//! - Credential parsing and connection setup
//! - Document/collection path addressing
//! - Equality filters and result limits
//! - Update-payload compilation (including array mutation sentinels)
//!
//! The backend is SurrealDB, reached through `surrealdb::engine::any` so the
//! credential payload decides between an embedded RocksDB directory and a
//! remote HTTP endpoint.

mod credentials;
mod data_service;
mod error;
mod mutation;
mod path;
mod query;

pub use credentials::ServiceCredentials;
pub use data_service::DataService;
pub use error::DataError;
pub use mutation::{array_remove, array_union};
pub use query::{Filter, QueryOptions};
